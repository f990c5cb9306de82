//! Value counts for the statistics charts.

use crate::catalog::{Attribute, SurveyRow};
use indexmap::IndexMap;
use serde::Serialize;

pub type ValueCounts = IndexMap<String, usize>;

/// Per-attribute value counts, keyed by the survey column name in JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    #[serde(rename = "整備")]
    pub improvement: ValueCounts,
    #[serde(rename = "目的")]
    pub purpose: ValueCounts,
    #[serde(rename = "発意")]
    pub initiative: ValueCounts,
    #[serde(rename = "時期")]
    pub period: ValueCounts,
}

impl Statistics {
    pub fn counts(&self, attribute: Attribute) -> Option<&ValueCounts> {
        match attribute {
            Attribute::Improvement => Some(&self.improvement),
            Attribute::Purpose => Some(&self.purpose),
            Attribute::Initiative => Some(&self.initiative),
            Attribute::Period => Some(&self.period),
            _ => None,
        }
    }
}

pub fn count_values(rows: &[SurveyRow], attribute: Attribute) -> ValueCounts {
    let mut counts = ValueCounts::new();
    for value in rows.iter().filter_map(|r| r.attribute(attribute)) {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Counts rows per distinct value (first-seen order) for the charted attributes.
pub fn attribute_statistics(rows: &[SurveyRow]) -> Statistics {
    Statistics {
        improvement: count_values(rows, Attribute::Improvement),
        purpose: count_values(rows, Attribute::Purpose),
        initiative: count_values(rows, Attribute::Initiative),
        period: count_values(rows, Attribute::Period),
    }
}
