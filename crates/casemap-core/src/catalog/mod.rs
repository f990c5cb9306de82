//! Survey rows → one summary per case.

pub mod row;
pub mod summary;

pub use row::{Attribute, SurveyRow};
pub use summary::{CaseSummary, category_label};

use crate::config::{CasemapConfig, invalid};
use crate::error::Result;
use casemap_layout::{CoordinateCheck, LatLng, validate_coordinates};
use indexmap::IndexSet;
use std::collections::BTreeMap;

/// Placeholder the survey uses for unknown values. Statements equal to it are dropped.
pub const UNKNOWN: &str = "不明";
pub const NO_REPRESENTATIVE_STATEMENT: &str = "代表的な発言内容なし";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogOptions {
    /// Where area-wide cases are pinned.
    pub area_center: LatLng,
    /// Case ids with this prefix describe the whole district; without coordinates they are pinned
    /// at `area_center` instead of being left off the map. Empty disables the fallback.
    pub area_wide_prefix: String,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            area_center: LatLng {
                latitude: 34.240,
                longitude: 132.550,
            },
            area_wide_prefix: "R".to_string(),
        }
    }
}

impl CatalogOptions {
    pub fn from_config(config: &CasemapConfig) -> Result<Self> {
        let mut opts = Self::default();
        for (key, slot) in [
            (
                "catalog.areaCenter.latitude",
                &mut opts.area_center.latitude,
            ),
            (
                "catalog.areaCenter.longitude",
                &mut opts.area_center.longitude,
            ),
        ] {
            if let Some(v) = config.get(key) {
                *slot = v
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .ok_or_else(|| invalid(key, "expected a finite number", v))?;
            }
        }
        if let Some(v) = config.get("catalog.areaWidePrefix") {
            opts.area_wide_prefix = v
                .as_str()
                .ok_or_else(|| invalid("catalog.areaWidePrefix", "expected a string", v))?
                .to_string();
        }
        Ok(opts)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn summarize(id: &str, rows: &[&SurveyRow], options: &CatalogOptions) -> CaseSummary {
    let mut attributes = indexmap::IndexMap::new();
    for attribute in Attribute::ALL {
        let values = distinct(rows.iter().filter_map(|r| r.attribute(attribute)));
        if !values.is_empty() {
            attributes.insert(attribute, values);
        }
    }

    let statements = rows
        .iter()
        .filter_map(|r| r.statement.as_deref())
        .filter(|s| *s != UNKNOWN)
        .map(str::to_string)
        .collect();

    let located = rows
        .iter()
        .find_map(|r| match validate_coordinates(r.latitude, r.longitude) {
            CoordinateCheck::Valid(at) => Some((at, *r)),
            CoordinateCheck::Absent => None,
        });
    let area_wide_fallback =
        !options.area_wide_prefix.is_empty() && id.starts_with(&options.area_wide_prefix);
    let (position, image_url, is_area_wide) = match located {
        Some((at, row)) => (Some(at), row.photo.clone(), false),
        None if area_wide_fallback => (Some(options.area_center), None, true),
        None => (None, None, false),
    };

    let category = id.chars().next().map(String::from).unwrap_or_default();

    CaseSummary {
        id: id.to_string(),
        name: rows
            .iter()
            .find_map(|r| r.case_name.clone())
            .unwrap_or_else(|| format!("事例 {id}")),
        subtitle: rows
            .first()
            .and_then(|r| r.statement.clone())
            .unwrap_or_else(|| NO_REPRESENTATIVE_STATEMENT.to_string()),
        category_label: category_label(&category).to_string(),
        category,
        initiative_for_card: first_value(rows, Attribute::Initiative),
        ownership_for_card: first_value(rows, Attribute::Ownership),
        attributes,
        statements,
        speakers: distinct(rows.iter().filter_map(|r| r.speaker.as_deref())),
        latitude: position.map(|p| p.latitude),
        longitude: position.map(|p| p.longitude),
        image_url,
        is_area_wide,
    }
}

fn first_value(rows: &[&SurveyRow], attribute: Attribute) -> Option<String> {
    rows.iter()
        .find_map(|r| r.attribute(attribute))
        .map(str::to_string)
}

/// Collapses survey rows into one summary per case id, sorted by id.
///
/// The map position comes from the first row with valid coordinates. Cases without any are
/// pinned at the area center when their id carries the area-wide prefix, and left unplaced
/// otherwise. Rows without a case id are skipped.
pub fn aggregate_cases(rows: &[SurveyRow], options: &CatalogOptions) -> Vec<CaseSummary> {
    let mut by_case: BTreeMap<&str, Vec<&SurveyRow>> = BTreeMap::new();
    for (index, row) in rows.iter().enumerate() {
        let Some(id) = row.case_id.as_deref() else {
            tracing::warn!(row = index, "survey row has no case id; skipping");
            continue;
        };
        by_case.entry(id).or_default().push(row);
    }

    let cases: Vec<CaseSummary> = by_case
        .into_iter()
        .map(|(id, case_rows)| summarize(id, &case_rows, options))
        .collect();

    tracing::debug!(
        rows = rows.len(),
        cases = cases.len(),
        area_wide = cases.iter().filter(|c| c.is_area_wide).count(),
        "aggregated survey rows"
    );
    cases
}
