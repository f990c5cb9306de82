//! Grouped and filtered case views.

use crate::catalog::{CaseSummary, UNKNOWN};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    pub initiative: String,
    pub ownership: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseGroup<'a> {
    #[serde(flatten)]
    pub key: GroupKey,
    pub cases: Vec<&'a CaseSummary>,
}

/// Groups cases by who initiated the improvement and who owns the land.
///
/// Missing values group under `不明`. Groups appear in first-seen order and keep input order
/// inside each group.
pub fn group_by_initiative_and_ownership(cases: &[CaseSummary]) -> Vec<CaseGroup<'_>> {
    let mut groups: IndexMap<GroupKey, Vec<&CaseSummary>> = IndexMap::new();
    for case in cases {
        let key = GroupKey {
            initiative: case
                .initiative_for_card
                .as_deref()
                .unwrap_or(UNKNOWN)
                .to_string(),
            ownership: case
                .ownership_for_card
                .as_deref()
                .unwrap_or(UNKNOWN)
                .to_string(),
        };
        groups.entry(key).or_default().push(case);
    }
    groups
        .into_iter()
        .map(|(key, cases)| CaseGroup { key, cases })
        .collect()
}

/// Keeps cases whose category code matches. `None` and `"all"` keep everything.
pub fn filter_by_category<'a>(
    cases: &'a [CaseSummary],
    category: Option<&str>,
) -> Vec<&'a CaseSummary> {
    match category {
        None | Some("all") => cases.iter().collect(),
        Some(code) => cases.iter().filter(|c| c.category == code).collect(),
    }
}
