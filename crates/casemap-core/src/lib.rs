#![forbid(unsafe_code)]

//! Case catalog model (headless).
//!
//! Turns hearing-survey rows into what the catalog views show: one summary per case with a map
//! position, cases grouped by initiative and ownership, a period timeline, and per-attribute
//! value counts. Everything here is in-memory and synchronous; fetching, storage and rendering
//! belong to the caller.

pub mod catalog;
pub mod config;
pub mod error;
pub mod grouping;
pub mod stats;
pub mod timeline;

pub use catalog::{
    Attribute, CaseSummary, CatalogOptions, SurveyRow, aggregate_cases, category_label,
};
pub use config::CasemapConfig;
pub use error::{Error, Result};
pub use grouping::{CaseGroup, GroupKey, filter_by_category, group_by_initiative_and_ownership};
pub use stats::{Statistics, ValueCounts, attribute_statistics};
pub use timeline::{TimelineEntry, historical_summary, period_rank};

use casemap_layout::PointRecord;

/// Parses a JSON array of survey rows.
pub fn parse_survey_rows(text: &str) -> Result<Vec<SurveyRow>> {
    Ok(serde_json::from_str(text)?)
}

/// Parses a JSON array of point records.
pub fn parse_point_records(text: &str) -> Result<Vec<PointRecord>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests;
