#![forbid(unsafe_code)]

//! `casemap` turns a hearing-survey sheet into what a case-catalog map needs: one summary per
//! case plus a marker position that never hides another marker.
//!
//! - [`casemap_core`] (re-exported at the root): survey rows, case summaries, grouped views,
//!   timeline, statistics, configuration
//! - [`layout`]: the marker layout resolver

pub use casemap_core::*;

pub mod layout {
    pub use casemap_layout::*;
}

use casemap_layout::{PlacementResult, ResolveOptions, resolve_placements};
use serde::Serialize;

/// A case summary paired with its marker placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedCase<'a> {
    pub case: &'a CaseSummary,
    pub placement: PlacementResult,
}

/// Resolves marker placements for case summaries, keeping their order.
pub fn place_cases<'a>(
    cases: &'a [CaseSummary],
    options: &ResolveOptions,
) -> Vec<PlacedCase<'a>> {
    let records: Vec<_> = cases.iter().map(CaseSummary::to_point_record).collect();
    cases
        .iter()
        .zip(resolve_placements(&records, options))
        .map(|(case, placement)| PlacedCase { case, placement })
        .collect()
}

/// Bundles catalog and layout options for callers that run the whole pipeline repeatedly.
///
/// Stateless between calls: every method allocates its own working data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CasePipeline {
    pub catalog: CatalogOptions,
    pub layout: ResolveOptions,
}

impl CasePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CasemapConfig) -> Result<Self> {
        Ok(Self {
            catalog: CatalogOptions::from_config(config)?,
            layout: config.resolve_options()?,
        })
    }

    pub fn summarize(&self, rows: &[SurveyRow]) -> Vec<CaseSummary> {
        aggregate_cases(rows, &self.catalog)
    }

    pub fn place<'a>(&self, cases: &'a [CaseSummary]) -> Vec<PlacedCase<'a>> {
        place_cases(cases, &self.layout)
    }
}
