//! Historical timeline: which improvements happened in which period.

use crate::catalog::SurveyRow;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

pub const UNKNOWN_PERIOD: &str = "不明な時期";

/// Periods as the survey words them, oldest first.
const PERIOD_RANKS: &[(&str, f64)] = &[
    ("戦前", 0.0),
    ("昭和初期", 1.0),
    ("昭和20年代", 2.0),
    ("昭和30年代", 3.0),
    ("昭和40年代", 4.0),
    ("昭和50年代", 5.0),
    ("昭和52年", 5.1),
    ("昭和60年代", 6.0),
    ("昭和64年", 6.1),
    ("平成初期", 7.0),
    ("25~30年前", 8.0),
    ("20年前", 9.0),
    ("10～20年前", 10.0),
    ("10年前", 11.0),
    ("最近", 12.0),
    ("1年前", 13.0),
    (UNKNOWN_PERIOD, 99.0),
];

const UNRANKED: f64 = 98.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub period: String,
    pub improvements: Vec<String>,
}

/// Sort rank of a period label. Labels outside the table rank by their leading number, or just
/// before `不明な時期` when there is none.
pub fn period_rank(period: &str) -> f64 {
    if let Some((_, rank)) = PERIOD_RANKS.iter().find(|(label, _)| *label == period) {
        return *rank;
    }
    match leading_number(period) {
        Some(n) if n != 0.0 => n,
        _ => UNRANKED,
    }
}

/// Parses the longest `[+-]digits[.digits]` prefix, after leading whitespace.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Lists the distinct improvement types per period, ordered by [`period_rank`].
///
/// Rows without a period are collected under `不明な時期`; rows without an improvement type are
/// ignored. Periods with the same rank keep first-seen order.
pub fn historical_summary(rows: &[SurveyRow]) -> Vec<TimelineEntry> {
    let mut periods: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for row in rows {
        let Some(improvement) = row.improvement.as_deref() else {
            continue;
        };
        let period = row.period.as_deref().unwrap_or(UNKNOWN_PERIOD);
        periods.entry(period).or_default().insert(improvement);
    }

    let mut entries: Vec<TimelineEntry> = periods
        .into_iter()
        .map(|(period, improvements)| TimelineEntry {
            period: period.to_string(),
            improvements: improvements.into_iter().map(str::to_string).collect(),
        })
        .collect();
    entries.sort_by(|a, b| period_rank(&a.period).total_cmp(&period_rank(&b.period)));
    entries
}
