use super::row::Attribute;
use casemap_layout::PointRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Case category, keyed by the first character of the case id.
pub fn category_label(code: &str) -> &'static str {
    match code {
        "R" => "道路整備",
        "C" => "自治会",
        "K" => "キーパーソン",
        "D" => "災害",
        _ => "その他",
    }
}

/// Everything the catalog shows for one case: card text, attributes and a map position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummary {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    /// First character of the id (`R`, `C`, `K`, `D`, ...).
    pub category: String,
    pub category_label: String,
    /// Distinct values per attribute in first-seen order. Attributes without values are omitted.
    pub attributes: IndexMap<Attribute, Vec<String>>,
    pub statements: Vec<String>,
    pub speakers: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    /// Placed at the area center because no row carried coordinates.
    pub is_area_wide: bool,
    pub initiative_for_card: Option<String>,
    pub ownership_for_card: Option<String>,
}

impl CaseSummary {
    pub fn attribute_values(&self, attribute: Attribute) -> &[String] {
        self.attributes
            .get(&attribute)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn to_point_record(&self) -> PointRecord {
        PointRecord {
            id: self.id.clone(),
            name: Some(self.name.clone()),
            latitude: self.latitude,
            longitude: self.longitude,
            is_area_wide: self.is_area_wide,
        }
    }
}
