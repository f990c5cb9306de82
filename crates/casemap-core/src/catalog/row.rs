use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Survey attribute columns, in the order case summaries list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "整備")]
    Improvement,
    #[serde(rename = "目的")]
    Purpose,
    #[serde(rename = "発意")]
    Initiative,
    #[serde(rename = "実行")]
    Execution,
    #[serde(rename = "費用")]
    Cost,
    #[serde(rename = "契機")]
    Trigger,
    #[serde(rename = "時期")]
    Period,
    #[serde(rename = "所有")]
    Ownership,
    #[serde(rename = "管理")]
    Management,
    #[serde(rename = "利用")]
    Usage,
}

impl Attribute {
    pub const ALL: [Attribute; 10] = [
        Attribute::Improvement,
        Attribute::Purpose,
        Attribute::Initiative,
        Attribute::Execution,
        Attribute::Cost,
        Attribute::Trigger,
        Attribute::Period,
        Attribute::Ownership,
        Attribute::Management,
        Attribute::Usage,
    ];
}

/// One hearing statement from the survey sheet.
///
/// Several rows usually share a case id. Empty cells (and whitespace-only strings) are `None`;
/// numeric cells in text columns are kept as their decimal text. Coordinates accept numbers or
/// numeric strings, anything else is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyRow {
    #[serde(rename = "事例", alias = "case_id", default, deserialize_with = "text")]
    pub case_id: Option<String>,
    #[serde(rename = "事例名", alias = "case_name", default, deserialize_with = "text")]
    pub case_name: Option<String>,
    #[serde(rename = "発言者", alias = "speaker", default, deserialize_with = "text")]
    pub speaker: Option<String>,
    #[serde(rename = "発言内容", alias = "statement", default, deserialize_with = "text")]
    pub statement: Option<String>,
    #[serde(rename = "整備", alias = "improvement", default, deserialize_with = "text")]
    pub improvement: Option<String>,
    #[serde(rename = "目的", alias = "purpose", default, deserialize_with = "text")]
    pub purpose: Option<String>,
    #[serde(rename = "発意", alias = "initiative", default, deserialize_with = "text")]
    pub initiative: Option<String>,
    #[serde(rename = "実行", alias = "execution", default, deserialize_with = "text")]
    pub execution: Option<String>,
    #[serde(rename = "費用", alias = "cost", default, deserialize_with = "text")]
    pub cost: Option<String>,
    #[serde(rename = "契機", alias = "trigger", default, deserialize_with = "text")]
    pub trigger: Option<String>,
    #[serde(rename = "時期", alias = "period", default, deserialize_with = "text")]
    pub period: Option<String>,
    #[serde(rename = "所有", alias = "ownership", default, deserialize_with = "text")]
    pub ownership: Option<String>,
    #[serde(rename = "管理", alias = "management", default, deserialize_with = "text")]
    pub management: Option<String>,
    #[serde(rename = "利用", alias = "usage", default, deserialize_with = "text")]
    pub usage: Option<String>,
    #[serde(rename = "緯度", alias = "latitude", default, deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(rename = "経度", alias = "longitude", default, deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
    #[serde(rename = "写真", alias = "photo", default, deserialize_with = "text")]
    pub photo: Option<String>,
}

impl SurveyRow {
    pub fn attribute(&self, attribute: Attribute) -> Option<&str> {
        let value = match attribute {
            Attribute::Improvement => &self.improvement,
            Attribute::Purpose => &self.purpose,
            Attribute::Initiative => &self.initiative,
            Attribute::Execution => &self.execution,
            Attribute::Cost => &self.cost,
            Attribute::Trigger => &self.trigger,
            Attribute::Period => &self.period,
            Attribute::Ownership => &self.ownership,
            Attribute::Management => &self.management,
            Attribute::Usage => &self.usage,
        };
        value.as_deref()
    }
}

fn text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|v| v.is_finite()))
}
