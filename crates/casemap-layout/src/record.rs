use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of checking a record's coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateCheck {
    Valid(LatLng),
    /// Either axis is missing, NaN or infinite.
    Absent,
}

impl CoordinateCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

pub fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> CoordinateCheck {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
            CoordinateCheck::Valid(LatLng {
                latitude,
                longitude,
            })
        }
        _ => CoordinateCheck::Absent,
    }
}

/// One catalogued case as the map sees it.
///
/// JSON input is accepted leniently: ids may be strings or numbers, and any coordinate that is not
/// a JSON number (strings, `null`, booleans, objects) deserializes as absent rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointRecord {
    #[serde(deserialize_with = "record_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "json_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "json_number")]
    pub longitude: Option<f64>,
    #[serde(default, alias = "is_area_wide")]
    pub is_area_wide: bool,
}

impl PointRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_area_wide(mut self, is_area_wide: bool) -> Self {
        self.is_area_wide = is_area_wide;
        self
    }

    pub fn coordinates(&self) -> CoordinateCheck {
        validate_coordinates(self.latitude, self.longitude)
    }
}

fn record_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "record id must be a string or a number, got {other}"
        ))),
    }
}

fn json_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite()))
}

/// Where (and whether) a record's marker goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
    pub id: String,
    pub placed_latitude: Option<f64>,
    pub placed_longitude: Option<f64>,
    pub has_placement: bool,
    /// 0-based position among earlier records at the same spot; `None` when unplaced.
    pub collision_rank: Option<usize>,
    pub is_area_wide: bool,
}

impl PlacementResult {
    pub(crate) fn placed(record: &PointRecord, at: LatLng, rank: usize) -> Self {
        Self {
            id: record.id.clone(),
            placed_latitude: Some(at.latitude),
            placed_longitude: Some(at.longitude),
            has_placement: true,
            collision_rank: Some(rank),
            is_area_wide: record.is_area_wide,
        }
    }

    pub(crate) fn unplaced(record: &PointRecord) -> Self {
        Self {
            id: record.id.clone(),
            placed_latitude: None,
            placed_longitude: None,
            has_placement: false,
            collision_rank: None,
            is_area_wide: record.is_area_wide,
        }
    }

    pub fn placement(&self) -> Option<LatLng> {
        Some(LatLng {
            latitude: self.placed_latitude?,
            longitude: self.placed_longitude?,
        })
    }
}
