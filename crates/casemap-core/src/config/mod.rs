use crate::error::{Error, Result};
use casemap_layout::{OffsetAxis, ResolveOptions};
use serde_json::{Map, Value};

/// Layered JSON configuration addressed by dotted paths (`layout.offsetStep`).
///
/// Recognized keys:
/// - `layout.coordinatePrecision` (integer, decimal digits)
/// - `layout.offsetStep` (number, degrees)
/// - `layout.offsetAxis` (`"longitude"` | `"latitude"`)
/// - `catalog.areaCenter.latitude` / `catalog.areaCenter.longitude` (numbers)
/// - `catalog.areaWidePrefix` (string)
///
/// Unknown keys are kept and ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct CasemapConfig(Value);

impl Default for CasemapConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl CasemapConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a JSON document; the top level must be an object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(Error::InvalidConfig {
                key: "<root>".to_string(),
                message: "expected a JSON object".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    /// Writes `value` at `dotted_path`, creating intermediate objects and replacing scalars
    /// that sit in the way. Object values are merged into an existing object at that path.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let nested = dotted_path
            .rsplit('.')
            .fold(value, |inner, segment| {
                let mut map = Map::new();
                map.insert(segment.to_string(), inner);
                Value::Object(map)
            });
        overlay(&mut self.0, &nested);
    }

    /// Layers `other` on top: objects merge key by key, anything else replaces.
    pub fn deep_merge(&mut self, other: &Value) {
        overlay(&mut self.0, other);
    }

    /// Builds resolver options, falling back to defaults for absent keys.
    pub fn resolve_options(&self) -> Result<ResolveOptions> {
        let mut opts = ResolveOptions::default();

        if let Some(v) = self.get("layout.coordinatePrecision") {
            let digits = v
                .as_u64()
                .and_then(|d| u32::try_from(d).ok())
                .ok_or_else(|| {
                    invalid(
                        "layout.coordinatePrecision",
                        "expected a non-negative integer",
                        v,
                    )
                })?;
            opts.coordinate_precision = digits;
        }
        if let Some(v) = self.get("layout.offsetStep") {
            opts.offset_step = v
                .as_f64()
                .ok_or_else(|| invalid("layout.offsetStep", "expected a number", v))?;
        }
        if let Some(v) = self.get("layout.offsetAxis") {
            let axis = v
                .as_str()
                .ok_or_else(|| invalid("layout.offsetAxis", "expected a string", v))?;
            opts.offset_axis = axis.parse::<OffsetAxis>()?;
        }

        opts.validate()?;
        Ok(opts)
    }
}

pub(crate) fn invalid(key: &str, expected: &str, got: &Value) -> Error {
    Error::InvalidConfig {
        key: key.to_string(),
        message: format!("{expected}, got {got}"),
    }
}

fn overlay(base: &mut Value, layer: &Value) {
    if let (Some(base_map), Value::Object(layer_map)) = (base.as_object_mut(), layer) {
        for (key, value) in layer_map {
            overlay(base_map.entry(key.as_str()).or_insert(Value::Null), value);
        }
        return;
    }
    *base = layer.clone();
}
