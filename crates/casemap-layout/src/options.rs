use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Six decimal digits is roughly 0.1m of latitude, well below marker size at street zoom.
pub const DEFAULT_COORDINATE_PRECISION: u32 = 6;
pub const DEFAULT_OFFSET_STEP: f64 = 0.0001;
/// `f64` carries ~15-17 significant digits; quantizing beyond this only amplifies noise and can
/// overflow the `i64` key space for longitudes near ±180.
pub const MAX_COORDINATE_PRECISION: u32 = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetAxis {
    Latitude,
    /// Markers at the same spot fan out east, one step per collision.
    #[default]
    Longitude,
}

impl OffsetAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

impl FromStr for OffsetAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latitude" | "lat" => Ok(Self::Latitude),
            "longitude" | "lon" | "lng" => Ok(Self::Longitude),
            other => Err(Error::InvalidOption {
                name: "offsetAxis",
                message: format!("expected `latitude` or `longitude`, got `{other}`"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveOptions {
    /// Number of decimal digits two coordinates must agree on to count as the same spot.
    pub coordinate_precision: u32,
    /// Degrees added per collision rank along `offset_axis`.
    pub offset_step: f64,
    pub offset_axis: OffsetAxis,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            coordinate_precision: DEFAULT_COORDINATE_PRECISION,
            offset_step: DEFAULT_OFFSET_STEP,
            offset_axis: OffsetAxis::Longitude,
        }
    }
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coordinate_precision(mut self, digits: u32) -> Self {
        self.coordinate_precision = digits;
        self
    }

    pub fn with_offset_step(mut self, step: f64) -> Self {
        self.offset_step = step;
        self
    }

    pub fn with_offset_axis(mut self, axis: OffsetAxis) -> Self {
        self.offset_axis = axis;
        self
    }

    /// Checks values that would make placements meaningless.
    ///
    /// [`crate::resolve_placements`] never calls this: it clamps the precision and accepts any
    /// step, so it stays total. Callers building options from user configuration should validate
    /// before resolving.
    pub fn validate(&self) -> Result<()> {
        if self.coordinate_precision > MAX_COORDINATE_PRECISION {
            return Err(Error::InvalidOption {
                name: "coordinatePrecision",
                message: format!(
                    "{} exceeds the maximum of {MAX_COORDINATE_PRECISION} decimal digits",
                    self.coordinate_precision
                ),
            });
        }
        if !(self.offset_step.is_finite() && self.offset_step >= 0.0) {
            return Err(Error::InvalidOption {
                name: "offsetStep",
                message: format!(
                    "expected a finite, non-negative number of degrees, got {}",
                    self.offset_step
                ),
            });
        }
        Ok(())
    }

    pub(crate) fn effective_precision(&self) -> u32 {
        self.coordinate_precision.min(MAX_COORDINATE_PRECISION)
    }
}
