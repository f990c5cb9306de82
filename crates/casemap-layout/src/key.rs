use crate::options::MAX_COORDINATE_PRECISION;
use crate::record::LatLng;
use std::fmt;

/// Two coordinates rounded to a fixed number of decimal digits.
///
/// Records with equal keys are considered to sit on the same spot. Each axis keeps the bit
/// pattern of its rounded, scaled `f64`, so magnitude never saturates two far-apart points into
/// one key, and `-0.0`, `0.0` and values that round to zero all share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionKey {
    latitude: u64,
    longitude: u64,
    precision: u32,
}

impl CollisionKey {
    /// Precision above [`MAX_COORDINATE_PRECISION`] is clamped.
    pub fn quantize(at: LatLng, precision: u32) -> Self {
        let precision = precision.min(MAX_COORDINATE_PRECISION);
        let scale = 10f64.powi(precision as i32);
        Self {
            latitude: quantize_axis(at.latitude, scale),
            longitude: quantize_axis(at.longitude, scale),
            precision,
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }
}

fn quantize_axis(value: f64, scale: f64) -> u64 {
    let rounded = (value * scale).round();
    // `round()` keeps the sign of negative fractions.
    let normalized = if rounded == 0.0 { 0.0 } else { rounded };
    normalized.to_bits()
}

fn write_axis(f: &mut fmt::Formatter<'_>, bits: u64, precision: u32) -> fmt::Result {
    let scaled = f64::from_bits(bits);
    let value = scaled / 10f64.powi(precision as i32);
    write!(f, "{value:.prec$}", prec = precision as usize)
}

/// Renders as `"<lat>,<lon>"`, each with exactly `precision` fractional digits.
impl fmt::Display for CollisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_axis(f, self.latitude, self.precision)?;
        f.write_str(",")?;
        write_axis(f, self.longitude, self.precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(lat: f64, lon: f64, precision: u32) -> CollisionKey {
        CollisionKey::quantize(
            LatLng {
                latitude: lat,
                longitude: lon,
            },
            precision,
        )
    }

    #[test]
    fn display_pads_fraction_digits() {
        assert_eq!(key(34.24, 132.55, 6).to_string(), "34.240000,132.550000");
        assert_eq!(key(-33.8688, 151.2093, 2).to_string(), "-33.87,151.21");
        assert_eq!(key(34.6, -0.4, 0).to_string(), "35,0");
    }

    #[test]
    fn axes_do_not_bleed_into_each_other() {
        assert_ne!(key(1.0, 23.0, 6), key(10.0, 0.23, 6));
        assert_ne!(key(1.0, 23.0, 0), key(12.0, 3.0, 0));
    }

    #[test]
    fn negative_zero_and_tiny_negatives_share_the_zero_key() {
        assert_eq!(key(-0.0, 0.0, 6), key(0.0, 0.0, 6));
        assert_eq!(key(-0.0000001, 0.0, 6), key(0.0000001, 0.0, 6));
        assert_eq!(key(-0.0000001, 0.0, 6).to_string(), "0.000000,0.000000");
    }

    #[test]
    fn precision_controls_what_counts_as_the_same_spot() {
        assert_eq!(key(34.2400001, 132.55, 6), key(34.2400004, 132.55, 6));
        assert_ne!(key(34.2400001, 132.55, 8), key(34.2400004, 132.55, 8));
    }

    #[test]
    fn extreme_coordinates_fit_at_maximum_precision() {
        let k = key(-90.0, 180.0, MAX_COORDINATE_PRECISION);
        assert_eq!(k.to_string(), "-90.000000000000000,180.000000000000000");
    }

    #[test]
    fn precision_is_clamped_to_the_maximum() {
        let k = key(1.5, 2.5, 40);
        assert_eq!(k.precision(), MAX_COORDINATE_PRECISION);
        assert_eq!(k, key(1.5, 2.5, MAX_COORDINATE_PRECISION));
        assert_eq!(k.to_string(), "1.500000000000000,2.500000000000000");
    }

    #[test]
    fn large_magnitudes_stay_distinct() {
        let max = MAX_COORDINATE_PRECISION;
        assert_ne!(key(10_000.0, 0.0, max), key(20_000.0, 0.0, max));
        assert_ne!(key(1e13, 0.0, 6), key(5e13, 0.0, 6));
        assert_ne!(key(f64::MAX, 0.0, 6), key(f64::MIN, 0.0, 6));
        assert_eq!(key(1e13, 0.0, 6), key(1e13, 0.0, 6));
    }
}
