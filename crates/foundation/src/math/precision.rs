//! Precision policies.
//!
//! Fixed-decimal quantization (`quantize`, `CoordKey`) so nearly-identical
//! coordinates collide on the same integer key.

use crate::geo::LngLat;

/// Canonicalize a floating-point value before keying it.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Largest supported number of decimals; keeps `v * 10^d` well inside `i64`
/// for any valid degree value.
pub const MAX_DECIMALS: u32 = 12;

fn scale(decimals: u32) -> f64 {
    10f64.powi(decimals.min(MAX_DECIMALS) as i32)
}

/// Rounds `v` to `decimals` places and returns the scaled integer.
///
/// Ties round away from zero. Returns `None` for non-finite input.
pub fn quantize(v: f64, decimals: u32) -> Option<i64> {
    if !v.is_finite() {
        return None;
    }
    Some((canonical_f64(v) * scale(decimals)).round() as i64)
}

/// Inverse of [`quantize`].
pub fn dequantize(q: i64, decimals: u32) -> f64 {
    canonical_f64(q as f64 / scale(decimals))
}

/// A coordinate rounded to a fixed number of decimals.
///
/// Two positions that round to the same decimals produce equal keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoordKey {
    pub lat_q: i64,
    pub lng_q: i64,
    pub decimals: u32,
}

impl CoordKey {
    pub fn new(p: LngLat, decimals: u32) -> Option<Self> {
        Some(Self {
            lat_q: quantize(p.lat, decimals)?,
            lng_q: quantize(p.lng, decimals)?,
            decimals,
        })
    }

    /// The rounded position this key stands for.
    pub fn position(&self) -> LngLat {
        LngLat::new(
            dequantize(self.lng_q, self.decimals),
            dequantize(self.lat_q, self.decimals),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CoordKey, canonical_f64, dequantize, quantize};
    use crate::geo::LngLat;

    #[test]
    fn canonicalizes_negative_zero() {
        assert_eq!(canonical_f64(-0.0), 0.0);
        assert_eq!(canonical_f64(0.0), 0.0);
    }

    #[test]
    fn quantize_collapses_beyond_the_last_decimal() {
        assert_eq!(quantize(50.4501000001, 6), quantize(50.4501000002, 6));
        assert_ne!(quantize(50.4501, 6), quantize(50.4502, 6));
        assert_eq!(quantize(-0.0000001, 6), Some(0));
        assert_eq!(quantize(f64::INFINITY, 6), None);
        assert_eq!(dequantize(48_379_400, 6), 48.3794);
    }

    #[test]
    fn coord_key_round_trips_to_the_rounded_position() {
        let k = CoordKey::new(LngLat::new(31.16560000004, 48.37940000001), 6).unwrap();
        assert_eq!(k.position(), LngLat::new(31.1656, 48.3794));
        assert!(CoordKey::new(LngLat::new(f64::NAN, 1.0), 6).is_none());
    }
}
