//! Unit conversion utilities.
//!
//! Shape geometry is stored in EMUs (English Metric Units), the fixed-point
//! unit of presentation documents. Everything reported to callers is in
//! inches. Converting inches back to EMUs truncates toward zero.

use super::error::{Error, Result};
use serde::Serialize;

pub const EMUS_PER_INCH: i64 = 914_400;

/// Largest coordinate a shape edge may reach (`ST_Coordinate` upper bound).
pub const MAX_COORDINATE_EMU: i64 = 27_273_042_316_900;

/// Smallest coordinate a shape edge may reach (`ST_Coordinate` lower bound).
pub const MIN_COORDINATE_EMU: i64 = -27_273_042_329_600;

#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

/// Convert inches to EMUs, truncating toward zero.
#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64) as i64
}

/// Convert a caller-supplied inch value to EMUs.
///
/// Fails with [`Error::InvalidGeometry`] when the value is NaN, infinite or
/// lands outside the coordinate range.
pub fn try_inches_to_emu(name: &str, inches: f64) -> Result<i64> {
    let emu = inches * EMUS_PER_INCH as f64;
    if !emu.is_finite() || emu < MIN_COORDINATE_EMU as f64 || emu > MAX_COORDINATE_EMU as f64 {
        return Err(Error::InvalidGeometry(format!(
            "{} must be a finite coordinate, got {} in",
            name, inches
        )));
    }
    Ok(emu as i64)
}

/// Truncate a fractional EMU value computed in floating point.
#[inline]
pub fn truncate_emu(emu: f64) -> i64 {
    emu as i64
}

/// Area in square EMUs expressed as square inches.
#[inline]
pub fn square_emu_to_square_inches(area: i128) -> f64 {
    area as f64 / (EMUS_PER_INCH as f64 * EMUS_PER_INCH as f64)
}

/// Result of a single unit conversion, echoing input and factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitConversion {
    pub emu: i64,
    pub inches: f64,
    pub conversion_factor: i64,
}

/// Convert an EMU value and report both sides of the conversion.
pub fn convert_emu_to_inches(emu: i64) -> UnitConversion {
    UnitConversion {
        emu,
        inches: emu_to_inches(emu),
        conversion_factor: EMUS_PER_INCH,
    }
}

/// Convert an inch value and report both sides of the conversion.
pub fn convert_inches_to_emu(inches: f64) -> UnitConversion {
    UnitConversion {
        emu: inches_to_emu(inches),
        inches,
        conversion_factor: EMUS_PER_INCH,
    }
}

/// Slide size in both unit systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlideDimensions {
    pub width_emu: i64,
    pub height_emu: i64,
    pub width_inches: f64,
    pub height_inches: f64,
    /// Width over height, or 0 for a zero-height slide
    pub aspect_ratio: f64,
}

impl SlideDimensions {
    pub fn from_emu(width: i64, height: i64) -> Self {
        let width_inches = emu_to_inches(width);
        let height_inches = emu_to_inches(height);
        Self {
            width_emu: width,
            height_emu: height,
            width_inches,
            height_inches,
            aspect_ratio: if height_inches != 0.0 {
                width_inches / height_inches
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_round_trip() {
        assert_eq!(inches_to_emu(1.0), EMUS_PER_INCH);
        assert_eq!(emu_to_inches(914_400 * 3), 3.0);
        assert_eq!(emu_to_inches(457_200), 0.5);
    }

    #[test]
    fn test_inches_to_emu_truncates() {
        // 0.1234567 in = 112888.6... EMU
        assert_eq!(inches_to_emu(0.123_456_7), 112_888);
        assert_eq!(inches_to_emu(-0.123_456_7), -112_888);
        assert_eq!(truncate_emu(2.5), 2);
        assert_eq!(truncate_emu(3.5), 3);
        assert_eq!(truncate_emu(-2.5), -2);
    }

    #[test]
    fn test_try_inches_to_emu_rejects_unrepresentable_values() {
        assert_eq!(try_inches_to_emu("left", 1.5).unwrap(), 1_371_600);
        assert_eq!(try_inches_to_emu("left", -0.123_456_7).unwrap(), -112_888);
        assert!(try_inches_to_emu("left", f64::NAN).is_err());
        assert!(try_inches_to_emu("left", f64::INFINITY).is_err());
        assert!(try_inches_to_emu("left", 1.0e14).is_err());
        assert!(try_inches_to_emu("top", -1.0e14).is_err());

        let err = try_inches_to_emu("width", f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "Invalid geometry: width must be a finite coordinate, got NaN in");
    }

    #[test]
    fn test_conversion_reports() {
        let c = convert_emu_to_inches(1_828_800);
        assert_eq!(c.inches, 2.0);
        assert_eq!(c.conversion_factor, 914_400);

        let c = convert_inches_to_emu(1.5);
        assert_eq!(c.emu, 1_371_600);
    }

    #[test]
    fn test_slide_dimensions() {
        let dims = SlideDimensions::from_emu(9_144_000, 6_858_000);
        assert_eq!(dims.width_inches, 10.0);
        assert_eq!(dims.height_inches, 7.5);
        assert!((dims.aspect_ratio - 4.0 / 3.0).abs() < 1e-12);

        assert_eq!(SlideDimensions::from_emu(9_144_000, 0).aspect_ratio, 0.0);
    }
}
