use crate::Float;

/// An extension trait for floating point numbers.
///
/// For now, this trait exists solely to pre-compute the rounding factor for
/// equality comparisons, which depends on the floating point representation.
pub(crate) trait FloatExt {
    /// The factor determining rounding precision.
    ///
    /// When limiting a floating point number's precision, the number is
    /// multiplied by some factor, rounded, and divided by the same factor
    /// again. Typically, that factor is a power of ten, which directly
    /// translates into significant digits after the decimal.
    const ROUNDING_FACTOR: Self;
}

impl FloatExt for f64 {
    const ROUNDING_FACTOR: f64 = 1e12;
}

impl FloatExt for f32 {
    const ROUNDING_FACTOR: f32 = 1e4;
}

// --------------------------------------------------------------------------------------------------------------------

/// Clamp the value to the given range.
///
/// Unlike [`Float::clamp`], this function maps not-a-number to the minimum
/// instead of propagating it.
#[inline]
pub(crate) fn clamp(value: Float, min: Float, max: Float) -> Float {
    if value.is_nan() || value <= min {
        min
    } else if max <= value {
        max
    } else {
        value
    }
}

/// Round the value to the given number of digits after the decimal.
#[inline]
pub(crate) fn round_to_precision(value: Float, digits: u32) -> Float {
    let factor = (10.0 as Float).powi(digits as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod test {
    use super::{clamp, round_to_precision};
    use crate::Float;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(Float::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
        assert_eq!(clamp(300.0, 0.0, 255.0), 255.0);
    }

    #[test]
    fn test_round_to_precision() {
        assert_eq!(round_to_precision(0.123456, 2), 0.12);
        assert_eq!(round_to_precision(0.125, 0), 0.0);
        assert_eq!(round_to_precision(2.5, 0), 3.0);
    }
}
