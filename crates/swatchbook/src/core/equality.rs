use crate::core::FloatExt;
use crate::{Bits, Float};

/// Test macro for asserting the equality of floating point numbers.
///
/// This macro relies on [`to_eq_bits`] to normalize the two floating point
/// numbers by zeroing out not-a-numbers, reducing resolution, and dropping the
/// sign of negative zeros and then compares the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical. Its
/// message places the numbers below each other at the beginning of subsequent
/// lines for easy comparability.
#[macro_export]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr $(,)?) => {
        let (f1, f2) = ($f1, $f2);
        let bits1 = $crate::to_eq_bits(f1);
        let bits2 = $crate::to_eq_bits(f2);
        assert_eq!(bits1, bits2, "quantities differ:\n{:?}\n{:?}", f1, f2);
    };
}

/// Test macro for asserting that two colors are within the given distance
/// of each other.
///
/// This macro compares the colors' RGB coordinates and alpha one by one.
///
/// # Panics
///
/// This macro panics if any component differs by more than the tolerance.
/// Its message places the colors below each other at the beginning of
/// subsequent lines for easy comparability.
#[macro_export]
macro_rules! assert_same_color {
    ($c1:expr, $c2:expr, $tolerance:expr $(,)?) => {
        let (c1, c2) = (&$c1, &$c2);
        let (rgb1, rgb2) = (c1.to_rgb(), c2.to_rgb());
        let close = rgb1
            .as_ref()
            .iter()
            .zip(rgb2.as_ref().iter())
            .chain(::std::iter::once((&rgb1.alpha(), &rgb2.alpha())))
            .all(|(a, b)| (a - b).abs() <= $tolerance);
        assert!(close, "colors differ:\n{:?}\n{:?}", c1, c2);
    };
}

// --------------------------------------------------------------------------------------------------------------------

/// Helper function to normalize a floating point number before hashing or
/// equality testing.
///
/// This function zeros out not-a-number, reduces significant digits after the
/// decimal, and drops the sign of negative zero and returns the result as a bit
/// string. It is only public because the [`assert_close_enough`] test macro
/// uses it.
#[doc(hidden)]
#[inline]
pub fn to_eq_bits(f: Float) -> Bits {
    // Eliminate not-a-number.
    let mut f = if f.is_nan() { 0.0 } else { f };

    // Reduce precision.
    f = (<Float as FloatExt>::ROUNDING_FACTOR * f).round();

    // Too much negativity!
    if f == -0.0 {
        f = 0.0
    }

    f.to_bits()
}

/// Determine the key for memoizing lookups by luminance.
///
/// Unlike [`to_eq_bits`], this function preserves the full resolution, since
/// distinct swatches in a palette may differ only slightly in luminance.
#[inline]
pub(crate) fn to_lookup_key(luminance: Float) -> Bits {
    if luminance.is_nan() {
        (0.0 as Float).to_bits()
    } else if luminance == 0.0 {
        // Fold negative zero into zero.
        (0.0 as Float).to_bits()
    } else {
        luminance.to_bits()
    }
}

#[cfg(test)]
mod test {
    use super::{to_eq_bits, to_lookup_key};
    use crate::Float;

    #[test]
    fn test_to_eq_bits() {
        assert_eq!(to_eq_bits(Float::NAN), to_eq_bits(0.0));
        assert_eq!(to_eq_bits(-0.0), to_eq_bits(0.0));
        assert_eq!(to_eq_bits(0.1 + 0.2), to_eq_bits(0.3));
        assert_ne!(to_eq_bits(0.3), to_eq_bits(0.31));
    }

    #[test]
    fn test_to_lookup_key() {
        assert_eq!(to_lookup_key(-0.0), to_lookup_key(0.0));
        assert_eq!(to_lookup_key(Float::NAN), to_lookup_key(0.0));
        assert_ne!(to_lookup_key(0.5), to_lookup_key(0.5 + 1e-12));
    }
}
