use crate::Float;

/// The coefficients for computing the luminance of sRGB coordinates.
const SRGB_LUMINANCE: &[Float; 3] = &[0.2126, 0.7152, 0.0722];

/// The sRGB threshold for the linear segment, as specified by WCAG 2.
const WCAG_THRESHOLD: Float = 0.03928;

/// The offset accounting for viewing flare in the contrast ratio.
const FLARE: Float = 0.05;

fn weigh(coordinates: &[Float; 3]) -> Float {
    let [c1, c2, c3] = *SRGB_LUMINANCE;
    let [r, g, b] = *coordinates;
    r.mul_add(c1, g.mul_add(c2, b * c3))
}

/// Compute the relative luminance for the given sRGB coordinates.
///
/// This function first linearizes the coordinates with WCAG 2's transfer
/// function and then computes their weighted sum.
pub(crate) fn relative_luminance(coordinates: &[Float; 3]) -> Float {
    #[inline]
    fn linearize(value: Float) -> Float {
        if value <= WCAG_THRESHOLD {
            value / 12.92
        } else {
            ((value + 0.055) / 1.055).powf(2.4)
        }
    }

    let [r, g, b] = *coordinates;
    weigh(&[linearize(r), linearize(g), linearize(b)])
}

/// Compute the luminance of the given sRGB coordinates *without* linearizing
/// them first.
pub(crate) fn linear_luminance(coordinates: &[Float; 3]) -> Float {
    weigh(coordinates)
}

/// Compute the contrast ratio between two relative luminance values.
///
/// The result is symmetric in its arguments and ranges from 1 for identical
/// luminance to 21 for black and white.
pub(crate) fn contrast_ratio(luminance1: Float, luminance2: Float) -> Float {
    let (lighter, darker) = if luminance1 < luminance2 {
        (luminance2, luminance1)
    } else {
        (luminance1, luminance2)
    };

    (lighter + FLARE) / (darker + FLARE)
}

/// Determine the luminance at or below which a color counts as dark.
///
/// This is the luminance whose contrast against black equals its contrast
/// against white, i.e., the solution of `(1.05)(L + 0.05)⁻¹ = (L + 0.05)/0.05`.
#[inline]
pub(crate) fn dark_threshold() -> Float {
    ((0.21 as Float).sqrt() - 0.1) / 2.0
}

/// Determine whether the relative luminance is dark.
#[inline]
pub(crate) fn is_dark(luminance: Float) -> bool {
    luminance <= dark_threshold()
}

#[cfg(test)]
mod test {
    use super::{contrast_ratio, dark_threshold, is_dark, linear_luminance, relative_luminance};
    use crate::assert_close_enough;

    #[test]
    fn test_luminance() {
        assert_eq!(relative_luminance(&[0.0, 0.0, 0.0]), 0.0);
        assert_close_enough!(relative_luminance(&[1.0, 1.0, 1.0]), 1.0);
        assert_close_enough!(relative_luminance(&[1.0, 0.0, 0.0]), 0.2126);

        // Gray #808080 sits on the power segment of the transfer function.
        let gray = relative_luminance(&[128.0 / 255.0; 3]);
        assert!((gray - 0.21586).abs() < 1e-5);

        assert_close_enough!(linear_luminance(&[0.5, 0.5, 0.5]), 0.5);
    }

    #[test]
    fn test_contrast_ratio() {
        assert_close_enough!(contrast_ratio(1.0, 0.0), 21.0);
        assert_close_enough!(contrast_ratio(0.0, 1.0), 21.0);
        assert_eq!(contrast_ratio(0.3, 0.3), 1.0);
    }

    #[test]
    fn test_is_dark() {
        let threshold = dark_threshold();
        let difference = contrast_ratio(threshold, 0.0) - contrast_ratio(threshold, 1.0);
        assert!(difference.abs() < 1e-9);
        assert!(is_dark(threshold));
        assert!(!is_dark(threshold + 1e-9));
        assert!(is_dark(0.0));
        assert!(!is_dark(1.0));
    }
}
