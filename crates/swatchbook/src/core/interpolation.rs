use crate::core::{convert, ColorSpace};
use crate::Float;

/// Find the candidate closest to the origin.
///
/// This function compares the origin to every candidate, computing the
/// distance with the given function, and returns the index of the closest
/// candidate, or `None` if there are no candidates. On ties, the first
/// candidate wins.
pub(crate) fn find_closest<C, T, F>(origin: Float, candidates: C, mut distance: F) -> Option<usize>
where
    C: IntoIterator<Item = T>,
    F: FnMut(Float, T) -> Float,
{
    let mut min_distance = Float::INFINITY;
    let mut min_index = None;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let d = distance(origin, candidate);
        if d < min_distance {
            min_distance = d;
            min_index = Some(index);
        }
    }

    min_index
}

// --------------------------------------------------------------------------------------------------------------------

/// Linearly interpolate between the two values.
///
/// A fraction that is not-a-number or at most 0 yields the first value. A
/// fraction of at least 1 yields the second value.
#[inline]
pub(crate) fn lerp(fraction: Float, value1: Float, value2: Float) -> Float {
    if fraction.is_nan() || fraction <= 0.0 {
        value1
    } else if 1.0 <= fraction {
        value2
    } else {
        (value2 - value1).mul_add(fraction, value1)
    }
}

/// Adjust the pair of hues so that interpolation takes the shorter arc.
#[inline]
fn prepare_hue_interpolation(h1: Float, h2: Float) -> [Float; 2] {
    if 180.0 < h2 - h1 {
        [h1 + 360.0, h2]
    } else if h2 - h1 < -180.0 {
        [h1, h2 + 360.0]
    } else {
        [h1, h2]
    }
}

/// Interpolate between two hues along the shorter arc.
///
/// The result is in `0..360`, except for fractions outside unit range, which
/// return the corresponding hue unchanged.
pub(crate) fn lerp_hue(fraction: Float, hue1: Float, hue2: Float) -> Float {
    if fraction.is_nan() || fraction <= 0.0 {
        return hue1;
    } else if 1.0 <= fraction {
        return hue2;
    }

    let [h1, h2] = prepare_hue_interpolation(hue1, hue2);
    lerp(fraction, h1, h2).rem_euclid(360.0)
}

/// Interpolate between two RGB colors in the given color space.
///
/// This function converts both colors to the interpolation space,
/// interpolates each coordinate, with hues taking the shorter arc, and
/// converts the result back to RGB.
#[must_use = "function returns new color coordinates and does not mutate original values"]
pub(crate) fn interpolate(
    fraction: Float,
    space: ColorSpace,
    coordinates1: &[Float; 3],
    coordinates2: &[Float; 3],
) -> [Float; 3] {
    if fraction.is_nan() || fraction <= 0.0 {
        return *coordinates1;
    } else if 1.0 <= fraction {
        return *coordinates2;
    }

    let c1 = convert(ColorSpace::Rgb, space, coordinates1);
    let c2 = convert(ColorSpace::Rgb, space, coordinates2);
    let hue = space.hue_index();

    let mut result = [0.0; 3];
    for index in 0..3 {
        result[index] = if hue == Some(index) {
            lerp_hue(fraction, c1[index], c2[index])
        } else {
            lerp(fraction, c1[index], c2[index])
        };
    }

    convert(space, ColorSpace::Rgb, &result)
}

// --------------------------------------------------------------------------------------------------------------------

/// The change in CIELCh chroma per unit of saturation adjustment.
const SATURATION_STEP: Float = 18.0;

/// Shift the chroma of the RGB color by the given amount of saturation.
///
/// The amount is scaled by 18 units of CIELCh chroma and negative amounts
/// desaturate. The resulting chroma never drops below zero.
#[must_use = "function returns new color coordinates and does not mutate original value"]
pub(crate) fn saturate(coordinates: &[Float; 3], amount: Float) -> [Float; 3] {
    let [l, c, h] = convert(ColorSpace::Rgb, ColorSpace::Lch, coordinates);
    let chroma = amount.mul_add(SATURATION_STEP, c).max(0.0);
    convert(ColorSpace::Lch, ColorSpace::Rgb, &[l, chroma, h])
}

// --------------------------------------------------------------------------------------------------------------------

/// A compositing operation for two RGB colors.
///
/// Each mode combines a bottom and a top color channel by channel, except for
/// [`BlendMode::Color`], which combines the hue and saturation of the top
/// color with the lightness of the bottom color.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Darken the bottom color to reflect the top color.
    Burn,
    /// Paint the top color's hue and saturation onto the bottom's lightness.
    Color,
    /// Pick the darker channel.
    Darken,
    /// Brighten the bottom color to reflect the top color.
    Dodge,
    /// Pick the lighter channel.
    Lighten,
    /// Multiply the channels.
    Multiply,
    /// Multiply or screen depending on the bottom color.
    Overlay,
    /// Multiply the inverted channels and invert the result.
    Screen,
}

impl BlendMode {
    /// Get an iterator over all blend modes.
    pub fn all() -> impl Iterator<Item = BlendMode> {
        use BlendMode::*;
        [Burn, Color, Darken, Dodge, Lighten, Multiply, Overlay, Screen].into_iter()
    }
}

fn burn(bottom: Float, top: Float) -> Float {
    if top <= 0.0 {
        0.0
    } else {
        (1.0 - (1.0 - bottom) / top).max(0.0)
    }
}

fn dodge(bottom: Float, top: Float) -> Float {
    if 1.0 <= top {
        1.0
    } else {
        (bottom / (1.0 - top)).min(1.0)
    }
}

fn overlay(bottom: Float, top: Float) -> Float {
    let value = if bottom < 0.5 {
        2.0 * top * bottom
    } else {
        1.0 - 2.0 * (1.0 - top) * (1.0 - bottom)
    };
    value.clamp(0.0, 1.0)
}

fn screen(bottom: Float, top: Float) -> Float {
    1.0 - (1.0 - top) * (1.0 - bottom)
}

fn color(bottom: &[Float; 3], top: &[Float; 3]) -> [Float; 3] {
    let [_, _, lightness] = convert(ColorSpace::Rgb, ColorSpace::Hsl, bottom);
    let [hue, saturation, _] = convert(ColorSpace::Rgb, ColorSpace::Hsl, top);

    if saturation == 0.0 {
        [lightness, lightness, lightness]
    } else {
        convert(ColorSpace::Hsl, ColorSpace::Rgb, &[hue, saturation, lightness])
    }
}

/// Blend the top RGB color onto the bottom RGB color.
#[must_use = "function returns new color coordinates and does not mutate original values"]
pub(crate) fn blend(mode: BlendMode, bottom: &[Float; 3], top: &[Float; 3]) -> [Float; 3] {
    let per_channel: fn(Float, Float) -> Float = match mode {
        BlendMode::Burn => burn,
        BlendMode::Color => return color(bottom, top),
        BlendMode::Darken => Float::min,
        BlendMode::Dodge => dodge,
        BlendMode::Lighten => Float::max,
        BlendMode::Multiply => |b, t| b * t,
        BlendMode::Overlay => overlay,
        BlendMode::Screen => screen,
    };

    [
        per_channel(bottom[0], top[0]),
        per_channel(bottom[1], top[1]),
        per_channel(bottom[2], top[2]),
    ]
}

#[cfg(test)]
mod test {
    use super::{blend, find_closest, interpolate, lerp, lerp_hue, saturate, BlendMode};
    use crate::assert_close_enough;
    use crate::core::{convert, ColorSpace};
    use crate::Float;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(Float::NAN, 1.0, 2.0), 1.0);
        assert_eq!(lerp(-1.0, 1.0, 2.0), 1.0);
        assert_eq!(lerp(0.5, 1.0, 2.0), 1.5);
        assert_eq!(lerp(3.0, 1.0, 2.0), 2.0);
    }

    #[test]
    fn test_lerp_hue() {
        assert_close_enough!(lerp_hue(0.5, 350.0, 10.0), 0.0);
        assert_close_enough!(lerp_hue(0.5, 10.0, 350.0), 0.0);
        assert_close_enough!(lerp_hue(0.25, 350.0, 30.0), 0.0);
        assert_close_enough!(lerp_hue(0.5, 90.0, 180.0), 135.0);
        assert_close_enough!(lerp_hue(0.5, 300.0, 100.0), 20.0);
        assert_eq!(lerp_hue(0.0, 300.0, 100.0), 300.0);
        assert_eq!(lerp_hue(1.0, 300.0, 100.0), 100.0);
    }

    #[test]
    fn test_interpolate() {
        let black = [0.0, 0.0, 0.0];
        let white = [1.0, 1.0, 1.0];

        let gray = interpolate(0.5, ColorSpace::Rgb, &black, &white);
        assert_eq!(gray, [0.5, 0.5, 0.5]);

        assert_eq!(interpolate(Float::NAN, ColorSpace::Lab, &black, &white), black);
        assert_eq!(interpolate(2.0, ColorSpace::Lab, &black, &white), white);

        // Red to blue in HSL passes through magenta, not green.
        let mid = interpolate(0.5, ColorSpace::Hsl, &[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0]);
        let hsl = convert(ColorSpace::Rgb, ColorSpace::Hsl, &mid);
        assert_close_enough!(hsl[0], 300.0);
    }

    #[test]
    fn test_saturate() {
        let gray = [0.5, 0.5, 0.5];
        let desaturated = saturate(&gray, -1.0);
        for (actual, expected) in desaturated.iter().zip(gray.iter()) {
            assert!((actual - expected).abs() < 1e-6);
        }

        let red = [0.8, 0.2, 0.2];
        let [_, c1, _] = convert(ColorSpace::Rgb, ColorSpace::Lch, &red);
        let [_, c2, _] = convert(ColorSpace::Rgb, ColorSpace::Lch, &saturate(&red, 0.5));
        assert!((c2 - c1 - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_blend() {
        let bottom = [0.25, 0.5, 0.75];
        let top = [0.5, 0.5, 0.5];

        assert_eq!(blend(BlendMode::Multiply, &bottom, &top), [0.125, 0.25, 0.375]);
        assert_eq!(blend(BlendMode::Darken, &bottom, &top), [0.25, 0.5, 0.5]);
        assert_eq!(blend(BlendMode::Lighten, &bottom, &top), [0.5, 0.5, 0.75]);
        assert_eq!(blend(BlendMode::Screen, &bottom, &top), [0.625, 0.75, 0.875]);
        assert_eq!(blend(BlendMode::Overlay, &bottom, &top), [0.25, 0.5, 0.75]);
        assert_eq!(blend(BlendMode::Burn, &bottom, &[0.0, 1.0, 0.5]), [0.0, 0.5, 0.5]);
        assert_eq!(blend(BlendMode::Dodge, &bottom, &[1.0, 0.0, 0.5]), [1.0, 0.5, 1.0]);

        let gray = blend(BlendMode::Color, &bottom, &top);
        assert_eq!(gray, [0.5, 0.5, 0.5]);

        for mode in BlendMode::all() {
            let result = blend(mode, &bottom, &top);
            assert!(result.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_find_closest() {
        let candidates = [0.9, 0.5, 0.3, 0.5];
        let distance = |origin: Float, candidate: &Float| (origin - candidate).abs();

        assert_eq!(find_closest(0.45, candidates.iter(), distance), Some(1));
        assert_eq!(find_closest(0.0, candidates.iter(), distance), Some(2));
        assert_eq!(find_closest(0.0, [].iter(), distance), None);
    }
}
