use super::ColorSpace;
use crate::Float;

/// Convert the given 24-bit RGB coordinates to floating point coordinates.
#[inline]
pub(crate) fn from_24bit(r: u8, g: u8, b: u8) -> [Float; 3] {
    [r as Float / 255.0, g as Float / 255.0, b as Float / 255.0]
}

/// Convert the coordinate to its 8-bit representation.
///
/// This function clamps the coordinate to unit range before scaling and
/// rounding. Not-a-number becomes zero.
#[inline]
pub(crate) fn to_8bit(value: Float) -> u8 {
    let value = if value.is_nan() { 0.0 } else { value };
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert the RGB coordinates to 24-bit representation.
pub(crate) fn to_24bit(coordinates: &[Float; 3]) -> [u8; 3] {
    let [r, g, b] = *coordinates;
    [to_8bit(r), to_8bit(g), to_8bit(b)]
}

// --------------------------------------------------------------------------------------------------------------------

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

/// Compute the hue in degrees `0..360` from RGB coordinates plus their
/// maximum and chroma. The hue of achromatic colors is zero.
#[inline]
fn rgb_to_hue(value: &[Float; 3], max: Float, chroma: Float) -> Float {
    let [r, g, b] = *value;

    if chroma == 0.0 {
        return 0.0;
    }

    let hue = if max == r {
        ((g - b) / chroma % 6.0) * 60.0
    } else if max == g {
        60.0 * ((b - r) / chroma + 2.0)
    } else {
        60.0 * ((r - g) / chroma + 4.0)
    };

    if hue < 0.0 {
        hue + 360.0
    } else {
        hue
    }
}

/// Distribute chroma and the secondary component across the three RGB
/// coordinates based on the hue's sextant. Hues outside `0..360` place all
/// color into the offset.
#[inline]
fn sextant_to_rgb(hue: Float, chroma: Float, secondary: Float, offset: Float) -> [Float; 3] {
    let [r, g, b] = if hue < 0.0 {
        [0.0, 0.0, 0.0]
    } else if hue < 60.0 {
        [chroma, secondary, 0.0]
    } else if hue < 120.0 {
        [secondary, chroma, 0.0]
    } else if hue < 180.0 {
        [0.0, chroma, secondary]
    } else if hue < 240.0 {
        [0.0, secondary, chroma]
    } else if hue < 300.0 {
        [secondary, 0.0, chroma]
    } else if hue < 360.0 {
        [chroma, 0.0, secondary]
    } else {
        [0.0, 0.0, 0.0]
    };

    [r + offset, g + offset, b + offset]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates for RGB to HSL. This is a one-hop, direct conversion.
fn rgb_to_hsl(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = *value;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let hue = rgb_to_hue(value, max, chroma);
    let lightness = (max + min) / 2.0;
    let saturation = if chroma == 0.0 {
        0.0
    } else {
        chroma / (1.0 - (2.0 * lightness - 1.0).abs())
    };

    [hue, saturation, lightness]
}

/// Convert coordinates for HSL to RGB. This is a one-hop, direct conversion.
fn hsl_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    let [h, s, l] = *value;
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let secondary = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    sextant_to_rgb(h, chroma, secondary, l - chroma / 2.0)
}

/// Convert coordinates for RGB to HSV. This is a one-hop, direct conversion.
fn rgb_to_hsv(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = *value;
    let max = r.max(g).max(b);
    let chroma = max - r.min(g).min(b);

    let hue = rgb_to_hue(value, max, chroma);
    let saturation = if max == 0.0 { 0.0 } else { chroma / max };

    [hue, saturation, max]
}

/// Convert coordinates for HSV to RGB. This is a one-hop, direct conversion.
fn hsv_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    let [h, s, v] = *value;
    let chroma = s * v;
    let secondary = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    sextant_to_rgb(h, chroma, secondary, v - chroma)
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates from gamma-corrected sRGB to linear sRGB.
fn rgb_to_linear_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        if value <= 0.04045 {
            value / 12.92
        } else {
            ((value + 0.055) / 1.055).powf(2.4)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

/// Convert coordinates from linear sRGB to gamma-corrected sRGB.
fn linear_rgb_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        if value <= 0.0031308 {
            value * 12.92
        } else {
            value.powf(1.0 / 2.4).mul_add(1.055, -0.055)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_XYZ: [[Float; 3]; 3] = [
    [ 0.4124564, 0.3575761, 0.1804375 ],
    [ 0.2126729, 0.7151522, 0.0721750 ],
    [ 0.0193339, 0.1191920, 0.9503041 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  3.2404542, -1.5371385, -0.4985314 ],
    [ -0.9692660,  1.8760108,  0.0415560 ],
    [  0.0556434, -0.2040259,  1.0572252 ],
];

/// Convert coordinates for sRGB to XYZ. This is a two-hop conversion.
#[inline]
fn rgb_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    multiply(&LINEAR_SRGB_TO_XYZ, &rgb_to_linear_rgb(value))
}

/// Convert coordinates for XYZ to sRGB. This is a two-hop conversion.
#[inline]
fn xyz_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    linear_rgb_to_rgb(&multiply(&XYZ_TO_LINEAR_SRGB, value))
}

// --------------------------------------------------------------------------------------------------------------------

mod cie {
    use crate::Float;

    /// The D65 reference white.
    pub(crate) const WHITE_POINT: [Float; 3] = [0.95047, 1.0, 1.08883];

    /// The CIE standard's ε, marking the end of the linear segment.
    pub(crate) const EPSILON: Float = 216.0 / 24389.0;

    /// The CIE standard's κ, the slope of the linear segment.
    pub(crate) const KAPPA: Float = 24389.0 / 27.0;

    /// Convert coordinates for XYZ to CIELAB. This is a one-hop, direct
    /// conversion.
    pub(super) fn xyz_to_lab(value: &[Float; 3]) -> [Float; 3] {
        #[inline]
        fn f(t: Float) -> Float {
            if t > EPSILON {
                t.cbrt()
            } else {
                KAPPA.mul_add(t, 16.0) / 116.0
            }
        }

        let fx = f(value[0] / WHITE_POINT[0]);
        let fy = f(value[1] / WHITE_POINT[1]);
        let fz = f(value[2] / WHITE_POINT[2]);

        [fy.mul_add(116.0, -16.0), 500.0 * (fx - fy), 200.0 * (fy - fz)]
    }

    /// Convert coordinates for CIELAB to XYZ. This is a one-hop, direct
    /// conversion.
    #[allow(non_snake_case)]
    pub(super) fn lab_to_xyz(value: &[Float; 3]) -> [Float; 3] {
        let [L, a, b] = *value;

        let fy = (L + 16.0) / 116.0;
        let fx = fy + a / 500.0;
        let fz = fy - b / 200.0;

        let fx3 = fx.powi(3);
        let fz3 = fz.powi(3);

        let x = if fx3 > EPSILON {
            fx3
        } else {
            fx.mul_add(116.0, -16.0) / KAPPA
        };
        let y = if L > EPSILON * KAPPA {
            fy.powi(3)
        } else {
            L / KAPPA
        };
        let z = if fz3 > EPSILON {
            fz3
        } else {
            fz.mul_add(116.0, -16.0) / KAPPA
        };

        [WHITE_POINT[0] * x, WHITE_POINT[1] * y, WHITE_POINT[2] * z]
    }

    /// The magnitude below which a/b count as zero when computing the hue.
    const ACHROMATIC_THRESHOLD: Float = 0.001;

    /// Convert coordinates for CIELAB to CIELCh. This is a one-hop, direct
    /// conversion.
    #[allow(non_snake_case)]
    pub(super) fn lab_to_lch(value: &[Float; 3]) -> [Float; 3] {
        let [L, a, b] = *value;

        let h = if a.abs() > ACHROMATIC_THRESHOLD || b.abs() > ACHROMATIC_THRESHOLD {
            let h = b.atan2(a).to_degrees();
            if h < 0.0 {
                h + 360.0
            } else {
                h
            }
        } else {
            0.0
        };

        [L, a.hypot(b), h]
    }

    /// Convert coordinates for CIELCh to CIELAB. This is a one-hop, direct
    /// conversion.
    #[allow(non_snake_case)]
    pub(super) fn lch_to_lab(value: &[Float; 3]) -> [Float; 3] {
        let [L, C, h] = *value;
        let hue_radian = h.to_radians();
        [L, C * hue_radian.cos(), C * hue_radian.sin()]
    }
}

use cie::{lab_to_lch, lab_to_xyz, lch_to_lab, xyz_to_lab};

// --------------------------------------------------------------------------------------------------------------------

/// Convert the coordinates from one color space to another.
///
/// This function converts the coordinates to the targeted color space, which
/// may be the same as the original color space. Conversions between unrelated
/// color spaces pivot through RGB and XYZ. This function neither normalizes nor
/// clamps coordinates.
#[must_use = "function returns new color coordinates and does not mutate original value"]
pub(crate) fn convert(
    from_space: ColorSpace,
    to_space: ColorSpace,
    coordinates: &[Float; 3],
) -> [Float; 3] {
    use ColorSpace::*;

    // 1. Be done if color spaces are the same.
    if from_space == to_space {
        return *coordinates;
    }

    // 2. Handle in-branch conversions that don't go through both pivots
    match (from_space, to_space) {
        (Rgb, Hsl) => return rgb_to_hsl(coordinates),
        (Hsl, Rgb) => return hsl_to_rgb(coordinates),
        (Rgb, Hsv) => return rgb_to_hsv(coordinates),
        (Hsv, Rgb) => return hsv_to_rgb(coordinates),
        (Xyz, Lab) => return xyz_to_lab(coordinates),
        (Lab, Xyz) => return lab_to_xyz(coordinates),
        (Lab, Lch) => return lab_to_lch(coordinates),
        (Lch, Lab) => return lch_to_lab(coordinates),
        (Xyz, Lch) => return lab_to_lch(&xyz_to_lab(coordinates)),
        (Lch, Xyz) => return lab_to_xyz(&lch_to_lab(coordinates)),
        _ => (),
    }

    // 3a. Convert from source color space to RGB
    let rgb = match from_space {
        Rgb => *coordinates,
        Hsl => hsl_to_rgb(coordinates),
        Hsv => hsv_to_rgb(coordinates),
        Xyz => xyz_to_rgb(coordinates),
        Lab => xyz_to_rgb(&lab_to_xyz(coordinates)),
        Lch => xyz_to_rgb(&lab_to_xyz(&lch_to_lab(coordinates))),
    };

    // 3b. Convert from RGB to target color space
    match to_space {
        Rgb => rgb,
        Hsl => rgb_to_hsl(&rgb),
        Hsv => rgb_to_hsv(&rgb),
        Xyz => rgb_to_xyz(&rgb),
        Lab => xyz_to_lab(&rgb_to_xyz(&rgb)),
        Lch => lab_to_lch(&xyz_to_lab(&rgb_to_xyz(&rgb))),
    }
}
