use crate::core::{
    blend, clamp, clamp_alpha, contrast_ratio, convert, format_hex, format_rgb, format_rgba,
    from_24bit, interpolate, is_dark, lerp, linear_luminance, parse, parse_argb,
    relative_luminance, round_to_precision, saturate, to_24bit, BlendMode, ColorSpace, HexLayout,
};
use crate::error::ColorFormatError;
use crate::Float;

/// A color object.
///
/// # Color Spaces and Coordinates
///
/// Every color object has a [`ColorSpace`], three coordinates, and an alpha
/// value. The coordinates of RGB, HSV, and HSL have unit range, except for
/// hues, which are measured in degrees. XYZ, CIELAB, and CIELCh use their
/// conventional ranges. Alpha has unit range and defaults to 1, i.e., fully
/// opaque. Conversion with [`Color::to`] preserves alpha.
///
/// # Unclamped Coordinates
///
/// Constructors never clamp coordinates. Intermediate results may exceed the
/// gamut, e.g., after saturating a color. In contrast, all string formats
/// clamp channels to 0–255 and alpha to unit range. [`Color::clamp`] clamps
/// explicitly.
///
/// # Equality Testing
///
/// Two colors are equal if their color spaces, coordinates, and alphas are
/// identical. The comparison is exact. Use [`Color::round_to_precision`] to
/// compare computed colors.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    space: ColorSpace,
    coordinates: [Float; 3],
    alpha: Float,
}

impl Color {
    /// Instantiate a new, fully opaque color with the given color space and
    /// coordinates.
    ///
    /// ```
    /// # use swatchbook::{Color, ColorSpace};
    /// let pink = Color::new(ColorSpace::Lch, [70.0, 55.0, 350.0]);
    /// assert_eq!(pink.as_ref(), &[70.0_f64, 55.0_f64, 350.0_f64]);
    /// assert_eq!(pink.alpha(), 1.0);
    /// ```
    #[inline]
    pub const fn new(space: ColorSpace, coordinates: [Float; 3]) -> Self {
        Self {
            space,
            coordinates,
            alpha: 1.0,
        }
    }

    /// Instantiate a new RGB color with the given red, green, and blue
    /// coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swatchbook::{Color, ColorSpace};
    /// let fire_brick = Color::rgb(178.0/255.0, 34.0/255.0, 34.0/255.0);
    /// assert_eq!(fire_brick.space(), ColorSpace::Rgb);
    /// ```
    #[inline]
    pub fn rgb(r: impl Into<Float>, g: impl Into<Float>, b: impl Into<Float>) -> Self {
        Self::new(ColorSpace::Rgb, [r.into(), g.into(), b.into()])
    }

    /// Instantiate a new RGB color with the given red, green, blue, and alpha
    /// coordinates.
    #[inline]
    pub fn rgba(
        r: impl Into<Float>,
        g: impl Into<Float>,
        b: impl Into<Float>,
        a: impl Into<Float>,
    ) -> Self {
        Self::rgb(r, g, b).with_alpha(a.into())
    }

    /// Instantiate a new HSL color with the given hue, saturation, and
    /// lightness.
    #[inline]
    pub fn hsl(h: impl Into<Float>, s: impl Into<Float>, l: impl Into<Float>) -> Self {
        Self::new(ColorSpace::Hsl, [h.into(), s.into(), l.into()])
    }

    /// Instantiate a new HSV color with the given hue, saturation, and value.
    #[inline]
    pub fn hsv(h: impl Into<Float>, s: impl Into<Float>, v: impl Into<Float>) -> Self {
        Self::new(ColorSpace::Hsv, [h.into(), s.into(), v.into()])
    }

    /// Instantiate a new XYZ color with the given coordinates.
    #[inline]
    pub fn xyz(x: impl Into<Float>, y: impl Into<Float>, z: impl Into<Float>) -> Self {
        Self::new(ColorSpace::Xyz, [x.into(), y.into(), z.into()])
    }

    /// Instantiate a new CIELAB color with the given lightness and a/b
    /// coordinates.
    #[inline]
    pub fn lab(l: impl Into<Float>, a: impl Into<Float>, b: impl Into<Float>) -> Self {
        Self::new(ColorSpace::Lab, [l.into(), a.into(), b.into()])
    }

    /// Instantiate a new CIELCh color with the given lightness, chroma, and
    /// hue.
    #[inline]
    pub fn lch(l: impl Into<Float>, c: impl Into<Float>, h: impl Into<Float>) -> Self {
        Self::new(ColorSpace::Lch, [l.into(), c.into(), h.into()])
    }

    /// Instantiate a new RGB color from its 24-bit representation.
    ///
    /// ```
    /// # use swatchbook::Color;
    /// let blue = Color::from_24bit(0, 0, 255);
    /// assert_eq!(blue, Color::rgb(0.0, 0.0, 1.0));
    /// ```
    #[inline]
    pub fn from_24bit(r: u8, g: u8, b: u8) -> Self {
        Self::new(ColorSpace::Rgb, from_24bit(r, g, b))
    }

    /// Parse a hashed hexadecimal color with alpha *first*, i.e., `#argb` or
    /// `#aarrggbb`.
    ///
    /// ```
    /// # use swatchbook::Color;
    /// # use swatchbook::error::ColorFormatError;
    /// let red = Color::from_hex_argb("#ffff0000")?;
    /// assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
    /// # Ok::<(), ColorFormatError>(())
    /// ```
    pub fn from_hex_argb(s: &str) -> Result<Self, ColorFormatError> {
        parse_argb(s).map(|(coordinates, alpha)| {
            Self::new(ColorSpace::Rgb, coordinates).with_alpha(alpha)
        })
    }

    /// Create a copy of this color with the given alpha.
    #[inline]
    #[must_use = "method returns a new color and does not mutate original value"]
    pub const fn with_alpha(&self, alpha: Float) -> Self {
        Self {
            space: self.space,
            coordinates: self.coordinates,
            alpha,
        }
    }

    /// Access the color space.
    #[inline]
    pub const fn space(&self) -> ColorSpace {
        self.space
    }

    /// Access the alpha value.
    #[inline]
    pub const fn alpha(&self) -> Float {
        self.alpha
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Convert this color to the target color space.
    ///
    /// RGB and XYZ serve as pivots. Hence conversions between HSL and CIELAB,
    /// for example, take four hops. Alpha carries over unchanged.
    ///
    /// ```
    /// # use swatchbook::{Color, ColorSpace};
    /// let orange = Color::from_24bit(255, 128, 0);
    /// let hsl = orange.to(ColorSpace::Hsl);
    /// assert_eq!(hsl.space(), ColorSpace::Hsl);
    /// assert_eq!(hsl[1], 1.0);
    /// assert_eq!(hsl[2], 0.5);
    /// ```
    #[inline]
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn to(&self, target: ColorSpace) -> Self {
        Self {
            space: target,
            coordinates: convert(self.space, target, &self.coordinates),
            alpha: self.alpha,
        }
    }

    /// Convert this color to RGB.
    #[inline]
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn to_rgb(&self) -> Self {
        self.to(ColorSpace::Rgb)
    }

    /// Clamp the coordinates to their color space's nominal ranges.
    ///
    /// RGB coordinates as well as saturation, lightness, and value are clamped
    /// to unit range. CIE lightness is clamped to `0..=100`, chroma and XYZ
    /// are clamped to be non-negative, and hues are wrapped into `0..360`.
    /// Not-a-number becomes the lower bound. Alpha is clamped to unit range.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn clamp(&self) -> Self {
        use ColorSpace::*;

        let [c1, c2, c3] = self.coordinates;
        let wrap = |h: Float| if h.is_nan() { 0.0 } else { h.rem_euclid(360.0) };
        let non_negative = |c: Float| clamp(c, 0.0, Float::INFINITY);

        let coordinates = match self.space {
            Rgb => [clamp(c1, 0.0, 1.0), clamp(c2, 0.0, 1.0), clamp(c3, 0.0, 1.0)],
            Hsl | Hsv => [wrap(c1), clamp(c2, 0.0, 1.0), clamp(c3, 0.0, 1.0)],
            Xyz => [non_negative(c1), non_negative(c2), non_negative(c3)],
            Lab => [clamp(c1, 0.0, 100.0), c2, c3],
            Lch => [clamp(c1, 0.0, 100.0), non_negative(c2), wrap(c3)],
        };

        Self {
            space: self.space,
            coordinates,
            alpha: clamp_alpha(self.alpha),
        }
    }

    /// Round coordinates and alpha to the given number of digits after the
    /// decimal.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn round_to_precision(&self, digits: u32) -> Self {
        Self {
            space: self.space,
            coordinates: self.coordinates.map(|c| round_to_precision(c, digits)),
            alpha: round_to_precision(self.alpha, digits),
        }
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Compute this color's relative luminance as defined by WCAG 2.
    ///
    /// ```
    /// # use swatchbook::Color;
    /// assert_eq!(Color::rgb(0.0, 0.0, 0.0).relative_luminance(), 0.0);
    /// assert!((Color::rgb(1.0, 1.0, 1.0).relative_luminance() - 1.0).abs() < 1e-9);
    /// ```
    pub fn relative_luminance(&self) -> Float {
        relative_luminance(&self.to_rgb().coordinates)
    }

    /// Compute the weighted sum of this color's RGB coordinates *without*
    /// linearizing them first.
    pub fn linear_luminance(&self) -> Float {
        linear_luminance(&self.to_rgb().coordinates)
    }

    /// Compute the contrast ratio between this color and the other color.
    ///
    /// The result is symmetric and ranges from 1 to 21.
    ///
    /// ```
    /// # use swatchbook::Color;
    /// # use swatchbook::error::ColorFormatError;
    /// let white: Color = "#fff".parse()?;
    /// let black: Color = "#000".parse()?;
    /// assert!((white.contrast(&black) - 21.0).abs() < 0.01);
    /// # Ok::<(), ColorFormatError>(())
    /// ```
    pub fn contrast(&self, other: &Self) -> Float {
        contrast_ratio(self.relative_luminance(), other.relative_luminance())
    }

    /// Determine whether this color is dark, i.e., has more contrast against
    /// white than against black.
    pub fn is_dark(&self) -> bool {
        is_dark(self.relative_luminance())
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Interpolate between this and the other color in the given color space.
    ///
    /// The result is an RGB color. Hues take the shorter arc and alpha
    /// interpolates linearly. A fraction that is not-a-number or at most 0
    /// yields this color in RGB, a fraction of at least 1 the other color.
    ///
    /// ```
    /// # use swatchbook::{Color, ColorSpace};
    /// let black = Color::rgb(0.0, 0.0, 0.0);
    /// let white = Color::rgb(1.0, 1.0, 1.0);
    /// assert_eq!(black.interpolate(0.5, &white, ColorSpace::Rgb), Color::rgb(0.5, 0.5, 0.5));
    /// ```
    #[must_use = "method returns a new color and does not mutate original values"]
    pub fn interpolate(&self, fraction: Float, other: &Self, space: ColorSpace) -> Self {
        let rgb1 = self.to_rgb();
        let rgb2 = other.to_rgb();

        Self {
            space: ColorSpace::Rgb,
            coordinates: interpolate(fraction, space, &rgb1.coordinates, &rgb2.coordinates),
            alpha: lerp(fraction, self.alpha, other.alpha),
        }
    }

    /// Blend the top color onto this color with the given blend mode.
    ///
    /// The result is an RGB color with this color's alpha.
    #[must_use = "method returns a new color and does not mutate original values"]
    pub fn blend(&self, mode: BlendMode, top: &Self) -> Self {
        Self {
            space: ColorSpace::Rgb,
            coordinates: blend(mode, &self.to_rgb().coordinates, &top.to_rgb().coordinates),
            alpha: self.alpha,
        }
    }

    /// Saturate this color by the given amount.
    ///
    /// Each unit of saturation adds 18 units of CIELCh chroma. Negative amounts
    /// desaturate, though chroma never drops below zero. The result is an RGB
    /// color.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn saturate(&self, amount: Float) -> Self {
        Self {
            space: ColorSpace::Rgb,
            coordinates: saturate(&self.to_rgb().coordinates, amount),
            alpha: self.alpha,
        }
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Convert this color to its 24-bit RGB representation.
    pub fn to_24bit(&self) -> [u8; 3] {
        to_24bit(&self.to_rgb().coordinates)
    }

    /// Format this color in `#rrggbb` notation.
    ///
    /// ```
    /// # use swatchbook::Color;
    /// assert_eq!(Color::rgb(1.0, 0.5, 1.5).to_hex_rgb(), "#ff80ff");
    /// ```
    pub fn to_hex_rgb(&self) -> String {
        format_hex(&self.to_rgb().coordinates, self.alpha, HexLayout::Rgb)
    }

    /// Format this color in `#rrggbbaa` notation.
    pub fn to_hex_rgba(&self) -> String {
        format_hex(&self.to_rgb().coordinates, self.alpha, HexLayout::Rgba)
    }

    /// Format this color in `#aarrggbb` notation.
    pub fn to_hex_argb(&self) -> String {
        format_hex(&self.to_rgb().coordinates, self.alpha, HexLayout::Argb)
    }

    /// Format this color with the `rgb()` CSS function.
    pub fn to_css_rgb(&self) -> String {
        format_rgb(&self.to_rgb().coordinates)
    }

    /// Format this color with the `rgba()` CSS function.
    ///
    /// ```
    /// # use swatchbook::Color;
    /// assert_eq!(Color::rgba(1.0, 0.0, 0.0, 0.5).to_css_rgba(), "rgba(255, 0, 0, 0.5)");
    /// ```
    pub fn to_css_rgba(&self) -> String {
        format_rgba(&self.to_rgb().coordinates, self.alpha)
    }

    /// Convert this color to its plain object form.
    pub fn to_rgba(&self) -> Rgba {
        Rgba::from(self)
    }
}

impl Default for Color {
    /// Create an instance of the default color, opaque black in RGB.
    #[inline]
    fn default() -> Self {
        Self::new(ColorSpace::Rgb, [0.0, 0.0, 0.0])
    }
}

impl std::str::FromStr for Color {
    type Err = ColorFormatError;

    /// Instantiate a color from its string representation.
    ///
    /// Before parsing the string slice, this method trims any leading and
    /// trailing white space while also converting ASCII letters to lower case.
    /// That makes parsing effectively case-insensitive.
    ///
    /// This method recognizes the *hashed notation* with three, four, six, or
    /// eight hexadecimal digits. The four and eight digit variants end with
    /// alpha. The three and four digit variants are short forms, i.e., the red
    /// coordinate in `#123` is 0x11/0xff. It further recognizes the `rgb()`
    /// and `rgba()` CSS functions with comma-separated integer channels between
    /// 0 and 255 as well as the CSS named colors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swatchbook::Color;
    /// # use swatchbook::error::ColorFormatError;
    /// let red: Color = "rgba(255, 0, 0, 0.5)".parse()?;
    /// assert_eq!(red, Color::rgba(1.0, 0.0, 0.0, 0.5));
    ///
    /// let navy: Color = "Navy".parse()?;
    /// assert_eq!(navy, Color::from_24bit(0, 0, 128));
    /// # Ok::<(), ColorFormatError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).map(|(coordinates, alpha)| Self::new(ColorSpace::Rgb, coordinates).with_alpha(alpha))
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorFormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl AsRef<[Float; 3]> for Color {
    fn as_ref(&self) -> &[Float; 3] {
        &self.coordinates
    }
}

impl std::ops::Index<usize> for Color {
    type Output = Float;

    /// Access the coordinate with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if `2 < index`.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl std::fmt::Display for Color {
    /// Format this color in `#rrggbb` notation, or `#rrggbbaa` notation if it
    /// is not fully opaque.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if clamp_alpha(self.alpha) < 1.0 {
            f.write_str(&self.to_hex_rgba())
        } else {
            f.write_str(&self.to_hex_rgb())
        }
    }
}

// ====================================================================================================================

/// A plain RGB color record with alpha.
///
/// All four components nominally have unit range.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: Float,
    pub g: Float,
    pub b: Float,
    pub a: Float,
}

impl From<&Color> for Rgba {
    fn from(value: &Color) -> Self {
        let [r, g, b] = *value.to_rgb().as_ref();
        Self {
            r,
            g,
            b,
            a: value.alpha(),
        }
    }
}

impl From<Rgba> for Color {
    fn from(value: Rgba) -> Self {
        Color::rgba(value.r, value.g, value.b, value.a)
    }
}

#[cfg(test)]
mod test {
    use super::{Color, Rgba};
    use crate::error::ColorFormatError;
    use crate::{assert_same_color, BlendMode, ColorSpace, Float};

    #[test]
    fn test_parse_and_format() -> Result<(), ColorFormatError> {
        let red: Color = "rgba(255, 0, 0, 0.5)".parse()?;
        assert_eq!(
            red.to_rgba(),
            Rgba {
                r: 1.0,
                g: 0.0,
                b: 0.0,
                a: 0.5
            }
        );
        assert_eq!(red.to_string(), "#ff000080");
        assert_eq!(red.to_hex_argb(), "#80ff0000");
        assert_eq!(red.to_css_rgb(), "rgb(255, 0, 0)");
        assert_eq!(red.to_css_rgba(), "rgba(255, 0, 0, 0.5)");

        let translucent: Color = "#ff000080".parse()?;
        assert_eq!(translucent.to_css_rgba(), "rgba(255, 0, 0, 0.502)");

        let accent = Color::try_from("#DA1A5F")?;
        assert_eq!(accent.to_string(), "#da1a5f");
        assert_eq!(accent.to_24bit(), [0xda, 0x1a, 0x5f]);

        assert_eq!(
            "rgb(1, 2)".parse::<Color>(),
            Err(ColorFormatError::MissingCoordinate)
        );
        Ok(())
    }

    #[test]
    fn test_conversion_preserves_alpha() {
        let color = Color::rgba(0.2, 0.4, 0.6, 0.25);
        for space in ColorSpace::all() {
            let there = color.to(space);
            assert_eq!(there.alpha(), 0.25);
            assert_same_color!(there.to_rgb(), color, 1e-6);
        }
    }

    #[test]
    fn test_clamp() {
        let wild = Color::rgba(1.5, -0.5, Float::NAN, 2.0).clamp();
        assert_eq!(wild, Color::rgba(1.0, 0.0, 0.0, 1.0));

        let hsl = Color::hsl(-90.0, 1.2, 0.5).clamp();
        assert_eq!(hsl, Color::hsl(270.0, 1.0, 0.5));

        let lch = Color::lch(120.0, -3.0, 725.0).clamp();
        assert_eq!(lch, Color::lch(100.0, 0.0, 5.0));
    }

    #[test]
    fn test_contrast() {
        let white = Color::rgb(1.0, 1.0, 1.0);
        let black = Color::rgb(0.0, 0.0, 0.0);
        let gray = Color::from_24bit(0x80, 0x80, 0x80);

        assert!((white.contrast(&black) - 21.0).abs() < 1e-9);
        assert_eq!(gray.contrast(&gray), 1.0);
        assert_eq!(white.contrast(&gray), gray.contrast(&white));
        assert!(black.is_dark());
        assert!(!white.is_dark());
        assert!(!gray.is_dark());
        assert!(Color::from_24bit(0x60, 0x60, 0x60).is_dark());
    }

    #[test]
    fn test_interpolate_and_blend() {
        let transparent = Color::rgba(0.0, 0.0, 0.0, 0.0);
        let white = Color::rgb(1.0, 1.0, 1.0);

        let mid = transparent.interpolate(0.5, &white, ColorSpace::Rgb);
        assert_eq!(mid, Color::rgba(0.5, 0.5, 0.5, 0.5));

        let hsl = Color::hsl(0.0, 0.0, 0.0);
        assert_eq!(hsl.interpolate(0.0, &white, ColorSpace::Lab), Color::rgb(0.0, 0.0, 0.0));

        let base = Color::rgb(0.5, 0.5, 0.5);
        let multiplied = base.blend(BlendMode::Multiply, &Color::rgb(0.5, 1.0, 0.0));
        assert_eq!(multiplied, Color::rgb(0.25, 0.5, 0.0));

        let gray = Color::rgb(0.5, 0.5, 0.5);
        assert_same_color!(gray.saturate(-2.0), gray, 1e-6);
    }
}
