/// The enumeration of supported color spaces.
///
/// # RGB and Its Cylindrical Cousins
///
/// [sRGB](https://en.wikipedia.org/wiki/SRGB) is the lingua franca of the web
/// and hence the color space that all colors in this crate eventually end up
/// in. In-gamut coordinates range from 0 to 1, inclusive. HSL and HSV are
/// cylindrical reparameterizations of the very same RGB cube. Their hue is
/// measured in degrees `0..360`, whereas saturation, lightness, and value have
/// unit range.
///
/// # CIE XYZ, CIELAB, and CIELCh
///
/// [XYZ](https://en.wikipedia.org/wiki/CIE_1931_color_space) with the D65
/// standard illuminant serves as foundational color space for the CIE family.
/// [CIELAB](https://en.wikipedia.org/wiki/CIELAB_color_space) uses one
/// coordinate for lightness `0..=100` and two unbounded coordinates a/b for
/// colorness. CIELCh expresses the same color space with polar coordinates,
/// i.e., chroma and hue in degrees.
///
/// # Conversion
///
/// Conversions between HSL or HSV and anything else go through RGB.
/// Conversions between LAB or LCh and anything else go through XYZ. Hence RGB
/// and XYZ are the two pivot color spaces.
///
/// The same enumeration also serves as the interpolation mode for
/// [`ColorScale`](crate::ColorScale) and
/// [`PaletteConfig`](crate::PaletteConfig).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    #[default]
    Rgb,
    Hsl,
    Hsv,
    Xyz,
    Lab,
    Lch,
}

impl ColorSpace {
    /// Determine whether this color space has a hue coordinate.
    pub const fn is_polar(&self) -> bool {
        matches!(*self, Self::Hsl | Self::Hsv | Self::Lch)
    }

    /// Determine the index of the hue coordinate, if any.
    ///
    /// HSL and HSV lead with the hue, whereas LCh puts it last.
    pub const fn hue_index(&self) -> Option<usize> {
        match *self {
            Self::Hsl | Self::Hsv => Some(0),
            Self::Lch => Some(2),
            _ => None,
        }
    }

    /// Determine whether this color space is a member of the CIE family.
    pub const fn is_cie(&self) -> bool {
        matches!(*self, Self::Xyz | Self::Lab | Self::Lch)
    }

    /// Get an iterator over all color spaces.
    pub fn all() -> impl Iterator<Item = ColorSpace> {
        use ColorSpace::*;
        [Rgb, Hsl, Hsv, Xyz, Lab, Lch].into_iter()
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ColorSpace::*;

        let s = match self {
            Rgb => "sRGB",
            Hsl => "HSL",
            Hsv => "HSV",
            Xyz => "XYZ D65",
            Lab => "CIELAB",
            Lch => "CIELCh",
        };

        f.write_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::ColorSpace;

    #[test]
    fn test_hue_index() {
        for space in ColorSpace::all() {
            assert_eq!(space.is_polar(), space.hue_index().is_some());
        }
        assert_eq!(ColorSpace::Lch.hue_index(), Some(2));
        assert_eq!(ColorSpace::Hsv.hue_index(), Some(0));
    }
}
