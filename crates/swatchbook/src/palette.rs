//! Indexed palettes of swatches.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::{contrast_ratio, find_closest, is_dark, relative_luminance, to_lookup_key};
use crate::generator::LuminancePaletteGenerator;
use crate::{Bits, Color, Float};

#[derive(Debug)]
struct SwatchData {
    color: Color,
    relative_luminance: Float,
}

/// A swatch, i.e., a shared, immutable RGB color with memoized relative
/// luminance.
///
/// Cloning a swatch is cheap and preserves its identity, which
/// [`Palette::closest_index_of`] uses as fast path. Equality compares the
/// colors, not the identities.
#[derive(Clone, Debug)]
pub struct Swatch(Rc<SwatchData>);

impl Swatch {
    /// Create a new swatch for the given color, converted to RGB.
    pub fn new(color: Color) -> Self {
        let color = color.to_rgb();
        let relative_luminance = relative_luminance(color.as_ref());
        Self(Rc::new(SwatchData {
            color,
            relative_luminance,
        }))
    }

    /// Create a new swatch with the given RGB coordinates.
    pub fn rgb(r: Float, g: Float, b: Float) -> Self {
        Self::new(Color::rgb(r, g, b))
    }

    /// Create a new gray swatch with the given level for all three
    /// coordinates.
    pub fn gray(level: Float) -> Self {
        Self::rgb(level, level, level)
    }

    /// Access the swatch's color.
    pub fn color(&self) -> &Color {
        &self.0.color
    }

    /// Access the swatch's relative luminance.
    pub fn relative_luminance(&self) -> Float {
        self.0.relative_luminance
    }

    /// Compute the contrast ratio between this and the other swatch.
    pub fn contrast(&self, other: &Self) -> Float {
        contrast_ratio(self.relative_luminance(), other.relative_luminance())
    }

    /// Determine whether this swatch is dark.
    pub fn is_dark(&self) -> bool {
        is_dark(self.relative_luminance())
    }

    /// Determine whether this and the other swatch are the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Format this swatch as a CSS color. Opaque swatches use `#rrggbb`
    /// notation, translucent ones the `rgba()` function.
    pub fn to_css(&self) -> String {
        if self.0.color.alpha() < 1.0 {
            self.0.color.to_css_rgba()
        } else {
            self.0.color.to_hex_rgb()
        }
    }
}

impl PartialEq for Swatch {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.color == other.0.color
    }
}

impl From<Color> for Swatch {
    fn from(value: Color) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Swatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

// ====================================================================================================================

/// The direction of a contrast search through a palette.
///
/// Palettes run from light to dark, so searching toward darker swatches means
/// searching toward higher indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Lighter,
    Darker,
}

impl Direction {
    /// Determine the default direction for the given background: toward
    /// lighter swatches for dark backgrounds and toward darker swatches
    /// otherwise.
    pub fn for_background(background: &Swatch) -> Self {
        if background.is_dark() {
            Self::Lighter
        } else {
            Self::Darker
        }
    }

    /// Get the sign for offsetting indices in this direction.
    pub const fn sign(&self) -> isize {
        match *self {
            Self::Lighter => -1,
            Self::Darker => 1,
        }
    }

    /// Get the opposite direction.
    #[must_use = "method returns a new direction and does not mutate original value"]
    pub const fn reverse(&self) -> Self {
        match *self {
            Self::Lighter => Self::Darker,
            Self::Darker => Self::Lighter,
        }
    }
}

/// Find the first swatch in `swatches[start..]` that satisfies the predicate,
/// assuming the predicate is monotonic. If none does, return the last swatch.
fn binary_search<'a, F>(swatches: &'a [Swatch], predicate: F, start: usize) -> &'a Swatch
where
    F: Fn(&Swatch) -> bool,
{
    let mut low = start;
    let mut high = swatches.len() - 1;

    while low < high {
        let middle = (high - low) / 2 + low;
        if predicate(&swatches[middle]) {
            high = middle;
        } else {
            low = middle + 1;
        }
    }

    &swatches[low]
}

/// A palette, i.e., an ordered, non-empty sequence of swatches.
///
/// Palettes created by [`Palette::from_color`] have 94 swatches running from
/// white to black, with the source color matched to the swatch of equal
/// perceived lightness.
///
/// ```
/// # use swatchbook::{Color, Palette};
/// let palette = Palette::from_color(Color::from_24bit(0x80, 0x80, 0x80));
/// assert_eq!(palette.len(), 94);
/// assert_eq!(palette.get(-3).to_css(), "#ffffff");
/// assert_eq!(palette.get(500).to_css(), "#000000");
/// ```
#[derive(Debug)]
pub struct Palette {
    source: Swatch,
    swatches: Vec<Swatch>,
    reversed_swatches: Vec<Swatch>,
    closest_index_cache: RefCell<HashMap<Bits, usize>>,
}

impl Palette {
    /// Create a new palette with the given source and swatches. If there are
    /// no swatches, the palette consists of the source only.
    pub fn new(source: Swatch, swatches: Vec<Swatch>) -> Self {
        let swatches = if swatches.is_empty() {
            vec![source.clone()]
        } else {
            swatches
        };
        let reversed_swatches = swatches.iter().rev().cloned().collect();

        Self {
            source,
            swatches,
            reversed_swatches,
            closest_index_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Create a new luminance-matched palette for the given source color.
    ///
    /// All swatches have 8-bit precision per channel.
    pub fn from_color(source: impl Into<Swatch>) -> Self {
        let source = source.into();
        let swatches = LuminancePaletteGenerator::new(*source.color())
            .palette()
            .iter()
            .map(|color| {
                let [r, g, b] = color.to_24bit();
                Swatch::new(Color::from_24bit(r, g, b))
            })
            .collect();

        Self::new(source, swatches)
    }

    /// Access the source swatch.
    pub fn source(&self) -> &Swatch {
        &self.source
    }

    /// Access the swatches.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Get the number of swatches.
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    /// Determine whether the palette is empty, which it never is.
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Get the index of the last swatch.
    pub fn last_index(&self) -> usize {
        self.swatches.len() - 1
    }

    fn clamp_index(&self, index: isize) -> usize {
        index.clamp(0, self.last_index() as isize) as usize
    }

    /// Get the swatch at the given index, clamped to the palette's bounds.
    pub fn get(&self, index: isize) -> &Swatch {
        &self.swatches[self.clamp_index(index)]
    }

    /// Find the index of the swatch closest to the given one.
    ///
    /// If the swatch is part of this palette, this method returns its index.
    /// Otherwise, it returns the index of the swatch with the closest relative
    /// luminance, with lower indices winning ties. Results are memoized by
    /// relative luminance.
    pub fn closest_index_of(&self, swatch: &Swatch) -> usize {
        let key = to_lookup_key(swatch.relative_luminance());
        if let Some(index) = self.closest_index_cache.borrow().get(&key) {
            return *index;
        }

        let index = self
            .swatches
            .iter()
            .position(|candidate| candidate.ptr_eq(swatch))
            .unwrap_or_else(|| {
                let luminance = swatch.relative_luminance();
                find_closest(luminance, self.swatches.iter(), |luminance, candidate| {
                    (candidate.relative_luminance() - luminance).abs()
                })
                .unwrap_or(0)
            });

        self.closest_index_cache.borrow_mut().insert(key, index);
        index
    }

    /// Find the first swatch with at least the given contrast ratio against the
    /// reference swatch.
    ///
    /// The search starts at the given index, defaulting to the index closest
    /// to the reference, and proceeds in the given direction, defaulting to
    /// [`Direction::for_background`]. It halves the remaining range with
    /// every step and returns the swatch at the end of the direction if no
    /// swatch has sufficient contrast.
    pub fn color_contrast(
        &self,
        reference: &Swatch,
        ratio: Float,
        start: Option<isize>,
        direction: Option<Direction>,
    ) -> &Swatch {
        let start = start.unwrap_or_else(|| self.closest_index_of(reference) as isize);
        let direction = direction.unwrap_or_else(|| Direction::for_background(reference));

        let start = self.clamp_index(start);
        let (swatches, start) = match direction {
            Direction::Darker => (&self.swatches, start),
            Direction::Lighter => (&self.reversed_swatches, self.last_index() - start),
        };

        binary_search(swatches, |swatch| ratio <= reference.contrast(swatch), start)
    }
}

#[cfg(test)]
mod test {
    use super::{Direction, Palette, Swatch};
    use crate::Color;

    fn neutral() -> Palette {
        Palette::from_color(Color::from_24bit(0x80, 0x80, 0x80))
    }

    #[test]
    fn test_swatch() {
        let white = Swatch::gray(1.0);
        let black = Swatch::gray(0.0);
        assert!((white.contrast(&black) - 21.0).abs() < 1e-9);
        assert!(black.is_dark());
        assert!(!white.is_dark());

        let other_white = Swatch::rgb(1.0, 1.0, 1.0);
        assert_eq!(white, other_white);
        assert!(!white.ptr_eq(&other_white));
        assert!(white.ptr_eq(&white.clone()));
        assert_eq!(white.to_css(), "#ffffff");
        assert_eq!(Swatch::new(Color::rgba(1.0, 0.0, 0.0, 0.5)).to_css(), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn test_from_color() {
        let palette = neutral();
        assert_eq!(palette.len(), 94);
        assert_eq!(palette.last_index(), 93);
        assert_eq!(palette.get(0).to_css(), "#ffffff");
        assert_eq!(palette.get(93).to_css(), "#000000");
        assert_eq!(palette.source().to_css(), "#808080");

        for pair in palette.swatches().windows(2) {
            assert!(pair[0].relative_luminance() >= pair[1].relative_luminance());
        }

        let again = neutral();
        assert_eq!(palette.swatches(), again.swatches());
    }

    #[test]
    fn test_closest_index_of() {
        let palette = neutral();

        for (index, swatch) in palette.swatches().iter().enumerate() {
            let found = palette.closest_index_of(swatch);
            assert_eq!(palette.get(found as isize), swatch);
            assert!(found <= index);
        }

        assert_eq!(palette.closest_index_of(&Swatch::gray(1.0)), 0);
        assert_eq!(palette.closest_index_of(&Swatch::gray(0.0)), 93);

        let source = palette.closest_index_of(palette.source());
        assert_eq!(palette.get(source as isize).to_css(), "#808080");

        // Cached results are stable.
        assert_eq!(palette.closest_index_of(palette.source()), source);
    }

    #[test]
    fn test_color_contrast() {
        let palette = neutral();
        let white = Swatch::gray(1.0);
        let black = Swatch::gray(0.0);

        let dark_on_white = palette.color_contrast(&white, 4.5, None, None);
        assert!(white.contrast(dark_on_white) >= 4.5);
        let index = palette.closest_index_of(dark_on_white);
        assert!(white.contrast(palette.get(index as isize - 1)) < 4.5);

        let light_on_black = palette.color_contrast(&black, 4.5, None, None);
        assert!(black.contrast(light_on_black) >= 4.5);
        let index = palette.closest_index_of(light_on_black);
        assert!(black.contrast(palette.get(index as isize + 1)) < 4.5);

        // Impossible targets yield the swatch at the end of the direction.
        assert_eq!(palette.color_contrast(&white, 30.0, None, None), palette.get(93));
        assert_eq!(
            palette.color_contrast(&white, 30.0, Some(10), Some(Direction::Lighter)),
            palette.get(0)
        );
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::for_background(&Swatch::gray(0.0)), Direction::Lighter);
        assert_eq!(Direction::for_background(&Swatch::gray(1.0)), Direction::Darker);
        assert_eq!(Direction::Lighter.sign(), -1);
        assert_eq!(Direction::Darker.reverse(), Direction::Lighter);
    }
}
