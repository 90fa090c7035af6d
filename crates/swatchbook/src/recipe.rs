//! Recipes for the swatches of themeable user interface elements.
//!
//! A recipe picks swatches from a [`Palette`] relative to the swatch closest
//! to a reference, usually the background or fill color an element is drawn
//! on. Most recipes offset that index by signed deltas for the rest, hover,
//! active, and focus states of an interactive element. Whether the deltas
//! move toward darker or lighter swatches depends on the reference, so that
//! the same deltas work for light and dark themes alike.

use crate::{Direction, Float, Palette, Swatch};

/// The contrast ratio for the outer and inner focus strokes.
pub const FOCUS_STROKE_CONTRAST: Float = 3.5;

/// The contrast ratio for neutral foreground colors.
pub const NEUTRAL_FOREGROUND_CONTRAST: Float = 14.0;

/// The minimum contrast ratio for text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContrastTarget {
    /// Normal text requires a contrast ratio of 4.5.
    Normal,
    /// Large text requires a contrast ratio of 7.
    Large,
}

impl ContrastTarget {
    /// Get the contrast ratio.
    pub const fn ratio(&self) -> Float {
        match *self {
            Self::Normal => 4.5,
            Self::Large => 7.0,
        }
    }
}

/// The standard luminance of a theme's base layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StandardLuminance {
    LightMode,
    DarkMode,
}

impl StandardLuminance {
    /// Get the luminance value.
    pub const fn value(&self) -> Float {
        match *self {
            Self::LightMode => 1.0,
            Self::DarkMode => 0.23,
        }
    }

    /// Get the gray swatch with this luminance for all coordinates.
    pub fn swatch(&self) -> Swatch {
        Swatch::gray(self.value())
    }
}

/// The swatches for the four states of an interactive element.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractiveSwatchSet {
    pub rest: Swatch,
    pub hover: Swatch,
    pub active: Swatch,
    pub focus: Swatch,
}

/// The palette index deltas for the four states of an interactive element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InteractiveDeltas {
    pub rest: isize,
    pub hover: isize,
    pub active: isize,
    pub focus: isize,
}

impl InteractiveDeltas {
    pub const ACCENT_FILL: Self = Self::new(0, 4, -5, 0);
    pub const ACCENT_FOREGROUND: Self = Self::new(0, 6, -4, 0);
    pub const NEUTRAL_FILL: Self = Self::new(7, 10, 5, 0);
    pub const NEUTRAL_FILL_INPUT: Self = Self::new(0, 0, 0, 0);
    pub const NEUTRAL_FILL_STEALTH: Self = Self::new(0, 5, 3, 0);
    pub const NEUTRAL_FILL_STRONG: Self = Self::new(0, 8, -5, 0);
    pub const NEUTRAL_STROKE: Self = Self::new(25, 40, 16, 25);

    /// Create new deltas.
    pub const fn new(rest: isize, hover: isize, active: isize, focus: isize) -> Self {
        Self {
            rest,
            hover,
            active,
            focus,
        }
    }

    /// Get the largest delta.
    pub fn max(&self) -> isize {
        self.rest.max(self.hover).max(self.active).max(self.focus)
    }
}

/// The default delta for the neutral fill layer.
pub const NEUTRAL_FILL_LAYER_DELTA: isize = 3;

/// The default delta for the neutral stroke divider.
pub const NEUTRAL_STROKE_DIVIDER_DELTA: isize = 8;

// --------------------------------------------------------------------------------------------------------------------

fn closest(palette: &Palette, swatch: &Swatch) -> isize {
    palette.closest_index_of(swatch) as isize
}

fn source_index(palette: &Palette) -> isize {
    closest(palette, palette.source())
}

/// Move the index by the signed delta. Deltas are user-configurable, so the
/// arithmetic saturates and [`Palette::get`] clamps the result.
fn offset(index: isize, sign: isize, delta: isize) -> isize {
    index.saturating_add(sign.saturating_mul(delta))
}

/// Order the index of the swatch with sufficient contrast and its offset by
/// the difference between rest and hover deltas into rest and hover indices.
fn order_rest_hover(sign: isize, rest: isize, hover: isize, found: isize) -> (isize, isize) {
    let other = offset(found, sign, rest.saturating_sub(hover).saturating_abs());
    let found_is_rest = if sign == 1 {
        rest < hover
    } else {
        sign.saturating_mul(rest) > sign.saturating_mul(hover)
    };

    if found_is_rest {
        (found, other)
    } else {
        (other, found)
    }
}

fn swatch_set(palette: &Palette, rest: isize, hover: isize, active: isize, focus: isize) -> InteractiveSwatchSet {
    InteractiveSwatchSet {
        rest: palette.get(rest).clone(),
        hover: palette.get(hover).clone(),
        active: palette.get(active).clone(),
        focus: palette.get(focus).clone(),
    }
}

// ====================================================================================================================
// Accent and Error Recipes
// ====================================================================================================================

/// Compute the accent fill.
///
/// The hover state uses the swatch closest to the accent palette's source.
/// The other states are offset from there, away from the reference if the
/// reference sits past the neutral fill deltas in the neutral palette. The
/// same recipe computes the error fill when given the error palette.
pub fn accent_fill(
    accent: &Palette,
    neutral: &Palette,
    reference: &Swatch,
    deltas: InteractiveDeltas,
    neutral_fill: InteractiveDeltas,
) -> InteractiveSwatchSet {
    let threshold = neutral_fill
        .rest
        .max(neutral_fill.hover)
        .max(neutral_fill.active);
    let sign: isize = if closest(neutral, reference) >= threshold {
        -1
    } else {
        1
    };

    let hover = source_index(accent);
    let rest = offset(hover, sign.saturating_neg(), deltas.hover);
    swatch_set(
        accent,
        rest,
        hover,
        offset(rest, sign, deltas.active),
        offset(rest, sign, deltas.focus),
    )
}

/// Compute the foreground on an accent fill: white if it has sufficient
/// contrast against the background, black otherwise.
pub fn foreground_on_accent(background: &Swatch, target: ContrastTarget) -> Swatch {
    let white = Swatch::gray(1.0);
    if background.contrast(&white) >= target.ratio() {
        white
    } else {
        Swatch::gray(0.0)
    }
}

/// Compute the accent foreground, i.e., accent-colored text or icons on the
/// reference background.
///
/// The search for a swatch with sufficient contrast starts at the accent
/// palette's source, offset by the rest and hover deltas, and proceeds away
/// from the reference. The same recipe computes the error foreground when
/// given the error palette.
pub fn accent_foreground(
    accent: &Palette,
    reference: &Swatch,
    target: ContrastTarget,
    deltas: InteractiveDeltas,
) -> InteractiveSwatchSet {
    let direction = Direction::for_background(reference);
    let sign = direction.sign();

    let bias = if sign == 1 {
        deltas.rest.min(deltas.hover)
    } else {
        sign.saturating_mul(deltas.rest)
            .max(sign.saturating_mul(deltas.hover))
    };
    let start = source_index(accent).saturating_add(bias);
    let found = accent.color_contrast(reference, target.ratio(), Some(start), Some(direction));
    let found = closest(accent, found);

    let (rest, hover) = order_rest_hover(sign, deltas.rest, deltas.hover, found);
    swatch_set(
        accent,
        rest,
        hover,
        offset(rest, sign, deltas.active),
        offset(rest, sign, deltas.focus),
    )
}

// ====================================================================================================================
// Neutral Fills
// ====================================================================================================================

/// Compute the neutral fill.
///
/// The deltas apply toward darker swatches unless the reference sits past
/// the largest delta, in which case they apply toward lighter swatches.
pub fn neutral_fill(palette: &Palette, reference: &Swatch, deltas: InteractiveDeltas) -> InteractiveSwatchSet {
    let index = closest(palette, reference);
    let sign = if index >= deltas.max() { -1 } else { 1 };

    swatch_set(
        palette,
        offset(index, sign, deltas.rest),
        offset(index, sign, deltas.hover),
        offset(index, sign, deltas.active),
        offset(index, sign, deltas.focus),
    )
}

/// Compute the neutral fill for input elements.
///
/// The deltas apply toward the reference's end of the palette.
pub fn neutral_fill_input(palette: &Palette, reference: &Swatch, deltas: InteractiveDeltas) -> InteractiveSwatchSet {
    let sign = Direction::for_background(reference).sign();
    let index = closest(palette, reference);

    swatch_set(
        palette,
        offset(index, -sign, deltas.rest),
        offset(index, -sign, deltas.hover),
        offset(index, -sign, deltas.active),
        offset(index, -sign, deltas.focus),
    )
}

/// Compute the stealth neutral fill, which is invisible at rest.
///
/// The direction switch considers both the stealth and the regular neutral
/// fill deltas, so that stealth fills never collide with regular ones.
pub fn neutral_fill_stealth(
    palette: &Palette,
    reference: &Swatch,
    deltas: InteractiveDeltas,
    neutral_fill: InteractiveDeltas,
) -> InteractiveSwatchSet {
    let threshold = deltas.max().max(neutral_fill.max());
    let index = closest(palette, reference);
    let sign = if index >= threshold { -1 } else { 1 };

    swatch_set(
        palette,
        offset(index, sign, deltas.rest),
        offset(index, sign, deltas.hover),
        offset(index, sign, deltas.active),
        offset(index, sign, deltas.focus),
    )
}

/// Compute the strong neutral fill, which starts at the first swatch with
/// normal text contrast against the reference.
pub fn neutral_fill_strong(palette: &Palette, reference: &Swatch, deltas: InteractiveDeltas) -> InteractiveSwatchSet {
    let sign = Direction::for_background(reference).sign();
    let found = palette.color_contrast(reference, ContrastTarget::Normal.ratio(), None, None);
    let found = closest(palette, found);

    let (rest, hover) = order_rest_hover(sign, deltas.rest, deltas.hover, found);
    swatch_set(
        palette,
        rest,
        hover,
        offset(rest, sign, deltas.active),
        offset(rest, sign, deltas.focus),
    )
}

/// Compute the neutral fill layer, offset by the delta toward darker swatches
/// near the light end of the palette and toward lighter swatches otherwise.
pub fn neutral_fill_layer(palette: &Palette, reference: &Swatch, delta: isize) -> Swatch {
    let index = closest(palette, reference);
    let sign = if index < delta { 1 } else { -1 };
    palette.get(offset(index, sign, delta)).clone()
}

// ====================================================================================================================
// Neutral Layers
// ====================================================================================================================

fn base_layer_index(palette: &Palette, base_luminance: Float) -> isize {
    closest(palette, &Swatch::gray(base_luminance))
}

/// Compute the base index for layers 2, 3, and 4, which sit past the neutral
/// fill deltas so that fills remain distinguishable on top of them.
fn stacked_layer_index(
    palette: &Palette,
    base_luminance: Float,
    layer_delta: isize,
    neutral_fill: InteractiveDeltas,
) -> isize {
    offset(base_layer_index(palette, base_luminance), 1, layer_delta)
        .max(neutral_fill.rest)
        .max(neutral_fill.hover)
        .max(neutral_fill.active)
}

/// Compute the neutral layer for card containers.
pub fn neutral_layer_card_container(palette: &Palette, base_luminance: Float, layer_delta: isize) -> Swatch {
    palette
        .get(offset(base_layer_index(palette, base_luminance), 1, layer_delta))
        .clone()
}

/// Compute the neutral layer for floating elements.
pub fn neutral_layer_floating(palette: &Palette, base_luminance: Float, layer_delta: isize) -> Swatch {
    palette
        .get(offset(base_layer_index(palette, base_luminance), -2, layer_delta))
        .clone()
}

/// Compute the first neutral layer, i.e., the swatch closest to the base
/// luminance.
pub fn neutral_layer_1(palette: &Palette, base_luminance: Float) -> Swatch {
    palette.get(base_layer_index(palette, base_luminance)).clone()
}

/// Compute the second neutral layer.
pub fn neutral_layer_2(
    palette: &Palette,
    base_luminance: Float,
    layer_delta: isize,
    neutral_fill: InteractiveDeltas,
) -> Swatch {
    palette
        .get(stacked_layer_index(palette, base_luminance, layer_delta, neutral_fill))
        .clone()
}

/// Compute the third neutral layer.
pub fn neutral_layer_3(
    palette: &Palette,
    base_luminance: Float,
    layer_delta: isize,
    neutral_fill: InteractiveDeltas,
) -> Swatch {
    let index = stacked_layer_index(palette, base_luminance, layer_delta, neutral_fill);
    palette.get(offset(index, 1, layer_delta)).clone()
}

/// Compute the fourth neutral layer.
pub fn neutral_layer_4(
    palette: &Palette,
    base_luminance: Float,
    layer_delta: isize,
    neutral_fill: InteractiveDeltas,
) -> Swatch {
    let index = stacked_layer_index(palette, base_luminance, layer_delta, neutral_fill);
    palette.get(offset(index, 2, layer_delta)).clone()
}

// ====================================================================================================================
// Strokes and Foregrounds
// ====================================================================================================================

/// Compute the outer focus stroke.
pub fn focus_stroke_outer(neutral: &Palette, fill: &Swatch) -> Swatch {
    neutral
        .color_contrast(fill, FOCUS_STROKE_CONTRAST, None, None)
        .clone()
}

/// Compute the inner focus stroke, which contrasts with the outer focus
/// stroke and searches the accent palette from its source toward the fill.
pub fn focus_stroke_inner(accent: &Palette, fill: &Swatch, outer: &Swatch) -> Swatch {
    accent
        .color_contrast(
            outer,
            FOCUS_STROKE_CONTRAST,
            Some(source_index(accent)),
            Some(Direction::for_background(fill).reverse()),
        )
        .clone()
}

/// Compute the neutral foreground.
pub fn neutral_foreground(neutral: &Palette, fill: &Swatch) -> Swatch {
    neutral
        .color_contrast(fill, NEUTRAL_FOREGROUND_CONTRAST, None, None)
        .clone()
}

/// Compute the neutral foreground for hints.
pub fn neutral_foreground_hint(neutral: &Palette, fill: &Swatch) -> Swatch {
    neutral
        .color_contrast(fill, ContrastTarget::Normal.ratio(), None, None)
        .clone()
}

/// Compute the neutral stroke. The rest delta moves away from the reference's
/// end of the palette; the other deltas are relative to the rest delta.
pub fn neutral_stroke(palette: &Palette, reference: &Swatch, deltas: InteractiveDeltas) -> InteractiveSwatchSet {
    let index = closest(palette, reference);
    let sign = Direction::for_background(reference).sign();
    let rest = offset(index, sign, deltas.rest);

    swatch_set(
        palette,
        rest,
        offset(rest, sign, deltas.hover.saturating_sub(deltas.rest)),
        offset(rest, sign, deltas.active.saturating_sub(deltas.rest)),
        offset(rest, sign, deltas.focus.saturating_sub(deltas.rest)),
    )
}

/// Compute the neutral stroke for dividers.
pub fn neutral_stroke_divider(palette: &Palette, reference: &Swatch, delta: isize) -> Swatch {
    let sign = Direction::for_background(reference).sign();
    palette.get(offset(closest(palette, reference), sign, delta)).clone()
}
