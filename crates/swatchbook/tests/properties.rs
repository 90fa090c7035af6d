//! Property-based invariant tests for colors, scales, and palettes.
//!
//! These tests verify structural invariants that must hold for any input:
//!
//! 1. Converting RGB to another color space and back restores the color.
//! 2. Contrast is symmetric, at least 1, and exactly 1 against itself.
//! 3. Color scales return their first and last stops outside unit range.
//! 4. Palette generation is deterministic and honors the number of steps.
//! 5. Palettes built around grays run from light to dark.
//! 6. The contrast search either hits its target or gives up at the end of
//!    the scale.

use proptest::prelude::*;
use swatchbook::{
    Color, ColorScale, ColorScaleStop, ColorSpace, ContrastSearch, Float, LuminancePaletteGenerator,
    PaletteConfig, PaletteGenerator,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn unit() -> impl Strategy<Value = Float> {
    (0u32..=1000).prop_map(|n| n as Float / 1000.0)
}

fn rgb() -> impl Strategy<Value = Color> {
    (unit(), unit(), unit()).prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

fn gray(level: Float) -> Color {
    Color::rgb(level, level, level)
}

fn stops() -> impl Strategy<Value = Vec<ColorScaleStop>> {
    proptest::collection::vec(
        (unit(), rgb()).prop_map(|(position, color)| ColorScaleStop::new(position, color)),
        1..8,
    )
}

fn assert_close(c1: &Color, c2: &Color, tolerance: Float) -> Result<(), TestCaseError> {
    let (a, b) = (c1.to_rgb(), c2.to_rgb());
    for index in 0..3 {
        prop_assert!(
            (a[index] - b[index]).abs() <= tolerance,
            "{} and {} differ in coordinate {}",
            a,
            b,
            index
        );
    }
    Ok(())
}

fn white_to_black() -> ColorScale {
    ColorScale::balanced(vec![gray(1.0), gray(0.0)]).unwrap()
}

// ── Conversions ─────────────────────────────────────────────────────────

proptest! {
    /// RGB survives a round trip through every other color space.
    #[test]
    fn conversion_round_trip(color in rgb()) {
        for space in [
            ColorSpace::Hsl,
            ColorSpace::Hsv,
            ColorSpace::Xyz,
            ColorSpace::Lab,
            ColorSpace::Lch,
        ] {
            let back = color.to(space).to_rgb();
            assert_close(&color, &back, 1e-3)?;
        }
    }

    /// Contrast is symmetric and never drops below 1.
    #[test]
    fn contrast_is_symmetric(c1 in rgb(), c2 in rgb()) {
        let forward = c1.contrast(&c2);
        let backward = c2.contrast(&c1);
        prop_assert!((forward - backward).abs() < 1e-9);
        prop_assert!(forward >= 1.0);
        prop_assert!(forward <= 21.0 + 1e-9);
    }

    /// A color has no contrast against itself.
    #[test]
    fn self_contrast_is_one(color in rgb()) {
        prop_assert!((color.contrast(&color) - 1.0).abs() < 1e-9);
    }
}

// ── Color Scales ────────────────────────────────────────────────────────

proptest! {
    /// Positions outside unit range clamp to the scale's end points.
    #[test]
    fn scale_clamps_to_end_points(stops in stops(), overshoot in unit()) {
        let scale = ColorScale::new(stops).unwrap();
        let first = scale.stops()[0].color;
        let last = scale.stops()[scale.stops().len() - 1].color;

        prop_assert_eq!(scale.get_color(-overshoot, ColorSpace::Rgb), first);
        prop_assert_eq!(scale.get_color(Float::NAN, ColorSpace::Rgb), first);
        if scale.stops().len() > 1 {
            prop_assert_eq!(scale.get_color(1.0 + overshoot, ColorSpace::Rgb), last);
        }
    }

    /// The contrast search hits its target or ends up at the end of the scale.
    #[test]
    fn contrast_search_hits_target_or_end(
        start in unit(),
        target in (150u32..=1000).prop_map(|n| n as Float / 100.0),
        search_darker in any::<bool>(),
    ) {
        let scale = white_to_black();
        let search = ContrastSearch::default();
        let position = scale.find_next_color(start, target, search_darker, ColorSpace::Rgb, search);
        let end = if search_darker { 0.0 } else { 1.0 };

        prop_assert!((0.0..=1.0).contains(&position));
        let contrast = scale
            .get_color(start, ColorSpace::Rgb)
            .contrast(&scale.get_color(position, ColorSpace::Rgb));
        prop_assert!(
            (contrast - target).abs() <= search.tolerance || position == end,
            "contrast {} at {} misses target {}",
            contrast,
            position,
            target
        );
    }
}

// ── Palettes ────────────────────────────────────────────────────────────

proptest! {
    /// The same configuration always yields the same palette.
    #[test]
    fn palette_generation_is_deterministic(base in rgb(), steps in 2usize..32) {
        let config = PaletteConfig::default().with_base_color(base).with_steps(steps);
        let p1 = PaletteGenerator::new(config.clone());
        let p2 = PaletteGenerator::new(config);

        prop_assert_eq!(p1.palette().len(), steps);
        prop_assert_eq!(p1.palette(), p2.palette());
    }

    /// Palettes around a gray never get lighter.
    #[test]
    fn gray_palette_darkens(level in (50u32..=950).prop_map(|n| n as Float / 1000.0)) {
        for config in [PaletteConfig::default(), PaletteConfig::greyscale()] {
            let generator = PaletteGenerator::new(config.with_base_color(gray(level)));

            for pair in generator.palette().windows(2) {
                prop_assert!(
                    pair[1].relative_luminance() <= pair[0].relative_luminance() + 1e-9,
                    "{} is lighter than {}",
                    pair[1],
                    pair[0]
                );
            }
        }
    }

    /// Luminance-matched palettes run from white to black.
    #[test]
    fn luminance_palette_runs_light_to_dark(level in (200u32..=950).prop_map(|n| n as Float / 1000.0)) {
        let palette = LuminancePaletteGenerator::new(gray(level)).palette();

        prop_assert_eq!(palette.len(), swatchbook::LUMINANCE_PALETTE_STEPS);
        let first = palette[0].relative_luminance();
        let last = palette[palette.len() - 1].relative_luminance();
        prop_assert!(first >= last);
        for color in &palette {
            prop_assert!(color.relative_luminance() <= first + 1e-9);
            prop_assert!(color.relative_luminance() + 1e-9 >= last);
        }
    }
}
