//! Palette generators turning a base color into a ramp of colors.

use crate::core::find_closest;
use crate::error::ScaleError;
use crate::{BlendMode, Color, ColorScale, ColorScaleStop, ColorSpace, Float};

/// The configuration of a [`PaletteGenerator`].
///
/// The generator starts with a scale from `scale_color_light` through
/// `base_color` to `scale_color_dark`, trims `clip_light` off the light end
/// and `clip_dark` off the dark end, optionally saturates and blends the new
/// end points, re-anchors the base color at `base_scale_position`, and samples
/// the result at `steps` evenly spaced positions.
///
/// With the `serde` feature, missing fields deserialize to their defaults.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteConfig {
    /// The color to build the palette around.
    pub base_color: Color,
    /// The number of colors in the palette.
    pub steps: usize,
    /// The color space for interpolating between scale stops.
    pub interpolation_mode: ColorSpace,
    /// The color at the light end of the initial scale.
    pub scale_color_light: Color,
    /// The color at the dark end of the initial scale.
    pub scale_color_dark: Color,
    /// The fraction trimmed off the light end.
    pub clip_light: Float,
    /// The fraction trimmed off the dark end.
    pub clip_dark: Float,
    /// The minimum HSL saturation of the base color for saturating the end
    /// points.
    pub saturation_adjustment_cutoff: Float,
    /// The saturation added to the light end point.
    pub saturation_light: Float,
    /// The saturation added to the dark end point.
    pub saturation_dark: Float,
    /// The fraction of overlay-blending the light end point with the base.
    pub overlay_light: Float,
    /// The fraction of overlay-blending the dark end point with the base.
    pub overlay_dark: Float,
    /// The fraction of multiply-blending the light end point with the base.
    pub multiply_light: Float,
    /// The fraction of multiply-blending the dark end point with the base.
    pub multiply_dark: Float,
    /// The position of the base color on the final scale. Zero and
    /// not-a-number fall back on the middle.
    pub base_scale_position: Float,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            base_color: Color::from_24bit(0x80, 0x80, 0x80),
            steps: 11,
            interpolation_mode: ColorSpace::Rgb,
            scale_color_light: Color::rgb(1.0, 1.0, 1.0),
            scale_color_dark: Color::rgb(0.0, 0.0, 0.0),
            clip_light: 0.185,
            clip_dark: 0.16,
            saturation_adjustment_cutoff: 0.05,
            saturation_light: 0.35,
            saturation_dark: 1.25,
            overlay_light: 0.0,
            overlay_dark: 0.25,
            multiply_light: 0.0,
            multiply_dark: 0.0,
            base_scale_position: 0.5,
        }
    }
}

impl PaletteConfig {
    /// Create the configuration for a neutral palette that neither clips,
    /// saturates, nor blends.
    pub fn greyscale() -> Self {
        Self {
            clip_light: 0.0,
            clip_dark: 0.0,
            saturation_adjustment_cutoff: 0.0,
            saturation_light: 0.0,
            saturation_dark: 0.0,
            overlay_light: 0.0,
            overlay_dark: 0.0,
            multiply_light: 0.0,
            multiply_dark: 0.0,
            ..Self::default()
        }
    }

    /// Create a copy of this configuration with the given base color.
    #[must_use = "method returns a new configuration and does not mutate original value"]
    pub fn with_base_color(&self, base_color: Color) -> Self {
        Self {
            base_color,
            ..self.clone()
        }
    }

    /// Create a copy of this configuration with the given number of steps.
    #[must_use = "method returns a new configuration and does not mutate original value"]
    pub fn with_steps(&self, steps: usize) -> Self {
        Self {
            steps,
            ..self.clone()
        }
    }

    /// Blend the end point with the base color and then move the end point
    /// toward the blended color by the given fraction. Zero fractions leave
    /// the end point as is.
    fn adjust(&self, end_point: Color, mode: BlendMode, fraction: Float) -> Color {
        if fraction == 0.0 {
            return end_point;
        }

        let blended = self.base_color.blend(mode, &end_point);
        end_point.interpolate(fraction, &blended, self.interpolation_mode)
    }

    /// Build the color scale sampled by the generator.
    fn to_scale(&self) -> Result<ColorScale, ScaleError> {
        let base = self.base_color;
        let hsl = base.to(ColorSpace::Hsl);

        let initial = ColorScale::new(vec![
            ColorScaleStop::new(0.0, self.scale_color_light),
            ColorScaleStop::new(0.5, base),
            ColorScaleStop::new(1.0, self.scale_color_dark),
        ]);
        let trimmed = initial.and_then(|scale| {
            scale.trim(self.clip_light, 1.0 - self.clip_dark, ColorSpace::Rgb)
        });

        let (mut light, mut dark) = match trimmed {
            Ok(scale) => (
                scale.get_color(0.0, ColorSpace::Rgb),
                scale.get_color(1.0, ColorSpace::Rgb),
            ),
            Err(error) => {
                tracing::warn!(%error, "ignoring clip fractions");
                (self.scale_color_light, self.scale_color_dark)
            }
        };

        if self.saturation_adjustment_cutoff <= hsl[1] {
            light = light.saturate(self.saturation_light);
            dark = dark.saturate(self.saturation_dark);
        }

        light = self.adjust(light, BlendMode::Multiply, self.multiply_light);
        dark = self.adjust(dark, BlendMode::Multiply, self.multiply_dark);
        light = self.adjust(light, BlendMode::Overlay, self.overlay_light);
        dark = self.adjust(dark, BlendMode::Overlay, self.overlay_dark);

        let position = self.base_scale_position;
        let stops = if position.is_nan() || position == 0.0 {
            vec![
                ColorScaleStop::new(0.0, light.clamp()),
                ColorScaleStop::new(0.5, base),
                ColorScaleStop::new(1.0, dark.clamp()),
            ]
        } else if position < 0.0 {
            vec![
                ColorScaleStop::new(0.0, base),
                ColorScaleStop::new(1.0, dark.clamp()),
            ]
        } else if 1.0 <= position {
            vec![
                ColorScaleStop::new(0.0, light.clamp()),
                ColorScaleStop::new(1.0, base),
            ]
        } else {
            vec![
                ColorScaleStop::new(0.0, light.clamp()),
                ColorScaleStop::new(position, base),
                ColorScaleStop::new(1.0, dark.clamp()),
            ]
        };

        ColorScale::new(stops)
    }
}

/// Sample the scale at the given number of evenly spaced positions.
fn sample(scale: &ColorScale, steps: usize, space: ColorSpace) -> Vec<Color> {
    let denominator = steps.saturating_sub(1).max(1) as Float;
    (0..steps)
        .map(|index| scale.get_color(index as Float / denominator, space))
        .collect()
}

// ====================================================================================================================

/// A palette generator.
///
/// The generator owns its configuration and the ramp of colors generated from
/// it. Any change to the configuration regenerates the entire ramp.
///
/// ```
/// # use swatchbook::{PaletteConfig, PaletteGenerator};
/// let generator = PaletteGenerator::new(PaletteConfig::default());
/// let palette = generator.palette();
/// assert_eq!(palette.len(), 11);
/// assert!(palette[0].relative_luminance() > palette[10].relative_luminance());
/// ```
#[derive(Clone, Debug)]
pub struct PaletteGenerator {
    config: PaletteConfig,
    palette: Vec<Color>,
}

impl PaletteGenerator {
    /// Create a new palette generator with the given configuration.
    pub fn new(config: PaletteConfig) -> Self {
        let palette = Self::generate(&config);
        Self { config, palette }
    }

    fn generate(config: &PaletteConfig) -> Vec<Color> {
        let palette = match config.to_scale() {
            Ok(scale) => sample(&scale, config.steps, config.interpolation_mode),
            Err(error) => {
                tracing::warn!(%error, "unable to build palette scale");
                Vec::new()
            }
        };
        tracing::debug!(
            base = %config.base_color,
            steps = config.steps,
            mode = %config.interpolation_mode,
            "generated palette"
        );
        palette
    }

    /// Access the configuration.
    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Access the generated colors.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Consume the generator and return the generated colors.
    pub fn into_palette(self) -> Vec<Color> {
        self.palette
    }

    /// Update the configuration.
    ///
    /// If the new configuration differs from the current one, this method
    /// regenerates the palette, replacing all colors at once, and returns
    /// `true`. Otherwise, it returns `false`.
    pub fn update(&mut self, config: PaletteConfig) -> bool {
        if config == self.config {
            return false;
        }

        self.palette = Self::generate(&config);
        self.config = config;
        true
    }
}

// ====================================================================================================================

/// The default number of steps for luminance-matched palettes.
pub const LUMINANCE_PALETTE_STEPS: usize = 94;

/// The minimum number of steps for luminance-matched palettes.
const MIN_LUMINANCE_STEPS: usize = 3;

/// The gray level anchoring the reference ramp.
const ANCHOR_LEVEL: Float = 0.14;

/// The HSL lightness of the second darkest stop.
const SHADOW_LIGHTNESS: Float = 0.06;

/// A generator for palettes that place arbitrary base colors on a common grid
/// of luminance.
///
/// The generator first creates a neutral reference ramp, anchored by dark
/// gray, and then locates the base color on that ramp by matching its average
/// of linear luminance and HSL lightness. The final palette runs from white
/// through the base color and two darker variants of the base color's hue to
/// black.
///
/// ```
/// # use swatchbook::{Color, LuminancePaletteGenerator};
/// let accent = Color::from_24bit(0xda, 0x1a, 0x5f);
/// let palette = LuminancePaletteGenerator::new(accent).palette();
/// assert_eq!(palette.len(), 94);
/// assert_eq!(palette[0], Color::rgb(1.0, 1.0, 1.0));
/// assert_eq!(palette[93], Color::rgb(0.0, 0.0, 0.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LuminancePaletteGenerator {
    base_color: Color,
    steps: usize,
}

impl LuminancePaletteGenerator {
    /// Create a new generator with the given base color and the default
    /// number of steps.
    pub fn new(base_color: Color) -> Self {
        Self::with_steps(base_color, LUMINANCE_PALETTE_STEPS)
    }

    /// Create a new generator with the given base color and number of steps.
    /// Fewer than three steps are raised to three.
    pub fn with_steps(base_color: Color, steps: usize) -> Self {
        Self {
            base_color,
            steps: steps.max(MIN_LUMINANCE_STEPS),
        }
    }

    /// Access the number of steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Find the index of the color whose linear luminance is closest to the
    /// given value. On ties, the lower index wins.
    fn match_luminance(value: Float, ramp: &[Color]) -> usize {
        find_closest(value, ramp.iter(), |value, color| {
            (color.linear_luminance() - value).abs()
        })
        .unwrap_or(0)
    }

    /// Generate the palette.
    pub fn palette(&self) -> Vec<Color> {
        let steps = self.steps;
        let denominator = (steps - 1) as Float;

        let anchor = Color::rgb(ANCHOR_LEVEL, ANCHOR_LEVEL, ANCHOR_LEVEL);
        let reference = PaletteGenerator::new(PaletteConfig {
            base_color: anchor,
            base_scale_position: 86.0 / 94.0,
            steps,
            ..PaletteConfig::greyscale()
        })
        .into_palette();

        let hsl = self.base_color.to(ColorSpace::Hsl);
        let target = (self.base_color.linear_luminance() + hsl[2]) / 2.0;
        let base_position = Self::match_luminance(target, &reference) as Float / denominator;
        let anchor_position = Self::match_luminance(ANCHOR_LEVEL, &reference) as Float / denominator;

        let shade = Color::hsl(hsl[0], hsl[1], ANCHOR_LEVEL).to_rgb();
        let shadow = Color::hsl(hsl[0], hsl[1], SHADOW_LIGHTNESS).to_rgb();

        let scale = ColorScale::new(vec![
            ColorScaleStop::new(0.0, Color::rgb(1.0, 1.0, 1.0)),
            ColorScaleStop::new(base_position, self.base_color),
            ColorScaleStop::new(anchor_position, shade),
            ColorScaleStop::new(0.99, shadow),
            ColorScaleStop::new(1.0, Color::rgb(0.0, 0.0, 0.0)),
        ]);

        let palette = scale
            .map(|scale| sample(&scale, steps, ColorSpace::Rgb))
            .unwrap_or_default();
        tracing::debug!(
            base = %self.base_color,
            steps,
            base_position,
            anchor_position,
            "generated luminance palette"
        );
        palette
    }
}
