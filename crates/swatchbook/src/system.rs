//! The standard catalog of design tokens.
//!
//! [`DesignSystem`] owns a [`TokenRegistry`] and registers the complete
//! catalog on it: the base colors and layer luminance, the layout numbers,
//! the palettes derived from the base colors, the index deltas, the recipes,
//! and the swatches computed by the recipes. Recipes are tokens, too, and can
//! be replaced for any scope.
//!
//! ```
//! # use swatchbook::{DesignSystem, StandardLuminance, error::TokenError};
//! let system = DesignSystem::new()?;
//! let root = system.root();
//! let tokens = system.tokens();
//!
//! system.set_base_layer_luminance(root, StandardLuminance::LightMode);
//! let fill = system.get(tokens.fill_color, root)?;
//! assert_eq!(fill.to_css(), "#ffffff");
//!
//! let text = system.get(tokens.neutral_foreground_rest, root)?;
//! assert!(fill.contrast(&text) >= 14.0);
//! # Ok::<(), TokenError>(())
//! ```

use std::rc::Rc;

use crate::error::TokenError;
use crate::recipe::{self, ContrastTarget, InteractiveDeltas, InteractiveSwatchSet, StandardLuminance};
use crate::token::{ScopeId, Token, TokenContext, TokenRegistry};
use crate::{Color, Float, Palette, Swatch};

/// A replaceable recipe.
///
/// A recipe computes a value in the context of a token evaluation, optionally
/// relative to a reference swatch. Without reference, most recipes use the
/// `fill-color` token.
pub struct Recipe<T>(Rc<dyn Fn(&TokenContext<'_>, Option<&Swatch>) -> Result<T, TokenError>>);

impl<T> Recipe<T> {
    /// Create a new recipe.
    pub fn new<F>(recipe: F) -> Self
    where
        F: Fn(&TokenContext<'_>, Option<&Swatch>) -> Result<T, TokenError> + 'static,
    {
        Self(Rc::new(recipe))
    }

    /// Evaluate this recipe.
    pub fn evaluate(&self, cx: &TokenContext<'_>, reference: Option<&Swatch>) -> Result<T, TokenError> {
        (self.0)(cx, reference)
    }
}

impl<T> Clone for Recipe<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> std::fmt::Debug for Recipe<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Recipe")
    }
}

/// A recipe for the four states of an interactive element.
pub type SwatchSetRecipe = Recipe<InteractiveSwatchSet>;

/// A recipe for a single swatch.
pub type SwatchRecipe = Recipe<Swatch>;

fn reference_or(cx: &TokenContext<'_>, fallback: Token<Swatch>, reference: Option<&Swatch>) -> Result<Swatch, TokenError> {
    match reference {
        Some(swatch) => Ok(swatch.clone()),
        None => cx.get(fallback),
    }
}

// ====================================================================================================================
// Token Groups
// ====================================================================================================================

/// The layout numbers.
#[derive(Copy, Clone, Debug)]
pub struct LayoutTokens {
    pub design_unit: Token<Float>,
    pub density: Token<Float>,
    pub base_height_multiplier: Token<Float>,
    pub base_horizontal_spacing_multiplier: Token<Float>,
    /// The control height, i.e., `(base_height_multiplier + density) * design_unit`.
    pub height_number: Token<Float>,
    pub stroke_width: Token<Float>,
    pub focus_stroke_width: Token<Float>,
    pub control_corner_radius: Token<Float>,
    pub disabled_opacity: Token<Float>,
}

impl LayoutTokens {
    fn register(registry: &TokenRegistry) -> Result<Self, TokenError> {
        let design_unit = registry.create("design-unit", 4.0)?;
        let density = registry.create("density", 0.0)?;
        let base_height_multiplier = registry.create("base-height-multiplier", 10.0)?;
        let height_number = registry.create_derived("height-number", move |cx| {
            Ok((cx.get(base_height_multiplier)? + cx.get(density)?) * cx.get(design_unit)?)
        })?;

        Ok(Self {
            design_unit,
            density,
            base_height_multiplier,
            base_horizontal_spacing_multiplier: registry.create("base-horizontal-spacing-multiplier", 3.0)?,
            height_number,
            stroke_width: registry.create("stroke-width", 1.0)?,
            focus_stroke_width: registry.create("focus-stroke-width", 2.0)?,
            control_corner_radius: registry.create("control-corner-radius", 4.0)?,
            disabled_opacity: registry.create("disabled-opacity", 0.4)?,
        })
    }
}

/// The index deltas for an interactive element, one token per state.
#[derive(Copy, Clone, Debug)]
pub struct DeltaTokens {
    pub rest: Token<isize>,
    pub hover: Token<isize>,
    pub active: Token<isize>,
    pub focus: Token<isize>,
}

impl DeltaTokens {
    fn register(registry: &TokenRegistry, prefix: &str, defaults: InteractiveDeltas) -> Result<Self, TokenError> {
        Ok(Self {
            rest: registry.create(format!("{}-rest-delta", prefix), defaults.rest)?,
            hover: registry.create(format!("{}-hover-delta", prefix), defaults.hover)?,
            active: registry.create(format!("{}-active-delta", prefix), defaults.active)?,
            focus: registry.create(format!("{}-focus-delta", prefix), defaults.focus)?,
        })
    }

    /// Read all four deltas.
    pub fn get(&self, cx: &TokenContext<'_>) -> Result<InteractiveDeltas, TokenError> {
        Ok(InteractiveDeltas::new(
            cx.get(self.rest)?,
            cx.get(self.hover)?,
            cx.get(self.active)?,
            cx.get(self.focus)?,
        ))
    }
}

/// The swatches for an interactive element, one token per state.
#[derive(Copy, Clone, Debug)]
pub struct StateTokens {
    pub rest: Token<Swatch>,
    pub hover: Token<Swatch>,
    pub active: Token<Swatch>,
    pub focus: Token<Swatch>,
}

impl StateTokens {
    /// Register the state tokens for a recipe computing all four states.
    fn register(registry: &TokenRegistry, prefix: &str, recipe: Token<SwatchSetRecipe>) -> Result<Self, TokenError> {
        Ok(Self {
            rest: registry.create_derived(format!("{}-rest", prefix), move |cx| {
                Ok(cx.get(recipe)?.evaluate(cx, None)?.rest)
            })?,
            hover: registry.create_derived(format!("{}-hover", prefix), move |cx| {
                Ok(cx.get(recipe)?.evaluate(cx, None)?.hover)
            })?,
            active: registry.create_derived(format!("{}-active", prefix), move |cx| {
                Ok(cx.get(recipe)?.evaluate(cx, None)?.active)
            })?,
            focus: registry.create_derived(format!("{}-focus", prefix), move |cx| {
                Ok(cx.get(recipe)?.evaluate(cx, None)?.focus)
            })?,
        })
    }

    /// Register the state tokens for a foreground recipe that is evaluated
    /// against each state of the given fill.
    fn register_on(
        registry: &TokenRegistry,
        prefix: &str,
        suffix: &str,
        recipe: Token<SwatchRecipe>,
        fill: Self,
    ) -> Result<Self, TokenError> {
        let on = |state: &str, background: Token<Swatch>| {
            registry.create_derived(format!("{}-{}{}", prefix, state, suffix), move |cx| {
                let background = cx.get(background)?;
                cx.get(recipe)?.evaluate(cx, Some(&background))
            })
        };

        Ok(Self {
            rest: on("rest", fill.rest)?,
            hover: on("hover", fill.hover)?,
            active: on("active", fill.active)?,
            focus: on("focus", fill.focus)?,
        })
    }
}

// ====================================================================================================================
// Design Tokens
// ====================================================================================================================

/// The handles for the standard catalog of design tokens.
#[derive(Copy, Clone, Debug)]
pub struct DesignTokens {
    pub layout: LayoutTokens,

    pub neutral_color: Token<Swatch>,
    pub accent_color: Token<Swatch>,
    pub error_color: Token<Swatch>,
    pub base_layer_luminance: Token<Float>,

    pub neutral_palette: Token<Rc<Palette>>,
    pub accent_palette: Token<Rc<Palette>>,
    pub error_palette: Token<Rc<Palette>>,

    pub accent_fill_delta: DeltaTokens,
    pub accent_foreground_delta: DeltaTokens,
    pub neutral_fill_delta: DeltaTokens,
    pub neutral_fill_input_delta: DeltaTokens,
    pub neutral_fill_stealth_delta: DeltaTokens,
    pub neutral_fill_strong_delta: DeltaTokens,
    pub neutral_fill_layer_rest_delta: Token<isize>,
    pub neutral_stroke_delta: DeltaTokens,
    pub neutral_stroke_divider_rest_delta: Token<isize>,

    pub neutral_layer_card_container_recipe: Token<SwatchRecipe>,
    pub neutral_layer_card_container: Token<Swatch>,
    pub neutral_layer_floating_recipe: Token<SwatchRecipe>,
    pub neutral_layer_floating: Token<Swatch>,
    pub neutral_layer_1_recipe: Token<SwatchRecipe>,
    pub neutral_layer_1: Token<Swatch>,
    pub neutral_layer_2_recipe: Token<SwatchRecipe>,
    pub neutral_layer_2: Token<Swatch>,
    pub neutral_layer_3_recipe: Token<SwatchRecipe>,
    pub neutral_layer_3: Token<Swatch>,
    pub neutral_layer_4_recipe: Token<SwatchRecipe>,
    pub neutral_layer_4: Token<Swatch>,
    pub fill_color: Token<Swatch>,

    pub accent_fill_recipe: Token<SwatchSetRecipe>,
    pub accent_fill: StateTokens,
    pub foreground_on_accent_recipe: Token<SwatchRecipe>,
    pub foreground_on_accent: StateTokens,
    pub foreground_on_accent_large_recipe: Token<SwatchRecipe>,
    pub foreground_on_accent_large: StateTokens,
    pub accent_foreground_recipe: Token<SwatchSetRecipe>,
    pub accent_foreground: StateTokens,

    pub neutral_fill_recipe: Token<SwatchSetRecipe>,
    pub neutral_fill: StateTokens,
    pub neutral_fill_input_recipe: Token<SwatchSetRecipe>,
    pub neutral_fill_input: StateTokens,
    pub neutral_fill_stealth_recipe: Token<SwatchSetRecipe>,
    pub neutral_fill_stealth: StateTokens,
    pub neutral_fill_strong_recipe: Token<SwatchSetRecipe>,
    pub neutral_fill_strong: StateTokens,
    pub neutral_fill_layer_recipe: Token<SwatchRecipe>,
    pub neutral_fill_layer_rest: Token<Swatch>,

    pub focus_stroke_outer_recipe: Token<SwatchRecipe>,
    pub focus_stroke_outer: Token<Swatch>,
    pub focus_stroke_inner_recipe: Token<SwatchRecipe>,
    pub focus_stroke_inner: Token<Swatch>,

    pub neutral_foreground_hint_recipe: Token<SwatchRecipe>,
    pub neutral_foreground_hint: Token<Swatch>,
    pub neutral_foreground_recipe: Token<SwatchRecipe>,
    pub neutral_foreground_rest: Token<Swatch>,

    pub neutral_stroke_recipe: Token<SwatchSetRecipe>,
    pub neutral_stroke: StateTokens,
    pub neutral_stroke_divider_recipe: Token<SwatchRecipe>,
    pub neutral_stroke_divider_rest: Token<Swatch>,

    pub error_fill_recipe: Token<SwatchSetRecipe>,
    pub error_fill: StateTokens,
    pub foreground_on_error_recipe: Token<SwatchRecipe>,
    pub foreground_on_error: StateTokens,
    pub foreground_on_error_large_recipe: Token<SwatchRecipe>,
    pub foreground_on_error_large: StateTokens,
    pub error_foreground_recipe: Token<SwatchSetRecipe>,
    pub error_foreground: StateTokens,
}

/// Register a token that evaluates a single-swatch recipe without reference.
fn evaluated(registry: &TokenRegistry, name: &str, recipe: Token<SwatchRecipe>) -> Result<Token<Swatch>, TokenError> {
    registry.create_derived(name, move |cx| cx.get(recipe)?.evaluate(cx, None))
}

fn palette_for(registry: &TokenRegistry, name: &str, color: Token<Swatch>) -> Result<Token<Rc<Palette>>, TokenError> {
    registry.create_derived(name, move |cx| Ok(Rc::new(Palette::from_color(cx.get(color)?))))
}

fn foreground_on(target: ContrastTarget, fallback: Token<Swatch>) -> SwatchRecipe {
    Recipe::new(move |cx, reference| {
        let background = reference_or(cx, fallback, reference)?;
        Ok(recipe::foreground_on_accent(&background, target))
    })
}

impl DesignTokens {
    /// Register the standard catalog on the given registry.
    ///
    /// This function fails if the registry already contains a token with the
    /// same name as one in the catalog.
    pub fn register(registry: &TokenRegistry) -> Result<Self, TokenError> {
        let layout = LayoutTokens::register(registry)?;

        // Base colors and palettes
        let neutral_color = registry.create("neutral-color", Swatch::new(Color::from_24bit(0x80, 0x80, 0x80)))?;
        let accent_color = registry.create("accent-color", Swatch::new(Color::from_24bit(0xda, 0x1a, 0x5f)))?;
        let error_color = registry.create("error-color", Swatch::new(Color::from_24bit(0xd3, 0x2f, 0x2f)))?;
        let base_layer_luminance =
            registry.create("base-layer-luminance", StandardLuminance::DarkMode.value())?;

        let neutral = palette_for(registry, "neutral-palette", neutral_color)?;
        let accent = palette_for(registry, "accent-palette", accent_color)?;
        let error = palette_for(registry, "error-palette", error_color)?;

        // Deltas
        let accent_fill_delta = DeltaTokens::register(registry, "accent-fill", InteractiveDeltas::ACCENT_FILL)?;
        let accent_foreground_delta =
            DeltaTokens::register(registry, "accent-foreground", InteractiveDeltas::ACCENT_FOREGROUND)?;
        let neutral_fill_delta = DeltaTokens::register(registry, "neutral-fill", InteractiveDeltas::NEUTRAL_FILL)?;
        let neutral_fill_input_delta =
            DeltaTokens::register(registry, "neutral-fill-input", InteractiveDeltas::NEUTRAL_FILL_INPUT)?;
        let neutral_fill_stealth_delta =
            DeltaTokens::register(registry, "neutral-fill-stealth", InteractiveDeltas::NEUTRAL_FILL_STEALTH)?;
        let neutral_fill_strong_delta =
            DeltaTokens::register(registry, "neutral-fill-strong", InteractiveDeltas::NEUTRAL_FILL_STRONG)?;
        let neutral_fill_layer_rest_delta =
            registry.create("neutral-fill-layer-rest-delta", recipe::NEUTRAL_FILL_LAYER_DELTA)?;
        let neutral_stroke_delta =
            DeltaTokens::register(registry, "neutral-stroke", InteractiveDeltas::NEUTRAL_STROKE)?;
        let neutral_stroke_divider_rest_delta =
            registry.create("neutral-stroke-divider-rest-delta", recipe::NEUTRAL_STROKE_DIVIDER_DELTA)?;

        // Layers
        let layer_delta = neutral_fill_layer_rest_delta;
        let neutral_layer_card_container_recipe = registry.create(
            "neutral-layer-card-container-recipe",
            Recipe::new(move |cx, _| {
                Ok(recipe::neutral_layer_card_container(
                    &*cx.get(neutral)?,
                    cx.get(base_layer_luminance)?,
                    cx.get(layer_delta)?,
                ))
            }),
        )?;
        let neutral_layer_floating_recipe = registry.create(
            "neutral-layer-floating-recipe",
            Recipe::new(move |cx, _| {
                Ok(recipe::neutral_layer_floating(
                    &*cx.get(neutral)?,
                    cx.get(base_layer_luminance)?,
                    cx.get(layer_delta)?,
                ))
            }),
        )?;
        let neutral_layer_1_recipe = registry.create(
            "neutral-layer-1-recipe",
            Recipe::new(move |cx, _| {
                Ok(recipe::neutral_layer_1(&*cx.get(neutral)?, cx.get(base_layer_luminance)?))
            }),
        )?;
        let neutral_layer_2_recipe = registry.create(
            "neutral-layer-2-recipe",
            Recipe::new(move |cx, _| {
                Ok(recipe::neutral_layer_2(
                    &*cx.get(neutral)?,
                    cx.get(base_layer_luminance)?,
                    cx.get(layer_delta)?,
                    neutral_fill_delta.get(cx)?,
                ))
            }),
        )?;
        let neutral_layer_3_recipe = registry.create(
            "neutral-layer-3-recipe",
            Recipe::new(move |cx, _| {
                Ok(recipe::neutral_layer_3(
                    &*cx.get(neutral)?,
                    cx.get(base_layer_luminance)?,
                    cx.get(layer_delta)?,
                    neutral_fill_delta.get(cx)?,
                ))
            }),
        )?;
        let neutral_layer_4_recipe = registry.create(
            "neutral-layer-4-recipe",
            Recipe::new(move |cx, _| {
                Ok(recipe::neutral_layer_4(
                    &*cx.get(neutral)?,
                    cx.get(base_layer_luminance)?,
                    cx.get(layer_delta)?,
                    neutral_fill_delta.get(cx)?,
                ))
            }),
        )?;

        let neutral_layer_card_container = evaluated(
            registry,
            "neutral-layer-card-container",
            neutral_layer_card_container_recipe,
        )?;
        let neutral_layer_floating = evaluated(registry, "neutral-layer-floating", neutral_layer_floating_recipe)?;
        let neutral_layer_1 = evaluated(registry, "neutral-layer-1", neutral_layer_1_recipe)?;
        let neutral_layer_2 = evaluated(registry, "neutral-layer-2", neutral_layer_2_recipe)?;
        let neutral_layer_3 = evaluated(registry, "neutral-layer-3", neutral_layer_3_recipe)?;
        let neutral_layer_4 = evaluated(registry, "neutral-layer-4", neutral_layer_4_recipe)?;
        let fill_color = registry.create_derived("fill-color", move |cx| cx.get(neutral_layer_1))?;

        // Accent
        let accent_fill_recipe = registry.create(
            "accent-fill-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::accent_fill(
                    &*cx.get(accent)?,
                    &*cx.get(neutral)?,
                    &reference,
                    accent_fill_delta.get(cx)?,
                    neutral_fill_delta.get(cx)?,
                ))
            }),
        )?;
        let accent_fill = StateTokens::register(registry, "accent-fill", accent_fill_recipe)?;

        let foreground_on_accent_recipe = registry.create(
            "foreground-on-accent-recipe",
            foreground_on(ContrastTarget::Normal, accent_fill.rest),
        )?;
        let foreground_on_accent = StateTokens::register_on(
            registry,
            "foreground-on-accent",
            "",
            foreground_on_accent_recipe,
            accent_fill,
        )?;
        let foreground_on_accent_large_recipe = registry.create(
            "foreground-on-accent-large-recipe",
            foreground_on(ContrastTarget::Large, accent_fill.rest),
        )?;
        let foreground_on_accent_large = StateTokens::register_on(
            registry,
            "foreground-on-accent",
            "-large",
            foreground_on_accent_large_recipe,
            accent_fill,
        )?;

        let accent_foreground_recipe = registry.create(
            "accent-foreground-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::accent_foreground(
                    &*cx.get(accent)?,
                    &reference,
                    ContrastTarget::Normal,
                    accent_foreground_delta.get(cx)?,
                ))
            }),
        )?;
        let accent_foreground = StateTokens::register(registry, "accent-foreground", accent_foreground_recipe)?;

        // Neutral fills
        let neutral_fill_recipe = registry.create(
            "neutral-fill-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::neutral_fill(&*cx.get(neutral)?, &reference, neutral_fill_delta.get(cx)?))
            }),
        )?;
        let neutral_fill = StateTokens::register(registry, "neutral-fill", neutral_fill_recipe)?;

        let neutral_fill_input_recipe = registry.create(
            "neutral-fill-input-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::neutral_fill_input(
                    &*cx.get(neutral)?,
                    &reference,
                    neutral_fill_input_delta.get(cx)?,
                ))
            }),
        )?;
        let neutral_fill_input = StateTokens::register(registry, "neutral-fill-input", neutral_fill_input_recipe)?;

        let neutral_fill_stealth_recipe = registry.create(
            "neutral-fill-stealth-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::neutral_fill_stealth(
                    &*cx.get(neutral)?,
                    &reference,
                    neutral_fill_stealth_delta.get(cx)?,
                    neutral_fill_delta.get(cx)?,
                ))
            }),
        )?;
        let neutral_fill_stealth =
            StateTokens::register(registry, "neutral-fill-stealth", neutral_fill_stealth_recipe)?;

        let neutral_fill_strong_recipe = registry.create(
            "neutral-fill-strong-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::neutral_fill_strong(
                    &*cx.get(neutral)?,
                    &reference,
                    neutral_fill_strong_delta.get(cx)?,
                ))
            }),
        )?;
        let neutral_fill_strong = StateTokens::register(registry, "neutral-fill-strong", neutral_fill_strong_recipe)?;

        let neutral_fill_layer_recipe = registry.create(
            "neutral-fill-layer-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::neutral_fill_layer(&*cx.get(neutral)?, &reference, cx.get(layer_delta)?))
            }),
        )?;
        let neutral_fill_layer_rest = evaluated(registry, "neutral-fill-layer-rest", neutral_fill_layer_recipe)?;

        // Focus strokes and foregrounds
        let focus_stroke_outer_recipe = registry.create(
            "focus-stroke-outer-recipe",
            Recipe::new(move |cx, reference| {
                let fill = reference_or(cx, fill_color, reference)?;
                Ok(recipe::focus_stroke_outer(&*cx.get(neutral)?, &fill))
            }),
        )?;
        let focus_stroke_outer = evaluated(registry, "focus-stroke-outer", focus_stroke_outer_recipe)?;

        let focus_stroke_inner_recipe = registry.create(
            "focus-stroke-inner-recipe",
            Recipe::new(move |cx, reference| {
                let fill = reference_or(cx, fill_color, reference)?;
                let outer = cx.get(focus_stroke_outer)?;
                Ok(recipe::focus_stroke_inner(&*cx.get(accent)?, &fill, &outer))
            }),
        )?;
        let focus_stroke_inner = evaluated(registry, "focus-stroke-inner", focus_stroke_inner_recipe)?;

        let neutral_foreground_hint_recipe = registry.create(
            "neutral-foreground-hint-recipe",
            Recipe::new(move |cx, reference| {
                let fill = reference_or(cx, fill_color, reference)?;
                Ok(recipe::neutral_foreground_hint(&*cx.get(neutral)?, &fill))
            }),
        )?;
        let neutral_foreground_hint =
            evaluated(registry, "neutral-foreground-hint", neutral_foreground_hint_recipe)?;

        let neutral_foreground_recipe = registry.create(
            "neutral-foreground-recipe",
            Recipe::new(move |cx, reference| {
                let fill = reference_or(cx, fill_color, reference)?;
                Ok(recipe::neutral_foreground(&*cx.get(neutral)?, &fill))
            }),
        )?;
        let neutral_foreground_rest = evaluated(registry, "neutral-foreground-rest", neutral_foreground_recipe)?;

        // Strokes
        let neutral_stroke_recipe = registry.create(
            "neutral-stroke-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::neutral_stroke(&*cx.get(neutral)?, &reference, neutral_stroke_delta.get(cx)?))
            }),
        )?;
        let neutral_stroke = StateTokens::register(registry, "neutral-stroke", neutral_stroke_recipe)?;

        let neutral_stroke_divider_recipe = registry.create(
            "neutral-stroke-divider-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::neutral_stroke_divider(
                    &*cx.get(neutral)?,
                    &reference,
                    cx.get(neutral_stroke_divider_rest_delta)?,
                ))
            }),
        )?;
        let neutral_stroke_divider_rest =
            evaluated(registry, "neutral-stroke-divider-rest", neutral_stroke_divider_recipe)?;

        // Errors
        let error_fill_recipe = registry.create(
            "error-fill-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::accent_fill(
                    &*cx.get(error)?,
                    &*cx.get(neutral)?,
                    &reference,
                    accent_fill_delta.get(cx)?,
                    neutral_fill_delta.get(cx)?,
                ))
            }),
        )?;
        let error_fill = StateTokens::register(registry, "error-fill", error_fill_recipe)?;

        let foreground_on_error_recipe = registry.create(
            "foreground-on-error-recipe",
            foreground_on(ContrastTarget::Normal, error_fill.rest),
        )?;
        let foreground_on_error =
            StateTokens::register_on(registry, "foreground-on-error", "", foreground_on_error_recipe, error_fill)?;
        let foreground_on_error_large_recipe = registry.create(
            "foreground-on-error-large-recipe",
            foreground_on(ContrastTarget::Large, error_fill.rest),
        )?;
        let foreground_on_error_large = StateTokens::register_on(
            registry,
            "foreground-on-error",
            "-large",
            foreground_on_error_large_recipe,
            error_fill,
        )?;

        let error_foreground_recipe = registry.create(
            "error-foreground-recipe",
            Recipe::new(move |cx, reference| {
                let reference = reference_or(cx, fill_color, reference)?;
                Ok(recipe::accent_foreground(
                    &*cx.get(error)?,
                    &reference,
                    ContrastTarget::Normal,
                    accent_foreground_delta.get(cx)?,
                ))
            }),
        )?;
        let error_foreground = StateTokens::register(registry, "error-foreground", error_foreground_recipe)?;

        tracing::debug!(tokens = registry.len(), "registered design tokens");

        Ok(Self {
            layout,
            neutral_color,
            accent_color,
            error_color,
            base_layer_luminance,
            neutral_palette: neutral,
            accent_palette: accent,
            error_palette: error,
            accent_fill_delta,
            accent_foreground_delta,
            neutral_fill_delta,
            neutral_fill_input_delta,
            neutral_fill_stealth_delta,
            neutral_fill_strong_delta,
            neutral_fill_layer_rest_delta,
            neutral_stroke_delta,
            neutral_stroke_divider_rest_delta,
            neutral_layer_card_container_recipe,
            neutral_layer_card_container,
            neutral_layer_floating_recipe,
            neutral_layer_floating,
            neutral_layer_1_recipe,
            neutral_layer_1,
            neutral_layer_2_recipe,
            neutral_layer_2,
            neutral_layer_3_recipe,
            neutral_layer_3,
            neutral_layer_4_recipe,
            neutral_layer_4,
            fill_color,
            accent_fill_recipe,
            accent_fill,
            foreground_on_accent_recipe,
            foreground_on_accent,
            foreground_on_accent_large_recipe,
            foreground_on_accent_large,
            accent_foreground_recipe,
            accent_foreground,
            neutral_fill_recipe,
            neutral_fill,
            neutral_fill_input_recipe,
            neutral_fill_input,
            neutral_fill_stealth_recipe,
            neutral_fill_stealth,
            neutral_fill_strong_recipe,
            neutral_fill_strong,
            neutral_fill_layer_recipe,
            neutral_fill_layer_rest,
            focus_stroke_outer_recipe,
            focus_stroke_outer,
            focus_stroke_inner_recipe,
            focus_stroke_inner,
            neutral_foreground_hint_recipe,
            neutral_foreground_hint,
            neutral_foreground_recipe,
            neutral_foreground_rest,
            neutral_stroke_recipe,
            neutral_stroke,
            neutral_stroke_divider_recipe,
            neutral_stroke_divider_rest,
            error_fill_recipe,
            error_fill,
            foreground_on_error_recipe,
            foreground_on_error,
            foreground_on_error_large_recipe,
            foreground_on_error_large,
            error_foreground_recipe,
            error_foreground,
        })
    }
}

// ====================================================================================================================
// Design System
// ====================================================================================================================

/// A design system, i.e., a token registry with the standard catalog.
///
/// Each design system has its own registry. Distinct design systems share no
/// state.
#[derive(Debug)]
pub struct DesignSystem {
    registry: TokenRegistry,
    tokens: DesignTokens,
}

impl DesignSystem {
    /// Create a new design system with a fresh registry.
    pub fn new() -> Result<Self, TokenError> {
        let registry = TokenRegistry::new();
        let tokens = DesignTokens::register(&registry)?;
        Ok(Self { registry, tokens })
    }

    /// Access the token registry.
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Access the token handles.
    pub fn tokens(&self) -> &DesignTokens {
        &self.tokens
    }

    /// Get the root scope.
    pub fn root(&self) -> ScopeId {
        self.registry.root()
    }

    /// Create a new scope nested inside the given parent scope.
    pub fn create_scope(&self, parent: ScopeId) -> ScopeId {
        self.registry.create_scope(parent)
    }

    /// Get the value of the token in the scope.
    pub fn get<T: Clone + 'static>(&self, token: Token<T>, scope: ScopeId) -> Result<T, TokenError> {
        self.registry.get_value_for(token, scope)
    }

    /// Bind the token to the value in the scope.
    pub fn set<T: Clone + 'static>(&self, token: Token<T>, scope: ScopeId, value: T) {
        self.registry.set_value_for(token, scope, value)
    }

    /// Bind the base layer luminance in the scope to the standard luminance.
    pub fn set_base_layer_luminance(&self, scope: ScopeId, luminance: StandardLuminance) {
        self.set(self.tokens.base_layer_luminance, scope, luminance.value());
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{DesignSystem, Recipe};
    use crate::recipe::{InteractiveSwatchSet, StandardLuminance};
    use crate::{Color, Swatch};

    #[test]
    fn test_layout() {
        let system = DesignSystem::new().unwrap();
        let root = system.root();
        let layout = system.tokens().layout;

        assert_eq!(system.get(layout.height_number, root), Ok(40.0));
        system.set(layout.density, root, 2.0);
        assert_eq!(system.get(layout.height_number, root), Ok(48.0));
        assert_eq!(system.get(layout.disabled_opacity, root), Ok(0.4));
    }

    #[test]
    fn test_defaults() {
        let system = DesignSystem::new().unwrap();
        let root = system.root();
        let tokens = system.tokens();

        assert_eq!(system.get(tokens.accent_color, root).unwrap().to_css(), "#da1a5f");
        assert_eq!(system.get(tokens.error_color, root).unwrap().to_css(), "#d32f2f");

        // The default base layer luminance is dark mode.
        let fill = system.get(tokens.fill_color, root).unwrap();
        assert!(fill.is_dark());
        assert_eq!(fill, system.get(tokens.neutral_layer_1, root).unwrap());

        let hint = system.get(tokens.neutral_foreground_hint, root).unwrap();
        assert!(fill.contrast(&hint) >= 4.5);
        assert!(!system.get(tokens.neutral_foreground_rest, root).unwrap().is_dark());

        let outer = system.get(tokens.focus_stroke_outer, root).unwrap();
        assert!(fill.contrast(&outer) >= 3.5);
    }

    #[test]
    fn test_light_mode() {
        let system = DesignSystem::new().unwrap();
        let root = system.root();
        let tokens = system.tokens();
        system.set_base_layer_luminance(root, StandardLuminance::LightMode);

        let white = Swatch::gray(1.0);
        assert_eq!(system.get(tokens.fill_color, root), Ok(white.clone()));

        let neutral = system.get(tokens.neutral_palette, root).unwrap();
        assert_eq!(system.get(tokens.neutral_fill.rest, root).as_ref(), Ok(neutral.get(7)));
        assert_eq!(system.get(tokens.neutral_stroke.hover, root).as_ref(), Ok(neutral.get(40)));
        assert_eq!(system.get(tokens.neutral_layer_2, root).as_ref(), Ok(neutral.get(10)));

        let accent = system.get(tokens.accent_palette, root).unwrap();
        let source = accent.closest_index_of(accent.source()) as isize;
        assert_eq!(system.get(tokens.accent_fill.hover, root).as_ref(), Ok(accent.get(source)));
        assert_eq!(system.get(tokens.accent_fill.rest, root).as_ref(), Ok(accent.get(source - 4)));

        let rest = system.get(tokens.accent_fill.rest, root).unwrap();
        let on_rest = system.get(tokens.foreground_on_accent.rest, root).unwrap();
        let expected = if rest.contrast(&white) >= 4.5 { white } else { Swatch::gray(0.0) };
        assert_eq!(on_rest, expected);
    }

    #[test]
    fn test_extreme_delta() {
        let system = DesignSystem::new().unwrap();
        let root = system.root();
        let tokens = system.tokens();
        let neutral = system.get(tokens.neutral_palette, root).unwrap();
        let last = neutral.last_index() as isize;

        system.set(tokens.neutral_fill_delta.hover, root, isize::MAX);
        system.set(tokens.neutral_stroke_delta.active, root, isize::MIN);
        system.set(tokens.neutral_fill_layer_rest_delta, root, isize::MAX);

        assert_eq!(system.get(tokens.neutral_fill.hover, root).as_ref(), Ok(neutral.get(last)));
        assert!(system.get(tokens.neutral_stroke.active, root).is_ok());
        assert!(system.get(tokens.neutral_layer_4, root).is_ok());
        assert!(system.get(tokens.neutral_layer_floating, root).is_ok());
        assert!(system.get(tokens.accent_fill.rest, root).is_ok());
    }

    #[test]
    fn test_scoped_overrides() {
        let system = DesignSystem::new().unwrap();
        let root = system.root();
        let scope = system.create_scope(root);
        let tokens = system.tokens();

        let before = system.get(tokens.accent_fill.hover, scope).unwrap();
        let blue = Swatch::new(Color::from_24bit(0x00, 0x66, 0xcc));
        system.set(tokens.accent_color, scope, blue);

        let after = system.get(tokens.accent_fill.hover, scope).unwrap();
        assert_ne!(before, after);
        assert_eq!(system.get(tokens.accent_fill.hover, root), Ok(before));

        // Recipes are replaceable per scope.
        let custom = Recipe::new(|_, _| {
            let black = Swatch::gray(0.0);
            Ok(InteractiveSwatchSet {
                rest: black.clone(),
                hover: black.clone(),
                active: black.clone(),
                focus: black,
            })
        });
        system.set(tokens.neutral_fill_recipe, scope, custom);
        assert_eq!(system.get(tokens.neutral_fill.rest, scope), Ok(Swatch::gray(0.0)));
        assert_ne!(system.get(tokens.neutral_fill.rest, root), Ok(Swatch::gray(0.0)));
    }

    #[test]
    fn test_notification() {
        let system = DesignSystem::new().unwrap();
        let root = system.root();
        let tokens = system.tokens();
        let count = Rc::new(Cell::new(0));

        system.get(tokens.accent_fill.rest, root).unwrap();
        let counter = Rc::clone(&count);
        let _subscription = system.registry().subscribe(move |_| counter.set(counter.get() + 1));

        system.set_base_layer_luminance(root, StandardLuminance::LightMode);
        assert!(count.get() > 1);
    }
}
