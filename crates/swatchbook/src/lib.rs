//! # Swatchbook
//!
//! Swatchbook is the color science and design-token engine behind themeable
//! user interfaces. It turns a handful of base colors into the fills,
//! strokes, foregrounds, and layers of a complete theme, and it keeps all of
//! them consistent as base colors, luminance mode, or recipes change in
//! nested scopes.
//!
//!
//! ## 1. Overview
//!
//! Swatchbook's main abstractions are:
//!
//!   * [`Color`] implements **colors** by combining a [`ColorSpace`] with
//!     three [`Float`] coordinates and an alpha value. Its methods cover
//!     conversion between sRGB, HSL, HSV, CIE XYZ, CIELAB, and CIELCh,
//!     interpolation and blending, WCAG relative luminance and contrast, as
//!     well as parsing and formatting CSS color strings.
//!   * [`ColorScale`] maps positions in unit range to colors by interpolating
//!     between stops. It also trims scales and searches for the position with
//!     a given contrast.
//!   * [`PaletteGenerator`] and [`LuminancePaletteGenerator`] derive
//!     **palettes**, i.e., ramps running from light to dark, from a base
//!     color.
//!   * [`Palette`] indexes such a ramp of [`Swatch`]es for nearest-swatch and
//!     contrast lookups, which the functions in the [`recipe`] module build
//!     on.
//!   * [`TokenRegistry`] manages **design tokens**, i.e., named values that
//!     are lazily derived from each other, cached per scope, and invalidated
//!     when their dependencies change.
//!   * [`DesignSystem`] ties everything together by registering the standard
//!     catalog of tokens on a fresh registry.
//!
//!
//! ## 2. One-Two-Three: Tokens!
//!
//! First, create a design system. Second, pick the luminance mode and base
//! colors, for the whole system or a scope. Third, read the tokens.
//!
//! ```
//! # use swatchbook::{parse_color, DesignSystem, StandardLuminance, Swatch};
//! # use swatchbook::error::TokenError;
//! // 1. Create the design system
//! let system = DesignSystem::new()?;
//! let tokens = system.tokens();
//! let root = system.root();
//!
//! // 2. Configure it
//! system.set_base_layer_luminance(root, StandardLuminance::LightMode);
//! let card = system.create_scope(root);
//! # let teal = parse_color("teal").unwrap();
//! system.set(tokens.accent_color, card, Swatch::new(teal));
//!
//! // 3. Use it
//! let fill = system.get(tokens.accent_fill.rest, card)?;
//! let text = system.get(tokens.foreground_on_accent.rest, card)?;
//! assert!(fill.contrast(&text) >= 4.5 || text.to_css() == "#000000");
//! # Ok::<(), TokenError>(())
//! ```
//!
//!
//! ## 3. Optional Features
//!
//! Swatchbook supports two feature flags:
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     and `u64` as [`Bits`] instead of `f32` as [`Float`] and `u32` as
//!     [`Bits`]. This feature is enabled by default.
//!   - **`serde`** derives serialization and deserialization for colors,
//!     color spaces, blend modes, and palette configurations. This feature is
//!     disabled by default.
//!
//! Swatchbook reports internal events through the
//! [tracing](https://crates.io/crates/tracing) crate and never installs a
//! subscriber of its own.

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

mod core;
pub mod error;
mod generator;
mod object;
mod palette;
pub mod recipe;
mod scale;
mod system;
mod token;

#[doc(hidden)]
pub use core::to_eq_bits;

pub use core::{BlendMode, ColorSpace};
pub use generator::{LuminancePaletteGenerator, PaletteConfig, PaletteGenerator, LUMINANCE_PALETTE_STEPS};
pub use object::{Color, Rgba};
pub use palette::{Direction, Palette, Swatch};
pub use recipe::{ContrastTarget, InteractiveDeltas, InteractiveSwatchSet, StandardLuminance};
pub use scale::{ColorScale, ColorScaleStop, ContrastSearch};
pub use system::{
    DeltaTokens, DesignSystem, DesignTokens, LayoutTokens, Recipe, StateTokens, SwatchRecipe, SwatchSetRecipe,
};
pub use token::{ScopeId, Subscription, Token, TokenChange, TokenContext, TokenId, TokenRegistry};

/// Parse a CSS color string.
///
/// This function accepts `#rgb`, `#rgba`, `#rrggbb`, and `#rrggbbaa` hashed
/// hexadecimal notation, the `rgb()` and `rgba()` functions with integer
/// channels between 0 and 255, and the CSS named colors including
/// `transparent`. It returns `None` for all other strings. Use
/// [`Color::from_str`](std::str::FromStr::from_str) to learn why a string
/// failed to parse.
///
/// ```
/// # use swatchbook::parse_color;
/// let red = parse_color("rgba(255, 0, 0, 0.5)").unwrap();
/// assert_eq!(red.to_rgba().r, 1.0);
/// assert_eq!(red.alpha(), 0.5);
/// assert_eq!(parse_color("#f0f"), parse_color("magenta"));
/// assert_eq!(parse_color("fuchsia-ish"), None);
/// ```
pub fn parse_color(s: &str) -> Option<Color> {
    s.parse().ok()
}
