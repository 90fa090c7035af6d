mod contrast;
mod conversion;
mod equality;
mod interpolation;
mod math;
mod named;
mod space;
mod string;

// contrast
pub(crate) use contrast::{contrast_ratio, is_dark, linear_luminance, relative_luminance};

// conversion
pub(crate) use conversion::{convert, from_24bit, to_24bit};

// equality
pub use equality::to_eq_bits;
pub(crate) use equality::to_lookup_key;

// interpolation
pub use interpolation::BlendMode;
pub(crate) use interpolation::{blend, find_closest, interpolate, lerp, saturate};

// math
pub(crate) use math::{clamp, round_to_precision, FloatExt};

// space
pub use space::ColorSpace;

// string
pub(crate) use string::{
    clamp_alpha, format_hex, format_rgb, format_rgba, parse, parse_argb, HexLayout,
};
