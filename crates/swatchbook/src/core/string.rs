use super::conversion::{from_24bit, to_8bit};
use super::math::round_to_precision;
use super::named;
use crate::error::ColorFormatError;
use crate::Float;

/// Parse a color in hashed hexadecimal format. If successful, this function
/// returns the four components as unsigned bytes in the order they appear in
/// the string. It transparently handles single-digit components and fills in
/// an opaque alpha for formats with three components only.
fn parse_hashed(s: &str) -> Result<[u8; 4], ColorFormatError> {
    if !s.starts_with('#') {
        return Err(ColorFormatError::UnknownFormat);
    } else if !s.is_ascii() || ![4, 5, 7, 9].contains(&s.len()) {
        return Err(ColorFormatError::UnexpectedCharacters);
    }

    let digits = &s[1..];
    let width = if digits.len() <= 4 { 1 } else { 2 };
    let count = digits.len() / width;

    let mut components = [255_u8; 4];
    for (index, component) in components.iter_mut().enumerate().take(count) {
        let t = &digits[width * index..width * (index + 1)];
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;
        *component = if width == 1 { 16 * n + n } else { n };
    }

    Ok(components)
}

/// Split the arguments of a CSS function with comma-separated arguments.
fn parse_function<'a>(s: &'a str, name: &str) -> Result<Vec<&'a str>, ColorFormatError> {
    let rest = s
        .strip_prefix(name)
        .ok_or(ColorFormatError::UnknownFormat)?
        .strip_prefix('(')
        .ok_or(ColorFormatError::NoOpeningParenthesis)?
        .strip_suffix(')')
        .ok_or(ColorFormatError::NoClosingParenthesis)?;

    Ok(rest.split(',').map(str::trim).collect())
}

/// Parse an integer channel between 0 and 255, inclusive, with at most three
/// digits. Three-digit channels must not have a leading zero.
fn parse_channel(s: Option<&&str>) -> Result<u8, ColorFormatError> {
    let t = *s.ok_or(ColorFormatError::MissingCoordinate)?;
    if t.is_empty() {
        return Err(ColorFormatError::MissingCoordinate);
    } else if 3 < t.len() || (t.len() == 3 && t.starts_with('0')) {
        return Err(ColorFormatError::MalformedInteger);
    } else if !t.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ColorFormatError::MalformedInteger);
    }

    t.parse().map_err(|_| ColorFormatError::MalformedInteger)
}

/// Parse an alpha value, which must be `0`, `1`, or a decimal fraction with an
/// optional leading zero.
fn parse_alpha(s: Option<&&str>) -> Result<Float, ColorFormatError> {
    let t = *s.ok_or(ColorFormatError::MissingCoordinate)?;
    match t {
        "" => Err(ColorFormatError::MissingCoordinate),
        "0" => Ok(0.0),
        "1" => Ok(1.0),
        _ => {
            let fraction = t
                .strip_prefix("0.")
                .or_else(|| t.strip_prefix('.'))
                .ok_or(ColorFormatError::MalformedAlpha)?;
            if !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ColorFormatError::MalformedAlpha);
            } else if fraction.is_empty() {
                return if t.starts_with('0') {
                    Ok(0.0)
                } else {
                    Err(ColorFormatError::MalformedAlpha)
                };
            }

            format!("0.{}", fraction)
                .parse()
                .map_err(|_| ColorFormatError::MalformedAlpha)
        }
    }
}

/// Parse the arguments of the `rgb()` function.
fn parse_rgb(s: &str) -> Result<[u8; 3], ColorFormatError> {
    let arguments = parse_function(s, "rgb")?;
    let mut iter = arguments.iter();
    let c1 = parse_channel(iter.next())?;
    let c2 = parse_channel(iter.next())?;
    let c3 = parse_channel(iter.next())?;
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyCoordinates);
    }

    Ok([c1, c2, c3])
}

/// Parse the arguments of the `rgba()` function.
fn parse_rgba(s: &str) -> Result<([u8; 3], Float), ColorFormatError> {
    let arguments = parse_function(s, "rgba")?;
    let mut iter = arguments.iter();
    let c1 = parse_channel(iter.next())?;
    let c2 = parse_channel(iter.next())?;
    let c3 = parse_channel(iter.next())?;
    let alpha = parse_alpha(iter.next())?;
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyCoordinates);
    }

    Ok(([c1, c2, c3], alpha))
}

#[inline]
fn from_8bit(value: u8) -> Float {
    value as Float / 255.0
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse the string into RGB coordinates and alpha.
///
/// This function recognizes the three, four, six, and eight digit hashed
/// hexadecimal formats, with the four and eight digit formats placing alpha
/// last, the `rgb()` and `rgba()` CSS functions with comma-separated integer
/// channels, and the CSS named colors. Before trying to parse either of these
/// formats, this function trims leading and trailing white space and converts
/// ASCII letters to lowercase.
pub(crate) fn parse(s: &str) -> Result<([Float; 3], Float), ColorFormatError> {
    let lowercase = s.trim().to_ascii_lowercase();
    let s = lowercase.as_str();

    if s.starts_with('#') {
        let [r, g, b, a] = parse_hashed(s)?;
        Ok((from_24bit(r, g, b), from_8bit(a)))
    } else if s.starts_with("rgba") {
        let ([r, g, b], alpha) = parse_rgba(s)?;
        Ok((from_24bit(r, g, b), alpha))
    } else if s.starts_with("rgb") {
        let [r, g, b] = parse_rgb(s)?;
        Ok((from_24bit(r, g, b), 1.0))
    } else {
        let ([r, g, b], a) = named::lookup(s).ok_or(ColorFormatError::UnknownFormat)?;
        Ok((from_24bit(r, g, b), from_8bit(a)))
    }
}

/// Parse the string as a hashed hexadecimal color with alpha first.
///
/// This function recognizes the four and eight digit formats only.
pub(crate) fn parse_argb(s: &str) -> Result<([Float; 3], Float), ColorFormatError> {
    let lowercase = s.trim().to_ascii_lowercase();
    let s = lowercase.as_str();

    if s.starts_with('#') && s.len() != 5 && s.len() != 9 {
        return Err(ColorFormatError::UnexpectedCharacters);
    }

    let [a, r, g, b] = parse_hashed(s)?;
    Ok((from_24bit(r, g, b), from_8bit(a)))
}

// --------------------------------------------------------------------------------------------------------------------

/// The layout of a hashed hexadecimal color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum HexLayout {
    Rgb,
    Rgba,
    Argb,
}

/// Clamp alpha to unit range, with not-a-number becoming zero.
#[inline]
pub(crate) fn clamp_alpha(alpha: Float) -> Float {
    if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

/// Format the RGB coordinates and alpha in hashed hexadecimal notation.
///
/// All components are clamped to unit range, scaled to bytes, and rounded.
pub(crate) fn format_hex(coordinates: &[Float; 3], alpha: Float, layout: HexLayout) -> String {
    let [r, g, b] = coordinates.map(to_8bit);
    let a = to_8bit(alpha);

    match layout {
        HexLayout::Rgb => format!("#{:02x}{:02x}{:02x}", r, g, b),
        HexLayout::Rgba => format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a),
        HexLayout::Argb => format!("#{:02x}{:02x}{:02x}{:02x}", a, r, g, b),
    }
}

/// Format the RGB coordinates with the `rgb()` CSS function.
pub(crate) fn format_rgb(coordinates: &[Float; 3]) -> String {
    let [r, g, b] = coordinates.map(to_8bit);
    format!("rgb({}, {}, {})", r, g, b)
}

/// The number of decimals for alpha in the `rgba()` CSS function.
const ALPHA_DECIMALS: u32 = 3;

/// Format the RGB coordinates and alpha with the `rgba()` CSS function.
///
/// Alpha is clamped to unit range and rounded to three decimals.
pub(crate) fn format_rgba(coordinates: &[Float; 3], alpha: Float) -> String {
    let [r, g, b] = coordinates.map(to_8bit);
    let a = round_to_precision(clamp_alpha(alpha), ALPHA_DECIMALS);
    format!("rgba({}, {}, {}, {})", r, g, b, a)
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{
        format_hex, format_rgb, format_rgba, parse, parse_alpha, parse_argb, parse_channel,
        parse_hashed, HexLayout,
    };
    use crate::error::ColorFormatError;

    #[test]
    fn test_parse_hashed() -> Result<(), ColorFormatError> {
        assert_eq!(parse_hashed("#123")?, [0x11_u8, 0x22, 0x33, 0xff]);
        assert_eq!(parse_hashed("#112233")?, [0x11_u8, 0x22, 0x33, 0xff]);
        assert_eq!(parse_hashed("#1234")?, [0x11_u8, 0x22, 0x33, 0x44]);
        assert_eq!(parse_hashed("#11223344")?, [0x11_u8, 0x22, 0x33, 0x44]);
        assert_eq!(parse_hashed("fff"), Err(ColorFormatError::UnknownFormat));
        assert_eq!(
            parse_hashed("#ff"),
            Err(ColorFormatError::UnexpectedCharacters)
        );
        assert_eq!(
            parse_hashed("#12345"),
            Err(ColorFormatError::UnexpectedCharacters)
        );
        assert_eq!(
            parse_hashed("#💩0"),
            Err(ColorFormatError::UnexpectedCharacters)
        );
        assert_eq!(parse_hashed("#0g0"), Err(ColorFormatError::MalformedHex));

        Ok(())
    }

    #[test]
    fn test_parse_components() {
        assert_eq!(parse_channel(Some(&"0")), Ok(0));
        assert_eq!(parse_channel(Some(&"07")), Ok(7));
        assert_eq!(parse_channel(Some(&"255")), Ok(255));
        assert_eq!(parse_channel(Some(&"256")), Err(ColorFormatError::MalformedInteger));
        assert_eq!(parse_channel(Some(&"007")), Err(ColorFormatError::MalformedInteger));
        assert_eq!(parse_channel(Some(&"-1")), Err(ColorFormatError::MalformedInteger));
        assert_eq!(parse_channel(Some(&"")), Err(ColorFormatError::MissingCoordinate));
        assert_eq!(parse_channel(None), Err(ColorFormatError::MissingCoordinate));

        assert_eq!(parse_alpha(Some(&"0")), Ok(0.0));
        assert_eq!(parse_alpha(Some(&"1")), Ok(1.0));
        assert_eq!(parse_alpha(Some(&"0.5")), Ok(0.5));
        assert_eq!(parse_alpha(Some(&".25")), Ok(0.25));
        assert_eq!(parse_alpha(Some(&"0.")), Ok(0.0));
        assert_eq!(parse_alpha(Some(&"1.0")), Err(ColorFormatError::MalformedAlpha));
        assert_eq!(parse_alpha(Some(&".")), Err(ColorFormatError::MalformedAlpha));
        assert_eq!(parse_alpha(Some(&"0.5e")), Err(ColorFormatError::MalformedAlpha));
    }

    #[test]
    fn test_parse() -> Result<(), ColorFormatError> {
        assert_eq!(parse("  #FFF  ")?, ([1.0, 1.0, 1.0], 1.0));
        assert_eq!(parse("#ff000080")?.0, [1.0, 0.0, 0.0]);
        assert_eq!(parse("rgb(255, 0, 0)")?, ([1.0, 0.0, 0.0], 1.0));
        assert_eq!(parse("RGB( 0,0 ,255 )")?, ([0.0, 0.0, 1.0], 1.0));
        assert_eq!(parse("rgba(255, 0, 0, 0.5)")?, ([1.0, 0.0, 0.0], 0.5));
        assert_eq!(parse("Red")?, ([1.0, 0.0, 0.0], 1.0));
        assert_eq!(parse("transparent")?, ([0.0, 0.0, 0.0], 0.0));

        assert_eq!(parse("rgb (1, 2, 3)"), Err(ColorFormatError::NoOpeningParenthesis));
        assert_eq!(parse("rgb(1, 2, 3"), Err(ColorFormatError::NoClosingParenthesis));
        assert_eq!(parse("rgb(1, 2)"), Err(ColorFormatError::MissingCoordinate));
        assert_eq!(parse("rgb(1, 2, 3, 4)"), Err(ColorFormatError::TooManyCoordinates));
        assert_eq!(parse("rgba(1, 2, 3)"), Err(ColorFormatError::MissingCoordinate));
        assert_eq!(parse("nemo"), Err(ColorFormatError::UnknownFormat));
        assert_eq!(parse(""), Err(ColorFormatError::UnknownFormat));

        Ok(())
    }

    #[test]
    fn test_parse_argb() -> Result<(), ColorFormatError> {
        let (rgb, alpha) = parse_argb("#80ff0000")?;
        assert_eq!(rgb, [1.0, 0.0, 0.0]);
        assert_eq!(alpha, 128.0 / 255.0);
        assert_eq!(parse_argb("#0f00")?, ([1.0, 0.0, 0.0], 0.0));
        assert_eq!(parse_argb("#ff0000"), Err(ColorFormatError::UnexpectedCharacters));

        Ok(())
    }

    #[test]
    fn test_format() {
        let coordinates = [1.0, 0.5, -0.2];
        assert_eq!(format_hex(&coordinates, 1.0, HexLayout::Rgb), "#ff8000");
        assert_eq!(format_hex(&coordinates, 0.5, HexLayout::Rgba), "#ff800080");
        assert_eq!(format_hex(&coordinates, 0.5, HexLayout::Argb), "#80ff8000");
        assert_eq!(format_rgb(&[1.2, 0.0, 0.2]), "rgb(255, 0, 51)");
        assert_eq!(format_rgba(&[1.0, 0.0, 0.0], 0.5), "rgba(255, 0, 0, 0.5)");
        assert_eq!(format_rgba(&[1.0, 0.0, 0.0], 3.0), "rgba(255, 0, 0, 1)");
        assert_eq!(format_rgba(&[1.0, 0.0, 0.0], 128.0 / 255.0), "rgba(255, 0, 0, 0.502)");
        assert_eq!(format_rgba(&[0.0, 0.0, 0.0], 0.0004), "rgba(0, 0, 0, 0)");
    }
}
