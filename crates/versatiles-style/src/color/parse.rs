//! Color string parsing.
//!
//! Supports:
//!
//! - Hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - Functions: `rgb()`, `rgba()`, `hsl()`, `hsla()`, comma or space separated,
//!   with an optional `/ alpha`
//! - CSS named colors and `transparent`

use thiserror::Error;

use super::{named, Color};

/// Error returned when a string is not a recognizable color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseColorError(pub(crate) String);

impl ParseColorError {
    fn new(msg: impl Into<String>) -> Self {
        ParseColorError(msg.into())
    }
}

pub(crate) fn parse_color(input: &str) -> Result<Color, ParseColorError> {
    let s = input.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Err(ParseColorError::new("empty color value"));
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(open) = s.find('(') {
        if !s.ends_with(')') {
            return Err(ParseColorError::new(format!(
                "unterminated color function: {}",
                input.trim()
            )));
        }
        let func = s[..open].trim();
        let args = &s[open + 1..s.len() - 1];
        return match func {
            "rgb" | "rgba" => parse_rgb_function(args),
            "hsl" | "hsla" => parse_hsl_function(args),
            _ => Err(ParseColorError::new(format!(
                "unknown color function: {}()",
                func
            ))),
        };
    }

    if s == "transparent" {
        return Ok(Color::rgba(0.0, 0.0, 0.0, 0.0));
    }

    named::lookup(&s)
        .map(|(r, g, b)| Color::rgb(r as f64, g as f64, b as f64))
        .ok_or_else(|| ParseColorError::new(format!("unknown color name: {}", input.trim())))
}

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

/// Parses a hex color code (without the # prefix).
fn parse_hex(hex: &str) -> Result<Color, ParseColorError> {
    let invalid = || ParseColorError::new(format!("invalid hex color: #{}", hex));
    let digits: Vec<u8> = hex
        .bytes()
        .map(hex_digit)
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(invalid)?;

    let channels: Vec<u8> = match digits.len() {
        // #rgb / #rgba -> each digit doubled
        3 | 4 => digits.iter().map(|d| d * 17).collect(),
        6 | 8 => digits.chunks(2).map(|p| p[0] * 16 + p[1]).collect(),
        _ => {
            return Err(ParseColorError::new(format!(
                "invalid hex color: #{} (must be 3, 4, 6 or 8 digits)",
                hex
            )))
        }
    };

    let alpha = channels.get(3).map(|a| *a as f64 / 255.0).unwrap_or(1.0);
    Ok(Color::rgba(
        channels[0] as f64,
        channels[1] as f64,
        channels[2] as f64,
        alpha,
    ))
}

/// Splits function arguments into (components, alpha).
///
/// Accepts `a, b, c[, alpha]` and `a b c[ / alpha]`.
fn split_args(args: &str) -> Result<(Vec<&str>, Option<&str>), ParseColorError> {
    let (main, slash_alpha) = match args.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (args, None),
    };

    let mut parts: Vec<&str> = if main.contains(',') {
        main.split(',').map(str::trim).collect()
    } else {
        main.split_whitespace().collect()
    };

    let alpha = match (slash_alpha, parts.len()) {
        (Some(a), 3) => Some(a),
        (None, 4) => parts.pop(),
        (None, 3) => None,
        (_, n) => {
            return Err(ParseColorError::new(format!(
                "color function requires 3 components, got {}",
                n
            )))
        }
    };

    Ok((parts, alpha))
}

fn parse_number(part: &str) -> Result<f64, ParseColorError> {
    part.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ParseColorError::new(format!("invalid number '{}'", part)))
}

/// Parses `n` (0–255) or `n%` (0–100%) into a channel value.
fn parse_channel(part: &str) -> Result<f64, ParseColorError> {
    match part.strip_suffix('%') {
        Some(pct) => Ok((parse_number(pct)? / 100.0 * 255.0).clamp(0.0, 255.0)),
        None => Ok(parse_number(part)?.clamp(0.0, 255.0)),
    }
}

/// Parses `n` (0–1) or `n%` into an alpha value.
fn parse_alpha(part: &str) -> Result<f64, ParseColorError> {
    match part.strip_suffix('%') {
        Some(pct) => Ok((parse_number(pct)? / 100.0).clamp(0.0, 1.0)),
        None => Ok(parse_number(part)?.clamp(0.0, 1.0)),
    }
}

/// Parses a percentage (the `%` suffix is optional) into `0.0..=1.0`.
fn parse_fraction(part: &str) -> Result<f64, ParseColorError> {
    let num = part.strip_suffix('%').unwrap_or(part);
    Ok((parse_number(num)? / 100.0).clamp(0.0, 1.0))
}

fn parse_hue(part: &str) -> Result<f64, ParseColorError> {
    parse_number(part.strip_suffix("deg").unwrap_or(part))
}

fn parse_rgb_function(args: &str) -> Result<Color, ParseColorError> {
    let (parts, alpha) = split_args(args)?;
    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let a = alpha.map(parse_alpha).transpose()?.unwrap_or(1.0);
    Ok(Color::rgba(r, g, b, a))
}

fn parse_hsl_function(args: &str) -> Result<Color, ParseColorError> {
    let (parts, alpha) = split_args(args)?;
    let h = parse_hue(parts[0])?;
    let s = parse_fraction(parts[1])?;
    let l = parse_fraction(parts[2])?;
    let a = alpha.map(parse_alpha).transpose()?.unwrap_or(1.0);
    Ok(Color::hsla(h, s, l, a))
}
