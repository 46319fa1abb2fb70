//! Parsed color values handed to rule generators.
//!
//! A [`Color`] is what a generator gets back when it dereferences a color
//! name. It parses the usual CSS notations, converts between RGB and HSL,
//! and serializes back into strings a map renderer understands.
//!
//! # Example
//!
//! ```rust
//! use versatiles_style::Color;
//!
//! let land: Color = "#f0e8d8".parse().unwrap();
//! assert_eq!(land.hex(), "#f0e8d8");
//!
//! let shade = land.darken(0.1).fade(0.5);
//! assert!(shade.rgb_string().starts_with("rgba("));
//!
//! let green = Color::hsl(120.0, 1.0, 0.5);
//! assert_eq!(green.hex(), "#00ff00");
//! ```

mod named;
mod parse;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::colorspace::{
    hsl_to_rgb, lab_to_rgb, normalize_hue, relative_luminance, rgb_to_hsl, rgb_to_lab, Hsl, Lab,
    Rgb,
};

pub use parse::ParseColorError;

/// An sRGB color with alpha.
///
/// Channels are kept as `f64` in `0.0..=255.0` so chained adjustments don't
/// accumulate rounding; rounding happens only when serializing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Color {
    /// Creates an opaque color from RGB channels (0–255).
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from RGB channels (0–255) and alpha (0–1).
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: r.clamp(0.0, 255.0),
            g: g.clamp(0.0, 255.0),
            b: b.clamp(0.0, 255.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates an opaque color from hue (degrees), saturation and lightness (0–1).
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::hsla(h, s, l, 1.0)
    }

    /// Creates a color from hue (degrees), saturation, lightness and alpha (0–1).
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self::from_rgb(hsl_to_rgb(Hsl { h, s, l }), a)
    }

    /// Parses a color string. See the module docs for accepted notations.
    pub fn parse(s: &str) -> Result<Self, ParseColorError> {
        parse::parse_color(s)
    }

    fn from_rgb(rgb: Rgb, a: f64) -> Self {
        let Rgb(r, g, b) = rgb.clamped();
        Self::rgba(r, g, b, a)
    }

    fn as_rgb(&self) -> Rgb {
        Rgb(self.r, self.g, self.b)
    }

    pub fn red(&self) -> f64 {
        self.r
    }

    pub fn green(&self) -> f64 {
        self.g
    }

    pub fn blue(&self) -> f64 {
        self.b
    }

    pub fn alpha(&self) -> f64 {
        self.a
    }

    /// Returns the HSL representation (hue in degrees, saturation and lightness 0–1).
    pub fn to_hsl(&self) -> Hsl {
        rgb_to_hsl(self.as_rgb())
    }

    /// Returns the CIE LAB representation.
    pub fn to_lab(&self) -> Lab {
        rgb_to_lab(self.as_rgb())
    }

    /// Creates an opaque color from a CIE LAB value.
    pub fn from_lab(lab: Lab) -> Self {
        Self::from_rgb(lab_to_rgb(lab), 1.0)
    }

    /// Rounded 8-bit channels.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (round8(self.r), round8(self.g), round8(self.b))
    }

    // ─── serialization ──────────────────────────────────────────────────────

    /// Lowercase `#rrggbb`, ignoring alpha.
    pub fn hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Lowercase `#rrggbbaa`.
    pub fn hexa(&self) -> String {
        format!("{}{:02x}", self.hex(), round8(self.a * 255.0))
    }

    /// `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn rgb_string(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", r, g, b)
        } else {
            format!("rgba({}, {}, {}, {})", r, g, b, round_alpha(self.a))
        }
    }

    /// `hsl(h, s%, l%)` when opaque, `hsla(h, s%, l%, a)` otherwise.
    pub fn hsl_string(&self) -> String {
        let hsl = self.to_hsl();
        let h = hsl.h.round();
        let s = (hsl.s * 100.0).round();
        let l = (hsl.l * 100.0).round();
        if self.a >= 1.0 {
            format!("hsl({}, {}%, {}%)", h, s, l)
        } else {
            format!("hsla({}, {}%, {}%, {})", h, s, l, round_alpha(self.a))
        }
    }

    // ─── adjustments ────────────────────────────────────────────────────────

    fn map_hsl(&self, f: impl FnOnce(Hsl) -> Hsl) -> Self {
        Self::from_rgb(hsl_to_rgb(f(self.to_hsl())), self.a)
    }

    /// Increases lightness by `ratio` of its current value.
    pub fn lighten(&self, ratio: f64) -> Self {
        self.map_hsl(|hsl| Hsl {
            l: hsl.l + hsl.l * ratio,
            ..hsl
        })
    }

    /// Decreases lightness by `ratio` of its current value.
    pub fn darken(&self, ratio: f64) -> Self {
        self.map_hsl(|hsl| Hsl {
            l: hsl.l - hsl.l * ratio,
            ..hsl
        })
    }

    /// Increases saturation by `ratio` of its current value.
    pub fn saturate(&self, ratio: f64) -> Self {
        self.map_hsl(|hsl| Hsl {
            s: hsl.s + hsl.s * ratio,
            ..hsl
        })
    }

    /// Decreases saturation by `ratio` of its current value.
    pub fn desaturate(&self, ratio: f64) -> Self {
        self.saturate(-ratio)
    }

    /// Rotates the hue by `degrees`.
    pub fn rotate(&self, degrees: f64) -> Self {
        self.map_hsl(|hsl| Hsl {
            h: normalize_hue(hsl.h + degrees),
            ..hsl
        })
    }

    /// Removes all chroma, keeping perceived lightness.
    pub fn grayscale(&self) -> Self {
        let lab = self.to_lab();
        let gray = Self::from_lab(Lab {
            a: 0.0,
            b: 0.0,
            ..lab
        });
        gray.with_alpha(self.a)
    }

    /// Inverts every channel.
    pub fn invert(&self) -> Self {
        Self::rgba(255.0 - self.r, 255.0 - self.g, 255.0 - self.b, self.a)
    }

    /// Reduces opacity by `ratio` of its current value.
    pub fn fade(&self, ratio: f64) -> Self {
        self.with_alpha(self.a - self.a * ratio)
    }

    /// Returns this color with alpha replaced.
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self::rgba(self.r, self.g, self.b, alpha)
    }

    /// Mixes `other` into this color; `weight` 0 keeps `self`, 1 yields `other`.
    pub fn mix(&self, other: &Color, weight: f64) -> Self {
        let w = weight.clamp(0.0, 1.0);
        let lerp = |a: f64, b: f64| a + (b - a) * w;
        Self::rgba(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
            lerp(self.a, other.a),
        )
    }

    /// Relative luminance (0 black, 1 white).
    pub fn luminance(&self) -> f64 {
        relative_luminance(self.as_rgb())
    }

    /// True when the color is closer to black than to white.
    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }
}

fn round8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn round_alpha(a: f64) -> f64 {
    (a * 1000.0).round() / 1000.0
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "{}", self.hex())
        } else {
            write!(f, "{}", self.rgb_string())
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_is_lowercase() {
        let c = Color::parse("#FFFFFF").unwrap();
        assert_eq!(c.hex(), "#ffffff");
    }

    #[test]
    fn test_hexa_includes_alpha() {
        let c = Color::rgba(255.0, 0.0, 0.0, 0.5);
        assert_eq!(c.hexa(), "#ff000080");
    }

    #[test]
    fn test_rgb_string() {
        assert_eq!(Color::rgb(1.0, 2.0, 3.0).rgb_string(), "rgb(1, 2, 3)");
        assert_eq!(
            Color::rgba(1.0, 2.0, 3.0, 0.25).rgb_string(),
            "rgba(1, 2, 3, 0.25)"
        );
    }

    #[test]
    fn test_hsl_string() {
        assert_eq!(Color::rgb(255.0, 0.0, 0.0).hsl_string(), "hsl(0, 100%, 50%)");
        assert_eq!(
            Color::hsla(240.0, 1.0, 0.5, 0.5).hsl_string(),
            "hsla(240, 100%, 50%, 0.5)"
        );
    }

    #[test]
    fn test_display_picks_notation_by_alpha() {
        assert_eq!(Color::rgb(0.0, 0.0, 255.0).to_string(), "#0000ff");
        assert_eq!(
            Color::rgba(0.0, 0.0, 255.0, 0.5).to_string(),
            "rgba(0, 0, 255, 0.5)"
        );
    }

    #[test]
    fn test_constructors_clamp() {
        let c = Color::rgba(300.0, -5.0, 10.0, 2.0);
        assert_eq!(c.red(), 255.0);
        assert_eq!(c.green(), 0.0);
        assert_eq!(c.alpha(), 1.0);
    }

    #[test]
    fn test_lighten_and_darken() {
        let base = Color::hsl(0.0, 1.0, 0.4);
        assert!(base.lighten(0.5).to_hsl().l > base.to_hsl().l);
        assert!(base.darken(0.5).to_hsl().l < base.to_hsl().l);
        assert_eq!(Color::rgb(255.0, 255.0, 255.0).lighten(1.0).hex(), "#ffffff");
    }

    #[test]
    fn test_desaturate_fully_is_gray() {
        let c = Color::rgb(200.0, 50.0, 50.0).desaturate(1.0);
        let (r, g, b) = c.to_rgb8();
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_rotate_hue() {
        let red = Color::rgb(255.0, 0.0, 0.0);
        assert_eq!(red.rotate(120.0).hex(), "#00ff00");
        assert_eq!(red.rotate(-120.0).hex(), "#0000ff");
    }

    #[test]
    fn test_grayscale_keeps_alpha() {
        let c = Color::rgba(10.0, 200.0, 30.0, 0.4).grayscale();
        let (r, g, b) = c.to_rgb8();
        assert!(r.abs_diff(g) <= 1 && g.abs_diff(b) <= 1);
        assert_eq!(c.alpha(), 0.4);
    }

    #[test]
    fn test_invert() {
        assert_eq!(Color::rgb(255.0, 0.0, 10.0).invert().hex(), "#00fff5");
    }

    #[test]
    fn test_fade() {
        let c = Color::rgb(0.0, 0.0, 0.0).fade(0.25);
        assert_eq!(c.alpha(), 0.75);
    }

    #[test]
    fn test_mix() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let white = Color::rgb(255.0, 255.0, 255.0);
        assert_eq!(black.mix(&white, 0.0), black);
        assert_eq!(black.mix(&white, 1.0), white);
        assert_eq!(black.mix(&white, 0.5).hex(), "#808080");
    }

    #[test]
    fn test_is_dark() {
        assert!(Color::rgb(20.0, 20.0, 40.0).is_dark());
        assert!(!Color::rgb(250.0, 250.0, 240.0).is_dark());
    }

    #[test]
    fn test_serialize_as_string() {
        let value = serde_json::to_value(Color::rgb(255.0, 255.0, 255.0)).unwrap();
        assert_eq!(value, serde_json::json!("#ffffff"));
    }

    #[test]
    fn test_from_str() {
        let c: Color = "rgb(0, 128, 0)".parse().unwrap();
        assert_eq!(c.hex(), "#008000");
        assert!("nope".parse::<Color>().is_err());
    }
}
