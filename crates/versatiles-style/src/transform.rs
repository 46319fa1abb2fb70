//! Color transformation applied to every registered color before resolution.
//!
//! A [`ColorTransformer`] wraps a `Color -> Color` function. The default is the
//! identity. [`transform_colors`] rewrites a color map in place so that every
//! later lookup observes transformed values.
//!
//! Transformation is per entry and independent of traversal order. Applying it
//! twice is only equivalent to applying it once when the function itself is
//! idempotent; that is the caller's concern.
//!
//! Transformed colors are written back through `Color`'s `Display`: `#rrggbb`
//! when opaque, `rgba(r, g, b, a)` otherwise. Channels are rounded to 8 bits
//! and alpha to 3 decimals, so finer precision from the transformer is lost
//! and a transformed named color (`navy`) comes back as hex.
//!
//! # Declarative recoloring
//!
//! [`Recolor`] describes common whole-map adjustments (hue rotation,
//! saturation, gamma, contrast, brightness, tint, brightness inversion) and can
//! be loaded from YAML or JSON along with the other style options:
//!
//! ```rust
//! use versatiles_style::{Color, ColorTransformer, Recolor};
//!
//! let gray = ColorTransformer::from(Recolor { saturate: -1.0, ..Recolor::default() });
//! let out = gray.apply(Color::parse("#ff0000").unwrap());
//! let (r, g, b) = out.to_rgb8();
//! assert!(r == g && g == b);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::colorspace::Lab;

type TransformFn = dyn Fn(Color) -> Color + Send + Sync;

/// A function applied to every registered color before lookups happen.
#[derive(Clone, Default)]
pub struct ColorTransformer {
    func: Option<Arc<TransformFn>>,
}

impl ColorTransformer {
    /// The identity transformer.
    pub fn identity() -> Self {
        Self { func: None }
    }

    /// Wraps an arbitrary transformation function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Color) -> Color + Send + Sync + 'static,
    {
        Self {
            func: Some(Arc::new(f)),
        }
    }

    /// True when this transformer leaves colors untouched.
    pub fn is_identity(&self) -> bool {
        self.func.is_none()
    }

    /// Applies the transformation to a single color.
    pub fn apply(&self, color: Color) -> Color {
        match &self.func {
            Some(f) => f(color),
            None => color,
        }
    }
}

impl fmt::Debug for ColorTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            write!(f, "ColorTransformer(identity)")
        } else {
            write!(f, "ColorTransformer(fn)")
        }
    }
}

/// Applies `transformer` to every value in `colors`, in place.
///
/// Values that do not parse as colors are left untouched; the error surfaces
/// when (and only if) a generator dereferences that name.
///
/// Parsed values are replaced by the transformed color's `Display` form
/// (8-bit hex, or `rgba` with a 3-decimal alpha), whatever notation they were
/// registered in.
pub fn transform_colors(colors: &mut BTreeMap<String, String>, transformer: &ColorTransformer) {
    if transformer.is_identity() {
        return;
    }
    for (name, value) in colors.iter_mut() {
        match Color::parse(value) {
            Ok(color) => *value = transformer.apply(color).to_string(),
            Err(err) => {
                tracing::trace!(color = %name, value = %value, error = %err, "leaving unparsable color untransformed");
            }
        }
    }
}

/// Declarative whole-map color adjustment.
///
/// Steps run in field order and each is skipped at its neutral value, so
/// `Recolor::default()` is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recolor {
    /// Mirror perceived lightness (CIE LAB `L → 100 − L`), keeping hue.
    pub invert_brightness: bool,
    /// Hue rotation in degrees.
    pub rotate: f64,
    /// Relative saturation change; `-1` removes all color.
    pub saturate: f64,
    /// Per-channel gamma exponent.
    pub gamma: f64,
    /// Contrast factor around mid-gray.
    pub contrast: f64,
    /// Additive brightness as a fraction of the full channel range.
    pub brightness: f64,
    /// Mix weight toward `tint_color`.
    pub tint: f64,
    /// Target color for `tint`.
    pub tint_color: String,
}

impl Default for Recolor {
    fn default() -> Self {
        Self {
            invert_brightness: false,
            rotate: 0.0,
            saturate: 0.0,
            gamma: 1.0,
            contrast: 1.0,
            brightness: 0.0,
            tint: 0.0,
            tint_color: "#ff0000".to_string(),
        }
    }
}

impl Recolor {
    /// True when every step is at its neutral value.
    pub fn is_identity(&self) -> bool {
        let neutral = Recolor {
            tint_color: self.tint_color.clone(),
            ..Recolor::default()
        };
        *self == neutral
    }

    /// Recolors a single color.
    pub fn apply(&self, color: Color) -> Color {
        let alpha = color.alpha();
        let mut c = color;

        if self.invert_brightness {
            let lab = c.to_lab();
            c = Color::from_lab(Lab {
                l: 100.0 - lab.l,
                ..lab
            });
        }
        if self.rotate != 0.0 {
            c = c.rotate(self.rotate);
        }
        if self.saturate != 0.0 {
            c = c.saturate(self.saturate);
        }
        if self.gamma != 1.0 {
            let gamma = self.gamma;
            c = map_channels(c, |v| 255.0 * (v / 255.0).powf(gamma));
        }
        if self.contrast != 1.0 {
            let contrast = self.contrast;
            c = map_channels(c, |v| (v - 127.5) * contrast + 127.5);
        }
        if self.brightness != 0.0 {
            let offset = self.brightness * 255.0;
            c = map_channels(c, |v| v + offset);
        }
        if self.tint != 0.0 {
            match Color::parse(&self.tint_color) {
                Ok(tint) => c = c.mix(&tint.with_alpha(alpha), self.tint),
                Err(err) => {
                    tracing::warn!(tint_color = %self.tint_color, error = %err, "ignoring unparsable tint color");
                }
            }
        }

        c.with_alpha(alpha)
    }
}

fn map_channels(c: Color, f: impl Fn(f64) -> f64) -> Color {
    Color::rgba(f(c.red()), f(c.green()), f(c.blue()), c.alpha())
}

impl From<Recolor> for ColorTransformer {
    fn from(recolor: Recolor) -> Self {
        if recolor.is_identity() {
            return ColorTransformer::identity();
        }
        ColorTransformer::new(move |c| recolor.apply(c))
    }
}
