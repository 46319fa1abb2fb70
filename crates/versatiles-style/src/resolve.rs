//! Lazy lookup surfaces for named colors and fonts.
//!
//! A rule generator never sees the raw option maps. It gets a [`StyleContext`]
//! whose resolvers look names up on demand: an unknown name fails only when it
//! is actually dereferenced, so a generator may use any subset of the
//! registered tokens.

use std::collections::BTreeMap;

use crate::color::Color;
use crate::error::{Result, StyleError, Surface};

/// Resolves color names against an (already transformed) color map.
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'a> {
    colors: &'a BTreeMap<String, String>,
}

impl<'a> ColorResolver<'a> {
    pub fn new(colors: &'a BTreeMap<String, String>) -> Self {
        Self { colors }
    }

    /// Looks up and parses the color registered as `name`.
    ///
    /// # Errors
    ///
    /// - [`StyleError::UnknownReference`] if `name` is not registered
    /// - [`StyleError::InvalidColor`] if the registered value does not parse
    pub fn get(&self, name: &str) -> Result<Color> {
        let value = lookup(self.colors, Surface::Colors, name)?;
        Color::parse(value).map_err(|e| StyleError::InvalidColor {
            name: name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        lookup(self.colors, Surface::Colors, name).is_ok()
    }
}

/// Resolves font names against the font map. Values are returned verbatim.
#[derive(Debug, Clone, Copy)]
pub struct FontResolver<'a> {
    fonts: &'a BTreeMap<String, String>,
}

impl<'a> FontResolver<'a> {
    pub fn new(fonts: &'a BTreeMap<String, String>) -> Self {
        Self { fonts }
    }

    /// Looks up the font registered as `name`.
    pub fn get(&self, name: &str) -> Result<&'a str> {
        lookup(self.fonts, Surface::Fonts, name)
    }

    pub fn contains(&self, name: &str) -> bool {
        lookup(self.fonts, Surface::Fonts, name).is_ok()
    }
}

// An empty registered value counts as absent.
fn lookup<'a>(map: &'a BTreeMap<String, String>, surface: Surface, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StyleError::unknown(surface, name))
}

/// Everything a rule generator receives for one build.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub colors: ColorResolver<'a>,
    pub fonts: FontResolver<'a>,
    pub language_suffix: &'a str,
}

impl<'a> StyleContext<'a> {
    pub fn new(
        colors: &'a BTreeMap<String, String>,
        fonts: &'a BTreeMap<String, String>,
        language_suffix: &'a str,
    ) -> Self {
        Self {
            colors: ColorResolver::new(colors),
            fonts: FontResolver::new(fonts),
            language_suffix,
        }
    }

    /// Shorthand for `self.colors.get(name)`.
    pub fn color(&self, name: &str) -> Result<Color> {
        self.colors.get(name)
    }

    /// Shorthand for `self.fonts.get(name)`.
    pub fn font(&self, name: &str) -> Result<&'a str> {
        self.fonts.get(name)
    }
}
