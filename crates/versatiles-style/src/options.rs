//! Builder configuration and per-call option overrides.
//!
//! [`BuilderConfig`] is the state a [`StyleBuilder`](crate::StyleBuilder)
//! accumulates: registered colors and fonts, endpoint URLs, label and language
//! settings, and the default color transformer.
//!
//! [`StyleOptions`] is a partial override applied on top of that state for a
//! single build. Every field is optional; `colors` and `fonts` merge key by
//! key. Overrides can be built in code or loaded from YAML/JSON:
//!
//! ```rust
//! use versatiles_style::StyleOptions;
//!
//! let options = StyleOptions::from_yaml(r##"
//! hideLabels: true
//! language: de
//! tilesUrl: https://tiles.example.org/{z}/{x}/{y}
//! colors:
//!   water: "#0a3d62"
//! recolor:
//!   saturate: -1
//! "##).unwrap();
//!
//! assert_eq!(options.hide_labels, Some(true));
//! assert_eq!(options.language.as_deref(), Some("de"));
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};
use crate::transform::{ColorTransformer, Recolor};

/// One tile URL template or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TilesUrl {
    Single(String),
    Many(Vec<String>),
}

impl TilesUrl {
    /// Normalizes into an ordered list; a single URL becomes a one-element list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            TilesUrl::Single(url) => vec![url.clone()],
            TilesUrl::Many(urls) => urls.clone(),
        }
    }
}

impl From<&str> for TilesUrl {
    fn from(url: &str) -> Self {
        TilesUrl::Single(url.to_string())
    }
}

impl From<String> for TilesUrl {
    fn from(url: String) -> Self {
        TilesUrl::Single(url)
    }
}

impl From<Vec<String>> for TilesUrl {
    fn from(urls: Vec<String>) -> Self {
        TilesUrl::Many(urls)
    }
}

impl From<Vec<&str>> for TilesUrl {
    fn from(urls: Vec<&str>) -> Self {
        TilesUrl::Many(urls.into_iter().map(String::from).collect())
    }
}

/// Configuration owned by one builder.
///
/// Colors are stored as their raw registered strings; they are parsed only
/// when a generator dereferences them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    pub hide_labels: bool,
    pub language: Option<String>,
    pub glyphs_url: Option<String>,
    pub sprite_url: Option<String>,
    pub tiles_url: Option<TilesUrl>,
    pub colors: BTreeMap<String, String>,
    pub fonts: BTreeMap<String, String>,
    #[serde(skip)]
    pub color_transformer: ColorTransformer,
    pub source_name: Option<String>,
}

impl BuilderConfig {
    /// The suffix appended to label fields: `""` without a language, `"_<lang>"` otherwise.
    pub fn language_suffix(&self) -> String {
        match self.language.as_deref() {
            Some(lang) if !lang.is_empty() => format!("_{}", lang),
            _ => String::new(),
        }
    }

    /// Returns a new config with `overrides` layered on top. `self` is untouched.
    pub fn merged(&self, overrides: &StyleOptions) -> BuilderConfig {
        let mut merged = self.clone();

        if let Some(hide) = overrides.hide_labels {
            merged.hide_labels = hide;
        }
        if let Some(language) = &overrides.language {
            merged.language = Some(language.clone());
        }
        if let Some(url) = &overrides.glyphs_url {
            merged.glyphs_url = Some(url.clone());
        }
        if let Some(url) = &overrides.sprite_url {
            merged.sprite_url = Some(url.clone());
        }
        if let Some(tiles) = &overrides.tiles_url {
            merged.tiles_url = Some(tiles.clone());
        }
        if let Some(name) = &overrides.source_name {
            merged.source_name = Some(name.clone());
        }
        merged.colors.extend(overrides.colors.clone());
        merged.fonts.extend(overrides.fonts.clone());

        if let Some(recolor) = &overrides.recolor {
            merged.color_transformer = ColorTransformer::from(recolor.clone());
        }
        if let Some(transformer) = &overrides.color_transformer {
            merged.color_transformer = transformer.clone();
        }

        merged
    }
}

/// Partial overrides for a single build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOptions {
    pub hide_labels: Option<bool>,
    pub language: Option<String>,
    pub glyphs_url: Option<String>,
    pub sprite_url: Option<String>,
    pub tiles_url: Option<TilesUrl>,
    pub colors: BTreeMap<String, String>,
    pub fonts: BTreeMap<String, String>,
    pub recolor: Option<Recolor>,
    #[serde(skip)]
    pub color_transformer: Option<ColorTransformer>,
    pub source_name: Option<String>,
}

impl StyleOptions {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses overrides from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| StyleError::Config {
            path: None,
            message: e.to_string(),
        })
    }

    /// Parses overrides from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StyleError::Config {
            path: None,
            message: e.to_string(),
        })
    }

    /// Loads overrides from a `.yaml`, `.yml` or `.json` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let with_path = |err: StyleError| match err {
            StyleError::Config { message, .. } => StyleError::Config {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        };

        let content = std::fs::read_to_string(path).map_err(|e| StyleError::Config {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content).map_err(with_path),
            Some("json") => Self::from_json(&content).map_err(with_path),
            _ => Err(StyleError::Config {
                path: Some(path.to_path_buf()),
                message: "unsupported extension (expected .yaml, .yml or .json)".to_string(),
            }),
        }
    }

    pub fn hide_labels(mut self, hide: bool) -> Self {
        self.hide_labels = Some(hide);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn glyphs_url(mut self, url: impl Into<String>) -> Self {
        self.glyphs_url = Some(url.into());
        self
    }

    pub fn sprite_url(mut self, url: impl Into<String>) -> Self {
        self.sprite_url = Some(url.into());
        self
    }

    pub fn tiles_url(mut self, tiles: impl Into<TilesUrl>) -> Self {
        self.tiles_url = Some(tiles.into());
        self
    }

    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Overrides a single color.
    pub fn color(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.colors.insert(name.into(), value.into());
        self
    }

    /// Overrides a single font.
    pub fn font(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fonts.insert(name.into(), value.into());
        self
    }

    pub fn recolor(mut self, recolor: Recolor) -> Self {
        self.recolor = Some(recolor);
        self
    }

    pub fn color_transformer(mut self, transformer: ColorTransformer) -> Self {
        self.color_transformer = Some(transformer);
        self
    }
}
