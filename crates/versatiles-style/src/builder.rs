//! The public builder facade.
//!
//! A [`StyleBuilder`] accumulates colors, fonts and a rule generator under one
//! id. [`StyleBuilder::finish`] freezes it into a [`StyleMaker`], which builds
//! a fresh [`StyleDocument`] on every call:
//!
//! ```rust
//! use serde_json::json;
//! use versatiles_style::{RuleSet, StyleBuilder, StyleOptions};
//!
//! let maker = StyleBuilder::new("basic")
//!     .unwrap()
//!     .add_colors([("water", "#0000ff")])
//!     .set_layer_style(|ctx| {
//!         RuleSet::from_value(json!({
//!             "water-ocean": { "paint": { "fill-color": ctx.color("water")? } },
//!         }))
//!     })
//!     .finish();
//!
//! let style = maker.make().unwrap();
//! assert_eq!(style.id, "versatiles-basic");
//!
//! let german = maker.make_with(&StyleOptions::new().language("de")).unwrap();
//! assert_eq!(german.name, "versatiles-basic");
//! ```
//!
//! Builds never write back into the maker, so one maker can serve any number
//! of builds, including from several threads at once.

use std::fmt;
use std::sync::Arc;

use crate::decorate::{decorate, without_labels};
use crate::document::{assemble, StyleDocument};
use crate::error::{Result, StyleError};
use crate::generator::{LayerStyleGenerator, RuleSet};
use crate::layer::LayerLibrary;
use crate::options::{BuilderConfig, StyleOptions};
use crate::resolve::StyleContext;
use crate::shortbread;
use crate::transform::{transform_colors, ColorTransformer};

/// Accumulates the configuration of one style.
pub struct StyleBuilder {
    id: String,
    config: BuilderConfig,
    generator: Option<Arc<dyn LayerStyleGenerator>>,
    template: Option<StyleDocument>,
    layers: Option<Arc<dyn LayerLibrary>>,
}

impl StyleBuilder {
    /// Creates a builder for the style `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidArgument`] if `id` is empty or blank.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(StyleError::InvalidArgument(
                "every style should have an id".to_string(),
            ));
        }
        Ok(Self {
            id,
            config: BuilderConfig::default(),
            generator: None,
            template: None,
            layers: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Registers colors. A name registered again overwrites the earlier value.
    ///
    /// Values are not validated here; a bad value fails when a generator
    /// looks it up.
    pub fn add_colors<I, K, V>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.config
            .colors
            .extend(colors.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Registers fonts. A name registered again overwrites the earlier value.
    pub fn add_fonts<I, K, V>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.config
            .fonts
            .extend(fonts.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the rule generator from a closure, replacing any earlier one.
    pub fn set_layer_style<F>(self, generator: F) -> Self
    where
        F: Fn(&StyleContext<'_>) -> Result<RuleSet> + Send + Sync + 'static,
    {
        self.set_generator(generator)
    }

    /// Sets the rule generator, replacing any earlier one.
    pub fn set_generator(mut self, generator: impl LayerStyleGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Sets the color transformer used when a build does not override it.
    pub fn set_color_transformer(mut self, transformer: ColorTransformer) -> Self {
        self.config.color_transformer = transformer;
        self
    }

    /// Applies builder-level defaults (labels, language, endpoints, source
    /// name, extra colors and fonts) the same way a build override would.
    pub fn with_defaults(mut self, defaults: &StyleOptions) -> Self {
        self.config = self.config.merged(defaults);
        self
    }

    /// Replaces the default Shortbread template.
    pub fn with_template(mut self, template: StyleDocument) -> Self {
        self.template = Some(template);
        self
    }

    /// Replaces the default Shortbread layer skeletons.
    pub fn with_layers(mut self, layers: impl LayerLibrary + 'static) -> Self {
        self.layers = Some(Arc::new(layers));
        self
    }

    /// Freezes the builder into a reusable maker.
    pub fn finish(self) -> StyleMaker {
        StyleMaker {
            id: self.id,
            config: self.config,
            generator: self.generator,
            template: Arc::new(self.template.unwrap_or_else(shortbread::template)),
            layers: self.layers.unwrap_or_else(|| {
                Arc::new(shortbread::ShortbreadLayers) as Arc<dyn LayerLibrary>
            }),
        }
    }
}

impl fmt::Debug for StyleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleBuilder")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("has_generator", &self.generator.is_some())
            .finish()
    }
}

/// A finished builder: builds style documents on demand.
#[derive(Clone)]
pub struct StyleMaker {
    id: String,
    config: BuilderConfig,
    generator: Option<Arc<dyn LayerStyleGenerator>>,
    template: Arc<StyleDocument>,
    layers: Arc<dyn LayerLibrary>,
}

impl StyleMaker {
    /// The builder's id (without the document prefix).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// A copy of the stored configuration. Changing it does not affect the maker.
    pub fn options(&self) -> BuilderConfig {
        self.config.clone()
    }

    /// Builds with the stored configuration.
    pub fn make(&self) -> Result<StyleDocument> {
        self.make_with(&StyleOptions::default())
    }

    /// Builds with `overrides` layered over the stored configuration.
    ///
    /// # Errors
    ///
    /// Any error raised by the generator (unknown color or font names,
    /// unparsable colors, malformed rules) aborts the build and is returned
    /// unchanged. No partial document is produced.
    pub fn make_with(&self, overrides: &StyleOptions) -> Result<StyleDocument> {
        let span = tracing::debug_span!("make_style", id = %self.id);
        let _enter = span.enter();

        let mut config = self.config.merged(overrides);
        transform_colors(&mut config.colors, &config.color_transformer);

        let suffix = config.language_suffix();
        let rules = match &self.generator {
            Some(generator) => {
                generator.generate(&StyleContext::new(&config.colors, &config.fonts, &suffix))?
            }
            None => RuleSet::new(),
        };
        tracing::debug!(rules = rules.len(), "generated layer rules");

        let skeletons = self.layers.layers(&suffix);
        let mut layers = decorate(&skeletons, &rules)?;
        tracing::debug!(layers = layers.len(), "decorated layers");

        if config.hide_labels {
            let before = layers.len();
            layers = without_labels(layers);
            tracing::debug!(hidden = before - layers.len(), "hid label layers");
        }

        assemble(&self.template, layers, &self.id, &config)
    }
}

impl fmt::Debug for StyleMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleMaker")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("has_generator", &self.generator.is_some())
            .finish()
    }
}
