//! # VersaTiles Style - Map Style Builder
//!
//! `versatiles-style` assembles MapLibre style documents from three parts: a
//! base template, an ordered list of layer skeletons, and a rule generator
//! that turns named color and font tokens into per-layer paint and layout
//! overrides.
//!
//! ## Core Concepts
//!
//! - [`StyleBuilder`]: registers colors, fonts and a rule generator under an id
//! - [`StyleMaker`]: the finished builder; builds a fresh [`StyleDocument`] per call
//! - [`StyleOptions`]: per-build overrides (labels, language, URLs, colors, recoloring)
//! - [`StyleContext`]: what a generator sees: lazy color and font lookups plus the language suffix
//! - [`RuleSet`]: generator output, keyed by layer id or id pattern
//! - [`Color`]: parsed color values with CSS parsing and HSL/LAB adjustments
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use versatiles_style::{Layer, LayerType, RuleSet, StyleBuilder, StyleOptions};
//!
//! let maker = StyleBuilder::new("basic")
//!     .unwrap()
//!     .add_colors([("land", "#ffffff")])
//!     .with_layers(vec![
//!         Layer::new("landLayer", LayerType::Fill),
//!         Layer::new("water", LayerType::Fill).with("fillColor", json!("#0000ff")),
//!     ])
//!     .set_layer_style(|ctx| {
//!         RuleSet::from_value(json!({ "landLayer": { "fillColor": ctx.color("land")?.hex() } }))
//!     })
//!     .finish();
//!
//! let style = maker
//!     .make_with(&StyleOptions::new().tiles_url("https://x/{z}/{x}/{y}"))
//!     .unwrap();
//!
//! assert_eq!(style.id, "versatiles-basic");
//! assert_eq!(style.layers[0].get("fillColor"), Some(&json!("#ffffff")));
//! assert_eq!(style.tiles("versatiles-shortbread"), Some(vec!["https://x/{z}/{x}/{y}"]));
//! ```
//!
//! ## Build Pipeline
//!
//! Every build runs the same steps on private copies of the builder state:
//!
//! 1. Overrides are merged over the stored configuration (colors and fonts key by key)
//! 2. The color transformer rewrites every registered color
//! 3. The generator runs once and returns a [`RuleSet`]
//! 4. Rules are deep-merged onto the layer skeletons ([`decorate`]); label layers
//!    are dropped when `hideLabels` is set
//! 5. The template is copied and filled in ([`assemble`])
//!
//! Unknown color or font names fail only when the generator actually looks them
//! up, with [`StyleError::UnknownReference`] naming the surface and key.
//!
//! ## Logging
//!
//! The crate reports through [`tracing`] and never installs a subscriber.

pub mod builder;
pub mod color;
pub mod colorspace;
pub mod decorate;
pub mod document;
mod error;
pub mod generator;
pub mod layer;
pub mod options;
pub mod prelude;
pub mod presets;
pub mod resolve;
pub mod shortbread;
pub mod transform;
pub mod util;

// Error type
pub use error::{Result, StyleError, Surface};

// Builder facade
pub use builder::{StyleBuilder, StyleMaker};

// Options and configuration
pub use options::{BuilderConfig, StyleOptions, TilesUrl};

// Colors and transformation
pub use color::{Color, ParseColorError};
pub use transform::{transform_colors, ColorTransformer, Recolor};

// Generators and resolution
pub use generator::{LayerStyleGenerator, RuleSet};
pub use resolve::{ColorResolver, FontResolver, StyleContext};

// Layers and documents
pub use decorate::{decorate, without_labels, KeyMatcher};
pub use document::{assemble, StyleDocument, STYLE_ID_PREFIX};
pub use layer::{Layer, LayerLibrary, LayerType};
