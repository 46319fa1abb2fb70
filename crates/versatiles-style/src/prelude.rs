//! Prelude for convenient imports.
//!
//! ```rust
//! use versatiles_style::prelude::*;
//!
//! let maker = StyleBuilder::new("demo")
//!     .unwrap()
//!     .add_colors([("land", "#fafafa")])
//!     .set_layer_style(|ctx: &StyleContext<'_>| {
//!         let mut rules = RuleSet::new();
//!         rules.try_insert("background", serde_json::json!({
//!             "paint": { "background-color": ctx.color("land")? }
//!         }))?;
//!         Ok(rules)
//!     })
//!     .finish();
//!
//! let style: StyleDocument = maker.make_with(&StyleOptions::new().hide_labels(true)).unwrap();
//! assert!(style.layers.iter().all(|l| l.kind != LayerType::Symbol));
//! ```

// Builder and documents
pub use crate::builder::{StyleBuilder, StyleMaker};
pub use crate::document::StyleDocument;

// Options
pub use crate::options::{StyleOptions, TilesUrl};

// Generator surface
pub use crate::color::Color;
pub use crate::generator::{LayerStyleGenerator, RuleSet};
pub use crate::resolve::StyleContext;

// Layers
pub use crate::layer::{Layer, LayerLibrary, LayerType};

// Errors
pub use crate::error::{Result, StyleError};
