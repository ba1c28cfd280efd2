//! Carto Core
//!
//! Tree evaluation engine for a CSS-like cartographic styling language.
//! A parser builds a [`StyleTree`] of rulesets, selectors and declarations;
//! this crate resolves variables through the cascade, translates selector
//! filters into renderer expressions, and validates and serializes each
//! declaration against the property reference.
//!
//! ```no_run
//! use carto_core::{Env, ReferenceSchema, StyleTree};
//!
//! # fn main() -> carto_core::Result<()> {
//! let schema = ReferenceSchema::from_file("reference.json".as_ref())?;
//! let tree = StyleTree::new();
//! let mut env = Env::new(&tree, &schema);
//! env.push_global_frames();
//! for (_, rule) in tree.rules() {
//!     let evaluated = rule.ev(&mut env);
//!     println!("{}", evaluated.to_xml(&mut env, false, None));
//! }
//! # Ok(())
//! # }
//! ```

pub mod cascade;
pub mod config;
pub mod diagnostics;
pub mod env;
pub mod error;
pub mod fontset;
pub mod reference;
pub mod result;
pub mod tree;
pub mod zoom;

pub use cascade::Specificity;
pub use config::{CompilerConfig, ConfigLoader};
pub use diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticCollector, Location, Severity, Suggestion,
};
pub use env::Env;
pub use error::{CartoError, ErrorKind};
pub use fontset::{FontSet, FontSetRegistry};
pub use reference::{
    PropertySpec, PropertyType, Reference, ReferenceSchema, Status, ValidationData,
};
pub use result::{Result, ResultExt};
pub use tree::{
    Color, Dimension, Element, Expression, Field, Filter, FilterOp, ImageFilter, Keyword,
    Literal, Node, NodeKind, OwnerRef, Quoted, Rendered, Rule, RuleId, Ruleset, RulesetId,
    Selector, SelectorRef, StyleTree, Url, Value, Variable,
};
pub use zoom::{ALL_ZOOMS, MAX_ZOOM, Zoom};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("carto=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
