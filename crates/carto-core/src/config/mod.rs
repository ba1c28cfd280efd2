//! Configuration for a compilation pass
//!
//! The evaluator only needs a handful of knobs, all of which default to the
//! behaviour of the reference compiler:
//!
//! ```toml
//! # Edit distance below which "Did you mean ...?" is attached
//! suggestionDistance = 3
//! # Drop warnings (deprecated/unstable properties)
//! quiet = false
//! # Font faces known to the renderer, used by `validate = "font"` properties
//! fonts = ["DejaVu Sans Book", "Open Sans Regular"]
//! ```
//!
//! The same keys are accepted in JSON.

mod compiler_config;
mod loader;

pub use compiler_config::CompilerConfig;
pub use loader::ConfigLoader;
