//! Compiler configuration type

use serde::{Deserialize, Serialize};

/// Default cut-off for rule-name suggestions
pub const DEFAULT_SUGGESTION_DISTANCE: usize = 3;

/// Settings consumed by [`Env`](crate::env::Env) for one pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// A suggestion is offered only when the closest known property is
    /// strictly nearer than this edit distance
    pub suggestion_distance: usize,

    /// Suppress warnings
    pub quiet: bool,

    /// Font faces available to the renderer
    pub fonts: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            suggestion_distance: DEFAULT_SUGGESTION_DISTANCE,
            quiet: false,
            fonts: Vec::new(),
        }
    }
}

impl CompilerConfig {
    pub fn with_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fonts = fonts.into_iter().map(Into::into).collect();
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}
