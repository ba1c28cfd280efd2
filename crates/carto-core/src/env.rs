//! Evaluation environment for one compilation pass
//!
//! The orchestrator owns the `Env`. It pushes the variable declarations in
//! scope as frames before evaluating a rule, and reads the diagnostics and
//! registered font sets back afterwards.

use crate::config::CompilerConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector, Location};
use crate::fontset::FontSetRegistry;
use crate::reference::{Reference, ValidationData};
use crate::tree::{RuleId, RulesetId, StyleTree};

pub struct Env<'a> {
    tree: &'a StyleTree,
    reference: &'a dyn Reference,
    config: CompilerConfig,
    validation: ValidationData,
    frames: Vec<RuleId>,
    diagnostics: DiagnosticCollector,
    fontsets: FontSetRegistry,
    /// Variable declarations whose values are being evaluated right now
    resolving: Vec<RuleId>,
}

impl<'a> Env<'a> {
    pub fn new(tree: &'a StyleTree, reference: &'a dyn Reference) -> Self {
        Self::with_config(tree, reference, CompilerConfig::default())
    }

    pub fn with_config(
        tree: &'a StyleTree,
        reference: &'a dyn Reference,
        config: CompilerConfig,
    ) -> Self {
        let diagnostics = if config.quiet {
            DiagnosticCollector::quiet()
        } else {
            DiagnosticCollector::new()
        };
        // With no fonts configured there is nothing to check against
        let validation = if config.fonts.is_empty() {
            ValidationData::new()
        } else {
            ValidationData::new().with_fonts(config.fonts.iter().cloned())
        };

        Self {
            tree,
            reference,
            config,
            validation,
            frames: Vec::new(),
            diagnostics,
            fontsets: FontSetRegistry::new(),
            resolving: Vec::new(),
        }
    }

    pub fn tree(&self) -> &'a StyleTree {
        self.tree
    }

    pub fn reference(&self) -> &'a dyn Reference {
        self.reference
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn validation(&self) -> &ValidationData {
        &self.validation
    }

    pub fn set_validation(&mut self, validation: ValidationData) {
        self.validation = validation;
    }

    /// Active variable declarations, outermost first
    pub fn frames(&self) -> &[RuleId] {
        &self.frames
    }

    pub fn push_frame(&mut self, rule: RuleId) {
        self.frames.push(rule);
    }

    pub fn pop_frame(&mut self) -> Option<RuleId> {
        self.frames.pop()
    }

    /// Push every variable declared directly in `ruleset`
    pub fn push_ruleset_frames(&mut self, ruleset: RulesetId) {
        let tree = self.tree;
        self.frames.extend(tree.variables_in(ruleset));
    }

    /// Push every top-level variable declaration
    pub fn push_global_frames(&mut self) {
        let tree = self.tree;
        self.frames.extend(tree.global_variables());
    }

    /// Drop frames pushed since the stack had `len` entries
    pub fn truncate_frames(&mut self, len: usize) {
        self.frames.truncate(len);
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.report(diagnostic);
    }

    pub fn error(&mut self, code: DiagnosticCode, message: impl Into<String>, location: Location) {
        self.report(Diagnostic::error(code, message, location));
    }

    pub fn warning(&mut self, code: DiagnosticCode, message: impl Into<String>, location: Location) {
        self.report(Diagnostic::warning(code, message, location));
    }

    pub fn diagnostics(&self) -> &DiagnosticCollector {
        &self.diagnostics
    }

    pub fn fontsets(&self) -> &FontSetRegistry {
        &self.fontsets
    }

    pub fn fontsets_mut(&mut self) -> &mut FontSetRegistry {
        &mut self.fontsets
    }

    /// Mark a declaration as being evaluated; false if it already is
    pub(crate) fn begin_resolving(&mut self, rule: RuleId) -> bool {
        if self.resolving.contains(&rule) {
            return false;
        }
        self.resolving.push(rule);
        true
    }

    pub(crate) fn end_resolving(&mut self, rule: RuleId) {
        if let Some(position) = self.resolving.iter().rposition(|&r| r == rule) {
            self.resolving.remove(position);
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_diagnostics()
    }
}
