//! Variable cascade
//!
//! A variable reference can see several declarations of the same name: a
//! global one, one in the enclosing ruleset, one in a zoom-restricted nested
//! block. Each visible declaration is ranked by the [`Specificity`] of the
//! scope it was made in, and the reference binds to the first ranked
//! declaration that is at least as specific as the place the reference
//! appears. When none is, the most specific declaration wins.

mod resolver;
mod specificity;

pub use resolver::{Candidate, consumer_specificity, frame_specificity, rank_candidates, select_winner};
pub(crate) use resolver::resolve_variable;
pub use specificity::Specificity;
