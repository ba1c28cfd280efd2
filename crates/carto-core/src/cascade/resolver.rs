//! Binding a variable reference to its winning declaration

use super::Specificity;
use crate::diagnostics::DiagnosticCode;
use crate::env::Env;
use crate::result::ResultExt;
use crate::tree::{Node, OwnerRef, RuleId, StyleTree, Variable};
use tracing::{debug, trace};

/// A visible declaration and its rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub rule: RuleId,
    pub specificity: Specificity,
}

/// Specificity of the scope a variable declaration was made in
pub fn frame_specificity(tree: &StyleTree, rule: RuleId) -> Specificity {
    let declaration = tree.rule(rule);
    let Some(parent) = declaration.parent else {
        return Specificity::unscoped(declaration.index);
    };
    let Some(found) = tree.nearest_selector(parent) else {
        return Specificity::unscoped(declaration.index);
    };
    if found.zoom.is_some() {
        return found.specificity();
    }

    // Weights come from the nearest real selector, zoom and order from the
    // declaring ruleset itself
    let (id_weight, class_weight) = found.weights();
    match tree.ruleset(parent).selectors.first() {
        Some(own) => own.specificity().with_weights(id_weight, class_weight),
        None => found.specificity(),
    }
}

/// Specificity of the place a reference appears
pub fn consumer_specificity(tree: &StyleTree, variable: &Variable) -> Specificity {
    match variable.owner() {
        Some(OwnerRef::Selector(selector)) => tree.selector(selector).specificity(),
        Some(OwnerRef::Rule(rule)) => {
            let rule = tree.rule(rule);
            let Some(parent) = rule.parent else {
                return Specificity::unscoped(rule.index);
            };
            match tree.ruleset(parent).selectors.first() {
                Some(own) => {
                    let (id_weight, class_weight) = tree
                        .nearest_selector(parent)
                        .map(|s| s.weights())
                        .unwrap_or((0, 0));
                    own.specificity().with_weights(id_weight, class_weight)
                }
                None => Specificity::unscoped(rule.index),
            }
        }
        None => Specificity::unscoped(variable.index),
    }
}

/// Sort most specific first; equal keys keep frame order
pub fn rank_candidates(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.specificity.cmp(&a.specificity));
    candidates
}

/// First ranked candidate not less specific than `consumer`, falling back to
/// the top-ranked one
pub fn select_winner(ranked: &[Candidate], consumer: Specificity) -> Option<&Candidate> {
    ranked
        .iter()
        .find(|candidate| candidate.specificity >= consumer)
        .or_else(|| ranked.first())
}

pub(crate) fn resolve_variable(variable: &Variable, env: &mut Env<'_>) -> Node {
    let tree = env.tree();
    let candidates: Vec<Candidate> = env
        .frames()
        .iter()
        .copied()
        .filter(|&id| {
            tree.get_rule(id)
                .log_and_continue()
                .is_some_and(|rule| rule.variable && rule.name == variable.name)
        })
        .map(|id| Candidate {
            rule: id,
            specificity: frame_specificity(tree, id),
        })
        .collect();

    let ranked = rank_candidates(candidates);
    let consumer = consumer_specificity(tree, variable);
    trace!(
        "{}: {} candidate(s), consumer {}",
        variable.name,
        ranked.len(),
        consumer
    );

    let Some(winner) = select_winner(&ranked, consumer).map(|c| c.rule) else {
        env.error(
            DiagnosticCode::UndefinedVariable,
            format!("variable {} is undefined", variable.name),
            variable.location(),
        );
        return Node::Undefined;
    };

    if !env.begin_resolving(winner) {
        env.error(
            DiagnosticCode::CircularVariable,
            format!("variable {} is defined in terms of itself", variable.name),
            variable.location(),
        );
        return Node::Undefined;
    }
    let declaration = tree.rule(winner);
    debug!(
        "Resolved {} to declaration at {}",
        variable.name,
        declaration.location()
    );
    let resolved = declaration.value.evaluate(env).into_node();
    env.end_resolving(winner);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceSchema;
    use crate::tree::{Dimension, Element, Rule, Selector, Value};
    use crate::zoom::{ALL_ZOOMS, Zoom};

    fn number(value: f64) -> Value {
        Value::new(vec![Dimension::new(value).into()])
    }

    /// Three unrelated declarations to hang specificities on
    fn rule_ids() -> Vec<RuleId> {
        let mut tree = StyleTree::new();
        (0..3)
            .map(|i| tree.add_rule(Rule::variable("@x", number(0.0), i, None), None))
            .collect()
    }

    fn candidate(rule: RuleId, specificity: Specificity) -> Candidate {
        Candidate { rule, specificity }
    }

    #[test]
    fn test_winner_is_first_not_less_specific() {
        let ids = rule_ids();
        let f1 = candidate(ids[1], Specificity::new(0, 0, 0, ALL_ZOOMS, 1));
        let f2 = candidate(ids[2], Specificity::new(1, 0, 0, ALL_ZOOMS, 2));
        let ranked = rank_candidates(vec![f1, f2]);
        assert_eq!(ranked[0], f2);

        let winner = select_winner(&ranked, Specificity::unscoped(5)).unwrap();
        assert_eq!(winner.rule, f2.rule);
    }

    #[test]
    fn test_winner_falls_back_to_most_specific() {
        let ids = rule_ids();
        let early = candidate(ids[1], Specificity::unscoped(1));
        let late = candidate(ids[2], Specificity::unscoped(3));
        let ranked = rank_candidates(vec![early, late]);

        let winner = select_winner(&ranked, Specificity::unscoped(10)).unwrap();
        assert_eq!(winner.rule, late.rule);
        assert!(select_winner(&[], Specificity::unscoped(0)).is_none());
    }

    #[test]
    fn test_rank_is_stable() {
        let ids = rule_ids();
        let a = candidate(ids[0], Specificity::unscoped(4));
        let b = candidate(ids[1], Specificity::unscoped(4));
        let ranked = rank_candidates(vec![a, b]);
        assert_eq!(ranked, vec![a, b]);
    }

    #[test]
    fn test_frame_specificity() {
        let mut tree = StyleTree::new();
        let global = tree.add_rule(Rule::variable("@w", number(1.0), 9, None), None);
        let roads = tree.add_ruleset(vec![Selector::new(vec![Element::new("#roads")], 2)], None);
        let scoped = tree.add_rule(Rule::variable("@w", number(2.0), 3, None), Some(roads));
        let zoomed = tree.add_ruleset(
            vec![Selector::new(vec![], 4).with_zoom(Zoom::range(10, 22))],
            Some(roads),
        );
        let nested = tree.add_rule(Rule::variable("@w", number(3.0), 5, None), Some(zoomed));

        assert_eq!(frame_specificity(&tree, global), Specificity::unscoped(9));
        assert_eq!(
            frame_specificity(&tree, scoped),
            Specificity::new(1, 0, 0, ALL_ZOOMS, 2)
        );
        // The nested block borrows weights from #roads and keeps its own zoom
        assert_eq!(
            frame_specificity(&tree, nested),
            Specificity::new(1, 0, 10, 22, 4)
        );
    }

    #[test]
    fn test_undefined_variable_reports() {
        let tree = StyleTree::new();
        let schema = ReferenceSchema::default();
        let mut env = Env::new(&tree, &schema);

        let variable = Variable::new("@missing", 12, Some("style.mss"));
        assert_eq!(resolve_variable(&variable, &mut env), Node::Undefined);

        let diagnostics = env.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::UndefinedVariable);
        assert_eq!(diagnostics[0].message, "variable @missing is undefined");
        assert_eq!(diagnostics[0].location.index, 12);
    }

    #[test]
    fn test_frame_from_another_tree_is_skipped() {
        let mut other = StyleTree::new();
        let foreign: Vec<RuleId> = (0..4)
            .map(|i| other.add_rule(Rule::variable("@w", number(9.0), i, None), None))
            .collect();

        let mut tree = StyleTree::new();
        tree.add_rule(Rule::variable("@w", number(2.0), 0, None), None);
        let schema = ReferenceSchema::default();
        let mut env = Env::new(&tree, &schema);
        env.push_global_frames();
        env.push_frame(foreign[3]);

        let variable = Variable::new("@w", 1, None);
        assert_eq!(
            resolve_variable(&variable, &mut env),
            Node::Dimension(Dimension::new(2.0))
        );
        assert!(env.diagnostics().is_empty());
    }
}
