//! Propagates indirect coverage along the dependency graph.
//!
//! If relation A is directly tested and A delegates to relation B, B's logic
//! is exercised whenever A is, even though no assertion names B. This is
//! coverage by delegation: weaker than direct coverage, since the propagator
//! cannot know which branch of A's expression fired for any assertion, so it
//! never sets the positive/negative outcome flags.

use std::collections::HashSet;

use super::catalog::{CoverageMap, RelationKey};
use super::graph::DependencyGraph;

/// Mark every relation reachable from a directly-tested relation as
/// indirectly tested.
///
/// Each root gets its own depth-first walk with an explicit visited set, so
/// cyclic and self-referential graphs terminate without revisiting nodes.
pub fn propagate_indirect(coverage: &mut CoverageMap, graph: &DependencyGraph) {
    let roots: Vec<RelationKey> = coverage
        .iter()
        .filter(|(_, record)| record.tested_directly)
        .map(|(key, _)| key.clone())
        .collect();

    for root in roots {
        let mut visited: HashSet<RelationKey> = HashSet::new();
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            for dep in graph.dependencies(&current) {
                if let Some(record) = coverage.get_mut(dep) {
                    if !record.tested_directly {
                        record.tested_indirectly = true;
                    }
                }
                if !visited.contains(dep) {
                    stack.push(dep.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{build_catalog, record_assertions, CheckAssertion};
    use crate::model::parse;

    fn analyze_flags(dsl: &str, assertions: &[CheckAssertion]) -> CoverageMap {
        let model = parse(dsl).unwrap();
        let mut coverage = build_catalog(&model);
        let graph = DependencyGraph::build(&model).unwrap();
        record_assertions(&mut coverage, assertions);
        propagate_indirect(&mut coverage, &graph);
        coverage
    }

    #[test]
    fn test_dependency_of_tested_relation_becomes_indirect() {
        let coverage = analyze_flags(
            r#"
type document
  relations
    define viewer: [user]
    define editor: [user] or viewer
"#,
            &[CheckAssertion::new("user:a", "editor", "document:1", true)],
        );

        let viewer = &coverage[&RelationKey::new("document", "viewer")];
        assert!(viewer.tested_indirectly);
        assert!(!viewer.tested_directly);
    }

    #[test]
    fn test_propagation_is_transitive() {
        let coverage = analyze_flags(
            r#"
type document
  relations
    define owner: [user]
    define editor: owner
    define viewer: editor
"#,
            &[CheckAssertion::new("user:a", "viewer", "document:1", true)],
        );

        assert!(coverage[&RelationKey::new("document", "editor")].tested_indirectly);
        assert!(coverage[&RelationKey::new("document", "owner")].tested_indirectly);
    }

    #[test]
    fn test_directly_tested_relation_is_not_marked_indirect() {
        let coverage = analyze_flags(
            r#"
type document
  relations
    define viewer: [user]
    define editor: [user] or viewer
"#,
            &[
                CheckAssertion::new("user:a", "editor", "document:1", true),
                CheckAssertion::new("user:b", "viewer", "document:1", true),
            ],
        );

        let viewer = &coverage[&RelationKey::new("document", "viewer")];
        assert!(viewer.tested_directly);
        assert!(!viewer.tested_indirectly);
    }

    #[test]
    fn test_cyclic_graph_terminates() {
        let coverage = analyze_flags(
            r#"
type document
  relations
    define a: b
    define b: a
"#,
            &[CheckAssertion::new("user:x", "a", "document:1", true)],
        );

        assert!(coverage[&RelationKey::new("document", "b")].tested_indirectly);
        // a is directly tested; the cycle back into it never flips indirect.
        let a = &coverage[&RelationKey::new("document", "a")];
        assert!(a.tested_directly);
        assert!(!a.tested_indirectly);
    }

    #[test]
    fn test_self_referential_relation_terminates() {
        let coverage = analyze_flags(
            r#"
type document
  relations
    define viewer: [user] or viewer
"#,
            &[CheckAssertion::new("user:a", "viewer", "document:1", true)],
        );

        let viewer = &coverage[&RelationKey::new("document", "viewer")];
        assert!(viewer.tested_directly);
        assert!(!viewer.tested_indirectly);
    }

    #[test]
    fn test_untested_roots_propagate_nothing() {
        let coverage = analyze_flags(
            r#"
type document
  relations
    define owner: [user]
    define viewer: owner
"#,
            &[],
        );

        assert!(!coverage[&RelationKey::new("document", "owner")].tested_indirectly);
        assert!(!coverage[&RelationKey::new("document", "viewer")].tested_indirectly);
    }
}
