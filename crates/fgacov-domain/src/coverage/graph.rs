//! Relation dependency graph built from rewrite expressions.
//!
//! Each declared relation maps to the relations its rewrite expression may
//! delegate to. The graph may contain self-references and cycles; traversal
//! termination is the propagator's concern, not the builder's.

use std::collections::BTreeMap;

use crate::error::{DomainError, DomainResult};
use crate::model::{AuthorizationModel, Userset};

use super::catalog::RelationKey;

/// Ceiling on rewrite expression nesting. Walking past it fails closed with
/// [`DomainError::DepthLimitExceeded`] instead of overflowing the stack.
/// Matches the OpenFGA default resolution depth.
pub const MAX_EXPRESSION_DEPTH: u32 = 25;

/// Dependency edges from each declared relation to the relations it may
/// delegate authorization decisions to. Built once, read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: BTreeMap<RelationKey, Vec<RelationKey>>,
}

impl DependencyGraph {
    /// Build the graph by structurally walking every relation's rewrite.
    pub fn build(model: &AuthorizationModel) -> DomainResult<Self> {
        let mut edges = BTreeMap::new();
        for type_def in &model.type_definitions {
            for relation_def in &type_def.relations {
                let mut deps = Vec::new();
                collect_dependencies(&type_def.type_name, &relation_def.rewrite, 0, &mut deps)?;
                edges.insert(
                    RelationKey::new(&type_def.type_name, &relation_def.name),
                    deps,
                );
            }
        }
        Ok(Self { edges })
    }

    /// The relations `key` may delegate to. Unknown keys have no edges.
    pub fn dependencies(&self, key: &RelationKey) -> &[RelationKey] {
        self.edges.get(key).map_or(&[], Vec::as_slice)
    }
}

/// Collect every relation `rewrite` can delegate to, in expression order.
///
/// Duplicates are left in place; the propagator's visited set makes them
/// harmless. A tuple-to-userset edge targets the computed relation on the
/// declaring type rather than resolving the tupleset's target type. That is
/// a deliberate approximation: it keeps the graph single-model-pass simple
/// at the cost of over-crediting indirect coverage across type boundaries.
fn collect_dependencies(
    type_name: &str,
    rewrite: &Userset,
    depth: u32,
    deps: &mut Vec<RelationKey>,
) -> DomainResult<()> {
    if depth >= MAX_EXPRESSION_DEPTH {
        return Err(DomainError::DepthLimitExceeded {
            max_depth: MAX_EXPRESSION_DEPTH,
        });
    }

    match rewrite {
        Userset::This => {}
        Userset::ComputedUserset { relation } => {
            deps.push(RelationKey::new(type_name, relation));
        }
        Userset::TupleToUserset {
            computed_userset, ..
        } => {
            deps.push(RelationKey::new(type_name, computed_userset));
        }
        Userset::Union { children } | Userset::Intersection { children } => {
            for child in children {
                collect_dependencies(type_name, child, depth + 1, deps)?;
            }
        }
        Userset::Exclusion { base, subtract } => {
            collect_dependencies(type_name, base, depth + 1, deps)?;
            collect_dependencies(type_name, subtract, depth + 1, deps)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse;

    fn build(dsl: &str) -> DependencyGraph {
        DependencyGraph::build(&parse(dsl).unwrap()).unwrap()
    }

    #[test]
    fn test_direct_assignment_has_no_dependencies() {
        let graph = build(
            r#"
type document
  relations
    define owner: [user]
"#,
        );
        assert!(graph
            .dependencies(&RelationKey::new("document", "owner"))
            .is_empty());
    }

    #[test]
    fn test_computed_userset_depends_on_same_type_relation() {
        let graph = build(
            r#"
type document
  relations
    define owner: [user]
    define editor: owner
"#,
        );
        assert_eq!(
            graph.dependencies(&RelationKey::new("document", "editor")),
            &[RelationKey::new("document", "owner")]
        );
    }

    #[test]
    fn test_tuple_to_userset_collapses_to_declaring_type() {
        let graph = build(
            r#"
type folder
  relations
    define viewer: [user]

type document
  relations
    define parent: [folder]
    define viewer: viewer from parent
"#,
        );
        // The computed relation is resolved against the declaring type, not
        // the tupleset's target type.
        assert_eq!(
            graph.dependencies(&RelationKey::new("document", "viewer")),
            &[RelationKey::new("document", "viewer")]
        );
    }

    #[test]
    fn test_union_concatenates_child_dependencies() {
        let graph = build(
            r#"
type document
  relations
    define owner: [user]
    define editor: [user]
    define viewer: [user] or owner or editor
"#,
        );
        assert_eq!(
            graph.dependencies(&RelationKey::new("document", "viewer")),
            &[
                RelationKey::new("document", "owner"),
                RelationKey::new("document", "editor"),
            ]
        );
    }

    #[test]
    fn test_exclusion_yields_base_then_subtract() {
        let graph = build(
            r#"
type document
  relations
    define viewer: [user]
    define blocked: [user]
    define can_view: viewer but not blocked
"#,
        );
        assert_eq!(
            graph.dependencies(&RelationKey::new("document", "can_view")),
            &[
                RelationKey::new("document", "viewer"),
                RelationKey::new("document", "blocked"),
            ]
        );
    }

    #[test]
    fn test_self_reference_is_not_an_error() {
        let model = parse(
            r#"
type document
  relations
    define viewer: viewer
"#,
        )
        .unwrap();
        let graph = DependencyGraph::build(&model).unwrap();
        assert_eq!(
            graph.dependencies(&RelationKey::new("document", "viewer")),
            &[RelationKey::new("document", "viewer")]
        );
    }

    #[test]
    fn test_depth_limit_fails_closed() {
        use crate::model::{AuthorizationModel, RelationDefinition, TypeDefinition};

        let mut rewrite = Userset::ComputedUserset {
            relation: "owner".to_string(),
        };
        for _ in 0..MAX_EXPRESSION_DEPTH + 1 {
            rewrite = Userset::Union {
                children: vec![rewrite],
            };
        }
        let model = AuthorizationModel {
            schema_version: "1.1".to_string(),
            type_definitions: vec![TypeDefinition {
                type_name: "document".to_string(),
                relations: vec![RelationDefinition {
                    name: "deep".to_string(),
                    type_constraints: vec![],
                    rewrite,
                }],
            }],
        };

        let err = DependencyGraph::build(&model).unwrap_err();
        assert!(matches!(
            err,
            DomainError::DepthLimitExceeded {
                max_depth: MAX_EXPRESSION_DEPTH
            }
        ));
    }
}
