//! Core type definitions for the authorization model.

use serde::{Deserialize, Serialize};

/// An authorization model defining types and their relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationModel {
    /// Schema version (e.g., "1.1").
    pub schema_version: String,
    /// Type definitions in the model.
    pub type_definitions: Vec<TypeDefinition>,
}

/// A type definition within the authorization model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// The type name (e.g., "document", "folder").
    pub type_name: String,
    /// Relations defined on this type.
    pub relations: Vec<RelationDefinition>,
}

/// A relation definition on a type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationDefinition {
    /// The relation name.
    pub name: String,
    /// Directly-assignable subject types (e.g., "user", "group#member").
    pub type_constraints: Vec<String>,
    /// The userset rewrite for this relation.
    pub rewrite: Userset,
}

/// A userset defines how a relation is computed.
///
/// This is a closed algebra: exhaustive `match` is used everywhere it is
/// consumed, so adding an operator is a compile-time-checked exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Userset {
    /// Direct assignment (this).
    This,
    /// Computed userset from another relation on the same type.
    ComputedUserset { relation: String },
    /// Tuple to userset (relation resolved through a tupleset relation).
    TupleToUserset {
        tupleset: String,
        computed_userset: String,
    },
    /// Union of multiple usersets.
    Union { children: Vec<Userset> },
    /// Intersection of multiple usersets.
    Intersection { children: Vec<Userset> },
    /// Exclusion (base but not subtract).
    Exclusion {
        base: Box<Userset>,
        subtract: Box<Userset>,
    },
}
