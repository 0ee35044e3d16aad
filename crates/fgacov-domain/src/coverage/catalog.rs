//! Relation catalog: one coverage record per declared relation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::AuthorizationModel;

/// Identifies a declared relation as a (type, relation) pair.
///
/// Displays canonically as `type#relation`. Ordering is by type name then
/// relation name, which gives reports a deterministic order for free.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationKey {
    pub type_name: String,
    pub relation: String,
}

impl RelationKey {
    pub fn new(type_name: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            relation: relation.into(),
        }
    }
}

impl fmt::Display for RelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name, self.relation)
    }
}

/// Coverage status of a single declared relation.
///
/// Flags are monotonic: the recorder and propagator only ever flip them from
/// false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationCoverage {
    /// The declaring type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The relation name.
    pub relation: String,
    /// At least one assertion named this relation.
    pub tested_directly: bool,
    /// Reachable from a directly-tested relation via dependency edges.
    pub tested_indirectly: bool,
    /// At least one direct assertion expected allow.
    pub has_positive_test: bool,
    /// At least one direct assertion expected deny.
    pub has_negative_test: bool,
}

impl RelationCoverage {
    fn new(type_name: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            relation: relation.into(),
            tested_directly: false,
            tested_indirectly: false,
            has_positive_test: false,
            has_negative_test: false,
        }
    }
}

/// Per-relation coverage records, keyed by [`RelationKey`].
pub type CoverageMap = BTreeMap<RelationKey, RelationCoverage>;

/// Seed a coverage record for every relation declared in the model.
///
/// Keys include the declaring type, so a well-formed model cannot produce
/// collisions.
pub fn build_catalog(model: &AuthorizationModel) -> CoverageMap {
    let mut catalog = CoverageMap::new();
    for type_def in &model.type_definitions {
        for relation_def in &type_def.relations {
            catalog.insert(
                RelationKey::new(&type_def.type_name, &relation_def.name),
                RelationCoverage::new(&type_def.type_name, &relation_def.name),
            );
        }
    }
    catalog
}
