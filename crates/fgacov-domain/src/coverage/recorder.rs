//! Records direct test coverage from check assertions.

use tracing::debug;

use super::catalog::{CoverageMap, RelationKey};

/// A single check assertion from a test file.
///
/// Only `object`, `relation`, and `expectation` feed the coverage analysis;
/// `user` is carried for completeness but never scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckAssertion {
    /// The user reference (e.g., "user:alice").
    pub user: String,
    /// The asserted relation name.
    pub relation: String,
    /// The object reference (e.g., "document:readme").
    pub object: String,
    /// The expected check outcome: true for allow, false for deny.
    pub expectation: bool,
}

impl CheckAssertion {
    pub fn new(
        user: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
        expectation: bool,
    ) -> Self {
        Self {
            user: user.into(),
            relation: relation.into(),
            object: object.into(),
            expectation,
        }
    }
}

/// Mark every asserted relation as directly tested and record the expected
/// outcome. Assertions that cannot be tied to a declared relation are
/// skipped without error: a missing `:` in the object reference or an
/// unknown (type, relation) pair excludes the assertion from accounting and
/// nothing else.
pub fn record_assertions(coverage: &mut CoverageMap, assertions: &[CheckAssertion]) {
    for assertion in assertions {
        let Some(object_type) = object_type(&assertion.object) else {
            debug!(
                object = %assertion.object,
                "skipping assertion with malformed object reference"
            );
            continue;
        };

        let key = RelationKey::new(object_type, &assertion.relation);
        match coverage.get_mut(&key) {
            Some(record) => {
                record.tested_directly = true;
                if assertion.expectation {
                    record.has_positive_test = true;
                } else {
                    record.has_negative_test = true;
                }
            }
            None => debug!(relation = %key, "skipping assertion for undeclared relation"),
        }
    }
}

/// The type portion of an object reference, split at the first `:`.
fn object_type(object: &str) -> Option<&str> {
    object.split_once(':').map(|(type_name, _)| type_name)
}
