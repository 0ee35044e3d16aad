//! YAML test-file schema.
//!
//! Mirrors the assertion file layout used by OpenFGA model test suites:
//!
//! ```yaml
//! tests:
//!   - name: document permissions
//!     stages:
//!       - checkAssertions:
//!           - tuple:
//!               user: user:alice
//!               relation: viewer
//!               object: document:readme
//!             expectation: true
//! ```
//!
//! Only check assertions feed the coverage analysis. List-based assertions
//! are deserialized as opaque values so their presence survives a round
//! trip, but they are never scored.

use serde::Deserialize;

use fgacov_domain::coverage::CheckAssertion;

/// A parsed test file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestFile {
    #[serde(default)]
    pub tests: Vec<TestCase>,
}

/// A named group of test stages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

/// One stage of a test case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stage {
    /// Inline model override; the coverage analysis is run against the
    /// model file, so this is carried but not consumed.
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default, rename = "checkAssertions")]
    pub check_assertions: Vec<RawCheckAssertion>,

    /// Opaque: recorded as present, never scored.
    #[serde(default, rename = "listObjectsAssertions")]
    pub list_objects_assertions: Vec<serde_yaml_ng::Value>,

    /// Opaque: recorded as present, never scored.
    #[serde(default, rename = "listUsersAssertions")]
    pub list_users_assertions: Vec<serde_yaml_ng::Value>,
}

/// A check assertion as it appears in the file. The tuple is optional in
/// the wire format; assertions without one are dropped during flattening.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCheckAssertion {
    #[serde(default)]
    pub tuple: Option<AssertionTuple>,
    #[serde(default)]
    pub expectation: bool,
}

/// The (user, relation, object) triple a check assertion exercises.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssertionTuple {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub relation: String,
    #[serde(default)]
    pub object: String,
}

impl TestFile {
    /// Deserialize a test file from YAML text.
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(yaml)
    }

    /// Flatten every stage's check assertions into domain assertions,
    /// dropping entries without a tuple.
    pub fn check_assertions(&self) -> Vec<CheckAssertion> {
        self.tests
            .iter()
            .flat_map(|test| &test.stages)
            .flat_map(|stage| &stage.check_assertions)
            .filter_map(|assertion| {
                let tuple = assertion.tuple.as_ref()?;
                Some(CheckAssertion::new(
                    &tuple.user,
                    &tuple.relation,
                    &tuple.object,
                    assertion.expectation,
                ))
            })
            .collect()
    }
}
