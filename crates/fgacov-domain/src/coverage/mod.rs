//! Relation test-coverage analysis.
//!
//! The analysis is a single synchronous pass over a coverage map owned by the
//! call: seed one record per declared relation, build the relation dependency
//! graph, record direct coverage from check assertions, propagate indirect
//! coverage along dependency edges, then partition the records into the
//! report buckets. Each stage only adds to the map; flags flip false to true
//! and are never reset.

mod catalog;
mod graph;
mod propagator;
mod recorder;
mod report;

#[cfg(test)]
mod report_proptest;

use tracing::debug;

use crate::error::DomainResult;
use crate::model::AuthorizationModel;

pub use catalog::{build_catalog, CoverageMap, RelationCoverage, RelationKey};
pub use graph::{DependencyGraph, MAX_EXPRESSION_DEPTH};
pub use propagator::propagate_indirect;
pub use recorder::{record_assertions, CheckAssertion};
pub use report::{classify, CoverageReport};

/// Analyze how thoroughly `assertions` exercise the relations declared in
/// `model`.
///
/// The only error path is a rewrite expression nested beyond
/// [`MAX_EXPRESSION_DEPTH`]; malformed or unknown assertions are skipped, and
/// cyclic models are handled without error.
pub fn analyze(
    model: &AuthorizationModel,
    assertions: &[CheckAssertion],
) -> DomainResult<CoverageReport> {
    let mut coverage = build_catalog(model);
    let graph = DependencyGraph::build(model)?;
    debug!(
        relations = coverage.len(),
        assertions = assertions.len(),
        "analyzing relation coverage"
    );

    record_assertions(&mut coverage, assertions);
    propagate_indirect(&mut coverage, &graph);

    Ok(classify(coverage))
}
