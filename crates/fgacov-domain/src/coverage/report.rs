//! Partition of the relation catalog into coverage buckets.

use serde::{Deserialize, Serialize};

use super::catalog::{CoverageMap, RelationCoverage};

/// The complete coverage analysis: every declared relation lands in exactly
/// one bucket. Buckets are sorted by type name then relation name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Relations with neither direct nor indirect coverage.
    pub untested_relations: Vec<RelationCoverage>,
    /// Relations with some coverage but not both an allow and a deny case.
    pub partially_tested: Vec<RelationCoverage>,
    /// Relations asserted directly with both an allow and a deny case.
    pub fully_tested: Vec<RelationCoverage>,
}

/// Partition the coverage map into report buckets.
///
/// A relation that is only indirectly tested has no outcome flags, so it
/// falls to the partial bucket by the "not both outcomes" rule rather than
/// counting as untested.
pub fn classify(coverage: CoverageMap) -> CoverageReport {
    let mut report = CoverageReport::default();
    for (_, record) in coverage {
        if !record.tested_directly && !record.tested_indirectly {
            report.untested_relations.push(record);
        } else if record.has_positive_test && record.has_negative_test {
            report.fully_tested.push(record);
        } else {
            report.partially_tested.push(record);
        }
    }
    report
}
