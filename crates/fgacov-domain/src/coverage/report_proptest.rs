//! Property tests for the report classifier.

use proptest::prelude::*;

use super::catalog::{CoverageMap, RelationCoverage, RelationKey};
use super::report::classify;

fn arb_coverage_map() -> impl Strategy<Value = CoverageMap> {
    prop::collection::vec(
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
        0..32,
    )
    .prop_map(|flags| {
        flags
            .into_iter()
            .enumerate()
            .map(|(i, (direct, indirect, positive, negative))| {
                let relation = format!("rel_{i}");
                (
                    RelationKey::new("document", &relation),
                    RelationCoverage {
                        type_name: "document".to_string(),
                        relation,
                        tested_directly: direct,
                        tested_indirectly: indirect,
                        has_positive_test: positive,
                        has_negative_test: negative,
                    },
                )
            })
            .collect()
    })
}

proptest! {
    /// Every relation lands in exactly one bucket: no omissions, no
    /// duplicates.
    #[test]
    fn classify_partitions_the_catalog(coverage in arb_coverage_map()) {
        let total = coverage.len();
        let report = classify(coverage);

        let bucketed = report.untested_relations.len()
            + report.partially_tested.len()
            + report.fully_tested.len();
        prop_assert_eq!(bucketed, total);

        let mut seen = std::collections::HashSet::new();
        for record in report
            .untested_relations
            .iter()
            .chain(&report.partially_tested)
            .chain(&report.fully_tested)
        {
            prop_assert!(seen.insert((record.type_name.clone(), record.relation.clone())));
        }
    }

    /// Bucket membership follows the classifier rules for every record.
    #[test]
    fn classify_respects_bucket_rules(coverage in arb_coverage_map()) {
        let report = classify(coverage);

        for record in &report.untested_relations {
            prop_assert!(!record.tested_directly && !record.tested_indirectly);
        }
        for record in &report.fully_tested {
            prop_assert!(record.has_positive_test && record.has_negative_test);
        }
        for record in &report.partially_tested {
            prop_assert!(record.tested_directly || record.tested_indirectly);
            prop_assert!(!(record.has_positive_test && record.has_negative_test));
        }
    }
}
