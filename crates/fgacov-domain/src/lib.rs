//! fgacov-domain: Relation test-coverage analysis for authorization models
//!
//! This crate contains the analysis core:
//! - Authorization model types and DSL parser
//! - Relation dependency graph construction
//! - Direct and indirect coverage tracking
//! - Coverage report classification
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               fgacov-domain                  │
//! ├─────────────────────────────────────────────┤
//! │  model/     - Type system & DSL parser      │
//! │  coverage/  - Catalog, dependency graph,    │
//! │               recorder, propagator, report  │
//! └─────────────────────────────────────────────┘
//! ```

pub mod coverage;
pub mod error;
pub mod model;

// Re-export commonly used types at the crate root
pub use coverage::{analyze, CheckAssertion, CoverageReport, RelationCoverage};
pub use error::{DomainError, DomainResult};
