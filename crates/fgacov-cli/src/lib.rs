//! fgacov-cli: Command-line front end for relation coverage analysis
//!
//! This crate contains the I/O layer around `fgacov-domain`:
//! - `testfile` - YAML test-file schema and flattening into check assertions
//! - `output`   - JSON and text rendering of the coverage report

pub mod output;
pub mod testfile;

pub use testfile::TestFile;
