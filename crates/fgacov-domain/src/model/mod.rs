//! Authorization model types and DSL parser.
//!
//! This module contains:
//! - Authorization model structures (types, relations, usersets)
//! - DSL parser for the OpenFGA model format

mod parser;
mod types;

pub use parser::{parse, ParserError, ParserResult};
pub use types::*;
