//! Parsing of resource declaration files.
//!
//! A declaration file is read line by line. Each line is one of:
//! - blank
//! - a directive (`//`, `#include`, `#if...`, `#else`, `#elif`, `#endif`,
//!   or an `ID...` reference) passed through unchanged
//! - a declaration `<kind> <SYMBOL> "<file>"` for one of the table's kinds
//! - a malformed declaration, or something unrecognized
//!
//! # Usage
//!
//! ```ignore
//! use restool::parser::classify_source;
//! use restool::rules::{Roots, RuleTable};
//!
//! let table = RuleTable::new(&Roots::new("Data", "Data/gen"))?;
//! let lines = classify_source("app_icon IDI_MAIN \"main\"", &table);
//! ```

mod classify;
pub mod types;

pub use classify::{classify_line, classify_source, DIRECTIVE_MARKERS};
pub use types::{ClassifiedLine, DeclarationLine, LineClass};
