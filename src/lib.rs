//! restool - resource script and header generator
//!
//! A library for turning line-based resource declaration files into a
//! resource script for a native resource compiler and a header that assigns
//! numeric identifiers to the declared symbols.

pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod output;
pub mod parser;
pub mod report;
pub mod rules;
pub mod stage;
pub mod transpile;
pub mod validation;

pub use config::{Config, TypeKeyword};
pub use emit::{Allocation, GeneratedEntry, IdentifierCounter};
pub use error::{ResError, Result};
pub use parser::{classify_line, classify_source, ClassifiedLine, DeclarationLine, LineClass};
pub use rules::{DeclarationRule, Roots, RuleKind, RuleTable};
pub use transpile::{transpile_str, TranspileOptions, TranspileOutcome, TranspilerContext};
pub use validation::{check_lines, Diagnostic, DiagnosticList, Severity};
