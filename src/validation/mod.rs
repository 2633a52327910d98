//! Checks over classified declaration files.
//!
//! Runs after classification and before any output is written. Findings are
//! collected and reported together at the end of a run. Used by both
//! `restool check` and `restool transpile`.

mod checks;
mod warning;

pub use checks::{DUPLICATE_SYMBOL, MALFORMED, TRAILING_TOKENS, UNRECOGNIZED};
pub use warning::{Diagnostic, DiagnosticList, Severity};

use std::path::Path;

use crate::output::{display_path, Printer};
use crate::parser::ClassifiedLine;

/// Run all checks against the classified lines.
pub fn check_lines(lines: &[ClassifiedLine]) -> DiagnosticList {
    let mut result = DiagnosticList::new();

    result.merge(checks::check_malformed(lines));
    result.merge(checks::check_unrecognized(lines));
    result.merge(checks::check_duplicate_symbols(lines));
    result.merge(checks::check_trailing_tokens(lines));

    result
}

/// Print diagnostics to stderr as `path:line: severity[code]: message`.
pub fn print_diagnostics(printer: &Printer, path: &Path, result: &DiagnosticList) {
    let file = display_path(path);

    for d in result.iter() {
        let location = match d.line {
            Some(line) => format!("{}:{}", file, line),
            None => file.clone(),
        };
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("{}: {}[{}]: {}", printer.cyan(&location), label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("    {} {}", printer.dim("help:"), help);
        }
    }
}
