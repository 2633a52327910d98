//! Check command implementation.
//!
//! Classifies declaration files and reports findings without writing
//! anything. The asset roots only matter for output paths, so placeholder
//! roots are used.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{ResError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::classify_source;
use crate::rules::{Roots, RuleTable};
use crate::validation::{check_lines, print_diagnostics};

/// Check declaration files without writing output
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub deny_warnings: bool,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let table = RuleTable::new(&Roots::new("<root1>", "<root2>"))?;
    let mut failed = 0;

    for file in &args.files {
        let source = fs::read_to_string(file).map_err(|e| ResError::Input {
            path: file.clone(),
            message: e.to_string(),
        })?;

        printer.status("Checking", &display_path(file));
        let lines = classify_source(&source, &table);
        let result = check_lines(&lines);
        print_diagnostics(printer, file, &result);

        let declarations = lines.iter().filter(|l| l.class.is_declaration()).count();
        let fails = result.error_count()
            + if args.deny_warnings {
                result.warning_count()
            } else {
                0
            };

        if fails > 0 {
            printer.error(
                "Failed",
                &format!("{}: {}", display_path(file), plural(fails, "problem", "problems")),
            );
            failed += fails;
            if args.files.len() == 1 {
                return Err(ResError::Malformed {
                    path: file.clone(),
                    count: fails,
                });
            }
        } else {
            printer.status(
                "Checked",
                &format!(
                    "{}: {}",
                    display_path(file),
                    plural(declarations, "declaration", "declarations")
                ),
            );
        }
    }

    if failed > 0 {
        return Err(ResError::CheckFailed {
            files: args.files.len(),
            count: failed,
        });
    }

    Ok(())
}
