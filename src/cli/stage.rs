//! Stage command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};

/// Copy the szip CMake build files into a build tree
#[derive(Args, Debug)]
pub struct StageArgs {
    /// Directory holding szip_CMakeLists.txt.in and SZConfig.h
    pub source: PathBuf,

    /// Build tree to copy into (must contain src/)
    pub dest: PathBuf,
}

pub fn run(args: StageArgs, printer: &Printer) -> Result<()> {
    printer.status(
        "Staging",
        &format!("{} -> {}", display_path(&args.source), display_path(&args.dest)),
    );

    let written = crate::stage::stage(&args.source, &args.dest)?;

    for path in &written {
        printer.info("Copied", &display_path(path));
    }
    printer.status("Finished", &format!("staged {}", plural(written.len(), "file", "files")));

    Ok(())
}
