//! Staging of the szip CMake build files.
//!
//! Copies two fixed files from the vendored source tree into the build tree
//! under the names the build expects. Existing files are overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ResError, Result};

/// (source name, destination path relative to the destination directory)
pub const STAGED_FILES: [(&str, &str); 2] = [
    ("szip_CMakeLists.txt.in", "CMakeLists.txt"),
    ("SZConfig.h", "src/SZConfig.h"),
];

/// Copy the staged files from `source_dir` into `dest_dir`.
///
/// Returns the destination paths written. `dest_dir/src` must already exist.
pub fn stage(source_dir: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (from, to) in STAGED_FILES {
        let src = source_dir.join(from);
        let dst = dest_dir.join(to);

        fs::copy(&src, &dst).map_err(|e| ResError::Stage {
            path: if src.is_file() { dst.clone() } else { src.clone() },
            message: e.to_string(),
        })?;
        written.push(dst);
    }

    Ok(written)
}
