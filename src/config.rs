//! Project configuration (restool.yaml) parsing.
//!
//! The config tweaks output details: where identifiers start, the header
//! banner, which keyword fills the script's type column, and whether
//! malformed declarations fail the run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::emit::{DEFAULT_BANNER, FIRST_ID};
use crate::error::{ResError, Result};

/// Config file looked up next to the input when `--config` is not given.
pub const CONFIG_FILENAME: &str = "restool.yaml";

/// Keyword written in the type column of the resource script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKeyword {
    /// Native compiler type, e.g. `BITMAP`.
    #[default]
    Compiler,
    /// Group keyword, e.g. `BITMAP_ICON`, for scripts that define group macros.
    Group,
}

/// Configuration loaded from restool.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// First identifier handed out.
    pub first_id: u32,

    /// First line of the generated header.
    pub banner: String,

    pub type_keyword: TypeKeyword,

    /// Treat malformed declarations as fatal.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_id: FIRST_ID,
            banner: DEFAULT_BANNER.to_string(),
            type_keyword: TypeKeyword::default(),
            strict: false,
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ResError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
            help: None,
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string. Empty input gives the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content).map_err(|e| ResError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;

        if config.banner.contains('\n') {
            return Err(ResError::Config {
                message: "banner must be a single line".to_string(),
                help: None,
            });
        }

        Ok(config)
    }

    /// Resolve the config for an input file.
    ///
    /// An explicit path must exist. Otherwise `restool.yaml` beside the input
    /// is used when present, and the defaults when not.
    pub fn resolve(explicit: Option<&Path>, input: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let beside = input
            .parent()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if beside.is_file() {
            Ok((Self::load(&beside)?, Some(beside)))
        } else {
            Ok((Self::default(), None))
        }
    }
}
