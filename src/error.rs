use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for restool operations
#[derive(Error, Diagnostic, Debug)]
pub enum ResError {
    #[error("IO error: {0}")]
    #[diagnostic(code(restool::io))]
    IoError(#[from] std::io::Error),

    #[error("Cannot read input {path}: {message}")]
    #[diagnostic(code(restool::input))]
    Input { path: PathBuf, message: String },

    #[error("Invalid root path '{root}': {message}")]
    #[diagnostic(code(restool::root))]
    InvalidRoot {
        root: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cannot write output {path}: {message}")]
    #[diagnostic(code(restool::output))]
    Output {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Rule table error: {message}")]
    #[diagnostic(code(restool::rules))]
    RuleTable { message: String },

    #[error("{count} declaration problem(s) in {path}")]
    #[diagnostic(
        code(restool::malformed),
        help("Fix the reported declaration lines")
    )]
    Malformed { path: PathBuf, count: usize },

    #[error("{count} declaration problem(s) across {files} files")]
    #[diagnostic(
        code(restool::malformed),
        help("Fix the reported declaration lines")
    )]
    CheckFailed { files: usize, count: usize },

    #[error("Config error: {message}")]
    #[diagnostic(code(restool::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Staging failed for {path}: {message}")]
    #[diagnostic(code(restool::stage))]
    Stage { path: PathBuf, message: String },

    #[error("Identifiers run out: {entries} entries starting at {first_id} do not fit in 32 bits")]
    #[diagnostic(
        code(restool::ids),
        help("Lower first_id in restool.yaml or --first-id")
    )]
    IdOverflow { first_id: u32, entries: u64 },
}

impl ResError {
    /// Process exit code for this error.
    ///
    /// Code 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            ResError::IoError(_) => 1,
            ResError::Input { .. } => 3,
            ResError::InvalidRoot { .. } => 4,
            ResError::Output { .. } => 5,
            ResError::RuleTable { .. } => 6,
            ResError::Malformed { .. } | ResError::CheckFailed { .. } => 7,
            ResError::Config { .. } => 8,
            ResError::Stage { .. } => 9,
            ResError::IdOverflow { .. } => 10,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResError>;
