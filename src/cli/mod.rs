pub mod check;
pub mod completions;
pub mod stage;
pub mod transpile;

use clap::{Parser, Subcommand};

/// restool - resource script and header generator
#[derive(Parser, Debug)]
#[command(name = "restool")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a resource script and identifier header from declarations
    Transpile(transpile::TranspileArgs),

    /// Copy the szip CMake build files into a build tree
    Stage(stage::StageArgs),

    /// Check declaration files without writing output
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
