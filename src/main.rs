use std::process::ExitCode;

use clap::Parser;
use restool::cli::{Cli, Commands};
use restool::output::Printer;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);

    let result = match cli.command {
        Commands::Transpile(args) => restool::cli::transpile::run(args, &printer).map(|_| ()),
        Commands::Stage(args) => restool::cli::stage::run(args, &printer),
        Commands::Check(args) => restool::cli::check::run(args, &printer),
        Commands::Completions(args) => restool::cli::completions::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}
