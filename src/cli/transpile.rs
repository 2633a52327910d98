//! Transpile command implementation.
//!
//! Reads a declaration file and writes the resource script and the
//! identifier header. Every argument is checked before any file is opened.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::emit::{entry_count, IdentifierCounter};
use crate::error::{ResError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::classify_source;
use crate::report::{write_report, ResourceMap};
use crate::rules::{Roots, RuleTable};
use crate::transpile::{TranspileOptions, TranspileOutcome, TranspilerContext};
use crate::validation::{check_lines, print_diagnostics};

/// Generate a resource script and identifier header from declarations
#[derive(Args, Debug)]
pub struct TranspileArgs {
    /// Resource declaration file
    pub input: PathBuf,

    /// Resource script to write
    pub script: PathBuf,

    /// Root for bitmaps, hatches, sounds and the application icon
    pub root1: String,

    /// Root for scaled icons and graphics
    pub root2: String,

    /// Identifier header to write
    pub header: PathBuf,

    /// Config file (default: restool.yaml next to the input, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// First identifier to assign (overrides the config)
    #[arg(long)]
    pub first_id: Option<u32>,

    /// Fail on malformed or duplicate declarations
    #[arg(long)]
    pub strict: bool,

    /// Also write a JSON map of the assigned identifiers
    #[arg(long)]
    pub report: Option<PathBuf>,
}

pub fn run(args: TranspileArgs, printer: &Printer) -> Result<TranspileOutcome> {
    validate_args(&args)?;

    let (mut config, config_path) = Config::resolve(args.config.as_deref(), &args.input)?;
    if let Some(path) = &config_path {
        printer.info("Config", &display_path(path));
    }
    if let Some(first_id) = args.first_id {
        config.first_id = first_id;
    }
    config.strict |= args.strict;

    let table = RuleTable::new(&Roots::new(&args.root1, &args.root2))?;

    printer.status("Reading", &display_path(&args.input));
    let source = fs::read_to_string(&args.input).map_err(|e| ResError::Input {
        path: args.input.clone(),
        message: e.to_string(),
    })?;

    let lines = classify_source(&source, &table);
    let diagnostics = check_lines(&lines);

    if config.strict && diagnostics.has_errors() {
        print_diagnostics(printer, &args.input, &diagnostics);
        return Err(ResError::Malformed {
            path: args.input.clone(),
            count: diagnostics.error_count(),
        });
    }

    IdentifierCounter::new(config.first_id).reserve(entry_count(&lines))?;

    let script = create_output(&args.script)?;
    let header = create_output(&args.header)?;

    let mut ctx = TranspilerContext::new(table, script, header, TranspileOptions::from(&config));
    let mut outcome = ctx.emit(&lines)?;
    outcome.diagnostics = diagnostics;

    printer.status("Writing", &display_path(&args.script));
    printer.status("Writing", &display_path(&args.header));

    if let Some(report) = &args.report {
        write_report(&ResourceMap::new(&args.input, &outcome), report)?;
        printer.status("Writing", &display_path(report));
    }

    print_diagnostics(printer, &args.input, &outcome.diagnostics);
    print_summary(printer, &outcome);

    Ok(outcome)
}

/// Check every path argument before any output is created.
fn validate_args(args: &TranspileArgs) -> Result<()> {
    if !args.input.is_file() {
        return Err(ResError::Input {
            path: args.input.clone(),
            message: "not found or not a file".to_string(),
        });
    }

    for root in [&args.root1, &args.root2] {
        validate_root(root)?;
    }

    let mut outputs = vec![&args.script, &args.header];
    outputs.extend(args.report.as_ref());

    for (i, output) in outputs.iter().enumerate() {
        if *output == &args.input {
            return Err(ResError::Output {
                path: (*output).clone(),
                message: "output would overwrite the input".to_string(),
                help: None,
            });
        }
        if outputs[..i].contains(output) {
            return Err(ResError::Output {
                path: (*output).clone(),
                message: "path given for more than one output".to_string(),
                help: Some("The script, header and report need distinct paths".to_string()),
            });
        }
        validate_output_dir(output)?;
    }

    Ok(())
}

fn validate_root(root: &str) -> Result<()> {
    if root.trim().is_empty() {
        return Err(ResError::InvalidRoot {
            root: root.to_string(),
            message: "empty path".to_string(),
            help: None,
        });
    }
    if !Path::new(root).is_dir() {
        return Err(ResError::InvalidRoot {
            root: root.to_string(),
            message: "not an existing directory".to_string(),
            help: Some("Asset roots are the directories holding bitmaps/, icons/ and sound/".to_string()),
        });
    }
    Ok(())
}

fn validate_output_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(ResError::Output {
            path: path.to_path_buf(),
            message: format!("directory {} does not exist", parent.display()),
            help: None,
        });
    }
    if path.is_dir() {
        return Err(ResError::Output {
            path: path.to_path_buf(),
            message: "is a directory".to_string(),
            help: None,
        });
    }
    Ok(())
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| ResError::Output {
        path: path.to_path_buf(),
        message: e.to_string(),
        help: None,
    })?;
    Ok(BufWriter::new(file))
}

fn print_summary(printer: &Printer, outcome: &TranspileOutcome) {
    let ids = match (outcome.allocations.first(), outcome.allocations.last()) {
        (Some(first), Some(last)) => format!(", ids {}..={}", first.id, last.id),
        _ => String::new(),
    };
    printer.status(
        "Finished",
        &format!(
            "{} from {}{}",
            printer.bold(&plural(outcome.script_entries, "resource", "resources")),
            plural(outcome.declarations, "declaration", "declarations"),
            ids
        ),
    );

    let errors = outcome.diagnostics.error_count();
    let warnings = outcome.diagnostics.warning_count();
    if errors + warnings > 0 {
        printer.warning(
            "Reported",
            &format!(
                "{}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new(input: &str) -> Self {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("resources.txt"), input).unwrap();
            fs::create_dir(dir.path().join("data")).unwrap();
            fs::create_dir(dir.path().join("gen")).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn root(&self, name: &str) -> String {
            self.path(name).display().to_string()
        }

        fn args(&self) -> TranspileArgs {
            TranspileArgs {
                input: self.path("resources.txt"),
                script: self.path("resources.rc"),
                root1: self.root("data"),
                root2: self.root("gen"),
                header: self.path("MakeResource.hpp"),
                config: None,
                first_id: None,
                strict: false,
                report: None,
            }
        }
    }

    fn quiet() -> Printer {
        Printer::new().quiet(true)
    }

    #[test]
    fn test_writes_both_outputs() {
        let fx = Fixture::new("app_icon IDI_MAIN \"main\"\nbitmap_icon_scaled IDI_PLANE \"glider\"\n");
        let outcome = run(fx.args(), &quiet()).unwrap();

        assert_eq!(outcome.script_entries, 4);
        let script = fs::read_to_string(fx.path("resources.rc")).unwrap();
        let header = fs::read_to_string(fx.path("MakeResource.hpp")).unwrap();

        assert!(script.contains(&format!("\"{}/bitmaps/main.ico\"", fx.root("data"))));
        assert!(script.contains(&format!("\"{}/icons/glider_300.bmp\"", fx.root("gen"))));
        assert!(header.ends_with("#define IDI_PLANE_ALL IDI_PLANE,IDI_PLANE_HD,IDI_PLANE_UHD\n"));
    }

    #[test]
    fn test_missing_input() {
        let fx = Fixture::new("");
        let mut args = fx.args();
        args.input = fx.path("missing.txt");

        let err = run(args, &quiet()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(!fx.path("resources.rc").exists());
    }

    #[test]
    fn test_missing_root_fails_before_writing() {
        let fx = Fixture::new("sound IDS_A \"a\"");
        let mut args = fx.args();
        args.root2 = fx.root("nowhere");

        let err = run(args, &quiet()).unwrap_err();
        assert!(matches!(err, ResError::InvalidRoot { .. }));
        assert_eq!(err.exit_code(), 4);
        assert!(!fx.path("resources.rc").exists());
        assert!(!fx.path("MakeResource.hpp").exists());
    }

    #[test]
    fn test_empty_root() {
        let fx = Fixture::new("");
        let mut args = fx.args();
        args.root1 = String::new();
        assert!(matches!(run(args, &quiet()), Err(ResError::InvalidRoot { .. })));
    }

    #[test]
    fn test_output_directory_missing() {
        let fx = Fixture::new("");
        let mut args = fx.args();
        args.header = fx.path("no/such/dir/MakeResource.hpp");

        let err = run(args, &quiet()).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        assert!(!fx.path("resources.rc").exists());
    }

    #[test]
    fn test_same_output_twice() {
        let fx = Fixture::new("");
        let mut args = fx.args();
        args.header = args.script.clone();
        assert!(matches!(run(args, &quiet()), Err(ResError::Output { .. })));
    }

    #[test]
    fn test_output_over_input() {
        let fx = Fixture::new("");
        let mut args = fx.args();
        args.script = args.input.clone();
        assert!(matches!(run(args, &quiet()), Err(ResError::Output { .. })));
    }

    #[test]
    fn test_strict_rejects_malformed_without_writing() {
        let fx = Fixture::new("sound IDS_A \"a\"\nsound IDS_B\n");
        let mut args = fx.args();
        args.strict = true;

        let err = run(args, &quiet()).unwrap_err();
        assert!(matches!(err, ResError::Malformed { count: 1, .. }));
        assert_eq!(err.exit_code(), 7);
        assert!(!fx.path("resources.rc").exists());
    }

    #[test]
    fn test_first_id_overflow_fails_before_writing() {
        let fx = Fixture::new("sound IDS_A \"a\"\nsound IDS_B \"b\"\n");
        let mut args = fx.args();
        args.first_id = Some(u32::MAX);

        let err = run(args, &quiet()).unwrap_err();
        assert!(matches!(err, ResError::IdOverflow { .. }));
        assert_eq!(err.exit_code(), 10);
        assert!(!fx.path("resources.rc").exists());
        assert!(!fx.path("MakeResource.hpp").exists());
    }

    #[test]
    fn test_lenient_blanks_malformed() {
        let fx = Fixture::new("sound IDS_B\nsound IDS_A \"a\"\n");
        let outcome = run(fx.args(), &quiet()).unwrap();

        assert_eq!(outcome.diagnostics.error_count(), 1);
        let script = fs::read_to_string(fx.path("resources.rc")).unwrap();
        assert!(script.starts_with('\n'));
        assert_eq!(script.lines().count(), 2);
    }

    #[test]
    fn test_config_beside_input() {
        let fx = Fixture::new("sound IDS_A \"a\"\n");
        fs::write(fx.path("restool.yaml"), "first_id: 500\nbanner: \"// ids\"\n").unwrap();

        run(fx.args(), &quiet()).unwrap();
        let header = fs::read_to_string(fx.path("MakeResource.hpp")).unwrap();
        assert_eq!(header, "// ids\nMAKE_RESOURCE(IDS_A,a,500);\n");
    }

    #[test]
    fn test_flag_overrides_config() {
        let fx = Fixture::new("sound IDS_A \"a\"\n");
        fs::write(fx.path("restool.yaml"), "first_id: 500\n").unwrap();
        let mut args = fx.args();
        args.first_id = Some(42);

        run(args, &quiet()).unwrap();
        let header = fs::read_to_string(fx.path("MakeResource.hpp")).unwrap();
        assert!(header.contains("MAKE_RESOURCE(IDS_A,a,42);"));
    }

    #[test]
    fn test_bad_config() {
        let fx = Fixture::new("");
        fs::write(fx.path("restool.yaml"), "first_id: [nope").unwrap();
        let err = run(fx.args(), &quiet()).unwrap_err();
        assert_eq!(err.exit_code(), 8);
    }

    #[test]
    fn test_report_written() {
        let fx = Fixture::new("bitmap_bitmap IDB_A \"a\"\n");
        let mut args = fx.args();
        args.report = Some(fx.path("resources.json"));

        run(args, &quiet()).unwrap();
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(fx.path("resources.json")).unwrap()).unwrap();
        assert_eq!(report["resources"][0]["symbol"], "IDB_A");
        assert_eq!(report["resources"][0]["id"], 100);
    }

    #[test]
    fn test_rerun_overwrites() {
        let fx = Fixture::new("sound IDS_A \"a\"\n");
        run(fx.args(), &quiet()).unwrap();
        let first = fs::read_to_string(fx.path("MakeResource.hpp")).unwrap();
        run(fx.args(), &quiet()).unwrap();
        let second = fs::read_to_string(fx.path("MakeResource.hpp")).unwrap();
        assert_eq!(first, second);
    }
}
