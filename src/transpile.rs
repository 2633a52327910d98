//! Transpiler orchestration.
//!
//! A [`TranspilerContext`] owns everything one run touches: the rule table,
//! the identifier counter, both output sinks and the options. The input is
//! classified once; the script pass and the header pass then walk the same
//! classified lines.

use std::io::Write;

use crate::config::{Config, TypeKeyword};
use crate::emit::{entry_count, write_header, write_script, Allocation, IdentifierCounter};
use crate::error::Result;
use crate::parser::{classify_source, ClassifiedLine};
use crate::rules::{Roots, RuleTable};
use crate::validation::{check_lines, DiagnosticList};

/// Options affecting generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOptions {
    pub first_id: u32,
    pub banner: String,
    pub type_keyword: TypeKeyword,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for TranspileOptions {
    fn from(config: &Config) -> Self {
        Self {
            first_id: config.first_id,
            banner: config.banner.clone(),
            type_keyword: config.type_keyword,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, Default)]
pub struct TranspileOutcome {
    /// Input lines read.
    pub lines: usize,
    /// Declarations recognized.
    pub declarations: usize,
    /// Resource-script entries written.
    pub script_entries: usize,
    /// Identifiers assigned in the header, in file order.
    pub allocations: Vec<Allocation>,
    pub diagnostics: DiagnosticList,
}

/// State for one transpiler run.
pub struct TranspilerContext<S: Write, H: Write> {
    table: RuleTable,
    counter: IdentifierCounter,
    script: S,
    header: H,
    options: TranspileOptions,
}

impl<S: Write, H: Write> TranspilerContext<S, H> {
    pub fn new(table: RuleTable, script: S, header: H, options: TranspileOptions) -> Self {
        Self {
            table,
            counter: IdentifierCounter::new(options.first_id),
            script,
            header,
            options,
        }
    }

    /// Classify the source without writing anything.
    pub fn classify(&self, source: &str) -> Vec<ClassifiedLine> {
        classify_source(source, &self.table)
    }

    /// Write both outputs for already classified lines.
    ///
    /// Runs no checks; the outcome's diagnostics are left empty. Nothing is
    /// written when the counter cannot cover every entry.
    pub fn emit(&mut self, lines: &[ClassifiedLine]) -> Result<TranspileOutcome> {
        self.counter.reserve(entry_count(lines))?;

        let script_entries = write_script(&mut self.script, lines, self.options.type_keyword)?;
        self.script.flush()?;

        let allocations = write_header(
            &mut self.header,
            lines,
            &self.options.banner,
            &mut self.counter,
        )?;
        self.header.flush()?;

        Ok(TranspileOutcome {
            lines: lines.len(),
            declarations: lines.iter().filter(|l| l.class.is_declaration()).count(),
            script_entries,
            allocations,
            diagnostics: DiagnosticList::new(),
        })
    }

    /// Classify, check and transpile a whole source text.
    pub fn run(&mut self, source: &str) -> Result<TranspileOutcome> {
        let lines = self.classify(source);
        let diagnostics = check_lines(&lines);
        let mut outcome = self.emit(&lines)?;
        outcome.diagnostics = diagnostics;
        Ok(outcome)
    }

    /// Identifier the next entry would get.
    pub fn next_id(&self) -> Option<u32> {
        self.counter.peek()
    }

    /// Give back the sinks.
    pub fn into_sinks(self) -> (S, H) {
        (self.script, self.header)
    }
}

/// Transpile a source string in memory.
///
/// Returns the resource script, the header and the run outcome.
pub fn transpile_str(
    source: &str,
    roots: &Roots,
    options: TranspileOptions,
) -> Result<(String, String, TranspileOutcome)> {
    let table = RuleTable::new(roots)?;
    let mut ctx = TranspilerContext::new(table, Vec::new(), Vec::new(), options);
    let outcome = ctx.run(source)?;
    let (script, header) = ctx.into_sinks();

    Ok((
        String::from_utf8_lossy(&script).into_owned(),
        String::from_utf8_lossy(&header).into_owned(),
        outcome,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResError;
    use pretty_assertions::assert_eq;

    fn roots() -> Roots {
        Roots::new("R1", "R2")
    }

    #[test]
    fn test_outputs_stay_in_step() {
        let source = "#include \"resource.h\"\n\
                      app_icon IDI_MAIN \"main\"\n\
                      \n\
                      bitmap_icon_scaled IDI_PLANE \"glider\"\n\
                      sound IDS_BEEP \"beep\"\n";
        let (script, header, outcome) =
            transpile_str(source, &roots(), TranspileOptions::default()).unwrap();

        assert_eq!(outcome.lines, 5);
        assert_eq!(outcome.declarations, 3);
        assert_eq!(outcome.script_entries, 5);
        assert_eq!(outcome.allocations.len(), 5);

        // Every script entry has a MAKE_RESOURCE line with the same symbol.
        let script_symbols: Vec<&str> = script
            .lines()
            .filter(|l| l.contains("DISCARDABLE"))
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        let header_symbols: Vec<&str> = outcome.allocations.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(script_symbols, header_symbols);

        assert!(header.contains("MAKE_RESOURCE(IDS_BEEP,beep,104);"));
        assert!(script.starts_with("#include \"resource.h\"\n"));
        assert!(header.starts_with("// Create Make Resources:\n#include \"resource.h\"\n"));
    }

    #[test]
    fn test_ids_strictly_increase() {
        let source = "bitmap_bitmap IDB_A \"a\"\nbitmap_icon_scaled IDI_B \"b\"\nhatch_bitmap IDB_C \"c\"";
        let (_, _, outcome) = transpile_str(source, &roots(), TranspileOptions::default()).unwrap();

        let ids: Vec<u32> = outcome.allocations.iter().map(|a| a.id).collect();
        assert_eq!(ids, [100, 101, 102, 103, 104]);
    }

    #[test]
    fn test_rerun_is_stable() {
        let source = "bitmap_graphic IDB_A \"a\"\nsound IDS_B \"b\"";
        let first = transpile_str(source, &roots(), TranspileOptions::default()).unwrap();
        let second = transpile_str(source, &roots(), TranspileOptions::default()).unwrap();
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn test_custom_options() {
        let options = TranspileOptions {
            first_id: 9000,
            banner: "// resources".to_string(),
            type_keyword: TypeKeyword::Group,
        };
        let (script, header, _) =
            transpile_str("bitmap_bitmap IDB_A \"a\"", &roots(), options).unwrap();

        assert_eq!(header, "// resources\nMAKE_RESOURCE(IDB_A,a,9000);\n");
        assert!(script.contains(" BITMAP_BITMAP DISCARDABLE   \"R1/bitmaps/a.bmp\""));
    }

    #[test]
    fn test_context_counter_continues() {
        let table = RuleTable::new(&roots()).unwrap();
        let mut ctx = TranspilerContext::new(
            table,
            Vec::new(),
            Vec::new(),
            TranspileOptions::default(),
        );
        ctx.run("sound IDS_A \"a\"").unwrap();
        assert_eq!(ctx.next_id(), Some(101));
    }

    #[test]
    fn test_first_id_at_max() {
        let options = TranspileOptions {
            first_id: u32::MAX,
            ..TranspileOptions::default()
        };

        let (_, header, _) =
            transpile_str("sound IDS_A \"a\"", &roots(), options.clone()).unwrap();
        assert!(header.contains("MAKE_RESOURCE(IDS_A,a,4294967295);"));

        let err = transpile_str("sound IDS_A \"a\"\nsound IDS_B \"b\"", &roots(), options)
            .unwrap_err();
        assert!(matches!(
            err,
            ResError::IdOverflow {
                first_id: u32::MAX,
                entries: 2
            }
        ));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_overflow_writes_nothing() {
        let table = RuleTable::new(&roots()).unwrap();
        let options = TranspileOptions {
            first_id: u32::MAX - 1,
            ..TranspileOptions::default()
        };
        let mut ctx = TranspilerContext::new(table, Vec::new(), Vec::new(), options);

        assert!(ctx.run("bitmap_icon_scaled IDI_A \"a\"").is_err());
        let (script, header) = ctx.into_sinks();
        assert!(script.is_empty());
        assert!(header.is_empty());
    }

    #[test]
    fn test_malformed_collected_not_fatal() {
        let (script, header, outcome) = transpile_str(
            "sound IDS_A\nsound IDS_B \"b\"",
            &roots(),
            TranspileOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.diagnostics.error_count(), 1);
        assert!(script.starts_with('\n'));
        assert_eq!(header, "// Create Make Resources:\nMAKE_RESOURCE(IDS_B,b,100);\n");
    }
}
