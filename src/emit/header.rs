//! Header/definition emitter.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::parser::{ClassifiedLine, LineClass};

use super::{aggregate_define, expand, IdentifierCounter};

/// First line of every generated header.
pub const DEFAULT_BANNER: &str = "// Create Make Resources:";

/// An identifier assigned to one generated entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub symbol: String,
    pub id: u32,
    pub file: String,
    pub path: String,
    /// Input line the entry came from.
    pub line: usize,
}

/// Write the header for the classified lines.
///
/// Each generated entry takes the next identifier from `counter`; the `_ALL`
/// define of a scaled icon takes none. Lines that are neither directives nor
/// declarations produce nothing. Running out of identifiers is an error,
/// not a wrap back to zero.
pub fn write_header<W: Write>(
    out: &mut W,
    lines: &[ClassifiedLine],
    banner: &str,
    counter: &mut IdentifierCounter,
) -> Result<Vec<Allocation>> {
    let mut allocations = Vec::new();

    writeln!(out, "{}", banner)?;

    for line in lines {
        match &line.class {
            LineClass::Directive(text) => writeln!(out, "{}", text)?,
            LineClass::Declaration { rule, decl } => {
                for entry in expand(rule, decl) {
                    let id = counter.next_id()?;
                    writeln!(out, "MAKE_RESOURCE({},{},{});", entry.symbol, entry.file, id)?;
                    allocations.push(Allocation {
                        symbol: entry.symbol,
                        id,
                        file: entry.file,
                        path: entry.asset_path,
                        line: line.number,
                    });
                }
                if rule.kind.is_scaled() {
                    writeln!(out, "{}", aggregate_define(&decl.symbol))?;
                }
            }
            LineClass::Blank | LineClass::Malformed { .. } | LineClass::Unrecognized(_) => {}
        }
    }

    Ok(allocations)
}
