//! Resource-script emitter.

use std::io::{self, Write};

use crate::config::TypeKeyword;
use crate::parser::{ClassifiedLine, LineClass};

use super::{expand, GeneratedEntry};

const SYMBOL_WIDTH: usize = 30;
const TYPE_WIDTH: usize = 12;

/// Format one resource-script line.
///
/// Column widths are cosmetic; resource compilers ignore the spacing. A type
/// keyword as wide as its column still gets one separating space.
pub fn script_line(entry: &GeneratedEntry, keyword: TypeKeyword) -> String {
    let type_name = match keyword {
        TypeKeyword::Compiler => &entry.compiler_type,
        TypeKeyword::Group => &entry.symbol_group,
    };
    let type_width = TYPE_WIDTH.max(type_name.len() + 1);
    format!(
        "{:SYMBOL_WIDTH$} {:type_width$}DISCARDABLE   \"{}\"",
        entry.symbol, type_name, entry.asset_path
    )
}

/// Write the resource script for the classified lines.
///
/// Every line that is neither a directive nor a declaration becomes one
/// empty line, so the script never has fewer lines than the input.
/// Returns the number of entries written.
pub fn write_script<W: Write>(
    out: &mut W,
    lines: &[ClassifiedLine],
    keyword: TypeKeyword,
) -> io::Result<usize> {
    let mut entries = 0;

    for line in lines {
        match &line.class {
            LineClass::Directive(text) => writeln!(out, "{}", text)?,
            LineClass::Declaration { rule, decl } => {
                for entry in expand(rule, decl) {
                    writeln!(out, "{}", script_line(&entry, keyword))?;
                    entries += 1;
                }
            }
            LineClass::Blank | LineClass::Malformed { .. } | LineClass::Unrecognized(_) => {
                writeln!(out)?
            }
        }
    }

    Ok(entries)
}
