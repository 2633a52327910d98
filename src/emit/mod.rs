//! Output generation for resource scripts and identifier headers.
//!
//! Both emitters walk the same classified lines. A declaration expands into
//! one [`GeneratedEntry`] per variant; only the header emitter draws
//! identifiers from the [`IdentifierCounter`].

pub mod header;
pub mod script;

pub use header::{write_header, Allocation, DEFAULT_BANNER};
pub use script::{script_line, write_script};

use crate::error::{ResError, Result};
use crate::parser::{ClassifiedLine, DeclarationLine, LineClass};
use crate::rules::DeclarationRule;

/// Identifier handed out first when no other start is configured.
pub const FIRST_ID: u32 = 100;

/// Density variants of a scaled icon: (symbol suffix, file suffix).
pub const SCALED_VARIANTS: [(&str, &str); 3] = [("", "_96"), ("_HD", "_160"), ("_UHD", "_300")];

/// One output unit produced from a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEntry {
    /// Symbol with any variant suffix applied.
    pub symbol: String,
    /// Bare file name with any variant suffix applied.
    pub file: String,
    pub compiler_type: String,
    pub symbol_group: String,
    /// `<base>/<file>.<ext>`
    pub asset_path: String,
}

/// Expand a declaration into its generated entries.
///
/// Scaled icons give three entries in [`SCALED_VARIANTS`] order, all other
/// kinds exactly one.
pub fn expand(rule: &DeclarationRule, decl: &DeclarationLine) -> Vec<GeneratedEntry> {
    let entry = |symbol_suffix: &str, file_suffix: &str| {
        let file = format!("{}{}", decl.file, file_suffix);
        GeneratedEntry {
            symbol: format!("{}{}", decl.symbol, symbol_suffix),
            asset_path: rule.asset_path(&file),
            file,
            compiler_type: rule.compiler_type.clone(),
            symbol_group: rule.symbol_group.clone(),
        }
    };

    if rule.kind.is_scaled() {
        SCALED_VARIANTS
            .iter()
            .map(|(sym, file)| entry(sym, file))
            .collect()
    } else {
        vec![entry("", "")]
    }
}

/// Aggregate define emitted after a scaled icon's header entries.
pub fn aggregate_define(symbol: &str) -> String {
    let names: Vec<String> = SCALED_VARIANTS
        .iter()
        .map(|(suffix, _)| format!("{}{}", symbol, suffix))
        .collect();
    format!("#define {}_ALL {}", symbol, names.join(","))
}

/// Number of entries the header emitter writes for these lines.
pub fn entry_count(lines: &[ClassifiedLine]) -> usize {
    lines
        .iter()
        .map(|line| match &line.class {
            LineClass::Declaration { rule, .. } if rule.kind.is_scaled() => SCALED_VARIANTS.len(),
            LineClass::Declaration { .. } => 1,
            _ => 0,
        })
        .sum()
}

/// Monotonic identifier source for one run.
///
/// Never wraps: once `u32::MAX` has been handed out the counter is spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierCounter {
    first: u32,
    next: Option<u32>,
}

impl IdentifierCounter {
    pub fn new(first: u32) -> Self {
        Self {
            first,
            next: Some(first),
        }
    }

    /// Return the current identifier and advance.
    pub fn next_id(&mut self) -> Result<u32> {
        let id = self.next.ok_or_else(|| self.overflow(1))?;
        self.next = id.checked_add(1);
        Ok(id)
    }

    /// Fail unless `entries` more identifiers can be handed out.
    pub fn reserve(&self, entries: usize) -> Result<()> {
        if entries as u64 > self.remaining() {
            return Err(self.overflow(entries as u64));
        }
        Ok(())
    }

    /// Identifiers still available.
    pub fn remaining(&self) -> u64 {
        self.next.map_or(0, |next| u64::from(u32::MAX - next) + 1)
    }

    /// Identifier the next call to `next_id` returns, if any is left.
    pub fn peek(&self) -> Option<u32> {
        self.next
    }

    fn overflow(&self, wanted: u64) -> ResError {
        let issued = u64::from(u32::MAX - self.first) + 1 - self.remaining();
        ResError::IdOverflow {
            first_id: self.first,
            entries: issued + wanted,
        }
    }
}

impl Default for IdentifierCounter {
    fn default() -> Self {
        Self::new(FIRST_ID)
    }
}
