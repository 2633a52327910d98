//! Individual checks over classified input lines.

use std::collections::HashMap;

use crate::emit::expand;
use crate::parser::{ClassifiedLine, LineClass};

use super::warning::{Diagnostic, DiagnosticList};

pub const MALFORMED: &str = "restool::malformed";
pub const UNRECOGNIZED: &str = "restool::unrecognized";
pub const DUPLICATE_SYMBOL: &str = "restool::duplicate-symbol";
pub const TRAILING_TOKENS: &str = "restool::trailing-tokens";

/// Declarations that matched a prefix but could not be parsed.
pub fn check_malformed(lines: &[ClassifiedLine]) -> DiagnosticList {
    let mut result = DiagnosticList::new();

    for line in lines {
        if let LineClass::Malformed { rule, reason } = &line.class {
            result.push(
                Diagnostic::error(MALFORMED, format!("{} declaration: {}", rule.kind, reason))
                    .at_line(line.number)
                    .with_help(format!("Expected: {}<SYMBOL> \"<file>\"", rule.line_prefix)),
            );
        }
    }

    result
}

/// Non-blank lines that are neither directives nor declarations.
pub fn check_unrecognized(lines: &[ClassifiedLine]) -> DiagnosticList {
    let mut result = DiagnosticList::new();

    for line in lines {
        if let LineClass::Unrecognized(text) = &line.class {
            result.push(
                Diagnostic::warning(UNRECOGNIZED, format!("unrecognized line '{}'", text))
                    .at_line(line.number),
            );
        }
    }

    result
}

/// Position inside nested `#if` blocks, outermost first: (block, branch).
type Branches = Vec<(usize, usize)>;

/// Tracks which `#if`/`#elif`/`#else` branch each line sits in.
#[derive(Debug, Default)]
struct ConditionalScope {
    open: Branches,
    blocks: usize,
}

impl ConditionalScope {
    fn directive(&mut self, text: &str) {
        if text.starts_with("#if") {
            self.blocks += 1;
            self.open.push((self.blocks, 0));
        } else if text.starts_with("#elif") || text.starts_with("#else") {
            if let Some((_, branch)) = self.open.last_mut() {
                *branch += 1;
            }
        } else if text.starts_with("#endif") {
            self.open.pop();
        }
    }
}

/// True when the two positions are in different branches of the same block,
/// so the preprocessor never keeps both.
fn exclusive(a: &Branches, b: &Branches) -> bool {
    a.iter()
        .zip(b)
        .take_while(|(x, y)| x.0 == y.0)
        .any(|(x, y)| x.1 != y.1)
}

/// Final symbol names (after variant expansion) declared more than once.
///
/// Declarations in alternative branches of one conditional block
/// (`#ifdef A` ... `#else` ...) do not clash.
pub fn check_duplicate_symbols(lines: &[ClassifiedLine]) -> DiagnosticList {
    let mut result = DiagnosticList::new();
    let mut seen: HashMap<String, Vec<(usize, Branches)>> = HashMap::new();
    let mut scope = ConditionalScope::default();

    for line in lines {
        let (rule, decl) = match &line.class {
            LineClass::Directive(text) => {
                scope.directive(text);
                continue;
            }
            LineClass::Declaration { rule, decl } => (rule, decl),
            _ => continue,
        };

        let mut symbols: Vec<String> = expand(rule, decl).into_iter().map(|e| e.symbol).collect();
        if rule.kind.is_scaled() {
            symbols.push(format!("{}_ALL", decl.symbol));
        }

        for symbol in symbols {
            let earlier = seen.entry(symbol.clone()).or_default();
            let clash = earlier
                .iter()
                .find(|(_, branches)| !exclusive(branches, &scope.open))
                .map(|(number, _)| *number);

            match clash {
                Some(first) => result.push(
                    Diagnostic::error(
                        DUPLICATE_SYMBOL,
                        format!("symbol '{}' already declared on line {}", symbol, first),
                    )
                    .at_line(line.number),
                ),
                None => earlier.push((line.number, scope.open.clone())),
            }
        }
    }

    result
}

/// Tokens after the file name, which the emitters ignore.
pub fn check_trailing_tokens(lines: &[ClassifiedLine]) -> DiagnosticList {
    let mut result = DiagnosticList::new();

    for line in lines {
        if let LineClass::Declaration { decl, .. } = &line.class {
            if !decl.extra_tokens.is_empty() {
                result.push(
                    Diagnostic::warning(
                        TRAILING_TOKENS,
                        format!("ignored trailing text '{}'", decl.extra_tokens.join(" ")),
                    )
                    .at_line(line.number),
                );
            }
        }
    }

    result
}
