//! Types produced by line classification.

use crate::rules::DeclarationRule;

/// A declaration's operands: `<prefix> <symbol> "<file>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationLine {
    /// Symbolic resource name (second token).
    pub symbol: String,
    /// Bare file name with quotes stripped (third token).
    pub file: String,
    /// Tokens after the file name, ignored by the emitters.
    pub extra_tokens: Vec<String>,
}

/// Classification of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Empty after trimming.
    Blank,
    /// Comment, include, identifier reference or conditional; the trimmed text.
    Directive(String),
    /// A well-formed declaration for `rule`.
    Declaration {
        rule: DeclarationRule,
        decl: DeclarationLine,
    },
    /// Starts with a rule prefix but lacks its operands.
    Malformed {
        rule: DeclarationRule,
        reason: String,
    },
    /// Matches nothing; the trimmed text.
    Unrecognized(String),
}

impl LineClass {
    pub fn is_declaration(&self) -> bool {
        matches!(self, LineClass::Declaration { .. })
    }
}

/// A classified line with its 1-indexed line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub number: usize,
    pub class: LineClass,
}
