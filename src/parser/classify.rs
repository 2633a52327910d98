//! Line classification against the rule table.

use crate::rules::{DeclarationRule, RuleTable};

use super::types::{ClassifiedLine, DeclarationLine, LineClass};

/// Line starts passed through to both outputs unchanged.
///
/// `#if` also covers `#ifdef` and `#ifndef`.
pub const DIRECTIVE_MARKERS: [&str; 7] = ["//", "#include", "ID", "#if", "#else", "#elif", "#endif"];

/// Classify one raw input line.
///
/// Pure: the same line and table always give the same class.
pub fn classify_line(raw: &str, table: &RuleTable) -> LineClass {
    let line = raw.trim();

    if line.is_empty() {
        return LineClass::Blank;
    }

    if is_directive(line) {
        return LineClass::Directive(line.to_string());
    }

    match table.find(line) {
        Some(rule) => parse_declaration(line, rule),
        None => LineClass::Unrecognized(line.to_string()),
    }
}

/// Classify every line of a source text, numbering from 1.
pub fn classify_source(source: &str, table: &RuleTable) -> Vec<ClassifiedLine> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| ClassifiedLine {
            number: i + 1,
            class: classify_line(line, table),
        })
        .collect()
}

fn is_directive(line: &str) -> bool {
    DIRECTIVE_MARKERS.iter().any(|m| line.starts_with(m))
}

fn parse_declaration(line: &str, rule: &DeclarationRule) -> LineClass {
    // The first token is the prefix itself.
    let mut tokens = line.split_whitespace().skip(1);

    let Some(symbol) = tokens.next() else {
        return malformed(rule, "missing symbol name");
    };
    let Some(file_token) = tokens.next() else {
        return malformed(rule, format!("missing file name after '{}'", symbol));
    };

    let file = strip_quotes(file_token);
    if file.is_empty() {
        return malformed(rule, format!("empty file name for '{}'", symbol));
    }

    LineClass::Declaration {
        rule: rule.clone(),
        decl: DeclarationLine {
            symbol: symbol.to_string(),
            file,
            extra_tokens: tokens.map(str::to_string).collect(),
        },
    }
}

fn strip_quotes(token: &str) -> String {
    token.replace('"', "").trim().to_string()
}

fn malformed(rule: &DeclarationRule, reason: impl Into<String>) -> LineClass {
    LineClass::Malformed {
        rule: rule.clone(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Roots, RuleKind};

    fn table() -> RuleTable {
        RuleTable::new(&Roots::new("R1", "R2")).unwrap()
    }

    #[test]
    fn test_blank() {
        assert_eq!(classify_line("", &table()), LineClass::Blank);
        assert_eq!(classify_line("   \t ", &table()), LineClass::Blank);
    }

    #[test]
    fn test_directives() {
        let table = table();
        for line in [
            "#include \"resource.h\"",
            "#ifdef FOO",
            "#ifndef BAR",
            "#if defined(X)",
            "#else",
            "#elif Y",
            "#endif",
            "// a comment",
            "IDR_XML_INFOBOX RCDATA \"x.xml\"",
        ] {
            assert_eq!(
                classify_line(line, &table),
                LineClass::Directive(line.to_string()),
                "{}",
                line
            );
        }
    }

    #[test]
    fn test_directive_is_trimmed() {
        assert_eq!(
            classify_line("   #endif  \r", &table()),
            LineClass::Directive("#endif".to_string())
        );
    }

    #[test]
    fn test_declaration() {
        match classify_line("app_icon IDI_MAIN \"main\"", &table()) {
            LineClass::Declaration { rule, decl } => {
                assert_eq!(rule.kind, RuleKind::AppIcon);
                assert_eq!(decl.symbol, "IDI_MAIN");
                assert_eq!(decl.file, "main");
                assert!(decl.extra_tokens.is_empty());
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_declaration_with_extra_spacing() {
        match classify_line("  sound   IDS_BEEP    \"beep\"  ", &table()) {
            LineClass::Declaration { rule, decl } => {
                assert_eq!(rule.kind, RuleKind::Sound);
                assert_eq!(decl.symbol, "IDS_BEEP");
                assert_eq!(decl.file, "beep");
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_tokens_kept() {
        match classify_line("bitmap_bitmap IDB_A \"a\" trailing", &table()) {
            LineClass::Declaration { decl, .. } => {
                assert_eq!(decl.extra_tokens, vec!["trailing".to_string()]);
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_missing_file() {
        match classify_line("bitmap_graphic IDB_LOGO", &table()) {
            LineClass::Malformed { rule, reason } => {
                assert_eq!(rule.kind, RuleKind::Graphic);
                assert!(reason.contains("missing file name"));
            }
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_empty_file() {
        assert!(matches!(
            classify_line("hatch_bitmap IDB_HATCH \"\"", &table()),
            LineClass::Malformed { .. }
        ));
    }

    #[test]
    fn test_prefix_without_operands_is_unrecognized() {
        // Trimming removes the prefix's trailing space.
        assert_eq!(
            classify_line("sound ", &table()),
            LineClass::Unrecognized("sound".to_string())
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(
            classify_line("#define FOO 1", &table()),
            LineClass::Unrecognized("#define FOO 1".to_string())
        );
        assert_eq!(
            classify_line("bitmaps IDB_X \"x\"", &table()),
            LineClass::Unrecognized("bitmaps IDB_X \"x\"".to_string())
        );
    }

    #[test]
    fn test_classification_is_stable() {
        let table = table();
        let line = "bitmap_icon_scaled IDI_PLANE \"glider\"";
        assert_eq!(classify_line(line, &table), classify_line(line, &table));
    }

    #[test]
    fn test_classify_source_numbers_lines() {
        let lines = classify_source("#ifdef X\r\n\r\nsound IDS_A \"a\"\n", &table());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].class, LineClass::Blank);
        assert_eq!(lines[2].number, 3);
        assert!(lines[2].class.is_declaration());
    }
}
