//! Declaration rules for resource kinds.
//!
//! Each rule maps a literal line prefix to the resource-script keywords and
//! the asset directory its files live under. The table is closed: a new kind
//! is one more row here, plus a fan-out branch in `emit` if it needs one.

use std::fmt;

use crate::error::{ResError, Result};

/// The kind of resource a declaration line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    ScaledIcon,
    Bitmap,
    Graphic,
    Hatch,
    Sound,
    AppIcon,
}

/// Which of the two externally supplied roots a rule's assets live under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootSlot {
    Primary,
    Secondary,
}

impl RuleKind {
    /// All kinds, in matching order.
    pub const ALL: [RuleKind; 6] = [
        RuleKind::ScaledIcon,
        RuleKind::Bitmap,
        RuleKind::Graphic,
        RuleKind::Hatch,
        RuleKind::Sound,
        RuleKind::AppIcon,
    ];

    /// Literal prefix matched at the start of a trimmed line.
    ///
    /// The trailing space is part of the prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            RuleKind::ScaledIcon => "bitmap_icon_scaled ",
            RuleKind::Bitmap => "bitmap_bitmap ",
            RuleKind::Graphic => "bitmap_graphic ",
            RuleKind::Hatch => "hatch_bitmap ",
            RuleKind::Sound => "sound ",
            RuleKind::AppIcon => "app_icon ",
        }
    }

    /// Resource-script group keyword.
    pub fn symbol_group(&self) -> &'static str {
        match self {
            RuleKind::ScaledIcon => "BITMAP_ICON",
            RuleKind::Bitmap => "BITMAP_BITMAP",
            RuleKind::Graphic => "BITMAP_GRAPHIC",
            RuleKind::Hatch => "HATCH_BITMAP",
            RuleKind::Sound => "SOUND",
            RuleKind::AppIcon => "ICON_ICON",
        }
    }

    /// Native resource compiler type keyword.
    pub fn compiler_type(&self) -> &'static str {
        match self {
            RuleKind::Sound => "WAVE",
            RuleKind::AppIcon => "ICON",
            _ => "BITMAP",
        }
    }

    fn directory(&self) -> (RootSlot, &'static str) {
        match self {
            RuleKind::ScaledIcon => (RootSlot::Secondary, "icons"),
            RuleKind::Bitmap => (RootSlot::Primary, "bitmaps"),
            RuleKind::Graphic => (RootSlot::Secondary, "graphics"),
            RuleKind::Hatch => (RootSlot::Primary, "bitmaps"),
            RuleKind::Sound => (RootSlot::Primary, "sound"),
            RuleKind::AppIcon => (RootSlot::Primary, "bitmaps"),
        }
    }

    /// File extension appended to the bare file name.
    pub fn extension(&self) -> &'static str {
        match self {
            RuleKind::Sound => "wav",
            RuleKind::AppIcon => "ico",
            _ => "bmp",
        }
    }

    /// Whether one declaration expands into several density variants.
    pub fn is_scaled(&self) -> bool {
        matches!(self, RuleKind::ScaledIcon)
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.prefix().trim_end()
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One recognized resource kind, resolved against the run's root paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationRule {
    pub kind: RuleKind,
    pub line_prefix: String,
    pub symbol_group: String,
    pub compiler_type: String,
    pub base_path: String,
    pub extension: String,
}

impl DeclarationRule {
    fn new(kind: RuleKind, roots: &Roots) -> Self {
        let (slot, dir) = kind.directory();
        let root = match slot {
            RootSlot::Primary => &roots.primary,
            RootSlot::Secondary => &roots.secondary,
        };

        Self {
            kind,
            line_prefix: kind.prefix().to_string(),
            symbol_group: kind.symbol_group().to_string(),
            compiler_type: kind.compiler_type().to_string(),
            base_path: format!("{}/{}", root, dir),
            extension: kind.extension().to_string(),
        }
    }

    /// Full asset path for a bare file name (suffix already applied).
    pub fn asset_path(&self, file: &str) -> String {
        format!("{}/{}.{}", self.base_path, file, self.extension)
    }
}

/// The two root paths substituted into rule base paths.
///
/// Kept as strings: they are written into the resource script verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    /// Root for bitmaps, hatches, sounds and the application icon.
    pub primary: String,
    /// Root for scaled icons and graphics.
    pub secondary: String,
}

impl Roots {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

/// Immutable, ordered table of declaration rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<DeclarationRule>,
}

impl RuleTable {
    /// Build the standard table for the given roots.
    pub fn new(roots: &Roots) -> Result<Self> {
        Self::from_rules(
            RuleKind::ALL
                .iter()
                .map(|&kind| DeclarationRule::new(kind, roots))
                .collect(),
        )
    }

    /// Build a table from explicit rules, rejecting overlapping prefixes.
    ///
    /// No prefix may be a prefix of another, so matching order never
    /// decides which rule a line belongs to.
    pub fn from_rules(rules: Vec<DeclarationRule>) -> Result<Self> {
        for (i, a) in rules.iter().enumerate() {
            if a.line_prefix.is_empty() {
                return Err(ResError::RuleTable {
                    message: format!("rule '{}' has an empty prefix", a.kind),
                });
            }
            for b in rules.iter().skip(i + 1) {
                if a.line_prefix.starts_with(&b.line_prefix)
                    || b.line_prefix.starts_with(&a.line_prefix)
                {
                    return Err(ResError::RuleTable {
                        message: format!(
                            "prefixes '{}' and '{}' overlap",
                            a.line_prefix, b.line_prefix
                        ),
                    });
                }
            }
        }
        Ok(Self { rules })
    }

    /// First rule whose prefix starts the (already trimmed) line.
    pub fn find(&self, line: &str) -> Option<&DeclarationRule> {
        self.rules.iter().find(|r| line.starts_with(&r.line_prefix))
    }

    pub fn get(&self, kind: RuleKind) -> Option<&DeclarationRule> {
        self.rules.iter().find(|r| r.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclarationRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
