//! Output dialects and their configuration.
//!
//! Both dialects share one traversal engine; everything that differs between
//! them is data in a [`DialectConfig`]. Rendering rules consult the config and
//! never branch on the [`Dialect`] id itself.

use std::fmt;
use std::str::FromStr;

use crate::nodes::InfoboxKind;

/// Target markdown dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Dialect {
    /// Codelab markdown: HTML `<strong>` bold, raw angle brackets, imports
    /// flattened in place.
    #[cfg_attr(feature = "cli", value(name = "md"))]
    Markdown,
    /// Qwiklabs markdown: `**` bold, escaped angle brackets, imports kept as
    /// `[[import ...]]` references.
    #[default]
    Qwiklabs,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Markdown, Dialect::Qwiklabs];

    /// Static configuration for this dialect.
    pub fn config(self) -> &'static DialectConfig {
        match self {
            Dialect::Markdown => &MARKDOWN,
            Dialect::Qwiklabs => &QWIKLABS,
        }
    }

    pub fn name(self) -> &'static str {
        self.config().name
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect {0:?} (expected \"md\" or \"qwiklabs\")")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md" | "markdown" => Ok(Dialect::Markdown),
            "qwiklabs" | "qwiklabs_md" => Ok(Dialect::Qwiklabs),
            other => Err(UnknownDialect(other.to_string())),
        }
    }
}

/// Matching open/close markup. Keeping both halves in one value means a
/// region can only ever be closed with the tag it was opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPair {
    pub open: &'static str,
    pub close: &'static str,
}

impl TagPair {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }
}

/// Extra newlines forced around a text node whose trimmed core contains any
/// of `triggers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryRule {
    pub triggers: &'static [&'static str],
    /// Newlines written before the node's leading whitespace.
    pub before: usize,
    /// Newlines written after the closing style markers.
    pub after: usize,
}

impl BoundaryRule {
    pub fn matches(&self, core: &str) -> bool {
        self.triggers.iter().any(|t| core.contains(t))
    }
}

/// How an import node is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStyle {
    /// `[[import TITLE]]`, resolved later by the publishing platform.
    Reference,
    /// The imported content itself, followed by a newline.
    Inline,
}

/// Everything that differs between dialects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectConfig {
    pub name: &'static str,
    /// Whether `\n` counts as edge whitespace when splitting a text node.
    pub trim_newlines: bool,
    /// Escape `<` and `>` in text content. When off, custom tags embedded in
    /// text pass through untouched.
    pub escape_angle_brackets: bool,
    pub bold: TagPair,
    pub italic: TagPair,
    pub code: TagPair,
    pub boundary_rules: &'static [BoundaryRule],
    /// Wrapper for terminal code blocks.
    pub console_block: TagPair,
    /// If terminal code already contains any of these, it is emitted without
    /// the console wrapper.
    pub console_guards: &'static [&'static str],
    pub button: TagPair,
    pub infobox_positive: TagPair,
    pub infobox_negative: TagPair,
    /// Line prefix active while infobox content is written.
    pub infobox_prefix: &'static str,
    /// Write a newline before the first list item.
    pub list_leading_break: bool,
    /// Newlines written between the block break and a video embed.
    pub video_gap: usize,
    pub import_style: ImportStyle,
}

impl DialectConfig {
    pub fn infobox(&self, kind: InfoboxKind) -> TagPair {
        match kind {
            InfoboxKind::Positive => self.infobox_positive,
            InfoboxKind::Negative => self.infobox_negative,
        }
    }

    /// Characters trimmed from the edges of a text node.
    pub fn edge_whitespace(&self) -> &'static [char] {
        if self.trim_newlines {
            &[' ', '\t', '\n', '\r', '\x0c', '\x0b']
        } else {
            &[' ', '\t', '\r', '\x0c', '\x0b']
        }
    }

    /// Whether terminal code needs the console wrapper.
    pub fn needs_console_wrapper(&self, value: &str) -> bool {
        !self.console_guards.iter().any(|g| value.contains(g))
    }
}

const CONSOLE_BLOCK: TagPair = TagPair::new("<ql-code-block bash templated noWrap>", "</ql-code-block>");
const INFOBOX: TagPair = TagPair::new("<ql-infobox>", "</ql-infobox>");
const WARNINGBOX: TagPair = TagPair::new("<ql-warningbox>", "</ql-warningbox>");
const BUTTON: TagPair = TagPair::new("<button>", "</button>");
const ITALIC: TagPair = TagPair::new("*", "*");
const INLINE_CODE: TagPair = TagPair::new("`", "`");

static MARKDOWN: DialectConfig = DialectConfig {
    name: "md",
    trim_newlines: false,
    escape_angle_brackets: false,
    bold: TagPair::new("<strong>", "</strong>"),
    italic: ITALIC,
    code: INLINE_CODE,
    boundary_rules: &[
        BoundaryRule {
            triggers: &["\n\n"],
            before: 2,
            after: 0,
        },
        BoundaryRule {
            triggers: &["[["],
            before: 2,
            after: 0,
        },
        // Watermark lines: a break before each marker, one after the line.
        BoundaryRule {
            triggers: &["Last Updated"],
            before: 2,
            after: 0,
        },
        BoundaryRule {
            triggers: &["Last Tested"],
            before: 2,
            after: 0,
        },
        BoundaryRule {
            triggers: &["Last Updated", "Last Tested"],
            before: 0,
            after: 2,
        },
        BoundaryRule {
            triggers: &["\n"],
            before: 2,
            after: 0,
        },
        BoundaryRule {
            triggers: &["</ql-hint>"],
            before: 0,
            after: 2,
        },
        BoundaryRule {
            triggers: &["</ql-multiple-choice-probe>"],
            before: 0,
            after: 1,
        },
        BoundaryRule {
            triggers: &["]]"],
            before: 0,
            after: 2,
        },
    ],
    console_block: CONSOLE_BLOCK,
    console_guards: &["```", "ql-code-block"],
    button: BUTTON,
    infobox_positive: INFOBOX,
    infobox_negative: WARNINGBOX,
    infobox_prefix: "",
    list_leading_break: true,
    video_gap: 3,
    import_style: ImportStyle::Inline,
};

static QWIKLABS: DialectConfig = DialectConfig {
    name: "qwiklabs",
    trim_newlines: true,
    escape_angle_brackets: true,
    bold: TagPair::new("**", "**"),
    italic: ITALIC,
    code: INLINE_CODE,
    boundary_rules: &[
        BoundaryRule {
            triggers: &["</ql-hint>"],
            before: 0,
            after: 2,
        },
        BoundaryRule {
            triggers: &["</ql-multiple-choice-probe>"],
            before: 0,
            after: 2,
        },
    ],
    console_block: CONSOLE_BLOCK,
    console_guards: &["ql-code-block"],
    button: BUTTON,
    infobox_positive: INFOBOX,
    infobox_negative: WARNINGBOX,
    infobox_prefix: "",
    list_leading_break: false,
    video_gap: 1,
    import_style: ImportStyle::Reference,
};
