//! Document node types.

use crate::env::EnvSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One element of a codelab document tree.
///
/// The variant lives in [`kind`](Node::kind); the environment tags and the
/// optional block override are common to every variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: NodeKind,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "EnvSet::is_empty")
    )]
    envs: EnvSet,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    block: Option<bool>,
}

/// Closed set of node variants.
///
/// Design principle: one variant per construct the authoring format can
/// express. Renderers match on this exhaustively, so adding a variant is a
/// compile error until every renderer handles it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum NodeKind {
    Text(Text),
    Image(Image),
    Url(Url),
    Button(Button),
    Code(Code),
    List(List),
    ItemsList(ItemsList),
    Grid(Grid),
    Infobox(Infobox),
    Survey(Survey),
    Header(Header),
    #[cfg_attr(feature = "serde", serde(rename = "youtube"))]
    YouTube(YouTube),
    Import(Import),
    /// A kind this crate does not know (e.g. produced by a newer parser).
    /// Renders as nothing.
    #[cfg_attr(feature = "serde", serde(other))]
    Unsupported,
}

/// Run of text with inline styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Text {
    pub value: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
    pub title: Option<String>,
    pub width: Option<f32>,
}

/// Hyperlink. An empty `url` makes this a plain wrapper around its content.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Url {
    pub url: String,
    pub target: Option<String>,
    pub content: Vec<Node>,
}

/// Button marker. As the first child of a [`Url`] it turns the link into a
/// button; on its own it renders its content.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Button {
    pub content: Vec<Node>,
}

/// Source listing (`term == false`) or console session (`term == true`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Code {
    pub value: String,
    pub lang: String,
    pub term: bool,
}

/// Paragraph-like group of inline nodes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct List {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ListType {
    Ordered,
    #[default]
    Unordered,
}

/// Bulleted or numbered list. Each item is its own node sequence.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ItemsList {
    pub list_type: ListType,
    pub start: usize,
    pub items: Vec<Vec<Node>>,
}

/// Table. Rows may have different lengths; row 0 is the header row.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Grid {
    pub rows: Vec<Vec<GridCell>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GridCell {
    pub content: Vec<Node>,
    pub colspan: usize,
    pub rowspan: usize,
}

impl Default for GridCell {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            colspan: 1,
            rowspan: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum InfoboxKind {
    #[default]
    Positive,
    Negative,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Infobox {
    pub kind: InfoboxKind,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Survey {
    pub id: String,
    pub groups: Vec<SurveyGroup>,
}

/// One question of a survey.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SurveyGroup {
    pub name: String,
    pub options: Vec<String>,
}

/// Section header. Level 0 is the top level.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Header {
    pub level: usize,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct YouTube {
    pub video_id: String,
}

/// Content pulled in from another document.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Import {
    pub url: String,
    pub title: Option<String>,
    pub content: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            envs: EnvSet::default(),
            block: None,
        }
    }

    /// Shorthand for an unstyled text node.
    pub fn text(value: impl Into<String>) -> Self {
        Text::new(value).into()
    }

    /// Restrict this node to the given environments.
    pub fn with_envs<I, S>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.envs = EnvSet::new(envs);
        self
    }

    /// Override the variant's default block behavior.
    pub fn with_block(mut self, block: bool) -> Self {
        self.block = Some(block);
        self
    }

    pub fn envs(&self) -> &EnvSet {
        &self.envs
    }

    /// Whether this node must be separated from its surroundings by a blank
    /// line.
    pub fn is_block(&self) -> bool {
        self.block.unwrap_or_else(|| self.kind.is_block_by_default())
    }

    /// Whether this node would contribute no content.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            NodeKind::Text(t) => t.value.trim().is_empty(),
            NodeKind::Image(i) => i.src.is_empty(),
            NodeKind::Url(u) => all_empty(&u.content),
            NodeKind::Button(b) => all_empty(&b.content),
            NodeKind::Code(c) => c.is_empty(),
            NodeKind::List(l) => all_empty(&l.nodes),
            NodeKind::ItemsList(l) => l.items.iter().all(|item| all_empty(item)),
            NodeKind::Grid(g) => g.is_empty(),
            NodeKind::Infobox(i) => all_empty(&i.content),
            NodeKind::Survey(s) => s.groups.is_empty(),
            NodeKind::Header(h) => all_empty(&h.content),
            NodeKind::YouTube(y) => y.video_id.is_empty(),
            NodeKind::Import(i) => all_empty(&i.content),
            NodeKind::Unsupported => true,
        }
    }
}

impl NodeKind {
    fn is_block_by_default(&self) -> bool {
        matches!(
            self,
            NodeKind::Code(_)
                | NodeKind::List(_)
                | NodeKind::ItemsList(_)
                | NodeKind::Grid(_)
                | NodeKind::Infobox(_)
                | NodeKind::Survey(_)
                | NodeKind::Header(_)
                | NodeKind::YouTube(_)
                | NodeKind::Import(_)
        )
    }
}

/// True when every node in `nodes` is empty (vacuously true for no nodes).
pub fn all_empty(nodes: &[Node]) -> bool {
    nodes.iter().all(Node::is_empty)
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn code(mut self) -> Self {
        self.code = true;
        self
    }
}

impl Image {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }
}

impl Url {
    pub fn new(url: impl Into<String>, content: Vec<Node>) -> Self {
        Self {
            url: url.into(),
            target: None,
            content,
        }
    }

    /// Whether the first child is a [`Button`] marker.
    pub fn is_button(&self) -> bool {
        matches!(
            self.content.first().map(|n| &n.kind),
            Some(NodeKind::Button(_))
        )
    }
}

impl Code {
    /// A source listing in `lang`.
    pub fn source(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lang: lang.into(),
            term: false,
        }
    }

    /// A console session.
    pub fn terminal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lang: String::new(),
            term: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl ItemsList {
    pub fn unordered(items: Vec<Vec<Node>>) -> Self {
        Self {
            list_type: ListType::Unordered,
            start: 0,
            items,
        }
    }

    pub fn ordered(start: usize, items: Vec<Vec<Node>>) -> Self {
        Self {
            list_type: ListType::Ordered,
            start,
            items,
        }
    }

    /// The marker preceding item `index` (0-based): `"{index + start}. "`
    /// for ordered lists with a positive start, `"* "` otherwise.
    pub fn marker(&self, index: usize) -> String {
        if self.list_type == ListType::Ordered && self.start > 0 {
            format!("{}. ", index.saturating_add(self.start))
        } else {
            "* ".to_string()
        }
    }
}

impl Grid {
    pub fn new(rows: Vec<Vec<GridCell>>) -> Self {
        Self { rows }
    }

    /// Number of cells in the widest row.
    pub fn max_cols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .flatten()
            .all(|cell| all_empty(&cell.content))
    }
}

impl GridCell {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }
}

impl Infobox {
    pub fn new(kind: InfoboxKind, content: Vec<Node>) -> Self {
        Self { kind, content }
    }
}

impl SurveyGroup {
    pub fn new<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

impl Header {
    pub fn new(level: usize, content: Vec<Node>) -> Self {
        Self { level, content }
    }

    /// Rendered heading depth: `level + 1`, clamped to the six levels markdown
    /// and HTML support.
    pub fn hashes(&self) -> usize {
        self.level.saturating_add(1).min(6)
    }
}

impl YouTube {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
        }
    }
}

impl Import {
    pub fn new(url: impl Into<String>, content: Vec<Node>) -> Self {
        Self {
            url: url.into(),
            title: None,
            content,
        }
    }

    /// Display name: the title, or the source url when untitled.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.url,
        }
    }
}

macro_rules! impl_into_node {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for NodeKind {
                fn from(value: $variant) -> Self {
                    NodeKind::$variant(value)
                }
            }

            impl From<$variant> for Node {
                fn from(value: $variant) -> Self {
                    Node::new(NodeKind::$variant(value))
                }
            }
        )*
    };
}

impl_into_node!(
    Text, Image, Url, Button, Code, List, ItemsList, Grid, Infobox, Survey, Header, YouTube,
    Import,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_defaults() {
        assert!(!Node::text("a").is_block());
        assert!(Node::from(Code::terminal("ls")).is_block());
        assert!(Node::from(Header::new(0, vec![])).is_block());
        assert!(!Node::from(Image::new("a.png")).is_block());
    }

    #[test]
    fn test_block_override() {
        let list = Node::from(List::default()).with_block(false);
        assert!(!list.is_block());
        let text = Node::text("a").with_block(true);
        assert!(text.is_block());
    }

    #[test]
    fn test_emptiness() {
        assert!(Node::text("  \n ").is_empty());
        assert!(!Node::text(" a ").is_empty());
        assert!(Node::from(Code::terminal("")).is_empty());
        assert!(Node::from(Grid::new(vec![vec![GridCell::new(vec![Node::text(" ")])]])).is_empty());
        assert!(!Node::from(Grid::new(vec![vec![], vec![GridCell::new(vec![Node::text("x")])]])).is_empty());
        assert!(Node::new(NodeKind::Unsupported).is_empty());
    }

    #[test]
    fn test_items_list_marker() {
        let ordered = ItemsList::ordered(3, vec![]);
        assert_eq!(ordered.marker(0), "3. ");
        assert_eq!(ordered.marker(1), "4. ");
        assert_eq!(ItemsList::ordered(0, vec![]).marker(2), "* ");
        assert_eq!(ItemsList::unordered(vec![]).marker(0), "* ");
    }

    #[test]
    fn test_items_list_marker_saturates() {
        let list = ItemsList::ordered(usize::MAX, vec![]);
        assert_eq!(list.marker(0), format!("{}. ", usize::MAX));
        assert_eq!(list.marker(1), format!("{}. ", usize::MAX));
    }

    #[test]
    fn test_header_hashes_are_clamped() {
        assert_eq!(Header::new(0, vec![]).hashes(), 1);
        assert_eq!(Header::new(5, vec![]).hashes(), 6);
        assert_eq!(Header::new(1_000_000_000, vec![]).hashes(), 6);
        assert_eq!(Header::new(usize::MAX, vec![]).hashes(), 6);
    }

    #[test]
    fn test_grid_max_cols() {
        let grid = Grid::new(vec![
            vec![GridCell::default(), GridCell::default()],
            vec![GridCell::default(), GridCell::default(), GridCell::default()],
            vec![],
        ]);
        assert_eq!(grid.max_cols(), 3);
        assert_eq!(Grid::default().max_cols(), 0);
    }

    #[test]
    fn test_url_button_lookahead() {
        let button = Url::new("https://x", vec![Button { content: vec![Node::text("Go")] }.into()]);
        assert!(button.is_button());
        assert!(!Url::new("https://x", vec![Node::text("Go")]).is_button());
        assert!(!Url::new("https://x", vec![]).is_button());
    }

    #[test]
    fn test_import_title_fallback() {
        let mut import = Import::new("https://docs/abc", vec![]);
        assert_eq!(import.display_title(), "https://docs/abc");
        import.title = Some("Setup".into());
        assert_eq!(import.display_title(), "Setup");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_deserialize_sorts_envs_and_keeps_unknown_kinds() {
        let json = r#"[
            {"type": "text", "value": "hi", "bold": true, "envs": ["web", "arcade"]},
            {"type": "hologram", "payload": 1},
            {"type": "items_list", "list_type": "ordered", "start": 2,
             "items": [[{"type": "text", "value": "a"}]]}
        ]"#;
        let nodes: Vec<Node> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].envs().iter().collect::<Vec<_>>(), vec!["arcade", "web"]);
        assert!(matches!(&nodes[0].kind, NodeKind::Text(t) if t.bold && t.value == "hi"));
        assert_eq!(nodes[1].kind, NodeKind::Unsupported);
        assert!(matches!(&nodes[2].kind, NodeKind::ItemsList(l) if l.start == 2));
    }
}
