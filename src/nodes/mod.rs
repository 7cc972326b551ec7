//! The codelab document tree consumed by the renderers.
//!
//! Trees are built once upstream (by a parser, by hand, or deserialized from
//! JSON with the `serde` feature) and are never mutated by rendering, so one
//! tree can be rendered concurrently for several dialects or environments.
//!
//! ```
//! use labdown::nodes::{Code, Header, Node, Text};
//!
//! let doc = vec![
//!     Header::new(0, vec![Node::text("Setup")]).into(),
//!     Node::from(Text::new("Run this:").bold()),
//!     Node::from(Code::terminal("gcloud init")).with_envs(["web"]),
//! ];
//! assert!(doc[2].envs().contains("web"));
//! ```

mod node;

pub use node::{
    Button, Code, Grid, GridCell, Header, Image, Import, Infobox, InfoboxKind, ItemsList,
    ListType, List, Node, NodeKind, Survey, SurveyGroup, Text, Url, YouTube, all_empty,
};
