//! # labdown
//!
//! Renders a parsed codelab document tree into the markdown dialects consumed
//! by lab publishing platforms.
//!
//! ## Features
//!
//! - Two output dialects from one engine: codelab markdown (`md`) and
//!   Qwiklabs markdown (`qwiklabs`)
//! - Per-node environment filtering (`web`, `print`, ...)
//! - Tables whose cells hold block content fall back to inline HTML
//! - Streams into any [`std::io::Write`]; the first sink error aborts the render
//!
//! ## Quick Start
//!
//! ```
//! use labdown::nodes::{Code, Header, ItemsList, Node};
//! use labdown::{Dialect, RenderOptions, render_to_string};
//!
//! let doc = vec![
//!     Header::new(1, vec![Node::text("Setup")]).into(),
//!     ItemsList::ordered(1, vec![
//!         vec![Node::text("Open a terminal")],
//!         vec![Node::text("Run the script")],
//!     ])
//!     .into(),
//!     Code::terminal("./setup.sh").into(),
//! ];
//!
//! let md = render_to_string(&RenderOptions::new(Dialect::Qwiklabs), &doc)?;
//! assert!(md.starts_with("## Setup\n"));
//! assert!(md.contains("1. Open a terminal\n2. Run the script\n"));
//! assert!(md.contains("<ql-code-block bash templated noWrap>\n./setup.sh\n</ql-code-block>"));
//! # Ok::<(), labdown::Error>(())
//! ```
//!
//! ## Documents as JSON
//!
//! With the `serde` feature, [`nodes::Node`] deserializes from the tagged
//! JSON form read by the `labdown` binary:
//!
//! ```json
//! [{"type": "header", "level": 1, "content": [{"type": "text", "value": "Setup"}]}]
//! ```

pub mod env;
pub mod error;
pub mod html;
pub mod markdown;
pub mod nodes;
mod options;

pub use error::{Error, Result};
pub use markdown::{Dialect, render, render_to_string};
pub use options::{DEFAULT_MAX_DEPTH, RenderOptions};
