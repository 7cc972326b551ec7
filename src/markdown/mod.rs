//! Node tree → lab markdown.
//!
//! - `dialect`: the dialect ids and their static [`DialectConfig`] tables
//! - `escape`: pure string transformations (HTML, link destinations, fences)
//! - [`writer`]: the line-tracking output sink
//! - `render`: the traversal engine shared by every dialect
//!
//! ## Design Notes
//!
//! - **Append-only output**: rendering never looks back at bytes already
//!   written. Block separation is decided by whether the writer sits at a line
//!   start, not by inspecting a buffer.
//! - **Dialects as data**: tag vocabulary, escaping, edge trimming and the
//!   paragraph heuristics live in [`DialectConfig`]. Adding a dialect is a new
//!   table, not a new traversal.
//! - **Table cells**: a cell must fit on its row. Content is rendered once as
//!   markdown; if that produced a newline the cell falls back to inline HTML
//!   (see [`crate::html`]).

mod dialect;
mod escape;
mod render;
pub mod writer;

pub use dialect::{BoundaryRule, Dialect, DialectConfig, ImportStyle, TagPair, UnknownDialect};
pub use escape::{
    base_name, calculate_fence_length, escape_angle_brackets, escape_html,
    escape_link_destination, quote_attr, replace_double_curly_brackets,
};
pub use render::{render, render_to_string};
pub use writer::LineWriter;
