//! Render configuration and the per-call traversal scope.

use crate::error::{Error, Result};
use crate::markdown::Dialect;

/// Default nesting limit. Real documents stay far below this; deeper trees
/// are treated as malformed input.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration for one render call.
///
/// ```
/// use labdown::{Dialect, RenderOptions};
///
/// let options = RenderOptions::new(Dialect::Markdown).with_env("web");
/// assert_eq!(options.env(), Some("web"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Active environment. `None` renders every node.
    pub env: Option<String>,
    pub dialect: Dialect,
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            env: None,
            dialect: Dialect::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn env(&self) -> Option<&str> {
        self.env.as_deref()
    }
}

/// Immutable traversal state, passed by value down the recursion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Scope {
    pub depth: usize,
    /// Inside an items list: nested content must not force paragraph breaks.
    pub in_list: bool,
    /// Inside a table cell: content must not end lines.
    pub in_table_cell: bool,
    /// Render block nodes as if they were inline.
    pub force_inline: bool,
}

impl Scope {
    /// Scope for the children of a node, failing past `limit` levels.
    pub fn descend(self, limit: usize) -> Result<Self> {
        if self.depth >= limit {
            return Err(Error::TooDeep { limit });
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self
        })
    }

    pub fn in_list(self) -> Self {
        Self {
            in_list: true,
            ..self
        }
    }

    pub fn in_table_cell(self) -> Self {
        Self {
            in_table_cell: true,
            ..self
        }
    }

    pub fn force_inline(self) -> Self {
        Self {
            force_inline: true,
            ..self
        }
    }
}
