//! Environment tags and the inclusion predicate.
//!
//! A node tagged with environments is only rendered when the active render
//! environment is one of them. Tags are kept sorted so membership is a binary
//! search.

/// Sorted, deduplicated set of environment tags attached to a node.
///
/// An empty set means "visible everywhere".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<String>", into = "Vec<String>")
)]
pub struct EnvSet(Vec<String>);

impl EnvSet {
    /// Build a set from any list of tags, sorting and deduplicating them.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        tags.sort_unstable();
        tags.dedup();
        Self(tags)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, env: &str) -> bool {
        self.0.binary_search_by(|tag| tag.as_str().cmp(env)).is_ok()
    }

    /// Whether a node carrying this set is rendered for `active`.
    ///
    /// True when the set is empty, when no environment is active (`None` or
    /// the empty string), or when the set contains the active environment.
    pub fn matches(&self, active: Option<&str>) -> bool {
        match active {
            None | Some("") => true,
            Some(env) => self.is_empty() || self.contains(env),
        }
    }
}

impl From<Vec<String>> for EnvSet {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<EnvSet> for Vec<String> {
    fn from(set: EnvSet) -> Self {
        set.0
    }
}

impl<S: Into<String>> FromIterator<S> for EnvSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
