//! Incremental search state for the tree view.
//!
//! Holds the query, the ordered hit list and a cursor that wraps in both
//! directions. Matching itself is done by the owner, which knows the items.

/// Query, hits and cursor of a tree search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSearchState {
    /// Query as typed, untrimmed
    query: String,
    /// Item indices whose display name contains the trimmed query, ascending
    hits: Vec<usize>,
    /// Position in `hits`; `None` when there are no hits
    cursor: Option<usize>,
}

impl TreeSearchState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            hits: Vec::new(),
            cursor: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query used for matching.
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    pub fn hits(&self) -> &[usize] {
        &self.hits
    }

    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Item index the cursor points at.
    pub fn current_hit(&self) -> Option<usize> {
        self.cursor.and_then(|c| self.hits.get(c).copied())
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn has_hits(&self) -> bool {
        !self.hits.is_empty()
    }

    /// Whether `index` is one of the hits.
    pub fn is_hit(&self, index: usize) -> bool {
        self.hits.binary_search(&index).is_ok()
    }

    /// Replace query and hits; the cursor moves to the first hit.
    pub(crate) fn set_results(&mut self, query: String, hits: Vec<usize>) {
        self.query = query;
        self.cursor = if hits.is_empty() { None } else { Some(0) };
        self.hits = hits;
    }

    /// Advance the cursor, wrapping from the last hit to the first.
    pub(crate) fn select_next(&mut self) -> Option<usize> {
        self.cursor = match (self.cursor, self.hits.len()) {
            (_, 0) => None,
            (Some(c), len) => Some((c + 1) % len),
            (None, _) => Some(0),
        };
        self.current_hit()
    }

    /// Retreat the cursor, wrapping from the first hit to the last.
    pub(crate) fn select_previous(&mut self) -> Option<usize> {
        self.cursor = match (self.cursor, self.hits.len()) {
            (_, 0) => None,
            (Some(0) | None, len) => Some(len - 1),
            (Some(c), _) => Some(c - 1),
        };
        self.current_hit()
    }

    pub(crate) fn clear(&mut self) {
        self.query.clear();
        self.hits.clear();
        self.cursor = None;
    }
}
