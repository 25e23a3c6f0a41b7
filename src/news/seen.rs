use std::collections::HashSet;

/// In-memory record of headlines already handled
///
/// Lives for one watcher run; nothing is persisted.
#[derive(Debug, Default)]
pub struct SeenStore {
    titles: HashSet<String>,
}

impl SeenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    /// Record a title, returning false if it was already present
    pub fn insert(&mut self, title: &str) -> bool {
        self.titles.insert(title.to_string())
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
