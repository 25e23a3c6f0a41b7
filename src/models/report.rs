use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub request: String,
    pub count: u64,
}

/// Most frequent suspicious requests, highest count first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedReport {
    pub generated_at: DateTime<Utc>,
    pub top_k: usize,
    pub entries: Vec<RankedEntry>,
}

impl RankedReport {
    pub fn new(top_k: usize, entries: Vec<RankedEntry>) -> Self {
        RankedReport {
            generated_at: Utc::now(),
            top_k,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
