//! Frequency aggregation and top-K ranking of suspicious requests

use std::collections::HashMap;
use crate::models::RankedEntry;

/// Counts suspicious request lines by their exact text
///
/// Entries keep the order in which each request was first seen, which is
/// the tie-break order when ranking.
#[derive(Debug, Default, Clone)]
pub struct FrequencyRanker {
    /// request text -> position in `entries`
    index: HashMap<String, usize>,
    entries: Vec<RankedEntry>,
}

impl FrequencyRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of the request text
    pub fn accumulate(&mut self, request: &str) {
        match self.index.get(request) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(request.to_string(), self.entries.len());
                self.entries.push(RankedEntry {
                    request: request.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Occurrences recorded for the request text
    pub fn count(&self, request: &str) -> u64 {
        self.index
            .get(request)
            .map(|&pos| self.entries[pos].count)
            .unwrap_or(0)
    }

    /// Top `k` requests by descending count, ties in first-seen order
    pub fn rank(&self, k: usize) -> Vec<RankedEntry> {
        let mut ranked: Vec<&RankedEntry> = self.entries.iter().collect();
        // stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.into_iter().take(k).cloned().collect()
    }

    /// Number of distinct request texts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_counts_exact_text() {
        let mut ranker = FrequencyRanker::new();
        ranker.accumulate("GET /a HTTP/1.1");
        ranker.accumulate("GET /a HTTP/1.1");
        ranker.accumulate("get /a HTTP/1.1");

        assert_eq!(ranker.count("GET /a HTTP/1.1"), 2);
        assert_eq!(ranker.count("get /a HTTP/1.1"), 1);
        assert_eq!(ranker.count("GET /b HTTP/1.1"), 0);
        assert_eq!(ranker.len(), 2);
        assert_eq!(ranker.total(), 3);
    }

    #[test]
    fn test_rank_descending_and_capped() {
        let mut ranker = FrequencyRanker::new();
        for n in 1..=25u64 {
            for _ in 0..n {
                ranker.accumulate(&format!("req-{}", n));
            }
        }

        let top = ranker.rank(20);
        assert_eq!(top.len(), 20);
        let counts: Vec<u64> = top.iter().map(|e| e.count).collect();
        let expected: Vec<u64> = (6..=25).rev().collect();
        assert_eq!(counts, expected);
        assert!(top.iter().all(|e| e.request != "req-5"));
    }

    #[test]
    fn test_rank_ties_keep_first_seen_order() {
        let mut ranker = FrequencyRanker::new();
        for request in ["c", "a", "b", "a", "c", "b", "d"] {
            ranker.accumulate(request);
        }

        let order: Vec<String> = ranker.rank(10).into_iter().map(|e| e.request).collect();
        assert_eq!(order, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_rank_is_read_only() {
        let mut ranker = FrequencyRanker::new();
        for request in ["x", "y", "y", "z", "z", "z"] {
            ranker.accumulate(request);
        }

        let first = ranker.rank(2);
        let second = ranker.rank(2);
        assert_eq!(first, second);
        assert_eq!(ranker.rank(10).len(), 3);
        assert_eq!(ranker.rank(0).len(), 0);
        assert_eq!(ranker.total(), 6);
    }

    #[test]
    fn test_order_independent_counts() {
        let input = ["a", "b", "a", "c", "b", "a"];

        let mut forward = FrequencyRanker::new();
        input.iter().for_each(|r| forward.accumulate(r));

        let mut backward = FrequencyRanker::new();
        input.iter().rev().for_each(|r| backward.accumulate(r));

        for request in ["a", "b", "c"] {
            assert_eq!(forward.count(request), backward.count(request));
        }
    }

    #[test]
    fn test_empty_ranker() {
        let ranker = FrequencyRanker::new();
        assert!(ranker.is_empty());
        assert!(ranker.rank(20).is_empty());
    }
}
