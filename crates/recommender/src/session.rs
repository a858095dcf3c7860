//! Per-round deduplication of surfaced titles.
//!
//! A recommendation round asks every facet for its own ranking of the same
//! catalog, so the same title often ranks high under several facets. The
//! `SessionSeenSet` records what the user has already been shown in the
//! current round and `filter_and_take` suppresses repeats.

use crate::types::Titled;
use std::collections::HashSet;
use tracing::debug;

/// Titles already shown during the current round, in the order shown
#[derive(Debug, Clone, Default)]
pub struct SessionSeenSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl SessionSeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.seen.contains(title)
    }

    /// Record a title. Returns `false` if it was already present.
    pub fn insert(&mut self, title: &str) -> bool {
        if self.seen.contains(title) {
            return false;
        }
        self.seen.insert(title.to_string());
        self.order.push(title.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Titles in the order they were surfaced
    pub fn titles(&self) -> &[String] {
        &self.order
    }

    /// Start a new round
    pub fn clear(&mut self) {
        self.seen.clear();
        self.order.clear();
    }
}

/// Take up to `n` candidates, in rank order, whose titles are not in `seen`,
/// and record the accepted titles.
///
/// Returns fewer than `n` (possibly none) when not enough unseen candidates
/// exist; never pads with repeats. A title appearing twice in `candidates`
/// is accepted at most once.
pub fn filter_and_take<T: Titled>(
    candidates: Vec<T>,
    seen: &mut SessionSeenSet,
    n: usize,
) -> Vec<T> {
    let offered = candidates.len();
    let mut accepted = Vec::with_capacity(n.min(offered));

    for candidate in candidates {
        if accepted.len() == n {
            break;
        }
        if seen.insert(candidate.title()) {
            accepted.push(candidate);
        }
    }

    debug!(
        "Session filter accepted {} of {} candidates ({} titles seen this round)",
        accepted.len(),
        offered,
        seen.len()
    );
    accepted
}
