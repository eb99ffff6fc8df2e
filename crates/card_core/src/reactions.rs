use std::collections::HashMap;

use shared::domain::SubjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Love,
    Like,
    Support,
    Something,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 4] = [
        ReactionKind::Love,
        ReactionKind::Like,
        ReactionKind::Support,
        ReactionKind::Something,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReactionKind::Love => "love",
            ReactionKind::Like => "like",
            ReactionKind::Support => "support",
            ReactionKind::Something => "something",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Session-long reaction totals per subject. Counts only ever grow.
#[derive(Debug, Clone, Default)]
pub struct ReactionTracker {
    counts: HashMap<SubjectId, u64>,
}

impl ReactionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, subject_id: &SubjectId) -> u64 {
        let count = self.counts.entry(subject_id.clone()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count_for(&self, subject_id: &SubjectId) -> u64 {
        self.counts.get(subject_id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_subject_counts_zero() {
        let tracker = ReactionTracker::new();
        assert_eq!(tracker.count_for(&SubjectId::new("nobody")), 0);
    }

    #[test]
    fn k_increments_yield_k() {
        let mut tracker = ReactionTracker::new();
        let id = SubjectId::new("a");
        for expected in 1..=5 {
            assert_eq!(tracker.increment(&id), expected);
        }
        assert_eq!(tracker.count_for(&id), 5);
    }

    #[test]
    fn counts_for_distinct_subjects_are_independent() {
        let mut tracker = ReactionTracker::new();
        let a = SubjectId::new("a");
        let b = SubjectId::new("b");
        tracker.increment(&a);
        tracker.increment(&a);
        tracker.increment(&b);
        assert_eq!(tracker.count_for(&a), 2);
        assert_eq!(tracker.count_for(&b), 1);
    }

    #[test]
    fn reaction_labels_parse_case_insensitively() {
        assert_eq!(ReactionKind::from_label("LOVE"), Some(ReactionKind::Love));
        assert_eq!(ReactionKind::from_label(" support "), Some(ReactionKind::Support));
        assert_eq!(ReactionKind::from_label("meh"), None);
    }
}
