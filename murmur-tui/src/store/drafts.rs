use std::collections::{HashMap, HashSet};

use murmur_types::MessageId;

/// Mutable, in-progress edit buffer tied to a target message id.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub content: String,
}

/// Per-message draft buffers plus the explicit in-flight submit guard.
/// A draft is created lazily when a composer opens, survives close and
/// reopen, and is cleared on successful submit.
#[derive(Default)]
pub struct DraftsState {
    drafts: HashMap<MessageId, Draft>,
    submitting: HashSet<MessageId>,
}

impl DraftsState {
    pub fn draft(&self, id: &str) -> Option<&Draft> {
        self.drafts.get(id)
    }

    /// In-flight submit guard keyed by message id. A second submit for an
    /// id already in the set must be a no-op, not just a disabled button.
    pub fn is_submitting(&self, id: &str) -> bool {
        self.submitting.contains(id)
    }

    pub(super) fn update(&mut self, id: MessageId, content: String) {
        self.drafts.insert(id, Draft { content });
    }

    pub(super) fn clear(&mut self, id: &str) {
        self.drafts.remove(id);
    }

    pub(super) fn submit_started(&mut self, id: MessageId) {
        self.submitting.insert(id);
    }

    pub(super) fn submit_settled(&mut self, id: &str) {
        self.submitting.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_survives_update_and_clear() {
        let mut drafts = DraftsState::default();
        drafts.update("m1".to_string(), "first".to_string());
        drafts.update("m1".to_string(), "second".to_string());
        assert_eq!(
            drafts.draft("m1").map(|d| d.content.as_str()),
            Some("second")
        );
        drafts.clear("m1");
        assert!(drafts.draft("m1").is_none());
    }

    #[test]
    fn test_submit_guard_tracks_per_id() {
        let mut drafts = DraftsState::default();
        drafts.submit_started("m1".to_string());
        assert!(drafts.is_submitting("m1"));
        assert!(!drafts.is_submitting("m2"));
        drafts.submit_settled("m1");
        assert!(!drafts.is_submitting("m1"));
    }
}
