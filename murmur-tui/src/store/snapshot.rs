use murmur_types::MessageId;

/// The ordered feed snapshot: top-level message ids the feed view walks,
/// each of which drives its own card fetch.
#[derive(Default)]
pub struct SnapshotState {
    pub feed: Vec<MessageId>,
    pub loading: bool,
}

impl SnapshotState {
    pub(super) fn set_loading(&mut self) {
        self.loading = true;
    }

    pub(super) fn set_feed(&mut self, ids: Vec<MessageId>) {
        self.feed = ids;
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_feed_clears_loading() {
        let mut snapshot = SnapshotState::default();
        snapshot.set_loading();
        assert!(snapshot.loading);
        snapshot.set_feed(vec!["m1".to_string(), "m2".to_string()]);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.feed.len(), 2);
    }
}
