//! Client-side store composed of independent slices. All mutation goes
//! through [`Store::dispatch`]; no slice reads another slice's internals.
//! Cross-slice reads happen through selectors at the app/UI layer.

pub mod drafts;
pub mod posts;
pub mod snapshot;
pub mod users;
pub mod web3;

pub use drafts::{Draft, DraftsState};
pub use posts::{PostsState, ResolvedPost};
pub use snapshot::SnapshotState;
pub use users::UsersState;
pub use web3::Web3State;

use std::collections::HashSet;

use murmur_types::{Message, MessageId, Meta, User};

/// Every mutation the UI layer can apply to the store.
#[derive(Debug, Clone)]
pub enum Action {
    SessionConnected {
        address: String,
        ens: Option<String>,
    },
    FeedLoading,
    FeedLoaded(Vec<MessageId>),
    FetchStarted(MessageId),
    FetchSettled(MessageId),
    MessageLoaded(Message),
    MetaLoaded {
        id: MessageId,
        meta: Meta,
    },
    UserFetchStarted(String),
    UserFetchSettled(String),
    UserLoaded(User),
    DraftChanged {
        id: MessageId,
        content: String,
    },
    DraftCleared(MessageId),
    SubmitStarted(MessageId),
    SubmitSettled(MessageId),
}

impl Action {
    /// Stable name used by the action logger's exclusion set.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SessionConnected { .. } => "SessionConnected",
            Action::FeedLoading => "FeedLoading",
            Action::FeedLoaded(_) => "FeedLoaded",
            Action::FetchStarted(_) => "FetchStarted",
            Action::FetchSettled(_) => "FetchSettled",
            Action::MessageLoaded(_) => "MessageLoaded",
            Action::MetaLoaded { .. } => "MetaLoaded",
            Action::UserFetchStarted(_) => "UserFetchStarted",
            Action::UserFetchSettled(_) => "UserFetchSettled",
            Action::UserLoaded(_) => "UserLoaded",
            Action::DraftChanged { .. } => "DraftChanged",
            Action::DraftCleared(_) => "DraftCleared",
            Action::SubmitStarted(_) => "SubmitStarted",
            Action::SubmitSettled(_) => "SubmitSettled",
        }
    }
}

/// Logs each dispatched action through the `log` facade unless its name
/// is in the exclusion set. Attached only in verbose mode; the default
/// exclusion set is empty.
#[derive(Debug, Default, Clone)]
pub struct ActionLogger {
    excluded: HashSet<&'static str>,
}

impl ActionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(mut self, name: &'static str) -> Self {
        self.excluded.insert(name);
        self
    }

    fn log(&self, action: &Action) {
        if !self.excluded.contains(action.name()) {
            log::debug!(target: "store", "dispatch {}", action.name());
        }
    }
}

/// Root state: five independently owned slices.
#[derive(Default)]
pub struct Store {
    pub web3: Web3State,
    pub posts: PostsState,
    pub users: UsersState,
    pub drafts: DraftsState,
    pub snapshot: SnapshotState,
    logger: Option<ActionLogger>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(logger: ActionLogger) -> Self {
        Self {
            logger: Some(logger),
            ..Self::default()
        }
    }

    /// Route an action to the slice that owns it.
    pub fn dispatch(&mut self, action: Action) {
        if let Some(logger) = &self.logger {
            logger.log(&action);
        }

        match action {
            Action::SessionConnected { address, ens } => self.web3.connect(address, ens),
            Action::FeedLoading => self.snapshot.set_loading(),
            Action::FeedLoaded(ids) => self.snapshot.set_feed(ids),
            Action::FetchStarted(id) => self.posts.fetch_started(id),
            Action::FetchSettled(id) => self.posts.fetch_settled(&id),
            Action::MessageLoaded(message) => self.posts.insert_message(message),
            Action::MetaLoaded { id, meta } => self.posts.insert_meta(id, meta),
            Action::UserFetchStarted(address) => self.users.fetch_started(address),
            Action::UserFetchSettled(address) => self.users.fetch_settled(&address),
            Action::UserLoaded(user) => self.users.insert(user),
            Action::DraftChanged { id, content } => self.drafts.update(id, content),
            Action::DraftCleared(id) => self.drafts.clear(&id),
            Action::SubmitStarted(id) => self.drafts.submit_started(id),
            Action::SubmitSettled(id) => self.drafts.submit_settled(&id),
        }
    }
}
