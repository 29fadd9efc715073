use std::collections::{HashMap, HashSet};

use murmur_types::{Message, MessageId, MessageSubtype, Meta};

/// Message and meta cache plus the in-flight fetch table that keeps a
/// card's own re-renders from issuing redundant fetches for one id.
#[derive(Default)]
pub struct PostsState {
    messages: HashMap<MessageId, Message>,
    metas: HashMap<MessageId, Meta>,
    fetching: HashSet<MessageId>,
}

/// Result of the one-hop post identity resolver. Reaction state and
/// counts always attach to the display message's id; a repost pointing
/// at another repost is not resolved further.
#[derive(Debug)]
pub enum ResolvedPost<'a> {
    Direct { message: &'a Message },
    RepostOf { outer: &'a Message, inner: &'a Message },
}

impl<'a> ResolvedPost<'a> {
    /// The canonical message to display, counts and all.
    pub fn display(&self) -> &'a Message {
        match self {
            ResolvedPost::Direct { message } => message,
            ResolvedPost::RepostOf { inner, .. } => inner,
        }
    }

    pub fn display_id(&self) -> &'a str {
        &self.display().id
    }

    /// Address of the reposting user, when this is a repost wrapper.
    pub fn reposter(&self) -> Option<&'a str> {
        match self {
            ResolvedPost::Direct { .. } => None,
            ResolvedPost::RepostOf { outer, .. } => Some(&outer.creator),
        }
    }
}

impl PostsState {
    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    /// Counters for a message; absent meta reads as all-zero, not an error.
    pub fn meta(&self, id: &str) -> Meta {
        self.metas.get(id).cloned().unwrap_or_default()
    }

    pub fn is_fetching(&self, id: &str) -> bool {
        self.fetching.contains(id)
    }

    /// One-hop repost dereference. `None` means the input message (or the
    /// referenced message of a repost) has not loaded yet.
    pub fn resolve(&self, id: &str) -> Option<ResolvedPost<'_>> {
        let outer = self.messages.get(id)?;
        if outer.subtype == MessageSubtype::Repost {
            let reference = outer.payload.reference.as_deref()?;
            let inner = self.messages.get(reference)?;
            Some(ResolvedPost::RepostOf { outer, inner })
        } else {
            Some(ResolvedPost::Direct { message: outer })
        }
    }

    /// Cached top-level posts authored by an address, newest first. Used
    /// by the profile view; reposts and moderation messages are skipped.
    pub fn by_creator(&self, address: &str) -> Vec<&Message> {
        let mut posts: Vec<&Message> = self
            .messages
            .values()
            .filter(|m| m.creator == address && m.subtype == MessageSubtype::Post)
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    pub(super) fn fetch_started(&mut self, id: MessageId) {
        self.fetching.insert(id);
    }

    pub(super) fn fetch_settled(&mut self, id: &str) {
        self.fetching.remove(id);
    }

    pub(super) fn insert_message(&mut self, message: Message) {
        self.messages.insert(message.id.clone(), message);
    }

    pub(super) fn insert_meta(&mut self, id: MessageId, meta: Meta) {
        self.metas.insert(id, meta);
    }
}
