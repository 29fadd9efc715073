use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{MessageSubtype, ModerationSubtype};

/// Content-addressed message identifier (a hash string, not a UUID).
pub type MessageId = String;

/// Wallet address of a message creator, `0x`-prefixed hex.
pub type Address = String;

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// An immutable, content-addressed record in the feed. New reactions are
/// new messages; nothing is edited in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Wallet address of the author.
    pub creator: Address,
    pub subtype: MessageSubtype,
    pub payload: MessagePayload,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub content: String,
    /// For reposts and replies: the message id this one points at.
    #[serde(default)]
    pub reference: Option<MessageId>,
}

/// Aggregate reaction counters plus the current viewer's relationship to
/// a message. `liked`/`reposted` are viewer-relative and distinct from
/// the aggregate counts; the client never computes counts itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub reply_count: i32,
    pub repost_count: i32,
    pub like_count: i32,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub reposted: bool,
}

/// A user record looked up by wallet address. An absent record is a valid
/// renderable loading state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub address: Address,
    /// Human-readable ENS handle, if one resolves for the address.
    #[serde(default)]
    pub ens: Option<String>,
    #[serde(default)]
    pub name: String,
}

// Request/Response types for the gateway API

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitPostRequest {
    /// Message id being replied to, or None for a top-level post.
    pub reference: Option<MessageId>,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitRepostRequest {
    pub reference: MessageId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitModerationRequest {
    pub reference: MessageId,
    pub subtype: ModerationSubtype,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub address: Address,
    #[serde(default)]
    pub ens: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedResponse {
    pub messages: Vec<MessageId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serde_round_trip() {
        let json = r#"{
            "id": "0x9f2e",
            "creator": "0xabc123",
            "subtype": "REPOST",
            "payload": { "content": "", "reference": "0x1111" },
            "created_at": "2024-05-01T12:00:00+00:00"
        }"#;
        let msg: Message = serde_json::from_str(json).expect("message should parse");
        assert_eq!(msg.subtype, MessageSubtype::Repost);
        assert_eq!(msg.payload.reference.as_deref(), Some("0x1111"));

        let back = serde_json::to_string(&msg).expect("message should serialize");
        let again: Message = serde_json::from_str(&back).expect("round trip");
        assert_eq!(again.id, "0x9f2e");
        assert_eq!(again.created_at, msg.created_at);
    }

    #[test]
    fn test_meta_defaults_viewer_flags() {
        let json = r#"{ "reply_count": 2, "repost_count": 0, "like_count": 5 }"#;
        let meta: Meta = serde_json::from_str(json).expect("meta should parse");
        assert_eq!(meta.like_count, 5);
        assert!(!meta.liked);
        assert!(!meta.reposted);
    }

    #[test]
    fn test_user_without_ens() {
        let json = r#"{ "address": "0xabc123" }"#;
        let user: User = serde_json::from_str(json).expect("user should parse");
        assert_eq!(user.ens, None);
        assert_eq!(user.name, "");
    }
}
