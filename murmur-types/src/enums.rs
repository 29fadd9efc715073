use serde::{Deserialize, Serialize};

/// Discriminator on a message distinguishing post, repost wrapper, and
/// moderation variants. Messages are immutable; a reaction is a new
/// message with a `Moderation` subtype, never an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageSubtype {
    #[default]
    Post,
    Repost,
    Moderation,
}

impl MessageSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageSubtype::Post => "POST",
            MessageSubtype::Repost => "REPOST",
            MessageSubtype::Moderation => "MODERATION",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "POST" => Some(MessageSubtype::Post),
            "REPOST" => Some(MessageSubtype::Repost),
            "MODERATION" => Some(MessageSubtype::Moderation),
            _ => None,
        }
    }
}

/// Kind of moderation message attached to a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModerationSubtype {
    Like,
    Block,
}

impl ModerationSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationSubtype::Like => "LIKE",
            ModerationSubtype::Block => "BLOCK",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LIKE" => Some(ModerationSubtype::Like),
            "BLOCK" => Some(ModerationSubtype::Block),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_round_trip() {
        for subtype in [
            MessageSubtype::Post,
            MessageSubtype::Repost,
            MessageSubtype::Moderation,
        ] {
            assert_eq!(MessageSubtype::parse(subtype.as_str()), Some(subtype));
        }
        assert_eq!(MessageSubtype::parse("repost"), Some(MessageSubtype::Repost));
        assert_eq!(MessageSubtype::parse("gathering"), None);
    }

    #[test]
    fn test_moderation_subtype_round_trip() {
        assert_eq!(ModerationSubtype::parse("LIKE"), Some(ModerationSubtype::Like));
        assert_eq!(ModerationSubtype::parse("block"), Some(ModerationSubtype::Block));
        assert_eq!(ModerationSubtype::parse(""), None);
    }
}
