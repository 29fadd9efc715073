/// Emoji utility functions for parsing and rendering emojis in posts
/// Parse emoji shortcodes (e.g., :fire:) and replace them with actual emojis
pub fn parse_emoji_shortcodes(text: &str) -> String {
    let mut result = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ':' {
            let mut shortcode = String::new();
            let mut found_closing = false;

            // Collect characters until we find another colon or give up
            while let Some(&next_ch) = chars.peek() {
                if next_ch == ':' {
                    chars.next(); // consume the closing colon
                    found_closing = true;
                    break;
                } else if next_ch.is_whitespace() || shortcode.len() > 30 {
                    break;
                } else {
                    shortcode.push(next_ch);
                    chars.next();
                }
            }

            if found_closing && !shortcode.is_empty() {
                if let Some(emoji) = emojis::get_by_shortcode(&shortcode) {
                    result.push_str(emoji.as_str());
                } else {
                    // Not a known shortcode, keep the original text
                    result.push(':');
                    result.push_str(&shortcode);
                    result.push(':');
                }
            } else {
                result.push(':');
                result.push_str(&shortcode);
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Count the actual character length including emojis
/// Emojis count as 1 character against the composer limit
pub fn count_characters(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_shortcode() {
        assert_eq!(parse_emoji_shortcodes("gm :fire:"), "gm 🔥");
    }

    #[test]
    fn test_unknown_shortcode_kept_verbatim() {
        assert_eq!(
            parse_emoji_shortcodes("wen :not_an_emoji: ser"),
            "wen :not_an_emoji: ser"
        );
    }

    #[test]
    fn test_unterminated_colon_passes_through() {
        assert_eq!(parse_emoji_shortcodes("ratio 1:10"), "ratio 1:10");
    }

    #[test]
    fn test_count_characters_counts_emoji_as_one() {
        assert_eq!(count_characters("gm 🔥"), 4);
    }
}
