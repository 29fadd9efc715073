/// Text wrapping utilities for terminal UI
use tui_textarea::TextArea;

/// Configuration for text wrapping behavior
pub struct WrapConfig {
    /// Maximum width before wrapping (in characters)
    pub wrap_width: usize,
}

impl WrapConfig {
    /// Standard width for the reply composer (70% of typical terminal)
    pub const COMPOSER: Self = Self { wrap_width: 100 };
}

/// Wrap text in a TextArea if the current line exceeds the configured width
///
/// Splits the cursor's line at the last space before `wrap_width`,
/// rebuilds the textarea, and repositions the cursor on the new line.
pub fn wrap_textarea_if_needed(textarea: &mut TextArea<'static>, config: WrapConfig) {
    let (row, col) = textarea.cursor();
    let lines: Vec<String> = textarea.lines().to_vec();

    if row >= lines.len() {
        return;
    }

    let current_line = &lines[row];
    let char_count = current_line.chars().count();

    if char_count <= config.wrap_width {
        return;
    }

    let chars: Vec<char> = current_line.chars().collect();

    // Find the last space before wrap_width
    let mut wrap_point = config.wrap_width;
    for i in (0..config.wrap_width.min(chars.len())).rev() {
        if chars[i] == ' ' {
            wrap_point = i;
            break;
        }
    }

    // Split at character boundary
    let first_part: String = chars[..wrap_point].iter().collect();
    let second_part: String = chars[wrap_point..].iter().collect();
    let first_part = first_part.trim_end();
    let second_part = second_part.trim_start();

    let mut new_lines = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i == row {
            new_lines.push(first_part.to_string());
            new_lines.push(second_part.to_string());
        } else {
            new_lines.push(line.clone());
        }
    }

    *textarea = TextArea::from(new_lines.iter().map(|s| s.as_str()));
    textarea.set_hard_tab_indent(true);

    // Move cursor to the second line at the appropriate position
    let new_col = if col > wrap_point {
        col - wrap_point - 1
    } else {
        second_part.chars().count()
    };
    textarea.move_cursor(tui_textarea::CursorMove::Jump(row as u16 + 1, new_col as u16));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_untouched() {
        let mut textarea = TextArea::from(["short line"]);
        wrap_textarea_if_needed(&mut textarea, WrapConfig::COMPOSER);
        assert_eq!(textarea.lines(), ["short line"]);
    }

    #[test]
    fn test_long_line_wraps_at_last_space() {
        let long = format!("{} tail", "a".repeat(100));
        let mut textarea = TextArea::from([long.as_str()]);
        // Cursor at end of line
        textarea.move_cursor(tui_textarea::CursorMove::End);

        wrap_textarea_if_needed(&mut textarea, WrapConfig::COMPOSER);

        assert_eq!(textarea.lines().len(), 2);
        assert_eq!(textarea.lines()[0], "a".repeat(100));
        assert_eq!(textarea.lines()[1], "tail");
    }
}
