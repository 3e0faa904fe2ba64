//! Sanitizing archive text before it is written to a terminal.
//!
//! Titles and message bodies come straight from the export and may contain escape
//! sequences that recolor output, move the cursor or set the window title. Everything
//! the CLI prints from the archive goes through [`sanitize_for_terminal`].

use std::borrow::Cow;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Remove ANSI CSI/OSC escape sequences and control characters (except tab and newlines).
///
/// Returns the input unchanged, without allocating, when there is nothing to strip.
///
/// # Examples
///
/// ```
/// use chat_archive_explorer::utils::terminal::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mRed\x1b[0m text"), "Red text");
/// assert_eq!(sanitize_for_terminal("\x1b]0;title\x07plain"), "plain");
/// ```
pub fn sanitize_for_terminal(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_unsafe) {
        return Cow::Borrowed(text);
    }

    let mut clean = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.peek() {
                // CSI: parameters then a final letter
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ESC \
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if !is_unsafe(ch) {
            clean.push(ch);
        }
    }

    Cow::Owned(clean)
}

fn is_unsafe(ch: char) -> bool {
    ch.is_control() && !matches!(ch, '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        let text = "Plain text with 👋 and\nnewlines\ttabs";
        assert!(matches!(sanitize_for_terminal(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strips_color_and_cursor_sequences() {
        assert_eq!(sanitize_for_terminal("\x1b[1m\x1b[31mBold\x1b[0m \x1b[2J\x1b[Hdone"), "Bold done");
    }

    #[test]
    fn test_strips_osc_title_sequences() {
        assert_eq!(sanitize_for_terminal("a\x1b]2;pwned\x1b\\b"), "ab");
        assert_eq!(sanitize_for_terminal("a\x1b]0;pwned\x07b"), "ab");
    }

    #[test]
    fn test_strips_lone_control_characters() {
        assert_eq!(sanitize_for_terminal("Alert!\x07 back\x08"), "Alert! back");
        assert_eq!(sanitize_for_terminal("esc\x1bonly"), "esconly");
    }

    #[test]
    fn test_unterminated_sequences_consume_rest() {
        assert_eq!(sanitize_for_terminal("keep\x1b[12;3"), "keep");
        assert_eq!(sanitize_for_terminal("keep\x1b]title"), "keep");
    }
}
