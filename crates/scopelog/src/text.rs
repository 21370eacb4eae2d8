//! Plain-text helpers used by the record layout.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

/// Line terminator used for records and for splitting multi-line messages.
pub const LINE_BREAK: &str = "\n";

/// Remove every terminal styling escape sequence from `s`.
///
/// Handles CSI sequences (`ESC [ ... final`, or the single-byte `0x9B`
/// introducer), OSC sequences terminated by BEL or `ESC \`, and the short
/// charset/line-attribute forms (`ESC ( x`, `ESC ) x`, `ESC # x`).
pub fn strip_colors(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\u{1b}' => match chars.next() {
                Some('[') => skip_csi(&mut chars),
                Some(']') => skip_osc(&mut chars),
                Some('(' | ')' | '#') => {
                    chars.next();
                }
                // Two-byte escapes (ESC 7, ESC c, ...) carry no payload
                _ => {}
            },
            '\u{9b}' => skip_csi(&mut chars),
            _ => out.push(c),
        }
    }

    out
}

fn skip_csi(chars: &mut Peekable<Chars<'_>>) {
    for c in chars.by_ref() {
        if ('\u{40}'..='\u{7e}').contains(&c) {
            break;
        }
    }
}

fn skip_osc(chars: &mut Peekable<Chars<'_>>) {
    while let Some(c) = chars.next() {
        match c {
            '\u{7}' => break,
            '\u{1b}' => {
                if chars.peek() == Some(&'\\') {
                    chars.next();
                }
                break;
            }
            _ => {}
        }
    }
}

/// Number of characters a terminal would display for `s`.
pub fn visible_len(s: &str) -> usize {
    strip_colors(s).chars().count()
}

/// Right-pad `s` with spaces up to `width` characters. Longer input is
/// returned as is, never truncated.
pub fn pad_right(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

/// Prefix `s` with `count` spaces.
pub fn add_padding(s: &str, count: usize) -> String {
    format!("{}{}", " ".repeat(count), s)
}

/// Left-pad every line after the first with `count` spaces.
pub fn pad_continuation_lines(s: &str, count: usize) -> String {
    s.split(LINE_BREAK)
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                add_padding(line, count)
            }
        })
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Render a source location as `file.rs:line`, dropping the directories.
pub fn caller_string(file: &str, line: u32) -> String {
    let name = Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file);
    format!("{}:{}", name, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_colors_removes_sgr_sequences() {
        let styled = "\u{1b}[42m\u{1b}[33mCOLOR\u{1b}[0m\u{1b}[1mBOLD\u{1b}[0m\u{1b}[1;42mBOLD+COLOR\u{1b}[0m";
        assert_eq!(strip_colors(styled), "COLORBOLDBOLD+COLOR");
    }

    #[test]
    fn test_strip_colors_handles_bright_and_truecolor_sequences() {
        let styled = "\u{1b}[90m2026-01-20\u{1b}[0m|\u{1b}[38;2;255;0;0mRGB\u{1b}[0m|\u{1b}[2;3mdim\u{1b}[0m";
        assert_eq!(strip_colors(styled), "2026-01-20|RGB|dim");
    }

    #[test]
    fn test_strip_colors_handles_osc_and_c1_csi() {
        let s = "\u{1b}]0;title\u{7}plain\u{9b}31mred\u{1b}]8;;link\u{1b}\\tail";
        assert_eq!(strip_colors(s), "plainredtail");
    }

    #[test]
    fn test_strip_colors_keeps_plain_text() {
        assert_eq!(strip_colors("no escapes | here ▶"), "no escapes | here ▶");
    }

    #[test]
    fn test_visible_len_ignores_styling() {
        assert_eq!(visible_len("\u{1b}[36mabc\u{1b}[0m"), 3);
        assert_eq!(visible_len("A ▶ B"), 5);
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 5), "ab   ");
        assert_eq!(pad_right("abcdef", 3), "abcdef");
        assert_eq!(pad_right("", 2), "  ");
    }

    #[test]
    fn test_add_padding() {
        assert_eq!(add_padding("x", 3), "   x");
        assert_eq!(add_padding("x", 0), "x");
    }

    #[test]
    fn test_pad_continuation_lines() {
        assert_eq!(pad_continuation_lines("a\nb\nc", 2), "a\n  b\n  c");
        assert_eq!(pad_continuation_lines("single", 4), "single");
    }

    #[test]
    fn test_caller_string_uses_file_name() {
        assert_eq!(caller_string("src/deep/logger.rs", 42), "logger.rs:42");
        assert_eq!(caller_string("main.rs", 7), "main.rs:7");
    }
}
