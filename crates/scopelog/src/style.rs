//! Styling backends.
//!
//! The record layout only ever asks for a logical [`Style`]; how (or whether)
//! that turns into terminal escape codes is up to the [`Styler`] in use.

use colored::Colorize;

use crate::text::strip_colors;

/// Logical styles used by the record layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Identity transform
    Plain,
    Bold,
    Dimmed,
    /// Neutral gray, used for timestamps
    Gray,
    Cyan,
    Yellow,
    Red,
    Magenta,
    Green,
    OnBlack,
    OnMagenta,
    OnCyan,
    OnGreen,
}

/// Maps a logical style onto text.
pub trait Styler: Send + Sync {
    /// Wrap `text` in whatever representation `style` has in this backend.
    fn paint(&self, style: Style, text: &str) -> String;

    /// Remove this backend's markup from `text`. Used for `log_no_format`
    /// records, JSON messages and to measure the visible width of the
    /// columns before the message.
    fn strip(&self, text: &str) -> String {
        strip_colors(text)
    }
}

/// ANSI terminal styling through `colored`.
///
/// Honors `colored`'s own switches (`NO_COLOR`, `CLICOLOR_FORCE`, tty
/// detection), so it degrades to plain text when output is not a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn paint(&self, style: Style, text: &str) -> String {
        match style {
            Style::Plain => text.to_string(),
            Style::Bold => text.bold().to_string(),
            Style::Dimmed => text.dimmed().to_string(),
            Style::Gray => text.bright_black().to_string(),
            Style::Cyan => text.cyan().to_string(),
            Style::Yellow => text.yellow().to_string(),
            Style::Red => text.red().to_string(),
            Style::Magenta => text.magenta().to_string(),
            Style::Green => text.green().to_string(),
            Style::OnBlack => text.on_black().to_string(),
            Style::OnMagenta => text.on_magenta().to_string(),
            Style::OnCyan => text.on_cyan().to_string(),
            Style::OnGreen => text.on_green().to_string(),
        }
    }
}

/// Styler that never emits markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn paint(&self, _style: Style, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STYLES: [Style; 13] = [
        Style::Plain,
        Style::Bold,
        Style::Dimmed,
        Style::Gray,
        Style::Cyan,
        Style::Yellow,
        Style::Red,
        Style::Magenta,
        Style::Green,
        Style::OnBlack,
        Style::OnMagenta,
        Style::OnCyan,
        Style::OnGreen,
    ];

    #[test]
    fn test_ansi_paint_strips_back_to_text() {
        let styler = AnsiStyler;
        for style in ALL_STYLES {
            let painted = styler.paint(style, "payload");
            assert_eq!(styler.strip(&painted), "payload", "style {:?}", style);
        }
    }

    #[test]
    fn test_plain_styler_is_identity() {
        let styler = PlainStyler;
        for style in ALL_STYLES {
            assert_eq!(styler.paint(style, "payload"), "payload");
        }
    }

    #[test]
    fn test_ansi_plain_style_is_identity() {
        assert_eq!(AnsiStyler.paint(Style::Plain, "x"), "x");
    }
}
