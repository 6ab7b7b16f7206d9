//! Small rendering helpers shared by the views.

use super::theme::ColorScheme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Minimum terminal size for a usable layout.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

/// Check that the terminal is large enough to render.
pub const fn check_terminal_size(width: u16, height: u16) -> Result<(), (u16, u16)> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        Err((width, height))
    } else {
        Ok(())
    }
}

/// Render a full-frame warning when the terminal is too small.
pub fn render_size_warning(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    let message = format!(
        "Terminal too small\nNeed at least {min_width}x{min_height}, have {}x{}",
        area.width, area.height
    );
    let warning = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(warning, area);
}

/// Truncate a string to a display width, appending an ellipsis if cut.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Pad a string with spaces to an exact display width (truncating if needed).
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let truncated = if text.width() > width {
        truncate_to_width(text, width)
    } else {
        text.to_string()
    };
    let padding = width.saturating_sub(truncated.width());
    format!("{truncated}{}", " ".repeat(padding))
}

/// The block string a masked span renders as.
///
/// Matches the span text's display width so line layout does not shift when
/// a span is revealed; empty spans still get a visible two-cell block.
#[must_use]
pub fn mask_blocks(text: &str) -> String {
    "█".repeat(text.width().max(2))
}

/// A `[x]`-style toggle indicator span.
#[must_use]
pub fn toggle_indicator(label: &str, key: char, on: bool, scheme: &ColorScheme) -> Vec<Span<'static>> {
    let mark = if on { "[x]" } else { "[ ]" };
    let mark_style = if on {
        Style::default().fg(scheme.accent).bold()
    } else {
        Style::default().fg(scheme.muted)
    };
    vec![
        Span::styled(mark.to_string(), mark_style),
        Span::styled(
            format!(" {label} "),
            Style::default().fg(scheme.text_muted),
        ),
        Span::styled(format!("({key})"), Style::default().fg(scheme.muted)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_blocks_match_width() {
        assert_eq!(mask_blocks("abcd").chars().count(), 4);
        // Wide (CJK) characters take two cells each
        assert_eq!(mask_blocks("資本").chars().count(), 4);
        // Empty spans still render a visible block
        assert_eq!(mask_blocks("").chars().count(), 2);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a longer string", 8);
        assert!(cut.ends_with('…'));
        assert!(UnicodeWidthStr::width(cut.as_str()) <= 8);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(UnicodeWidthStr::width(pad_to_width("abcdef", 4).as_str()), 4);
    }

    #[test]
    fn test_size_check() {
        assert!(check_terminal_size(80, 24).is_ok());
        assert!(check_terminal_size(40, 24).is_err());
        assert!(check_terminal_size(80, 10).is_err());
    }
}
