//! Color schemes for the TUI.
//!
//! Two schemes exist: the standard scheme and the stealth disguise. The
//! scheme is chosen per draw from the stealth flag — there is no global
//! theme state.

use ratatui::prelude::*;

/// Semantic colors for the UI.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection_bg: Color,
    /// Foreground for masked span blocks
    pub mask: Color,
    /// Foreground for revealed span text
    pub revealed: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl ColorScheme {
    /// The standard scheme.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            text: Color::White,
            text_muted: Color::Gray,
            selection_bg: Color::Rgb(60, 60, 80),
            mask: Color::Red,
            revealed: Color::LightRed,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    /// The stealth disguise: muted monochrome, no accent color anywhere,
    /// so the screen reads as an ordinary pager at a glance.
    #[must_use]
    pub const fn stealth() -> Self {
        Self {
            primary: Color::Gray,
            accent: Color::Gray,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Gray,
            text: Color::Gray,
            text_muted: Color::DarkGray,
            selection_bg: Color::Rgb(40, 40, 40),
            mask: Color::DarkGray,
            revealed: Color::Gray,
            success: Color::Gray,
            warning: Color::Gray,
            error: Color::Gray,
        }
    }

    /// The scheme for the current stealth flag.
    #[must_use]
    pub const fn for_mode(stealth: bool) -> Self {
        if stealth {
            Self::stealth()
        } else {
            Self::standard()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stealth_scheme_has_no_accent() {
        let scheme = ColorScheme::for_mode(true);
        assert_eq!(scheme.accent, scheme.primary);
    }

    #[test]
    fn test_standard_scheme_selected_by_default_flag() {
        let scheme = ColorScheme::for_mode(false);
        assert_eq!(scheme.primary, Color::Cyan);
    }
}
