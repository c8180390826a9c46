//! Playmood theme
//!
//! Color palette and style helpers for the TUI. Dark TV background, one warm
//! brand color for focus, purple for secondary metadata.

use ratatui::style::{Color, Modifier, Style};

/// Playmood color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0d0d12
    pub const BACKGROUND: Color = Color::Rgb(0x0d, 0x0d, 0x12);

    /// Brand: #ff2e88 (mood pink), used for focus
    pub const BRAND: Color = Color::Rgb(0xff, 0x2e, 0x88);

    /// Secondary: #a78bfa (lavender)
    pub const SECONDARY: Color = Color::Rgb(0xa7, 0x8b, 0xfa);

    /// Text: #ececf1
    pub const TEXT: Color = Color::Rgb(0xec, 0xec, 0xf1);

    /// Dim: #6b6b80
    pub const DIM: Color = Color::Rgb(0x6b, 0x6b, 0x80);

    /// Success: #3ddc84
    pub const SUCCESS: Color = Color::Rgb(0x3d, 0xdc, 0x84);

    /// Warning: #ffb020
    pub const WARNING: Color = Color::Rgb(0xff, 0xb0, 0x20);

    /// Error: #ff4d4f
    pub const ERROR: Color = Color::Rgb(0xff, 0x4d, 0x4f);

    /// Panels and cards
    pub const SURFACE: Color = Color::Rgb(0x18, 0x18, 0x22);

    /// Unfocused border
    pub const BORDER: Color = Color::Rgb(0x33, 0x33, 0x44);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    /// Row title of the row holding focus
    pub fn title_active() -> Style {
        Style::default().fg(Self::BRAND).add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Inline section error (always red)
    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING).add_modifier(Modifier::BOLD)
    }

    /// Spinner text of a loading section
    pub fn loading() -> Style {
        Style::default().fg(Self::SECONDARY).add_modifier(Modifier::ITALIC)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::BRAND).add_modifier(Modifier::BOLD)
    }

    /// Card or button that is not focused
    pub fn card() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    /// Focused card or button
    pub fn card_focused() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::BRAND)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Relative luminance per WCAG 2.0
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Contrast ratio between two colors, from 1 to 21
pub fn contrast_ratio(fg: Color, bg: Color) -> Option<f64> {
    let (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) = (fg, bg) else {
        return None;
    };
    let l1 = relative_luminance(fr, fg_, fb);
    let l2 = relative_luminance(br, bg_, bb);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    Some((lighter + 0.05) / (darker + 0.05))
}
