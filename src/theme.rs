//! Color palette for Swapsea's TUI.
//!
//! The palette follows the original web client: a near-black canvas,
//! dark gray panels, and a saffron accent for selection and emphasis.

use ratatui::style::Color;

/// Application theme palette used by rendering code.
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Panel background (sidebar, cards, modals).
    pub panel: Color,
    /// Border color for unfocused panels.
    pub border: Color,
    /// Border color for the focused panel.
    pub border_focus: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for labels and captions.
    pub subtext: Color,
    /// Saffron accent for selections and headings.
    pub accent: Color,
    /// Success/positive state color.
    pub green: Color,
    /// Warning/attention state color.
    pub yellow: Color,
    /// Error/danger state color.
    pub red: Color,
}

/// Construct a [`Color::Rgb`] from an 8-bit RGB triplet.
const fn hex(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Return the application's theme palette.
#[must_use]
pub const fn theme() -> Theme {
    Theme {
        base: hex((0x0a, 0x0a, 0x0a)),
        panel: hex((0x1f, 0x1f, 0x1f)),
        border: hex((0x3a, 0x3a, 0x3a)),
        border_focus: hex((0xf4, 0xc4, 0x30)),
        text: hex((0xe8, 0xe8, 0xe8)),
        subtext: hex((0x9c, 0xa3, 0xaf)),
        accent: hex((0xf4, 0xc4, 0x30)),
        green: hex((0x4a, 0xde, 0x80)),
        yellow: hex((0xfb, 0xbf, 0x24)),
        red: hex((0xf8, 0x71, 0x71)),
    }
}

/// Color coding for a swap status chip, matching the web client's badges.
#[must_use]
pub const fn status_color(status: crate::state::SwapStatus, th: &Theme) -> Color {
    use crate::state::SwapStatus as S;
    match status {
        S::Proposed => th.yellow,
        S::Accepted | S::InEscrow | S::PickedUp | S::Returned | S::Closed => th.green,
        S::Disputed | S::Cancelled => th.red,
    }
}
