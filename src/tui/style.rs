//! Colors and small drawing helpers for the TUI.

use ratatui::style::Color;

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Focused input row.
pub const SELECTED_FG: Color = Color::Yellow;
/// Number box while text is being typed.
pub const EDITING_FG: Color = Color::Magenta;
/// Donut segment colors, in slice order.
pub const SLICE_COLORS: [Color; 3] = [Color::Green, Color::Cyan, Color::DarkGray];
/// Cost bar without PV.
pub const COST_WITHOUT_COLOR: Color = Color::Red;
/// Cost bar with PV.
pub const COST_WITH_COLOR: Color = Color::Green;

/// Returns a gauge color for a share: green when high, yellow when medium.
pub fn share_color(share: f64) -> Color {
    if share >= 0.6 {
        Color::Green
    } else if share >= 0.3 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Draws a slider track of `width` cells with a knob at `position` (0..=1).
pub fn slider_track(position: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let knob = (position.clamp(0.0, 1.0) * (width - 1) as f64).round() as usize;
    (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}
