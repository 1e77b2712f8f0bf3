//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Status;

// Row borders and badges reflect task status; overdue work turns red.

/// Pending border
pub const AMBER: Color = Color::Rgb(234, 179, 8);
/// In-progress border
pub const SKY: Color = Color::Rgb(59, 130, 246);
/// Completed border
pub const EMERALD: Color = Color::Rgb(34, 197, 94);
/// Overdue border and due line
pub const CRIMSON: Color = Color::Rgb(239, 68, 68);
/// Confirmation dialog background
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Card and status bar background
pub const SLATE: Color = Color::Rgb(31, 41, 55);

/// Border color for a task row.
pub fn status_border(status: Status, overdue: bool) -> Color {
    if overdue {
        return CRIMSON;
    }
    match status {
        Status::Pending => AMBER,
        Status::InProgress => SKY,
        Status::Completed => EMERALD,
    }
}

/// Badge (background, foreground) for a status.
pub fn status_badge(status: Status) -> (Color, Color) {
    match status {
        Status::Pending => (Color::Rgb(113, 63, 18), Color::Rgb(254, 249, 195)),
        Status::InProgress => (Color::Rgb(30, 58, 138), Color::Rgb(219, 234, 254)),
        Status::Completed => (Color::Rgb(20, 83, 45), Color::Rgb(220, 252, 231)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overdue_overrides_status_color() {
        assert_eq!(status_border(Status::Pending, false), AMBER);
        assert_eq!(status_border(Status::InProgress, false), SKY);
        assert_eq!(status_border(Status::Completed, false), EMERALD);
        assert_eq!(status_border(Status::Pending, true), CRIMSON);
    }
}
