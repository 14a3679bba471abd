//! Terminal rendering for the machine. Tightly coupled to ratatui and kept
//! out of the library.

pub mod login_scene;
pub mod machine_scene;
pub mod panels;
pub mod result_modal;
pub mod throbber;

use lucky_drop::prizes::Rarity;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

pub fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::Gray,
        Rarity::Rare => Color::Magenta,
        Rarity::Legendary => Color::Yellow,
    }
}

/// Centers a `percent_x` by `percent_y` rect inside `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
