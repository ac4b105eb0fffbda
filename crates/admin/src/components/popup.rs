use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::{components::Component, tui::Frame};

/// Popup components and helpers.
///
/// Usage:
/// 1) Draw the active page as usual
/// 2) If a popup is active:
///    - call `render_backdrop(frame, area)`
///    - compute a centered rect with `centered_rect_fixed(area, width, height)`
///    - call `draw_popup_frame(frame, popup_area, "Title")`
///    - draw the popup content inside the same `popup_area`
pub trait PopupComponent: Component {
    /// Whether the popup is modal (blocks page interactions). Defaults to true.
    fn is_modal(&self) -> bool {
        true
    }
}

/// Render a modal-style backdrop that visually separates a popup from the
/// underlying page. Terminals have no transparency, so a dark fill stands in
/// for a dim overlay.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect) {
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, area);
}

/// Compute a centered rectangle with a fixed width/height clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(h)) / 2);

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Draw a rounded, bordered popup shell with a title at `area`, clearing the
/// area first so underlying content doesn't bleed through.
pub fn draw_popup_frame(frame: &mut Frame<'_>, area: Rect, title: impl Into<String>) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(block, area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_clamps_to_available_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect_fixed(area, 60, 20);
        assert_eq!((r.width, r.height), (40, 10));

        let r = centered_rect_fixed(area, 20, 6);
        assert_eq!((r.x, r.y, r.width, r.height), (10, 2, 20, 6));
    }
}
