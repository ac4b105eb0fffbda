use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::Action,
    components::Component,
    components::popup::{PopupComponent, centered_rect_fixed, draw_popup_frame},
    tui::{EventResponse, Frame},
};

/// Simple modal alert popup with a title, a message and standard controls:
/// - Enter / Esc: acknowledge (emits Action::ClosePopup)
///
/// Used for every blocking user-facing message: validation failures, failed
/// mutating requests, and submission confirmations.
pub struct AlertPopup {
    title: String,
    message: String,
    min_width: u16,
    min_height: u16,
}

impl AlertPopup {
    pub fn new<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        let message = message.into();
        // Grow with the message so multi-line validation reports stay visible.
        let min_height = (7 + message.lines().count().saturating_sub(1) as u16).min(20);
        Self {
            title: title.into(),
            message,
            min_width: 60,
            min_height,
        }
    }

    fn inner_rect(area: Rect) -> Rect {
        let x = area.x.saturating_add(1);
        let y = area.y.saturating_add(1);
        let width = area.width.saturating_sub(2);
        let height = area.height.saturating_sub(2);
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl Component for AlertPopup {
    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(Action::ClosePopup),
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            // Not enough space to draw a dialog; do nothing
            return Ok(());
        }

        let w = self.min_width.min(area.width);
        let h = self.min_height.min(area.height);
        let dialog = centered_rect_fixed(area, w, h);

        let _ = draw_popup_frame(f, dialog, &self.title);

        let inner = Self::inner_rect(dialog);

        let mut lines: Vec<Line> = Vec::new();
        for paragraph in self.message.lines() {
            lines.push(Line::from(Span::raw(paragraph)));
        }

        if inner.height >= 3 {
            lines.push(Line::raw(""));
        }

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::White)),
            Span::raw(": OK   "),
            Span::styled("Esc", Style::default().fg(Color::White)),
            Span::raw(": Fechar"),
        ])
        .fg(Color::DarkGray);
        lines.push(hint);

        let text = Text::from(lines);
        let para = Paragraph::new(text).wrap(Wrap { trim: true });

        f.render_widget(para, inner);
        Ok(())
    }
}

impl PopupComponent for AlertPopup {}
