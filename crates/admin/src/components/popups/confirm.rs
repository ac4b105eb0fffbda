use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::{Action, PopupResult},
    components::Component,
    components::popup::{PopupComponent, centered_rect_fixed, draw_popup_frame},
    tui::{EventResponse, Frame},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Ok,
    Cancel,
}

/// Modal confirmation popup with selectable OK/Cancel buttons.
///
/// Behavior:
/// - Arrow Left/Right or Tab/BackTab: switch selected button
/// - Enter: submit (emits Action::PopupResult with Confirmed/Cancelled)
/// - Esc: cancel (emits Action::PopupResult(Cancelled))
///
/// The application routes the `PopupResult` to the active page (which knows
/// what was pending) and closes the popup.
pub struct ConfirmPopup {
    title: String,
    question: String,
    ok_label: String,
    cancel_label: String,
    selected: Choice,
    min_width: u16,
    min_height: u16,
}

impl ConfirmPopup {
    pub fn new<T: Into<String>, Q: Into<String>>(title: T, question: Q) -> Self {
        Self {
            title: title.into(),
            question: question.into(),
            ok_label: "OK".into(),
            cancel_label: "Cancelar".into(),
            selected: Choice::Ok,
            min_width: 60,
            min_height: 9,
        }
    }

    fn selection_action(&self) -> Action {
        match self.selected {
            Choice::Ok => Action::PopupResult(PopupResult::Confirmed),
            Choice::Cancel => Action::PopupResult(PopupResult::Cancelled),
        }
    }

    fn toggle_selection(&mut self) {
        self.selected = match self.selected {
            Choice::Ok => Choice::Cancel,
            Choice::Cancel => Choice::Ok,
        };
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

impl Component for ConfirmPopup {
    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_selection();
                None
            }
            KeyCode::Enter => Some(self.selection_action()),
            KeyCode::Esc => Some(Action::PopupResult(PopupResult::Cancelled)),
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let w = self.min_width.min(area.width);
        let h = self.min_height.min(area.height);
        let dialog = centered_rect_fixed(area, w, h);

        draw_popup_frame(f, dialog, self.title.clone());

        let inner = Self::inner_rect(dialog);

        let mut lines: Vec<Line> = Vec::new();
        for l in self.question.lines() {
            lines.push(Line::from(Span::raw(l)));
        }

        if inner.height >= 3 {
            lines.push(Line::raw(""));
        }

        let selected_style = Style::default().fg(Color::Black).bg(Color::White).bold();
        let unselected_style = Style::default().fg(Color::White).bg(Color::Black);

        let ok_span = Span::styled(
            format!("[ {} ]", self.ok_label),
            if self.selected == Choice::Ok {
                selected_style
            } else {
                unselected_style
            },
        );
        let cancel_span = Span::styled(
            format!("[ {} ]", self.cancel_label),
            if self.selected == Choice::Cancel {
                selected_style
            } else {
                unselected_style
            },
        );

        // Center the button row by left-padding with spaces
        let spacing = "   ";
        let buttons_len =
            (2 + self.ok_label.len() + 2) + spacing.len() + (2 + self.cancel_label.len() + 2);
        let total_width = inner.width as usize;
        let pad = total_width.saturating_sub(buttons_len) / 2;
        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(ok_span);
        spans.push(Span::raw(spacing));
        spans.push(cancel_span);
        lines.push(Line::from(spans));

        if inner.height >= 4 {
            lines.push(Line::raw(""));
            let hints = Line::from(vec![
                Span::styled("←/→/Tab", Style::default().fg(Color::White)),
                Span::raw(": Selecionar   "),
                Span::styled("Enter", Style::default().fg(Color::White)),
                Span::raw(": Confirmar   "),
                Span::styled("Esc", Style::default().fg(Color::White)),
                Span::raw(": Cancelar"),
            ])
            .fg(Color::DarkGray);
            lines.push(hints);
        }

        let text = Text::from(lines);
        let para = Paragraph::new(text).wrap(Wrap { trim: true });
        f.render_widget(para, inner);

        Ok(())
    }
}

impl PopupComponent for ConfirmPopup {}
