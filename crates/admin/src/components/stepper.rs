use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::Frame;

/// Horizontal step indicator rendered above multi-step forms.
///
/// Completed and current steps are highlighted, upcoming steps are dimmed.
pub struct Stepper {
    labels: Vec<String>,
    current: usize,
}

impl Stepper {
    pub fn new<S: Into<String>>(labels: Vec<S>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            current: 0,
        }
    }

    pub fn select(&mut self, index: usize) {
        self.current = index.min(self.labels.len().saturating_sub(1));
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        if area.height == 0 {
            return;
        }

        let active = Style::default().fg(Color::Black).bg(Color::White).bold();
        let done = Style::default().fg(Color::White);
        let pending = Style::default().fg(Color::DarkGray);

        let mut spans: Vec<Span> = Vec::new();
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ── ", pending));
            }
            let style = match i.cmp(&self.current) {
                std::cmp::Ordering::Less => done,
                std::cmp::Ordering::Equal => active,
                std::cmp::Ordering::Greater => pending,
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, label), style));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_clamps_to_last_step() {
        let mut stepper = Stepper::new(vec!["Dados", "Endereço"]);
        stepper.select(7);
        assert_eq!(stepper.current(), 1);
    }

    #[test]
    fn select_moves_between_steps() {
        let mut stepper = Stepper::new(vec!["Dados", "Endereço"]);
        assert_eq!(stepper.current(), 0);
        stepper.select(1);
        assert_eq!(stepper.current(), 1);
        stepper.select(0);
        assert_eq!(stepper.current(), 0);
    }
}
