use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{action::Action, tui::EventResponse, tui::Frame};

use super::{FormField, FormFieldKind, FormSchema, FormState};

/// Interactive in-page form editor.
///
/// Responsibilities:
/// - Navigation & focus management over the schema's fields
/// - Editing lifecycle (enter edit, commit, cancel) via `tui-input`
/// - Select cycling with Left/Right
/// - Validation dispatch against the field validators
///
/// In read-only mode only navigation works; all mutation keys are ignored.
pub struct FormEditor {
    schema: FormSchema,
    state: FormState,
    read_only: bool,

    focused: usize,
    scroll: usize,
    editing: bool,
    input: Input,
    last_inner_height: u16,
}

impl FormEditor {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            state: FormState::default(),
            read_only: false,
            focused: 0,
            scroll: 0,
            editing: false,
            input: Input::default(),
            last_inner_height: 0,
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        self.state.set_value(key, value);
    }

    pub fn value(&self, key: &str) -> &str {
        self.state.get_value(key).unwrap_or("")
    }

    /// Replace the schema while keeping captured values, clamping focus.
    ///
    /// Used when the address step switches between the domestic and the
    /// foreign field layout after the country changed.
    pub fn set_schema(&mut self, schema: FormSchema) {
        self.schema = schema;
        let max = self.schema.field_count().saturating_sub(1);
        self.focused = self.focused.min(max);
        self.scroll = self.scroll.min(self.focused);
        self.editing = false;
        self.input = Input::default();
    }

    /// Replace the options of a Select field in place, keeping the current
    /// value when it still exists in the new option set.
    pub fn set_select_options(&mut self, key: &str, options: Vec<String>) {
        for field in &mut self.schema.fields {
            if field.key == key {
                if let FormFieldKind::Select { options: opts } = &mut field.kind {
                    *opts = options;
                }
                return;
            }
        }
    }

    fn field_count(&self) -> usize {
        self.schema.fields.len()
    }

    fn current_field(&self) -> Option<&FormField> {
        self.schema.fields.get(self.focused)
    }

    fn focus_next(&mut self) {
        if self.field_count() == 0 {
            return;
        }
        self.focused = (self.focused + 1) % self.field_count();
    }

    fn focus_prev(&mut self) {
        if self.field_count() == 0 {
            return;
        }
        if self.focused == 0 {
            self.focused = self.field_count() - 1;
        } else {
            self.focused -= 1;
        }
    }

    fn cycle_select(&mut self, key: &str, options: &[String], dir: i32) {
        if options.is_empty() {
            return;
        }
        let cur = self
            .state
            .get_value(key)
            .unwrap_or_else(|| options[0].as_str());
        let idx = options.iter().position(|o| o == cur).unwrap_or(0) as i32;
        let len = options.len() as i32;
        let next = (idx + dir).rem_euclid(len) as usize;
        self.state.set_value(key, options[next].clone());
    }

    fn start_editing(&mut self) {
        let existing = match self.current_field() {
            Some(field) if field.is_textual() => self
                .state
                .get_value(&field.key)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            _ => return,
        };
        self.editing = true;
        self.input = Input::default().with_value(existing);
    }

    fn cancel_editing(&mut self) {
        self.editing = false;
        self.input = Input::default();
    }

    fn commit_editing(&mut self) {
        let key = match self.current_field() {
            Some(field) if field.is_textual() => field.key.clone(),
            _ => {
                self.editing = false;
                self.input = Input::default();
                return;
            }
        };
        let value = self.input.value().to_string();
        self.state.set_value(&key, value);
        self.editing = false;
        self.input = Input::default();
    }

    /// Display string for a field's current value.
    fn field_display_value(&self, field: &FormField) -> String {
        match &field.kind {
            FormFieldKind::Text | FormFieldKind::Number => {
                self.state.get_value(&field.key).unwrap_or("").to_string()
            }
            FormFieldKind::Select { options } => self
                .state
                .get_value(&field.key)
                .unwrap_or_else(|| options.first().map(|s| s.as_str()).unwrap_or(""))
                .to_string(),
        }
    }

    /// Run the field validators, storing messages in the state. Returns true
    /// when every field passed.
    pub fn validate(&mut self) -> bool {
        self.state.clear_validation();

        for f in &self.schema.fields {
            let v = self.state.values.get(&f.key).cloned().unwrap_or_default();

            if let Some(val) = &f.validator {
                if let Err(msg) = (val)(&v) {
                    self.state.errors.insert(f.key.clone(), msg);
                    continue;
                }
            }

            if matches!(f.kind, FormFieldKind::Number)
                && !v.is_empty()
                && v.parse::<i64>().is_err()
            {
                self.state
                    .errors
                    .insert(f.key.clone(), "Deve ser um número".into());
            }
        }

        self.state.errors.is_empty() && self.state.global_errors.is_empty()
    }

    pub fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if self.editing {
            match key.code {
                KeyCode::Enter => {
                    self.commit_editing();
                    return Ok(Some(EventResponse::Stop(Action::Update)));
                }
                KeyCode::Esc => {
                    self.cancel_editing();
                    return Ok(Some(EventResponse::Stop(Action::Update)));
                }
                _ => {
                    self.input.handle_event(&crossterm::event::Event::Key(key));
                    return Ok(Some(EventResponse::Stop(Action::Update)));
                }
            }
        }

        match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.focus_prev();
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus_next();
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::PageDown => {
                let jump = self.page_jump();
                for _ in 0..jump {
                    self.focus_next();
                }
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::PageUp => {
                let jump = self.page_jump();
                for _ in 0..jump {
                    self.focus_prev();
                }
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Home => {
                if self.field_count() > 0 {
                    self.focused = 0;
                }
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::End => {
                if self.field_count() > 0 {
                    self.focused = self.field_count() - 1;
                }
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Left | KeyCode::Right if !self.read_only => {
                if let Some(field) = self.current_field() {
                    if let FormFieldKind::Select { options } = &field.kind {
                        let k = field.key.clone();
                        let opts = options.clone();
                        let dir = if matches!(key.code, KeyCode::Left) {
                            -1
                        } else {
                            1
                        };
                        self.cycle_select(&k, &opts, dir);
                        return Ok(Some(EventResponse::Stop(Action::Update)));
                    }
                }
                Ok(None)
            }
            KeyCode::Enter if !self.read_only => {
                if self.current_field().map(|f| f.is_textual()).unwrap_or(false) {
                    self.start_editing();
                    Ok(Some(EventResponse::Stop(Action::Update)))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }

    fn page_jump(&self) -> usize {
        let reserve = if self.last_inner_height > 8 { 4 } else { 2 };
        let visible = self.last_inner_height.saturating_sub(reserve).max(3) as usize;
        visible.saturating_sub(1).max(1)
    }

    fn visible_bounds(&self, inner_height: u16) -> (usize, usize) {
        let reserve = if inner_height > 8 { 4 } else { 2 };
        let max_visible = inner_height.saturating_sub(reserve).max(3) as usize;

        let total = self.field_count();
        if total == 0 {
            return (0, 0);
        }
        let start = self.scroll.min(self.focused).min(total.saturating_sub(1));
        let end = (start + max_visible).min(total);
        (start, end)
    }

    fn ensure_visible(&mut self, inner_height: u16) {
        let reserve = if inner_height > 8 { 4 } else { 2 };
        let max_visible = inner_height.saturating_sub(reserve).max(3) as usize;
        if self.focused < self.scroll {
            self.scroll = self.focused;
        } else if self.focused >= self.scroll + max_visible {
            self.scroll = self.focused + 1 - max_visible;
        }
    }

    pub fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        if area.width < 5 || area.height < 3 {
            return Ok(());
        }

        self.last_inner_height = area.height;

        let mut lines: Vec<Line> = Vec::new();

        if let Some(desc) = &self.schema.description {
            for l in desc.lines() {
                lines.push(Line::from(Span::styled(
                    l.to_string(),
                    Style::default().fg(Color::Gray),
                )));
            }
            lines.push(Line::raw(""));
        }

        if !self.state.global_errors.is_empty() {
            lines.push(
                Line::from("Erros:")
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            );
            for e in &self.state.global_errors {
                lines.push(Line::from(Span::styled(
                    format!("• {}", e),
                    Style::default().fg(Color::Red),
                )));
            }
            lines.push(Line::raw(""));
        }

        self.ensure_visible(area.height);
        let (start, end) = self.visible_bounds(area.height);

        for (idx, field) in self.schema.fields[start..end].iter().enumerate() {
            let absolute_idx = start + idx;
            let focused = absolute_idx == self.focused;

            let mut spans = vec![Span::styled(
                format!("{}:", field.label),
                Style::default().fg(Color::White).add_modifier(if focused {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
            )];

            let value = if focused && self.editing && field.is_textual() {
                self.input.value().to_string()
            } else {
                self.field_display_value(field)
            };

            spans.push(Span::raw(" "));
            let value_style = if focused && self.editing {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else if focused {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::Cyan)
            };
            spans.push(Span::styled(value, value_style));

            lines.push(Line::from(spans));

            if let Some(h) = &field.help {
                lines.push(Line::from(Span::styled(
                    h,
                    Style::default().fg(Color::DarkGray),
                )));
            }

            if let Some(err) = self.state.errors.get(&field.key) {
                lines.push(Line::from(Span::styled(err, Style::default().fg(Color::Red))));
            }

            lines.push(Line::raw(""));
        }

        let para = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        f.render_widget(para, area);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_schema() -> FormSchema {
        FormSchema::new(
            "Dados",
            vec![
                FormField::new("nome", "Nome", FormFieldKind::Text).validator(|v| {
                    if v.trim().is_empty() {
                        Err("O campo Nome é obrigatório".into())
                    } else {
                        Ok(())
                    }
                }),
                FormField::new("sigla", "Sigla", FormFieldKind::Text),
                FormField::new(
                    "pais",
                    "País",
                    FormFieldKind::Select {
                        options: vec!["Brasil".into(), "Argentina".into()],
                    },
                ),
            ],
        )
    }

    #[test]
    fn focus_wraps_both_directions() {
        let mut editor = FormEditor::new(sample_schema());
        editor.handle_key_events(key(KeyCode::Up)).unwrap();
        assert_eq!(editor.focused, 2);
        editor.handle_key_events(key(KeyCode::Down)).unwrap();
        assert_eq!(editor.focused, 0);
    }

    #[test]
    fn enter_edit_commit_updates_value() {
        let mut editor = FormEditor::new(sample_schema());
        editor.handle_key_events(key(KeyCode::Enter)).unwrap();
        assert!(editor.is_editing());
        editor.handle_key_events(key(KeyCode::Char('U'))).unwrap();
        editor.handle_key_events(key(KeyCode::Char('F'))).unwrap();
        editor.handle_key_events(key(KeyCode::Enter)).unwrap();
        assert!(!editor.is_editing());
        assert_eq!(editor.value("nome"), "UF");
    }

    #[test]
    fn esc_cancels_edit_without_committing() {
        let mut editor = FormEditor::new(sample_schema());
        editor.set_value("nome", "original");
        editor.handle_key_events(key(KeyCode::Enter)).unwrap();
        editor.handle_key_events(key(KeyCode::Char('x'))).unwrap();
        editor.handle_key_events(key(KeyCode::Esc)).unwrap();
        assert_eq!(editor.value("nome"), "original");
    }

    #[test]
    fn select_cycles_with_wraparound() {
        let mut editor = FormEditor::new(sample_schema());
        editor.focused = 2;
        editor.handle_key_events(key(KeyCode::Right)).unwrap();
        assert_eq!(editor.value("pais"), "Argentina");
        editor.handle_key_events(key(KeyCode::Right)).unwrap();
        assert_eq!(editor.value("pais"), "Brasil");
        editor.handle_key_events(key(KeyCode::Left)).unwrap();
        assert_eq!(editor.value("pais"), "Argentina");
    }

    #[test]
    fn read_only_ignores_mutation_keys() {
        let mut editor = FormEditor::new(sample_schema()).read_only(true);
        editor.set_value("nome", "UFMG");
        editor.handle_key_events(key(KeyCode::Enter)).unwrap();
        assert!(!editor.is_editing());
        editor.focused = 2;
        editor.set_value("pais", "Brasil");
        editor.handle_key_events(key(KeyCode::Right)).unwrap();
        assert_eq!(editor.value("pais"), "Brasil");
    }

    #[test]
    fn validate_reports_missing_required_field() {
        let mut editor = FormEditor::new(sample_schema());
        assert!(!editor.validate());
        assert!(editor.state().errors.contains_key("nome"));
        editor.set_value("nome", "Universidade");
        assert!(editor.validate());
    }

    #[test]
    fn set_schema_keeps_values_and_clamps_focus() {
        let mut editor = FormEditor::new(sample_schema());
        editor.set_value("nome", "UFMG");
        editor.focused = 2;
        editor.set_schema(FormSchema::new(
            "Endereço",
            vec![FormField::new("cep", "CEP", FormFieldKind::Text)],
        ));
        assert_eq!(editor.focused, 0);
        assert_eq!(editor.value("nome"), "UFMG");
    }
}
