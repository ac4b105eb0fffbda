/// A single form field kind supported by the form system.
///
/// Notes:
/// - Text / Number render as single-line editors
/// - Select cycles through provided options with Left/Right
#[derive(Debug, Clone)]
pub enum FormFieldKind {
    Text,
    Number,
    Select { options: Vec<String> },
}

/// Declarative description of a form field.
///
/// `validator` (optional):
///   A function receiving the current field value and returning:
///     Ok(())          -> value accepted
///     Err(message)    -> validation error message (displayed inline)
pub struct FormField {
    pub key: String,
    pub label: String,
    pub kind: FormFieldKind,
    pub help: Option<String>,
    pub validator: Option<Box<dyn Fn(&str) -> std::result::Result<(), String> + Send + Sync>>,
}

impl FormField {
    /// Create a new field definition.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FormFieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            help: None,
            validator: None,
        }
    }

    /// Attach optional help / hint text shown beneath the field.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Attach a validator closure for the field.
    pub fn validator(
        mut self,
        f: impl Fn(&str) -> std::result::Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(f));
        self
    }

    /// Return true if this field uses a textual editor when focused.
    pub fn is_textual(&self) -> bool {
        matches!(self.kind, FormFieldKind::Text | FormFieldKind::Number)
    }
}
