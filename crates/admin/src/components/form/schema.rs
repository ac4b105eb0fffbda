use super::FormField;

/// Declarative schema for a multi-field form step.
///
/// Fields:
/// - `title`:       Display title above the fields
/// - `description`: Optional descriptive text rendered under the title
/// - `fields`:      Ordered collection of `FormField` definitions
///
/// Validation and transformation rules remain attached to each `FormField`
/// via its optional validator closure.
pub struct FormSchema {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields,
        }
    }

    /// Attach an optional description (multi-line friendly).
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Find a field by its key.
    pub fn field_by_key(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }
}
