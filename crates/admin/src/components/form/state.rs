use std::collections::HashMap;

/// Mutable state captured while editing a form step.
///
/// - `values`: stringified values for textual / numeric / select fields
/// - `errors`: per-field validation errors (populated during validation)
/// - `global_errors`: cross-field or form-level validation messages
#[derive(Default, Clone)]
pub struct FormState {
    pub values: HashMap<String, String>,
    pub errors: HashMap<String, String>,
    pub global_errors: Vec<String>,
}

impl FormState {
    /// Set (or replace) a scalar value for a field.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Get a scalar value for a field (if present).
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Clear all validation artifacts (field + global).
    pub fn clear_validation(&mut self) {
        self.errors.clear();
        self.global_errors.clear();
    }
}
