//! Declarative form system used by the institution editor.
//!
//! - `field`:  field kinds and per-field metadata (`FormField`, `FormFieldKind`)
//! - `schema`: groups fields into a `FormSchema` with presentation hints
//! - `state`:  mutable runtime editing state (`FormState`)
//! - `editor`: interactive in-page editor (`FormEditor`) with rendering

pub mod editor;
pub mod field;
pub mod schema;
pub mod state;

pub use editor::FormEditor;
pub use field::{FormField, FormFieldKind};
pub use schema::FormSchema;
pub use state::FormState;
