//! Concrete popup types for the admin TUI.

pub mod alert;
pub mod confirm;

pub use alert::AlertPopup;
pub use confirm::ConfirmPopup;
