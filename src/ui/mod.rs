/// Presentation layer: form, results window, notifications.
pub mod links;
pub mod panels;
pub mod table;
pub mod toast;
