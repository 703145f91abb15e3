mod document;
mod workspace;

pub use document::{Document, DocumentUpdate, ReorderPosition, UNTITLED};
pub use workspace::Workspace;

/// Normalize a user-supplied title. Blank titles become "Untitled".
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}
