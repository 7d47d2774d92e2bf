use crate::core::domain::Identifiable;
use crate::core::library::{Genre, LibraryError, LibraryResult};

pub mod model;

pub trait Book: Identifiable {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn genre(&self) -> Genre;

    // title and author must hold more than whitespace
    fn validate(&self) -> LibraryResult<()> {
        if self.title().trim().is_empty() {
            return Err(LibraryError::validation(
                format!("title must not be empty for book {}", self.id()).as_str(), Some("title".to_string())));
        }
        if self.author().trim().is_empty() {
            return Err(LibraryError::validation(
                format!("author must not be empty for book {}", self.id()).as_str(), Some("author".to_string())));
        }
        Ok(())
    }
}
