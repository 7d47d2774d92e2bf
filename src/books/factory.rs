use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::library::Genre;

pub(crate) fn create_book_repository(config: &Configuration) -> Box<dyn BookRepository> {
    if config.seed_catalog {
        Box::new(MemoryBookRepository::with_records("books", seed_books()))
    } else {
        Box::new(MemoryBookRepository::new("books"))
    }
}

// records the catalog starts with
pub(crate) fn seed_books() -> Vec<BookEntity> {
    vec![
        BookEntity::new(1, "The Hobbit", "J.R.R. Tolkien", 1937, Genre::SciFi),
        BookEntity::new(2, "The Lord of the Rings", "J.R.R. Tolkien", 1954, Genre::Fantasy),
        BookEntity::new(3, "The Return of the King", "J.R.R. Tolkien", 1955, Genre::Fantasy),
    ]
}
