use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::Genre;

// BookEntity is the record kept by the book store, one per catalog id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: Genre,
}

impl BookEntity {
    pub fn new(id: i64, title: &str, author: &str, publication_year: i32, genre: Genre) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            publication_year,
            genre,
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn genre(&self) -> Genre {
        self.genre
    }
}
