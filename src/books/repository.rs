pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;


#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    // create or replace a book, keeping the position of a replaced one;
    // returns true when a book was replaced
    async fn upsert(&self, entity: &BookEntity) -> LibraryResult<bool>;
}
