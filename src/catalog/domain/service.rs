use std::collections::HashMap;
use async_trait::async_trait;
use tracing::{debug, info};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::{Configuration, DuplicatePolicy};
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::gateway::events::EventPublisher;

pub(crate) struct CatalogServiceImpl {
    duplicate_policy: DuplicatePolicy,
    metadata: HashMap<String, String>,
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            duplicate_policy: config.duplicate_policy,
            metadata: HashMap::from([("branch".to_string(), config.branch_id.to_string())]),
            book_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        book.validate()?;
        let entity = BookEntity::from(book);
        let replaced = match self.duplicate_policy {
            DuplicatePolicy::Reject => {
                let _ = self.book_repository.create(&entity).await?;
                false
            }
            DuplicatePolicy::Overwrite => self.book_repository.upsert(&entity).await?,
        };
        // an overwrite is reported as an update of the existing record
        let event = if replaced {
            DomainEvent::updated("books", "catalog", &self.metadata, book)?
        } else {
            DomainEvent::added("books", "catalog", &self.metadata, book)?
        };
        let _ = self.events_publisher.publish(&event).await?;
        info!(book_id = book.id, genre = %book.genre(), replaced, "book added");
        Ok(book.clone())
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.list().await?;
        debug!(count = res.len(), "books listed");
        Ok(res.iter().map(BookDto::from).collect())
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn update_book(&self, id: i64, book: &BookDto) -> LibraryResult<BookDto> {
        if book.id != id {
            return Err(LibraryError::validation(
                format!("book id {} does not match path id {}", book.id, id).as_str(), Some("id".to_string())));
        }
        book.validate()?;
        let _ = self.book_repository.update(id, &BookEntity::from(book)).await?;
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "books", "catalog", &self.metadata, book)?).await?;
        info!(book_id = id, "book updated");
        Ok(book.clone())
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<()> {
        let res = self.book_repository.delete(id).await.map(|_| ())?;
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "books", "catalog", &self.metadata, id)?).await?;
        info!(book_id = id, "book removed");
        Ok(res)
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            publication_year: other.publication_year,
            genre: other.genre,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            id: other.id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            publication_year: other.publication_year,
            genre: other.genre,
        }
    }
}
