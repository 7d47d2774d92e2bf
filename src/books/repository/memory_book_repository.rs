use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// BookTable keeps records by id plus the order in which ids were first seen.
#[derive(Debug, Default)]
struct BookTable {
    order: Vec<i64>,
    records: HashMap<i64, BookEntity>,
}

impl BookTable {
    fn insert(&mut self, entity: &BookEntity) -> bool {
        let replaced = self.records.insert(entity.id, entity.clone()).is_some();
        if !replaced {
            self.order.push(entity.id);
        }
        replaced
    }
}

#[derive(Debug)]
pub struct MemoryBookRepository {
    table: RwLock<BookTable>,
    table_name: String,
}

impl MemoryBookRepository {
    pub(crate) fn new(table_name: &str) -> Self {
        Self {
            table: RwLock::new(BookTable::default()),
            table_name: table_name.to_string(),
        }
    }

    pub(crate) fn with_records(table_name: &str, records: Vec<BookEntity>) -> Self {
        let mut table = BookTable::default();
        for record in &records {
            let _ = table.insert(record);
        }
        Self {
            table: RwLock::new(table),
            table_name: table_name.to_string(),
        }
    }

    fn not_found(&self, id: i64) -> LibraryError {
        LibraryError::not_found(format!("book not found for {} in {}", id, self.table_name).as_str())
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut table = self.table.write().await;
        if table.records.contains_key(&entity.id) {
            return Err(LibraryError::duplicate_key(
                format!("book already exists for {} in {}", entity.id, self.table_name).as_str()));
        }
        let _ = table.insert(entity);
        Ok(1)
    }

    async fn update(&self, id: i64, entity: &BookEntity) -> LibraryResult<usize> {
        let mut table = self.table.write().await;
        match table.records.get_mut(&id) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(1)
            }
            None => Err(self.not_found(id)),
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        self.table.read().await.records.get(&id).cloned().ok_or_else(|| self.not_found(id))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let mut table = self.table.write().await;
        if table.records.remove(&id).is_none() {
            return Err(self.not_found(id));
        }
        table.order.retain(|other| *other != id);
        Ok(1)
    }

    async fn list(&self) -> LibraryResult<Vec<BookEntity>> {
        let table = self.table.read().await;
        Ok(table.order.iter().filter_map(|id| table.records.get(id)).cloned().collect())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn upsert(&self, entity: &BookEntity) -> LibraryResult<bool> {
        Ok(self.table.write().await.insert(entity))
    }
}
