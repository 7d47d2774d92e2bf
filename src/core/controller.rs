use std::str::FromStr;
use std::sync::Arc;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory::create_catalog_service;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::LibraryError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(config: &Configuration) -> AppState {
        AppState {
            catalog: create_catalog_service(config),
        }
    }
}

pub(crate) type ServerError = (StatusCode, Json<Value>);

fn server_error(status: StatusCode, detail: &str) -> ServerError {
    (status, Json(json!({ "detail": detail })))
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    server_error(StatusCode::UNPROCESSABLE_ENTITY, format!("{}", err).as_str())
}

pub fn book_not_found() -> ServerError {
    server_error(StatusCode::NOT_FOUND, "Book not found")
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::DuplicateKey { .. } => {
                server_error(StatusCode::CONFLICT, err.to_string().as_str())
            }
            CommandError::NotFound { .. } => {
                server_error(StatusCode::NOT_FOUND, err.to_string().as_str())
            }
            CommandError::Runtime { .. } => {
                server_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string().as_str())
            }
            CommandError::Serialization { .. } => {
                server_error(StatusCode::UNPROCESSABLE_ENTITY, err.to_string().as_str())
            }
            CommandError::Validation { .. } => {
                server_error(StatusCode::UNPROCESSABLE_ENTITY, err.to_string().as_str())
            }
        }
    }
}

// BookId is a path identifier: ASCII digits only, fitting in i64.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) struct BookId(pub(crate) i64);

impl FromStr for BookId {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LibraryError::validation(
                format!("book id {:?} is not a non-negative integer", s).as_str(), Some("book_id".to_string())));
        }
        s.parse::<i64>().map(BookId).map_err(|err| LibraryError::validation(
            format!("book id {:?} is out of range: {}", s, err).as_str(), Some("book_id".to_string())))
    }
}
