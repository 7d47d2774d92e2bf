use axum::{
    body::{Bytes, HttpBody},
    BoxError,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::debug;
use crate::books::dto::BookDto;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::core::command::Command;
use crate::core::controller::{AppState, book_not_found, BookId, json_to_server_error, ServerError};

// generic over the body so both hyper and lambda requests can be routed
pub(crate) fn build_router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static, B::Data: Send, B::Error: Into<BoxError> {
    Router::new()
        .route("/api/v1/books", get(list_books).post(add_book))
        .route("/api/v1/books/", get(list_books).post(add_book))
        .route("/api/v1/books/:id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .with_state(state)
}

// non-numeric ids cannot name a book, so they never reach the catalog
fn parse_book_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse::<BookId>().map(|id| id.0).map_err(|err| {
        debug!(error = %err, "rejected book id");
        book_not_found()
    })
}

// bodies are decoded by hand: malformed JSON must answer 422 with a detail body
pub(crate) async fn add_book(
    State(state): State<AppState>,
    body: Bytes) -> Result<(StatusCode, Json<BookDto>), ServerError> {
    let req: AddBookCommandRequest = serde_json::from_slice(&body).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res.book)))
}

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let res = ListBooksCommand::new(state.catalog).execute(ListBooksCommandRequest::new()).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<BookDto>, ServerError> {
    let req = GetBookCommandRequest::new(parse_book_id(book_id.as_str())?);
    let res = GetBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res.book))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    body: Bytes) -> Result<Json<BookDto>, ServerError> {
    let book_id = parse_book_id(book_id.as_str())?;
    let book: BookDto = serde_json::from_slice(&body).map_err(json_to_server_error)?;
    let res = UpdateBookCommand::new(state.catalog).execute(UpdateBookCommandRequest::new(book_id, book)).await?;
    Ok(Json(res.book))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<StatusCode, ServerError> {
    let req = RemoveBookCommandRequest::new(parse_book_id(book_id.as_str())?);
    let _ = RemoveBookCommand::new(state.catalog).execute(req).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::catalog::controller::build_router;
    use crate::core::controller::AppState;
    use crate::core::domain::{Configuration, DuplicatePolicy};

    fn app(config: Configuration) -> Router {
        build_router(AppState::new(&config))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Option<Value>) {
        send(app, method, uri, body.map(|b| b.to_string())).await
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Option<Value>) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder.header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)).expect("should build request"),
            None => builder.body(Body::empty()).expect("should build request"),
        };
        let res = app.clone().oneshot(req).await.expect("should respond");
        let status = res.status();
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        if bytes.is_empty() {
            (status, None)
        } else {
            (status, Some(serde_json::from_slice(&bytes).expect("should be json")))
        }
    }

    fn dune(id: i64) -> Value {
        json!({"id": id, "title": "Dune", "author": "Frank Herbert", "publication_year": 1965, "genre": "Science Fiction"})
    }

    #[tokio::test]
    async fn test_should_create_book() {
        let app = app(Configuration::new("test"));
        let (status, body) = call(&app, Method::POST, "/api/v1/books/", Some(dune(4))).await;
        assert_eq!(StatusCode::CREATED, status);
        assert_eq!(Some(dune(4)), body);

        let (status, body) = call(&app, Method::GET, "/api/v1/books/4", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(Some(dune(4)), body);
    }

    #[tokio::test]
    async fn test_should_list_books_keyed_by_id() {
        let app = app(Configuration::new("test"));
        let (status, body) = call(&app, Method::GET, "/api/v1/books", None).await;
        assert_eq!(StatusCode::OK, status);
        let body = body.expect("should have body");
        let books = body.as_object().expect("should be object");
        assert_eq!(3, books.len());
        assert_eq!("The Lord of the Rings", books["2"]["title"]);
        assert_eq!("Fantasy", books["2"]["genre"]);
    }

    #[tokio::test]
    async fn test_should_run_seed_scenario() {
        let app = app(Configuration::new("test"));
        let (status, body) = call(&app, Method::GET, "/api/v1/books/2", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("The Lord of the Rings", body.expect("should have body")["title"]);

        let (status, body) = call(&app, Method::DELETE, "/api/v1/books/2", None).await;
        assert_eq!(StatusCode::NO_CONTENT, status);
        assert_eq!(None, body);

        let (_, body) = call(&app, Method::GET, "/api/v1/books", None).await;
        let body = body.expect("should have body");
        let mut ids: Vec<&String> = body.as_object().expect("should be object").keys().collect();
        ids.sort();
        assert_eq!(vec!["1", "3"], ids);

        let (status, body) = call(&app, Method::GET, "/api/v1/books/2", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert!(body.expect("should have body").get("detail").is_some());
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let app = app(Configuration::new("test"));
        let (status, body) = call(&app, Method::PUT, "/api/v1/books/1", Some(dune(1))).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(Some(dune(1)), body);

        let (status, _) = call(&app, Method::PUT, "/api/v1/books/9", Some(dune(9))).await;
        assert_eq!(StatusCode::NOT_FOUND, status);

        let (status, _) = call(&app, Method::PUT, "/api/v1/books/2", Some(dune(1))).await;
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status);
    }

    #[tokio::test]
    async fn test_should_reject_non_numeric_ids() {
        let app = app(Configuration::new("test"));
        for uri in ["/api/v1/books/abc", "/api/v1/books/-1", "/api/v1/books/+2"] {
            let (status, body) = call(&app, Method::GET, uri, None).await;
            assert_eq!(StatusCode::NOT_FOUND, status, "{}", uri);
            assert_eq!(Some(json!({"detail": "Book not found"})), body);
            let (status, _) = call(&app, Method::DELETE, uri, None).await;
            assert_eq!(StatusCode::NOT_FOUND, status, "{}", uri);
            let (status, _) = call(&app, Method::PUT, uri, Some(dune(2))).await;
            assert_eq!(StatusCode::NOT_FOUND, status, "{}", uri);
        }
        let (_, body) = call(&app, Method::GET, "/api/v1/books", None).await;
        assert_eq!(3, body.expect("should have body").as_object().expect("should be object").len());
    }

    #[tokio::test]
    async fn test_should_handle_duplicate_ids() {
        let app = app(Configuration::new("test"));
        let (status, _) = call(&app, Method::POST, "/api/v1/books", Some(dune(1))).await;
        assert_eq!(StatusCode::CONFLICT, status);

        let mut config = Configuration::new("test");
        config.duplicate_policy = DuplicatePolicy::Overwrite;
        let app = self::app(config);
        let (status, _) = call(&app, Method::POST, "/api/v1/books", Some(dune(1))).await;
        assert_eq!(StatusCode::CREATED, status);
        let (_, body) = call(&app, Method::GET, "/api/v1/books/1", None).await;
        assert_eq!(Some(dune(1)), body);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_body() {
        let app = app(Configuration::new("test"));
        let body = json!({"id": 5, "title": "Dune", "author": "Frank Herbert", "publication_year": 1965, "genre": "Poetry"});
        let (status, _) = call(&app, Method::POST, "/api/v1/books", Some(body)).await;
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status);

        let body = json!({"id": 5, "title": "", "author": "Frank Herbert", "publication_year": 1965, "genre": "Horror"});
        let (status, _) = call(&app, Method::POST, "/api/v1/books", Some(body)).await;
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status);

        let (status, _) = call(&app, Method::GET, "/api/v1/books/5", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
    }

    #[tokio::test]
    async fn test_should_reject_malformed_body() {
        let app = app(Configuration::new("test"));
        let (status, body) = send(&app, Method::POST, "/api/v1/books", Some(r#"{"id": 5,"#.to_string())).await;
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status);
        assert!(body.expect("should have body").get("detail").is_some());

        let (status, body) = send(&app, Method::PUT, "/api/v1/books/1", Some("not json".to_string())).await;
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status);
        assert!(body.expect("should have body").get("detail").is_some());

        let (status, body) = send(&app, Method::POST, "/api/v1/books", None).await;
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status);
        assert!(body.expect("should have body").get("detail").is_some());

        let (_, body) = call(&app, Method::GET, "/api/v1/books/1", None).await;
        assert_eq!("The Hobbit", body.expect("should have body")["title"]);
    }

    #[tokio::test]
    async fn test_should_reject_bad_id_before_bad_body() {
        let app = app(Configuration::new("test"));
        let (status, body) = send(&app, Method::PUT, "/api/v1/books/abc", Some(r#"{"id": "#.to_string())).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(Some(json!({"detail": "Book not found"})), body);
    }
}
