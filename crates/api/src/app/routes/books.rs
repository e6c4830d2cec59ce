use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use library_core::Entity;
use library_inventory::{BookId, Catalog, NewBook};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/:id", get(get_book))
}

pub async fn list_books(Extension(catalog): Extension<Arc<Catalog>>) -> axum::response::Response {
    (StatusCode::OK, Json(catalog.list())).into_response()
}

pub async fn get_book(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match catalog.get(&BookId::from(id)) {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_book(
    Extension(catalog): Extension<Arc<Catalog>>,
    body: Result<Json<dto::CreateBookRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected malformed create payload");
            return errors::malformed_body(rejection);
        }
    };

    match catalog.create(NewBook::from(body)) {
        Ok(book) => {
            tracing::info!(book_id = %book.id(), quantity = book.quantity(), "book created");
            (StatusCode::CREATED, Json(book)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "book creation rejected");
            errors::domain_error_to_response(e)
        }
    }
}
