//! Checkout and return endpoints. Both take the book id as `?id=`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::patch,
};

use library_core::{DomainResult, Entity};
use library_inventory::{Book, BookId, Catalog};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/checkout", patch(checkout_book))
        .route("/return", patch(return_book))
}

pub async fn checkout_book(
    Extension(catalog): Extension<Arc<Catalog>>,
    query: Result<Query<dto::IdQuery>, QueryRejection>,
) -> axum::response::Response {
    let id = match book_id_from_query(query) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond("checked out", catalog.checkout(&id))
}

pub async fn return_book(
    Extension(catalog): Extension<Arc<Catalog>>,
    query: Result<Query<dto::IdQuery>, QueryRejection>,
) -> axum::response::Response {
    let id = match book_id_from_query(query) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond("returned", catalog.return_book(&id))
}

fn book_id_from_query(
    query: Result<Query<dto::IdQuery>, QueryRejection>,
) -> Result<BookId, axum::response::Response> {
    let Query(q) = query.map_err(errors::malformed_query)?;
    match q.id {
        Some(id) if !id.trim().is_empty() => Ok(BookId::from(id)),
        _ => Err(errors::missing_id()),
    }
}

fn respond(action: &'static str, result: DomainResult<Book>) -> axum::response::Response {
    match result {
        Ok(book) => {
            tracing::info!(book_id = %book.id(), quantity = book.quantity(), "book {action}");
            (StatusCode::OK, Json(book)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "book not {action}");
            errors::domain_error_to_response(e)
        }
    }
}
