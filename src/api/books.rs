use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::api::error::ApiError;
use crate::domain::{query, BookInput, ListParams};
use crate::infrastructure::AppState;
use crate::services::book_service;

#[utoipa::path(
    get,
    path = "/api/books",
    params(ListParams),
    responses(
        (status = 200, description = "List books; paginated envelope unless pagination=false")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let opts = query::translate("books", &params);

    if params.paginate() {
        let rows = state.book_repo.find_and_count(&opts).await?;
        Ok(Json(rows).into_response())
    } else {
        let books = state.book_repo.find(&opts).await?;
        Ok(Json(books).into_response())
    }
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    responses(
        (status = 200, description = "The book", body = crate::models::Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let book = book_service::find_one(state.book_repo.as_ref(), id).await?;
    Ok(Json(book))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = crate::models::Book),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced section not found"),
        (status = 409, description = "Duplicate (title, author)")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(input): Json<BookInput>,
) -> Result<impl IntoResponse, ApiError> {
    let book =
        book_service::create(state.book_repo.as_ref(), state.section_repo.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = crate::models::Book),
        (status = 404, description = "Book or referenced section not found"),
        (status = 409, description = "Duplicate (title, author)")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<BookInput>,
) -> Result<impl IntoResponse, ApiError> {
    let book = book_service::update(
        state.book_repo.as_ref(),
        state.section_repo.as_ref(),
        id,
        input,
    )
    .await?;
    Ok(Json(book))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    book_service::remove(state.book_repo.as_ref(), id).await?;
    Ok(Json(json!({ "message": "Book deleted" })))
}
