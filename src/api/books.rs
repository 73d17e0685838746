//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookKey, CreateBook, UpdateBook},
    AppState,
};

use super::{MessageResponse, ValidatedJson};

/// Add a new book
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(book): ValidatedJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Get a book by title and author
#[utoipa::path(
    get,
    path = "/book/{title}/{author}",
    tag = "books",
    params(
        ("title" = String, Path, description = "Book title"),
        ("author" = String, Path, description = "Book author")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path((title, author)): Path<(String, String)>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(&BookKey::new(title, author)).await?;
    Ok(Json(book))
}

/// Update a book's publication year, page count and/or copy count
#[utoipa::path(
    put,
    path = "/book/{title}/{author}",
    tag = "books",
    params(
        ("title" = String, Path, description = "Book title"),
        ("author" = String, Path, description = "Book author")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path((title, author)): Path<(String, String)>,
    ValidatedJson(update): ValidatedJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let key = BookKey::new(title, author);
    let updated = state.services.catalog.update_book(&key, update).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/book/{title}/{author}",
    tag = "books",
    params(
        ("title" = String, Path, description = "Book title"),
        ("author" = String, Path, description = "Book author")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Copies still on loan", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path((title, author)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete_book(&BookKey::new(title, author)).await?;
    Ok(MessageResponse::new("Book deleted successfully"))
}
