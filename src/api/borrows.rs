//! Borrow and return endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::borrow::{Borrow, BorrowKey, CreateBorrow},
    AppState,
};

use super::{MessageResponse, ValidatedJson};

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Book borrowed", body = Borrow),
        (status = 400, description = "No copies available, already borrowed, or invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Member or book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateBorrow>,
) -> AppResult<(StatusCode, Json<Borrow>)> {
    let borrow = state.services.ledger.borrow(request.into()).await?;
    Ok((StatusCode::CREATED, Json(borrow)))
}

/// List all active borrows
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    responses(
        (status = 200, description = "Active borrows", body = Vec<Borrow>)
    )
)]
pub async fn list_borrows(State(state): State<AppState>) -> AppResult<Json<Vec<Borrow>>> {
    let borrows = state.services.ledger.list_borrows().await?;
    Ok(Json(borrows))
}

/// Return a borrowed book
#[utoipa::path(
    delete,
    path = "/borrow/{name}/{title}/{author}",
    tag = "borrows",
    params(
        ("name" = String, Path, description = "Member name"),
        ("title" = String, Path, description = "Book title"),
        ("author" = String, Path, description = "Book author")
    ),
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 404, description = "No such borrow", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    Path((name, title, author)): Path<(String, String, String)>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .ledger
        .return_book(BorrowKey::new(name, title, author))
        .await?;
    Ok(MessageResponse::new("Book returned successfully"))
}
