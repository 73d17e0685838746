//! Member management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::member::{CreateMember, Member, UpdateMember},
    AppState,
};

use super::{MessageResponse, ValidatedJson};

/// Add a new member
#[utoipa::path(
    post,
    path = "/member",
    tag = "members",
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Name or email already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    ValidatedJson(member): ValidatedJson<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let created = state.services.members.create_member(member).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List all members
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    responses(
        (status = 200, description = "All members", body = Vec<Member>)
    )
)]
pub async fn list_members(State(state): State<AppState>) -> AppResult<Json<Vec<Member>>> {
    let members = state.services.members.list_members().await?;
    Ok(Json(members))
}

/// Get a member by name
#[utoipa::path(
    get,
    path = "/member/{name}",
    tag = "members",
    params(
        ("name" = String, Path, description = "Member name")
    ),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Member>> {
    let member = state.services.members.get_member(&name).await?;
    Ok(Json(member))
}

/// Update a member's email and/or age
#[utoipa::path(
    put,
    path = "/member/{name}",
    tag = "members",
    params(
        ("name" = String, Path, description = "Member name")
    ),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedJson(update): ValidatedJson<UpdateMember>,
) -> AppResult<Json<Member>> {
    let updated = state.services.members.update_member(&name, update).await?;
    Ok(Json(updated))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/member/{name}",
    tag = "members",
    params(
        ("name" = String, Path, description = "Member name")
    ),
    responses(
        (status = 200, description = "Member deleted", body = MessageResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Member still holds borrowed books", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.members.delete_member(&name).await?;
    Ok(MessageResponse::new("Member deleted successfully"))
}
