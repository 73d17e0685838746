//! Member report endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::report::MemberReport, AppState};

/// Member details, borrowed books and borrowing statistics
#[utoipa::path(
    get,
    path = "/member-report/{name}",
    tag = "reports",
    params(
        ("name" = String, Path, description = "Member name")
    ),
    responses(
        (status = 200, description = "Member report", body = MemberReport),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal error", body = crate::error::ErrorResponse)
    )
)]
pub async fn member_report(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<MemberReport>> {
    let report = state.services.reports.member_report(&name).await?;
    Ok(Json(report))
}
