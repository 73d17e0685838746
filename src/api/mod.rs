//! API handlers for the library REST endpoints

pub mod books;
pub mod borrows;
pub mod health;
pub mod members;
pub mod openapi;
pub mod reports;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppError, AppState};

/// JSON body extractor that runs `validator` rules after deserializing.
///
/// Malformed bodies, missing fields and failed rules all surface as
/// `AppError::Validation` instead of axum's default rejections.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(ValidatedJson(value))
    }
}

/// Plain confirmation message
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self { message: message.into() })
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // The browser frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Members
        .route("/member", post(members::create_member))
        .route("/members", get(members::list_members))
        .route(
            "/member/:name",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        // Books
        .route("/book", post(books::create_book))
        .route("/books", get(books::list_books))
        .route(
            "/book/:title/:author",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Borrows
        .route("/borrow", post(borrows::borrow_book))
        .route("/borrows", get(borrows::list_borrows))
        .route("/borrow/:name/:title/:author", delete(borrows::return_book))
        // Reports
        .route("/member-report/:name", get(reports::member_report))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
