//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrows, health, members, reports};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "0.1.0",
        description = "Library record-keeping REST API: members, books and loans"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Members
        members::create_member,
        members::list_members,
        members::get_member,
        members::update_member,
        members::delete_member,
        // Books
        books::create_book,
        books::list_books,
        books::get_book,
        books::update_book,
        books::delete_book,
        // Borrows
        borrows::borrow_book,
        borrows::list_borrows,
        borrows::return_book,
        // Reports
        reports::member_report,
    ),
    components(
        schemas(
            // Members
            crate::models::member::Member,
            crate::models::member::CreateMember,
            crate::models::member::UpdateMember,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Borrows
            crate::models::borrow::Borrow,
            crate::models::borrow::CreateBorrow,
            // Reports
            crate::models::report::MemberReport,
            crate::models::report::ReportStatistics,
            // Common
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "members", description = "Member management"),
        (name = "books", description = "Book catalog"),
        (name = "borrows", description = "Borrowing and returning books"),
        (name = "reports", description = "Member reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/member",
            "/members",
            "/member/{name}",
            "/book",
            "/books",
            "/book/{title}/{author}",
            "/borrow",
            "/borrows",
            "/borrow/{name}/{title}/{author}",
            "/member-report/{name}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
