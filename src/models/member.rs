//! Member model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Registered library patron, keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(range(min = 0, message = "Age must not be negative"))]
    pub age: i32,
}

/// Partial member update: absent fields are left untouched.
/// The name is the primary key and cannot be changed.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMember {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(range(min = 0, message = "Age must not be negative"))]
    pub age: Option<i32>,
}

impl From<CreateMember> for Member {
    fn from(member: CreateMember) -> Self {
        Self {
            name: member.name,
            email: member.email,
            age: member.age,
        }
    }
}
