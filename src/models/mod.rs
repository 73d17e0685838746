//! Data models for the library server

pub mod book;
pub mod borrow;
pub mod member;
pub mod report;

// Re-export commonly used types
pub use book::{Book, BookKey, CreateBook, UpdateBook};
pub use borrow::{Borrow, BorrowKey, CreateBorrow};
pub use member::{CreateMember, Member, UpdateMember};
pub use report::{MemberReport, ReportStatistics};
