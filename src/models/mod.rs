pub mod accounts;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod common;
pub mod enrollments;
pub mod materials;
pub mod sessions;

pub use common::{ApiResponse, Attachment, ErrorCode};
