pub mod attachment;
pub mod error_code;
pub mod response;

pub use attachment::Attachment;
pub use error_code::ErrorCode;
pub use response::ApiResponse;
