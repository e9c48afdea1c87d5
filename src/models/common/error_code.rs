use serde::{Deserialize, Serialize};

use crate::errors::ClassroomError;

// 响应体中的数值错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    Success = 0,

    // 请求错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    PayloadTooLarge = 1002,

    // 认证授权
    Unauthorized = 2000,
    InvalidCredentials = 2001,
    Forbidden = 2003,

    // 资源
    NotFound = 3000,
    DuplicateUsername = 4001,
    AlreadyEnrolled = 4002,

    InternalServerError = 5000,
}

impl From<&ClassroomError> for ErrorCode {
    fn from(err: &ClassroomError) -> Self {
        match err {
            ClassroomError::Validation(_) | ClassroomError::DateParse(_) => {
                ErrorCode::ValidationFailed
            }
            ClassroomError::DuplicateUsername(_) => ErrorCode::DuplicateUsername,
            ClassroomError::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            ClassroomError::AlreadyEnrolled(_) => ErrorCode::AlreadyEnrolled,
            ClassroomError::Forbidden(_) => ErrorCode::Forbidden,
            ClassroomError::Unauthorized(_) => ErrorCode::Unauthorized,
            ClassroomError::NotFound(_) => ErrorCode::NotFound,
            _ => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_codes() {
        assert_eq!(
            ErrorCode::from(&ClassroomError::already_enrolled("x")),
            ErrorCode::AlreadyEnrolled
        );
        assert_eq!(
            ErrorCode::from(&ClassroomError::validation("x")) as i32,
            1001
        );
        assert_eq!(
            ErrorCode::from(&ClassroomError::database_connection("x")),
            ErrorCode::InternalServerError
        );
    }
}
