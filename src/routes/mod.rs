//! API 路由层
//!
//! 处理程序只负责提取参数、调用业务层，并把 [`ClassroomError`] 映射为 HTTP 状态码与
//! 统一的 [`ApiResponse`] 响应体。

pub mod accounts;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod enrollments;
pub mod materials;
pub mod sessions;

pub use accounts::configure_account_routes;
pub use assignments::configure_assignment_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use enrollments::configure_enrollment_routes;
pub use materials::configure_material_routes;
pub use sessions::configure_session_routes;

use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode, http::header};
use serde::Serialize;
use tracing::error;

use crate::errors::{ClassroomError, Result};
use crate::middlewares::create_error_response;
use crate::models::{ApiResponse, ErrorCode};

/// 错误到 HTTP 状态码的映射
pub fn status_of(err: &ClassroomError) -> StatusCode {
    match err {
        ClassroomError::Validation(_) | ClassroomError::DateParse(_) => StatusCode::BAD_REQUEST,
        ClassroomError::DuplicateUsername(_) | ClassroomError::AlreadyEnrolled(_) => {
            StatusCode::CONFLICT
        }
        ClassroomError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
        ClassroomError::Unauthorized(_) | ClassroomError::Forbidden(_) => StatusCode::FORBIDDEN,
        ClassroomError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_response(err: &ClassroomError) -> HttpResponse {
    let status = status_of(err);
    let message = match err {
        _ if !err.is_domain() => {
            // 基础设施错误只记录日志，不把细节返回给客户端
            error!("{}", err);
            "Internal server error"
        }
        ClassroomError::InvalidCredentials(_) => "Invalid username or password",
        ClassroomError::Unauthorized(_) | ClassroomError::Forbidden(_) => "Access denied",
        _ => err.message(),
    };
    create_error_response(status, ErrorCode::from(err), message)
}

/// 业务结果转换为统一 JSON 响应
pub(crate) fn respond<T: Serialize>(result: Result<T>, message: &str) -> ActixResult<HttpResponse> {
    Ok(match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success(data, message)),
        Err(err) => error_response(&err),
    })
}

/// 无数据返回的操作
pub(crate) fn respond_empty(result: Result<()>, message: &str) -> ActixResult<HttpResponse> {
    Ok(match result {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success_empty(message)),
        Err(err) => error_response(&err),
    })
}

/// 附件下载响应
pub(crate) fn respond_file(result: Result<(String, Vec<u8>)>) -> ActixResult<HttpResponse> {
    Ok(match result {
        Ok((file_name, bytes)) => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ))
            .body(bytes),
        Err(err) => error_response(&err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(&ClassroomError::validation("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(&ClassroomError::already_enrolled("x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(&ClassroomError::forbidden("x")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(&ClassroomError::not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(&ClassroomError::database_operation("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let response = error_response(&ClassroomError::database_connection("password=hunter2"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
