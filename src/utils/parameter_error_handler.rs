//! 请求参数解析失败时返回统一的 JSON 错误体

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload error on {}: {}", req.path(), err);
    let (code, mut response) = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => (
            ErrorCode::PayloadTooLarge,
            HttpResponse::PayloadTooLarge(),
        ),
        _ => (ErrorCode::BadRequest, HttpResponse::BadRequest()),
    };
    let body = ApiResponse::error_empty(code, format!("Invalid JSON payload: {err}"));
    InternalError::from_response(err, response.json(body)).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Query parameter error on {}: {}", req.path(), err);
    let body = ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    );
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!("Path parameter error on {}: {}", req.path(), err);
    let body = ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameters: {err}"),
    );
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
