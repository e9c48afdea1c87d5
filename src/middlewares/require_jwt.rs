/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <JWT_TOKEN>`，并把调用者身份 [`Caller`] 写入请求扩展。
 * 角色以存储中的账号为准，令牌只携带账号 ID；账号被删除后令牌立即失效。
 *
 * ```rust,ignore
 * web::scope("/api/v1/sessions")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_sessions))
 * ```
 *
 * 处理程序中直接以 `caller: Caller` 作为参数，或通过 [`RequireJWT::extract_caller`] 取出调用者。
 */

use crate::authz::Caller;
use crate::models::ErrorCode;
use crate::services::ServiceContext;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 辅助函数：提取并验证 JWT access token，解析出调用者
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Caller, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let jwt = req
        .app_data::<web::Data<JwtUtils>>()
        .ok_or_else(|| "JWT utilities not configured".to_string())?;

    let claims = jwt.verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;
    let account_id = claims.account_id().map_err(|err| err.message().to_string())?;

    let services = req
        .app_data::<web::Data<ServiceContext>>()
        .ok_or_else(|| "Services not configured".to_string())?;

    let account = services
        .storage()
        .get_account_by_id(account_id)
        .await
        .map_err(|_| "Failed to retrieve account from storage".to_string())?
        .ok_or_else(|| "Account not found".to_string())?;

    Ok(Caller::new(account.id, account.role))
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(caller) => {
                    debug!(
                        "JWT authentication successful for ID: {} ({})",
                        caller.account_id, caller.role
                    );
                    req.extensions_mut().insert(caller);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 从请求扩展中提取调用者
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_caller(req: &HttpRequest) -> Option<Caller> {
        req.extensions().get::<Caller>().copied()
    }
}

// 处理程序参数提取：未经过 RequireJWT 的请求一律 401
impl FromRequest for Caller {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(RequireJWT::extract_caller(req).ok_or_else(|| {
            InternalError::from_response(
                "missing caller",
                create_error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Authentication required",
                ),
            )
            .into()
        }))
    }
}
