/*!
 * 基于角色的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用，在路由层提前执行授权判定中的角色粗检。
 * 归属细检仍由业务层完成。
 *
 * ```rust,ignore
 * web::resource("")
 *     .route(web::post().to(create_session).wrap(RequireRole::new_any(Role::instructor_roles())))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::authz::{Caller, Ownership, authorize};
use crate::models::{ErrorCode, accounts::entities::Role};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Vec<Role>,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: Role) -> Self {
        Self {
            allowed_roles: vec![role],
        }
    }

    /// 创建需要任一角色的中间件
    pub fn new_any(roles: &[Role]) -> Self {
        Self {
            allowed_roles: roles.to_vec(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<Role>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let caller = req.extensions().get::<Caller>().copied();

            match caller {
                Some(caller) => {
                    match authorize(&caller, &allowed_roles, Ownership::Unscoped) {
                        Ok(()) => {
                            let res = srv.call(req).await?.map_into_left_body();
                            Ok(res)
                        }
                        Err(_) => Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Unauthorized,
                                "Access denied.",
                            )
                            .map_into_right_body(),
                        )),
                    }
                }
                None => {
                    info!(
                        "Role check failed: No caller found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
