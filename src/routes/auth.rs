use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::info;

use super::{error_response, respond};
use crate::authz::Caller;
use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::auth::{requests::LoginRequest, responses::LoginResponse};
use crate::services::ServiceContext;
use crate::utils::jwt::JwtUtils;

pub async fn login(
    services: web::Data<ServiceContext>,
    jwt: web::Data<JwtUtils>,
    body: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let LoginRequest { username, password } = body.into_inner();

    let account = match services
        .accounts()
        .verify_credentials(&username, &password)
        .await
    {
        Ok(account) => account,
        Err(err) => return Ok(error_response(&err)),
    };

    let access_token = match jwt.generate_access_token(account.id, account.role) {
        Ok(token) => token,
        Err(err) => return Ok(error_response(&err)),
    };

    info!("Account {} logged in ({})", account.id, account.role);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        LoginResponse {
            access_token,
            expires_in: jwt.access_token_ttl(),
            account,
        },
        "Login successful",
    )))
}

pub async fn me(services: web::Data<ServiceContext>, caller: Caller) -> ActixResult<HttpResponse> {
    respond(services.accounts().get_profile(&caller).await, "Profile retrieved")
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/login", web::post().to(login))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/me", web::get().to(me)),
            ),
    );
}
