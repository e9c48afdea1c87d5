use actix_web::{HttpResponse, Result as ActixResult, web};

use super::{respond, respond_empty};
use crate::authz::Caller;
use crate::middlewares;
use crate::models::accounts::{
    entities::Role,
    requests::{AccountListParams, CreateAccountRequest, UpdateAccountRequest},
};
use crate::services::ServiceContext;

pub async fn list_accounts(
    services: web::Data<ServiceContext>,
    caller: Caller,
    query: web::Query<AccountListParams>,
) -> ActixResult<HttpResponse> {
    let result = services
        .accounts()
        .list_accounts(&caller, query.into_inner().role)
        .await;
    respond(result, "Accounts retrieved")
}

pub async fn create_account(
    services: web::Data<ServiceContext>,
    caller: Caller,
    body: web::Json<CreateAccountRequest>,
) -> ActixResult<HttpResponse> {
    let result = services
        .accounts()
        .create_account(&caller, body.into_inner())
        .await;
    respond(result, "Account created")
}

pub async fn update_account(
    services: web::Data<ServiceContext>,
    caller: Caller,
    account_id: web::Path<i64>,
    body: web::Json<UpdateAccountRequest>,
) -> ActixResult<HttpResponse> {
    let result = services
        .accounts()
        .update_account(&caller, account_id.into_inner(), body.into_inner())
        .await;
    respond(result, "Account updated")
}

pub async fn delete_account(
    services: web::Data<ServiceContext>,
    caller: Caller,
    account_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = services
        .accounts()
        .delete_account(&caller, account_id.into_inner())
        .await;
    respond_empty(result, "Account deleted")
}

// 配置路由
pub fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/accounts")
            .wrap(middlewares::RequireRole::new_any(Role::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_accounts))
                    .route(web::post().to(create_account)),
            )
            .service(
                web::resource("/{account_id}")
                    .route(web::put().to(update_account))
                    .route(web::delete().to(delete_account)),
            ),
    );
}
