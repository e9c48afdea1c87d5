use actix_web::{HttpResponse, Result as ActixResult, web};

use super::respond;
use crate::authz::Caller;
use crate::middlewares;
use crate::models::{accounts::entities::Role, enrollments::requests::EnrollRequest};
use crate::services::ServiceContext;

pub async fn list_enrolled(
    services: web::Data<ServiceContext>,
    caller: Caller,
) -> ActixResult<HttpResponse> {
    let result = services.enrollments().list_enrolled_sessions(&caller).await;
    respond(result, "Enrolled sessions retrieved")
}

pub async fn list_available(
    services: web::Data<ServiceContext>,
    caller: Caller,
) -> ActixResult<HttpResponse> {
    let result = services.enrollments().list_available_sessions(&caller).await;
    respond(result, "Available sessions retrieved")
}

pub async fn enroll(
    services: web::Data<ServiceContext>,
    caller: Caller,
    body: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    let result = services
        .enrollments()
        .enroll(&caller, body.into_inner().session_id)
        .await;
    respond(result, "Enrolled")
}

// 配置路由
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireRole::new_any(Role::learner_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_enrolled))
                    .route(web::post().to(enroll)),
            )
            .route("/available", web::get().to(list_available)),
    );
}
