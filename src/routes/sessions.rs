use actix_web::{HttpResponse, Result as ActixResult, web};

use super::respond;
use crate::authz::Caller;
use crate::middlewares;
use crate::models::accounts::entities::Role;
use crate::models::sessions::requests::CreateSessionRequest;
use crate::services::ServiceContext;

// 管理员看全部场次，教师看自己的场次
pub async fn list_sessions(
    services: web::Data<ServiceContext>,
    caller: Caller,
) -> ActixResult<HttpResponse> {
    let service = services.sessions();
    match caller.role {
        Role::Admin => respond(service.list_all_sessions(&caller).await, "Sessions retrieved"),
        _ => respond(service.list_own_sessions(&caller).await, "Sessions retrieved"),
    }
}

pub async fn create_session(
    services: web::Data<ServiceContext>,
    caller: Caller,
    body: web::Json<CreateSessionRequest>,
) -> ActixResult<HttpResponse> {
    let result = services
        .sessions()
        .create_session(&caller, body.into_inner())
        .await;
    respond(result, "Session created")
}

// 场次详情按角色返回不同视图
pub async fn get_session(
    services: web::Data<ServiceContext>,
    caller: Caller,
    session_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let service = services.sessions();
    let session_id = session_id.into_inner();
    match caller.role {
        Role::Learner => respond(
            service.learner_view(&caller, session_id).await,
            "Session retrieved",
        ),
        _ => respond(
            service.instructor_view(&caller, session_id).await,
            "Session retrieved",
        ),
    }
}

pub async fn list_learners(
    services: web::Data<ServiceContext>,
    caller: Caller,
    session_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = services
        .enrollments()
        .list_enrolled_learners(&caller, session_id.into_inner())
        .await;
    respond(result, "Learners retrieved")
}

// 配置路由
pub fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sessions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_sessions)
                            .wrap(middlewares::RequireRole::new_any(&[
                                Role::Admin,
                                Role::Instructor,
                            ])),
                    )
                    .route(
                        web::post()
                            .to(create_session)
                            .wrap(middlewares::RequireRole::new_any(Role::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{session_id}").route(
                    web::get()
                        .to(get_session)
                        .wrap(middlewares::RequireRole::new_any(&[
                            Role::Instructor,
                            Role::Learner,
                        ])),
                ),
            )
            .service(
                web::resource("/{session_id}/learners").route(
                    web::get()
                        .to(list_learners)
                        .wrap(middlewares::RequireRole::new_any(Role::instructor_roles())),
                ),
            ),
    );
}
