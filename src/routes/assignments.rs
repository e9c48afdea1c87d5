use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};

use super::{error_response, respond, respond_file};
use crate::authz::Caller;
use crate::config::AppConfig;
use crate::middlewares;
use crate::models::accounts::entities::Role;
use crate::models::assignments::{
    entities::ReviewRecord,
    requests::{AssignmentListParams, SubmitAssignmentRequest},
};
use crate::services::ServiceContext;
use crate::utils::multipart::read_multipart;

// 教师看自己布置的作业，学员看自己提交的作业
pub async fn list_assignments(
    services: web::Data<ServiceContext>,
    caller: Caller,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    let service = services.assignments();
    let result = match caller.role {
        Role::Learner => {
            service
                .list_for_learner(&caller, query.into_inner().session_id)
                .await
        }
        _ => service.list_for_instructor(&caller).await,
    };
    respond(result, "Assignments retrieved")
}

// multipart 字段：session_id, title, description, file（可选）
pub async fn submit_assignment(
    services: web::Data<ServiceContext>,
    caller: Caller,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let max_size = AppConfig::get().upload.max_size;
    let form = match read_multipart(payload, max_size).await {
        Ok(form) => form,
        Err(err) => return Ok(error_response(&err)),
    };
    let session_id = match form.required_i64("session_id") {
        Ok(id) => id,
        Err(err) => return Ok(error_response(&err)),
    };

    let req = SubmitAssignmentRequest {
        session_id,
        title: form.text("title").unwrap_or_default(),
        description: form.text("description"),
        attachment: form.file,
    };
    respond(
        services.assignments().submit(&caller, req).await,
        "Assignment submitted",
    )
}

pub async fn get_assignment(
    services: web::Data<ServiceContext>,
    caller: Caller,
    assignment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = services
        .assignments()
        .get_assignment(&caller, assignment_id.into_inner())
        .await;
    respond(result, "Assignment retrieved")
}

pub async fn review_assignment(
    services: web::Data<ServiceContext>,
    caller: Caller,
    assignment_id: web::Path<i64>,
    body: web::Json<ReviewRecord>,
) -> ActixResult<HttpResponse> {
    let result = services
        .assignments()
        .review(&caller, assignment_id.into_inner(), body.into_inner())
        .await;
    respond(result, "Assignment reviewed")
}

pub async fn download_attachment(
    services: web::Data<ServiceContext>,
    caller: Caller,
    assignment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    respond_file(
        services
            .assignments()
            .download_attachment(&caller, assignment_id.into_inner())
            .await,
    )
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireRole::new_any(&[
                Role::Instructor,
                Role::Learner,
            ]))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_assignments))
                    .route(
                        web::post()
                            .to(submit_assignment)
                            .wrap(middlewares::RequireRole::new(Role::Learner)),
                    ),
            )
            .route("/{assignment_id}", web::get().to(get_assignment))
            .route(
                "/{assignment_id}/review",
                web::put()
                    .to(review_assignment)
                    .wrap(middlewares::RequireRole::new(Role::Instructor)),
            )
            .route(
                "/{assignment_id}/attachment",
                web::get().to(download_attachment),
            ),
    );
}
