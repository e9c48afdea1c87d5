use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};

use super::{error_response, respond, respond_file};
use crate::authz::Caller;
use crate::config::AppConfig;
use crate::errors::ClassroomError;
use crate::middlewares;
use crate::models::{accounts::entities::Role, materials::requests::AddMaterialRequest};
use crate::services::ServiceContext;
use crate::utils::multipart::read_multipart;

pub async fn list_materials(
    services: web::Data<ServiceContext>,
    caller: Caller,
    session_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = services
        .materials()
        .list_materials(&caller, session_id.into_inner())
        .await;
    respond(result, "Materials retrieved")
}

// multipart 字段：title（可选）, file
pub async fn upload_material(
    services: web::Data<ServiceContext>,
    caller: Caller,
    session_id: web::Path<i64>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let max_size = AppConfig::get().upload.max_size;
    let form = match read_multipart(payload, max_size).await {
        Ok(form) => form,
        Err(err) => return Ok(error_response(&err)),
    };
    let title = form.text("title");
    let Some(attachment) = form.file else {
        return Ok(error_response(&ClassroomError::validation(
            "No file found in upload payload",
        )));
    };

    let result = services
        .materials()
        .add_material(
            &caller,
            session_id.into_inner(),
            AddMaterialRequest { title, attachment },
        )
        .await;
    respond(result, "Material uploaded")
}

pub async fn download_material(
    services: web::Data<ServiceContext>,
    caller: Caller,
    material_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    respond_file(
        services
            .materials()
            .download_material(&caller, material_id.into_inner())
            .await,
    )
}

// 配置路由（需在场次路由之前注册）
pub fn configure_material_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sessions/{session_id}/materials")
            .wrap(middlewares::RequireRole::new_any(&[
                Role::Instructor,
                Role::Learner,
            ]))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_materials))
                    .route(
                        web::post()
                            .to(upload_material)
                            .wrap(middlewares::RequireRole::new(Role::Instructor)),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/materials")
            .wrap(middlewares::RequireRole::new_any(&[
                Role::Instructor,
                Role::Learner,
            ]))
            .wrap(middlewares::RequireJWT)
            .route("/{material_id}/download", web::get().to(download_material)),
    );
}
