use actix_web::{HttpResponse, Result as ActixResult, web};

use super::respond;
use crate::authz::Caller;
use crate::middlewares;
use crate::models::accounts::entities::Role;
use crate::models::attendance::requests::{AttendanceSheetParams, RecordAttendanceRequest};
use crate::services::ServiceContext;

// 缺省日期为今天
pub async fn attendance_sheet(
    services: web::Data<ServiceContext>,
    caller: Caller,
    session_id: web::Path<i64>,
    query: web::Query<AttendanceSheetParams>,
) -> ActixResult<HttpResponse> {
    let service = services.attendance();
    let session_id = session_id.into_inner();
    let result = match query.into_inner().date {
        Some(date) => service.sheet(&caller, session_id, date).await,
        None => service.today_view(&caller, session_id).await,
    };
    respond(result, "Attendance retrieved")
}

pub async fn record_attendance(
    services: web::Data<ServiceContext>,
    caller: Caller,
    session_id: web::Path<i64>,
    body: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    let result = services
        .attendance()
        .record(&caller, session_id.into_inner(), body.into_inner())
        .await;
    respond(result, "Attendance recorded")
}

pub async fn my_attendance(
    services: web::Data<ServiceContext>,
    caller: Caller,
) -> ActixResult<HttpResponse> {
    respond(
        services.attendance().learner_history(&caller).await,
        "Attendance history retrieved",
    )
}

// 配置路由（需在场次路由之前注册）
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sessions/{session_id}/attendance")
            .wrap(middlewares::RequireRole::new_any(Role::instructor_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(attendance_sheet))
                    .route(web::put().to(record_attendance)),
            ),
    )
    .service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireRole::new_any(Role::learner_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/me", web::get().to(my_attendance)),
    );
}
