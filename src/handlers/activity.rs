use crate::middlewares::current_admin;
use crate::models::*;
use crate::services::ActivityService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/admin/activities",
    tag = "activity",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取活动列表成功", body = [ActivityResponse]),
        (status = 401, description = "未授权")
    )
)]
pub async fn list_activities(service: web::Data<ActivityService>) -> Result<HttpResponse> {
    match service.list_activities().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/activities",
    tag = "activity",
    request_body = CreateActivityRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "归档成功", body = ArchiveActivityResponse),
        (status = 400, description = "缺少名称或名称重复", body = ApiError),
        (status = 404, description = "配置不存在", body = ApiError)
    )
)]
/// 将当前抽奖记录归档为活动，并清空当前记录
pub async fn create_activity(
    service: web::Data<ActivityService>,
    req: HttpRequest,
    request: web::Json<CreateActivityRequest>,
) -> Result<HttpResponse> {
    match service.archive(request.into_inner()).await {
        Ok(result) => {
            log::info!(
                "Activity {} archived by {}",
                result.activity.activity_name,
                current_admin(&req).unwrap_or_default()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/activities/{name}",
    tag = "activity",
    params(
        ("name" = String, Path, description = "活动名称")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取活动详情成功", body = ActivityDetailResponse),
        (status = 404, description = "活动不存在", body = ApiError)
    )
)]
pub async fn get_activity(
    service: web::Data<ActivityService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_activity(&path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/activities/{name}",
    tag = "activity",
    params(
        ("name" = String, Path, description = "活动名称")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除成功"),
        (status = 404, description = "活动不存在", body = ApiError)
    )
)]
pub async fn delete_activity(
    service: web::Data<ActivityService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let activity_name = path.into_inner();
    match service.delete_activity(&activity_name).await {
        Ok(()) => {
            log::info!(
                "Activity {activity_name} deleted by {}",
                current_admin(&req).unwrap_or_default()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::message("Activity deleted")))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// 活动路由 (挂在 /admin 下)
pub fn activity_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/activities")
            .route("", web::get().to(list_activities))
            .route("", web::post().to(create_activity))
            .route("/{name}", web::get().to(get_activity))
            .route("/{name}", web::delete().to(delete_activity)),
    );
}
