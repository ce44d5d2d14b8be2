use crate::handlers::activity::activity_config;
use crate::middlewares::current_admin;
use crate::models::*;
use crate::services::{DrawService, RouletteService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/wheels",
    tag = "admin",
    request_body = SaveRouletteConfigRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "保存成功", body = RouletteConfigDetail),
        (status = 400, description = "请求参数错误", body = ApiError),
        (status = 401, description = "未授权")
    )
)]
/// 新建或更新转盘配置（奖品整体替换）
pub async fn save_wheel(
    service: web::Data<RouletteService>,
    req: HttpRequest,
    request: web::Json<SaveRouletteConfigRequest>,
) -> Result<HttpResponse> {
    match service.save_config(request.into_inner()).await {
        Ok(detail) => {
            log::info!(
                "Roulette config {} saved by {}",
                detail.id,
                current_admin(&req).unwrap_or_default()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(detail)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/wheels/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "转盘配置ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取配置详情成功", body = RouletteConfigDetail),
        (status = 404, description = "配置不存在", body = ApiError)
    )
)]
/// 获取配置详情（含全部奖品）
pub async fn get_wheel_detail(
    service: web::Data<RouletteService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_config_detail(path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/wheels/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "转盘配置ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除成功"),
        (status = 404, description = "配置不存在", body = ApiError)
    )
)]
/// 删除转盘配置（已归档活动保留）
pub async fn delete_wheel(
    service: web::Data<RouletteService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let config_id = path.into_inner();
    match service.delete_config(config_id).await {
        Ok(()) => {
            log::info!(
                "Roulette config {config_id} deleted by {}",
                current_admin(&req).unwrap_or_default()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::message("Roulette config deleted")))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/wheels/{id}/draws",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "转盘配置ID"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取抽奖记录成功"),
        (status = 404, description = "配置不存在", body = ApiError)
    )
)]
/// 分页获取当前抽奖记录（倒序）
pub async fn get_draw_records(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
    query: web::Query<DrawRecordQuery>,
) -> Result<HttpResponse> {
    match service.list_records(path.into_inner(), &query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/wheels/{id}/draws",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "转盘配置ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "清空成功"),
        (status = 404, description = "配置不存在", body = ApiError)
    )
)]
/// 清空当前抽奖记录（不归档）
pub async fn clear_draw_records(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.clear_records(path.into_inner()).await {
        Ok(count) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "deleted_count": count
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/wheels", web::post().to(save_wheel))
            .route("/wheels/{id}", web::get().to(get_wheel_detail))
            .route("/wheels/{id}", web::delete().to(delete_wheel))
            .route("/wheels/{id}/draws", web::get().to(get_draw_records))
            .route("/wheels/{id}/draws", web::delete().to(clear_draw_records))
            .configure(activity_config),
    );
}
