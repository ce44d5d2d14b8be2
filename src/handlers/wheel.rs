use crate::models::*;
use crate::services::RouletteService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/wheels",
    tag = "wheel",
    responses(
        (status = 200, description = "获取转盘配置列表成功", body = [RouletteConfigSummary])
    )
)]
/// 转盘配置列表（最近更新的在前，前台默认展示第一个）
pub async fn list_wheels(service: web::Data<RouletteService>) -> Result<HttpResponse> {
    match service.list_configs().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/wheels/{id}",
    tag = "wheel",
    params(
        ("id" = i64, Path, description = "转盘配置ID")
    ),
    responses(
        (status = 200, description = "获取转盘成功", body = WheelResponse),
        (status = 404, description = "配置不存在", body = ApiError)
    )
)]
/// 获取转盘背景、标签与最近抽奖记录
pub async fn get_wheel(
    service: web::Data<RouletteService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_wheel(path.into_inner()).await {
        Ok(wheel) => Ok(HttpResponse::Ok().json(ApiResponse::success(wheel))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn wheel_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wheels")
            .route("", web::get().to(list_wheels))
            .route("/{id}", web::get().to(get_wheel)),
    );
}
