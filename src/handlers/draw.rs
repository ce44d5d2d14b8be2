use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/draw",
    tag = "draw",
    request_body = DrawRequest,
    responses(
        (status = 200, description = "抽奖成功", body = DrawResponse),
        (status = 400, description = "缺少昵称/配置，或尚未设定奖项", body = ApiError),
        (status = 404, description = "配置不存在", body = ApiError)
    )
)]
/// 进行一次抽奖:
/// 1. 校验昵称与配置
/// 2. 按奖品概率抽取，并返回转盘停止角度
/// 3. 写入抽奖记录并返回最近记录
pub async fn draw(
    service: web::Data<DrawService>,
    request: web::Json<DrawRequest>,
) -> Result<HttpResponse> {
    match service.draw(request.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/draw", web::post().to(draw));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_draw_without_nickname_reports_message() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DrawService::new(Arc::new(db), 50)))
                .configure(draw_config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/draw")
            .set_json(serde_json::json!({ "configId": 1, "nickname": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().is_some_and(|m| m.contains("nickname")));
    }
}
