use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;
use crate::wheel::LabelInfo;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::wheel::list_wheels,
        handlers::wheel::get_wheel,
        handlers::draw::draw,
        handlers::auth::login,
        handlers::admin::save_wheel,
        handlers::admin::get_wheel_detail,
        handlers::admin::delete_wheel,
        handlers::admin::get_draw_records,
        handlers::admin::clear_draw_records,
        handlers::activity::list_activities,
        handlers::activity::create_activity,
        handlers::activity::get_activity,
        handlers::activity::delete_activity,
    ),
    components(
        schemas(
            RouletteConfigSummary,
            WheelResponse,
            LabelInfo,
            DrawRequest,
            DrawResponse,
            DrawHistoryItem,
            DrawRecordQuery,
            DrawRecordResponse,
            PrizeInput,
            PrizeResponse,
            SaveRouletteConfigRequest,
            RouletteConfigDetail,
            CreateActivityRequest,
            ActivityResponse,
            AwardHistoryResponse,
            ActivityDetailResponse,
            ArchiveActivityResponse,
            AdminLoginRequest,
            AdminLoginResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "wheel", description = "Roulette wheel API"),
        (name = "draw", description = "Prize draw API"),
        (name = "auth", description = "Admin authentication API"),
        (name = "admin", description = "Roulette configuration API"),
        (name = "activity", description = "Activity archive API"),
    ),
    info(
        title = "Roulette Backend API",
        version = "0.1.0",
        description = "Roulette prize drawing REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_draw_endpoint() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/draw"));
        assert!(doc.paths.paths.contains_key("/admin/activities/{name}"));
    }
}
