use actix_cors::Cors;
use actix_web::http::header;

/// 转盘页面与后台页面可能与接口不同源；后台只用 Bearer 令牌，不携带 Cookie
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}
