use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 已登录的后台管理员 (中间件鉴权后注入请求扩展)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity(pub String);

// 需要鉴权的路径配置
struct ProtectedPaths {
    prefix_paths: Vec<&'static str>,
}

impl ProtectedPaths {
    fn new() -> Self {
        Self {
            // 前台转盘与抽奖接口公开，仅后台接口需要认证
            prefix_paths: vec!["/api/v1/admin"],
        }
    }

    fn is_protected(&self, path: &str) -> bool {
        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            protected_paths: ProtectedPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    protected_paths: ProtectedPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求与公开路径
        if req.method() == Method::OPTIONS || !self.protected_paths.is_protected(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        // 提取Authorization header
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let Some(token) = token else {
            let error = AppError::AuthError("Missing access token".to_string());
            return Box::pin(async move { Err(error.into()) });
        };

        match self.jwt_service.verify_access_token(token) {
            Ok(claims) => {
                req.extensions_mut().insert(AdminIdentity(claims.sub));
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(_) => {
                let error = AppError::AuthError("Invalid access token".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

/// 获取当前管理员用户名
pub fn current_admin(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<AdminIdentity>().map(|a| a.0.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, call_service, init_service, read_body, try_call_service};
    use actix_web::{App, HttpResponse, web};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(current_admin(&req).unwrap_or_default())
    }

    #[test]
    fn test_protected_paths() {
        let paths = ProtectedPaths::new();
        assert!(paths.is_protected("/api/v1/admin"));
        assert!(paths.is_protected("/api/v1/admin/wheels/1"));
        assert!(!paths.is_protected("/api/v1/draw"));
        assert!(!paths.is_protected("/api/v1/wheels"));
        assert!(!paths.is_protected("/api/v1/auth/login"));
        assert!(!paths.is_protected("/swagger-ui/"));
    }

    #[actix_web::test]
    async fn test_admin_route_requires_valid_token() {
        let jwt = JwtService::new("test-secret", 3600);
        let app = init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt.clone()))
                .route("/api/v1/admin/whoami", web::get().to(whoami))
                .route("/api/v1/wheels", web::get().to(whoami)),
        )
        .await;

        // 公开接口无需令牌
        let req = TestRequest::get().uri("/api/v1/wheels").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = TestRequest::get().uri("/api/v1/admin/whoami").to_request();
        let err = try_call_service(&app, req).await.err().unwrap();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

        let req = TestRequest::get()
            .uri("/api/v1/admin/whoami")
            .insert_header(("Authorization", "Bearer not-a-token"))
            .to_request();
        assert!(try_call_service(&app, req).await.is_err());

        let token = jwt.generate_access_token("admin").unwrap();
        let req = TestRequest::get()
            .uri("/api/v1/admin/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await, "admin");
    }
}
