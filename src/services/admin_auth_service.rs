use crate::config::AdminConfig;
use crate::error::{AppError, AppResult};
use crate::models::{AdminLoginRequest, AdminLoginResponse};
use crate::utils::{JwtService, verify_password};

/// 后台管理员登录 (账号来自配置文件，不落库)
#[derive(Clone)]
pub struct AdminAuthService {
    jwt_service: JwtService,
    admin: AdminConfig,
}

impl AdminAuthService {
    pub fn new(jwt_service: JwtService, admin: AdminConfig) -> Self {
        Self { jwt_service, admin }
    }

    pub fn login(&self, req: AdminLoginRequest) -> AppResult<AdminLoginResponse> {
        if self.admin.username.is_empty() || self.admin.password_hash.is_empty() {
            return Err(AppError::ConfigError(
                "Admin credentials are not configured".into(),
            ));
        }

        // 用户名不匹配时同样返回通用错误
        let valid = req.username.trim() == self.admin.username
            && verify_password(&req.password, &self.admin.password_hash)?;
        if !valid {
            return Err(AppError::AuthError("Invalid username or password".into()));
        }

        let access_token = self.jwt_service.generate_access_token(&self.admin.username)?;
        log::info!("Admin {} logged in", self.admin.username);

        Ok(AdminLoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
