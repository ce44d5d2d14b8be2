use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// bcrypt 只使用前 72 字节
const MAX_PASSWORD_BYTES: usize = 72;
const MIN_PASSWORD_CHARS: usize = 10;

/// 校验后台管理员密码
///
/// 密码会被写入 config.toml 并通过后台登录使用，
/// 首尾空白在复制粘贴时容易丢失，直接拒绝。
pub fn validate_admin_password(password: &str) -> AppResult<()> {
    if password.trim() != password {
        return Err(AppError::ValidationError(
            "管理员密码首尾不能包含空白字符".to_string(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::ValidationError(format!(
            "管理员密码至少需要 {MIN_PASSWORD_CHARS} 个字符"
        )));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::ValidationError(format!(
            "管理员密码不能超过 {MAX_PASSWORD_BYTES} 字节 (bcrypt 会截断)"
        )));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(AppError::ValidationError(
            "管理员密码需同时包含字母和数字".to_string(),
        ));
    }

    Ok(())
}

/// 生成 admin.password_hash
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("密码哈希失败: {e}")))
}

/// 登录时比对；配置中的哈希格式错误属于内部错误
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("管理员密码哈希无法解析: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_admin_password() {
        assert!(validate_admin_password("wheel2025admin").is_ok());
        assert!(validate_admin_password("轉盤管理員密碼2025").is_ok());
        assert!(validate_admin_password("short1").is_err());
        assert!(validate_admin_password("onlyletters").is_err());
        assert!(validate_admin_password("1234567890").is_err());
        assert!(validate_admin_password(" wheel2025admin").is_err());
        assert!(validate_admin_password("wheel2025admin\n").is_err());
    }

    #[test]
    fn test_rejects_password_bcrypt_would_truncate() {
        let long = format!("a1{}", "x".repeat(MAX_PASSWORD_BYTES));
        assert!(validate_admin_password(&long).is_err());
        // 多字节字符按字节计: 23 个汉字加一位数字共 70 字节
        let cjk = format!("{}1", "密".repeat(23));
        assert!(validate_admin_password(&cjk).is_ok());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hashed = hash_password("wheel2025admin").unwrap();
        assert!(verify_password("wheel2025admin", &hashed).unwrap());
        assert!(!verify_password("wheel2025Admin", &hashed).unwrap());
    }

    #[test]
    fn test_verify_against_malformed_hash() {
        assert!(verify_password("wheel2025admin", "not-a-bcrypt-hash").is_err());
    }
}
