use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ClassroomError, Result};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

pub fn validate_username(username: &str) -> Result<()> {
    // 用户名长度校验：3 <= x <= 32
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(ClassroomError::validation(
            "Username length must be between 3 and 32 characters",
        ));
    }
    // 用户名格式校验：字母、数字、下划线、点或连字符
    if !USERNAME_RE.is_match(username) {
        return Err(ClassroomError::validation(
            "Username must contain only letters, numbers, underscores, dots or hyphens",
        ));
    }
    Ok(())
}

/// 密码策略：8-128 个字符，至少一个字母和一个数字
pub fn validate_password(password: &str) -> Result<()> {
    let mut errors = Vec::new();

    let len = password.chars().count();
    if len < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if len > 128 {
        errors.push("Password must be at most 128 characters long");
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        errors.push("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ClassroomError::validation(errors.join("; ")))
    }
}

/// 必填文本：去除首尾空白后不能为空
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClassroomError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// 可选文本：空白视为未填写
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 清洗上传文件名：去掉路径部分，只保留安全字符
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.chars().take(128).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("j.doe-01_x").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("learner123").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password(&format!("a{}", "1".repeat(128))).is_err());
    }

    #[test]
    fn test_password_error_lists_every_violation() {
        let err = validate_password("abc").unwrap_err();
        assert!(err.message().contains("at least 8"));
        assert!(err.message().contains("digit"));
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("title", "  Week 1 ").unwrap(), "Week 1");
        assert!(require_text("title", "   ").is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\Report 1.pdf"), "Report_1.pdf");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name(".."), "file");
    }
}
