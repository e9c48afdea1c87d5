//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 领域错误（用户名重复、重复选课、越权等）与基础设施错误共用同一个枚举，
//! 错误只携带诊断信息，面向用户的文案由表现层决定。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_classroom_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum ClassroomError {
            $($variant(String),)*
        }

        impl ClassroomError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassroomError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClassroomError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassroomError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classroom_errors! {
    Validation("E001", "Validation Error"),
    DuplicateUsername("E002", "Duplicate Username"),
    InvalidCredentials("E003", "Invalid Credentials"),
    AlreadyEnrolled("E004", "Already Enrolled"),
    Forbidden("E005", "Forbidden"),
    Unauthorized("E006", "Unauthorized"),
    NotFound("E007", "Resource Not Found"),
    DatabaseConfig("E101", "Database Configuration Error"),
    DatabaseConnection("E102", "Database Connection Error"),
    DatabaseOperation("E103", "Database Operation Error"),
    FileOperation("E104", "File Operation Error"),
    Serialization("E105", "Serialization Error"),
    DateParse("E106", "Date Parse Error"),
}

impl ClassroomError {
    /// 是否属于领域错误（由调用方输入或权限导致，而非基础设施故障）
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            ClassroomError::Validation(_)
                | ClassroomError::DuplicateUsername(_)
                | ClassroomError::InvalidCredentials(_)
                | ClassroomError::AlreadyEnrolled(_)
                | ClassroomError::Forbidden(_)
                | ClassroomError::Unauthorized(_)
                | ClassroomError::NotFound(_)
        )
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClassroomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassroomError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClassroomError {
    fn from(err: sea_orm::DbErr) -> Self {
        if is_foreign_key_violation(&err) {
            ClassroomError::Validation(format!("referenced entity is missing or still in use: {err}"))
        } else {
            ClassroomError::DatabaseOperation(err.to_string())
        }
    }
}

/// 外键约束失败
///
/// SQLite 的 RESTRICT 失败使用扩展码 1811，`sql_err()` 只识别 787，因此再按消息兜底。
pub(crate) fn is_foreign_key_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_))
    ) || err.to_string().contains("FOREIGN KEY constraint failed")
}

impl From<std::io::Error> for ClassroomError {
    fn from(err: std::io::Error) -> Self {
        ClassroomError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClassroomError {
    fn from(err: serde_json::Error) -> Self {
        ClassroomError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ClassroomError {
    fn from(err: chrono::ParseError) -> Self {
        ClassroomError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassroomError::validation("test").code(), "E001");
        assert_eq!(ClassroomError::duplicate_username("test").code(), "E002");
        assert_eq!(ClassroomError::already_enrolled("test").code(), "E004");
        assert_eq!(ClassroomError::database_operation("test").code(), "E103");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassroomError::invalid_credentials("test").error_type(),
            "Invalid Credentials"
        );
        assert_eq!(ClassroomError::forbidden("test").error_type(), "Forbidden");
    }

    #[test]
    fn test_error_message() {
        let err = ClassroomError::not_found("session 42");
        assert_eq!(err.message(), "session 42");
    }

    #[test]
    fn test_domain_classification() {
        assert!(ClassroomError::unauthorized("role").is_domain());
        assert!(ClassroomError::already_enrolled("dup").is_domain());
        assert!(!ClassroomError::database_connection("down").is_domain());
        assert!(!ClassroomError::file_operation("io").is_domain());
    }

    #[test]
    fn test_foreign_key_failure_is_validation() {
        // SQLite 的 RESTRICT 失败只体现在消息中
        let err = sea_orm::DbErr::Custom(
            "error returned from database: (code: 1811) FOREIGN KEY constraint failed".into(),
        );
        assert!(matches!(ClassroomError::from(err), ClassroomError::Validation(_)));

        let err = sea_orm::DbErr::Custom("disk I/O error".into());
        assert!(matches!(
            ClassroomError::from(err),
            ClassroomError::DatabaseOperation(_)
        ));
    }

    #[test]
    fn test_format_simple() {
        let err = ClassroomError::validation("title is required");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("title is required"));
    }

    #[test]
    fn test_generic_db_error_maps_to_database_operation() {
        let err: ClassroomError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E103");
    }
}
