//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_wenjuan_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum WenjuanError {
            $($variant(String),)*
        }

        impl WenjuanError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(WenjuanError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(WenjuanError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(WenjuanError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl WenjuanError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        WenjuanError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_wenjuan_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    UniqueViolation("E004", "Unique Constraint Violation"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    Authentication("E008", "Authentication Error"),
    Authorization("E009", "Authorization Error"),
    FileOperation("E010", "File Operation Error"),
}

impl WenjuanError {
    /// 判断底层数据库错误是否为唯一约束冲突
    ///
    /// SQLite 与 PostgreSQL 的报错文案不同，这里统一归一化，
    /// 供单条创建（返回 409）和批量导入（记录行级错误）共用。
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, WenjuanError::UniqueViolation(_))
            || self.message().contains("UNIQUE constraint failed")
            || self.message().contains("duplicate key")
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for WenjuanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for WenjuanError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for WenjuanError {
    fn from(err: sea_orm::DbErr) -> Self {
        WenjuanError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for WenjuanError {
    fn from(err: std::io::Error) -> Self {
        WenjuanError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for WenjuanError {
    fn from(err: serde_json::Error) -> Self {
        WenjuanError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WenjuanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(WenjuanError::database_config("test").code(), "E001");
        assert_eq!(WenjuanError::validation("test").code(), "E005");
        assert_eq!(WenjuanError::authentication("test").code(), "E008");
    }

    #[test]
    fn test_error_message() {
        let err = WenjuanError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = WenjuanError::database_operation(
            "UNIQUE constraint failed: users.username",
        );
        assert!(sqlite.is_unique_violation());

        let postgres = WenjuanError::database_operation(
            "duplicate key value violates unique constraint \"users_username_key\"",
        );
        assert!(postgres.is_unique_violation());

        let other = WenjuanError::database_operation("no such table: users");
        assert!(!other.is_unique_violation());
    }

    #[test]
    fn test_format_simple() {
        let err = WenjuanError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
