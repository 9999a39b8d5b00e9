use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumptoError {
    InvalidAlias(String),
    InvalidUrl(String),
    UnsafeUrl(String),
    InvalidImportFormat(String),
    StoreUnavailable(String),
    NotFound(String),
    Serialization(String),
    FileOperation(String),
    Config(String),
}

impl JumptoError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            JumptoError::InvalidAlias(_) => "E001",
            JumptoError::InvalidUrl(_) => "E002",
            JumptoError::UnsafeUrl(_) => "E003",
            JumptoError::InvalidImportFormat(_) => "E004",
            JumptoError::StoreUnavailable(_) => "E005",
            JumptoError::NotFound(_) => "E006",
            JumptoError::Serialization(_) => "E007",
            JumptoError::FileOperation(_) => "E008",
            JumptoError::Config(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            JumptoError::InvalidAlias(_) => "Invalid Alias",
            JumptoError::InvalidUrl(_) => "Invalid URL",
            JumptoError::UnsafeUrl(_) => "Unsafe URL",
            JumptoError::InvalidImportFormat(_) => "Invalid Import Format",
            JumptoError::StoreUnavailable(_) => "Store Unavailable",
            JumptoError::NotFound(_) => "Resource Not Found",
            JumptoError::Serialization(_) => "Serialization Error",
            JumptoError::FileOperation(_) => "File Operation Error",
            JumptoError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            JumptoError::InvalidAlias(msg) => msg,
            JumptoError::InvalidUrl(msg) => msg,
            JumptoError::UnsafeUrl(msg) => msg,
            JumptoError::InvalidImportFormat(msg) => msg,
            JumptoError::StoreUnavailable(msg) => msg,
            JumptoError::NotFound(msg) => msg,
            JumptoError::Serialization(msg) => msg,
            JumptoError::FileOperation(msg) => msg,
            JumptoError::Config(msg) => msg,
        }
    }

    /// 用户可修正的校验类错误，不应作为系统故障记录
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            JumptoError::InvalidAlias(_)
                | JumptoError::InvalidUrl(_)
                | JumptoError::UnsafeUrl(_)
                | JumptoError::InvalidImportFormat(_)
                | JumptoError::NotFound(_)
        )
    }

    /// 格式化为彩色输出（用于 CLI 错误输出）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for JumptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for JumptoError {}

// 便捷的构造函数
impl JumptoError {
    pub fn invalid_alias<T: Into<String>>(msg: T) -> Self {
        JumptoError::InvalidAlias(msg.into())
    }

    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        JumptoError::InvalidUrl(msg.into())
    }

    pub fn unsafe_url<T: Into<String>>(msg: T) -> Self {
        JumptoError::UnsafeUrl(msg.into())
    }

    pub fn invalid_import_format<T: Into<String>>(msg: T) -> Self {
        JumptoError::InvalidImportFormat(msg.into())
    }

    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        JumptoError::StoreUnavailable(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        JumptoError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        JumptoError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        JumptoError::FileOperation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        JumptoError::Config(msg.into())
    }
}

impl From<std::io::Error> for JumptoError {
    fn from(err: std::io::Error) -> Self {
        JumptoError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for JumptoError {
    fn from(err: serde_json::Error) -> Self {
        JumptoError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for JumptoError {
    fn from(err: url::ParseError) -> Self {
        JumptoError::InvalidUrl(format!("Invalid URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, JumptoError>;
