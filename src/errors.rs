use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum AdroitError {
    InvalidDestination(String),
    InvalidCodeFormat(String),
    DuplicateCode(String),
    NotFound(String),
    NamespaceExhausted(String),
    Config(String),
    Storage(String),
    Serialization(String),
}

impl AdroitError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AdroitError::InvalidDestination(_) => "E001",
            AdroitError::InvalidCodeFormat(_) => "E002",
            AdroitError::DuplicateCode(_) => "E003",
            AdroitError::NotFound(_) => "E004",
            AdroitError::NamespaceExhausted(_) => "E005",
            AdroitError::Config(_) => "E006",
            AdroitError::Storage(_) => "E007",
            AdroitError::Serialization(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AdroitError::InvalidDestination(_) => "Invalid Destination URL",
            AdroitError::InvalidCodeFormat(_) => "Invalid Short Code Format",
            AdroitError::DuplicateCode(_) => "Duplicate Short Code",
            AdroitError::NotFound(_) => "Resource Not Found",
            AdroitError::NamespaceExhausted(_) => "Code Namespace Exhausted",
            AdroitError::Config(_) => "Configuration Error",
            AdroitError::Storage(_) => "Storage Operation Error",
            AdroitError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            AdroitError::InvalidDestination(msg) => msg,
            AdroitError::InvalidCodeFormat(msg) => msg,
            AdroitError::DuplicateCode(msg) => msg,
            AdroitError::NotFound(msg) => msg,
            AdroitError::NamespaceExhausted(msg) => msg,
            AdroitError::Config(msg) => msg,
            AdroitError::Storage(msg) => msg,
            AdroitError::Serialization(msg) => msg,
        }
    }

    /// 映射为 HTTP 状态码（API 层统一使用）
    pub fn http_status(&self) -> StatusCode {
        match self {
            AdroitError::InvalidDestination(_) => StatusCode::BAD_REQUEST,
            AdroitError::InvalidCodeFormat(_) => StatusCode::BAD_REQUEST,
            AdroitError::DuplicateCode(_) => StatusCode::CONFLICT,
            AdroitError::NotFound(_) => StatusCode::NOT_FOUND,
            AdroitError::NamespaceExhausted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AdroitError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AdroitError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AdroitError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AdroitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AdroitError {}

// 便捷的构造函数
impl AdroitError {
    pub fn invalid_destination<T: Into<String>>(msg: T) -> Self {
        AdroitError::InvalidDestination(msg.into())
    }

    pub fn invalid_code_format<T: Into<String>>(msg: T) -> Self {
        AdroitError::InvalidCodeFormat(msg.into())
    }

    pub fn duplicate_code<T: Into<String>>(msg: T) -> Self {
        AdroitError::DuplicateCode(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AdroitError::NotFound(msg.into())
    }

    pub fn namespace_exhausted<T: Into<String>>(msg: T) -> Self {
        AdroitError::NamespaceExhausted(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        AdroitError::Config(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        AdroitError::Storage(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AdroitError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for AdroitError {
    fn from(err: std::io::Error) -> Self {
        AdroitError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AdroitError {
    fn from(err: serde_json::Error) -> Self {
        AdroitError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdroitError>;
