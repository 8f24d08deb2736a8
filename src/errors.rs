use std::fmt;

use serde_json::Value;

#[derive(Debug, Clone)]
pub enum ClientError {
    /// 请求未到达后端（连接失败、超时等）
    Network(String),
    /// 后端以非成功状态码响应
    Api { status: u16, body: Option<Value> },
    /// 响应结构无法识别
    Shape(String),
    /// 平台能力不可用（例如剪贴板）
    Capability(String),
    Storage(String),
    Config(String),
    Validation(String),
}

impl ClientError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "C001",
            ClientError::Api { .. } => "C002",
            ClientError::Shape(_) => "C003",
            ClientError::Capability(_) => "C004",
            ClientError::Storage(_) => "C005",
            ClientError::Config(_) => "C006",
            ClientError::Validation(_) => "C007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "Network Error",
            ClientError::Api { .. } => "API Error",
            ClientError::Shape(_) => "Unexpected Response Shape",
            ClientError::Capability(_) => "Capability Unavailable",
            ClientError::Storage(_) => "Session Storage Error",
            ClientError::Config(_) => "Configuration Error",
            ClientError::Validation(_) => "Validation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            ClientError::Api { status, body } => match self.api_message() {
                Some(msg) => format!("HTTP {}: {}", status, msg),
                None => match body {
                    Some(b) => format!("HTTP {}: {}", status, b),
                    None => format!("HTTP {}", status),
                },
            },
            ClientError::Network(msg)
            | ClientError::Shape(msg)
            | ClientError::Capability(msg)
            | ClientError::Storage(msg)
            | ClientError::Config(msg)
            | ClientError::Validation(msg) => msg.clone(),
        }
    }

    /// 后端错误体中的 `error` 字段（`{"error": "..."}`）
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ClientError::Api {
                body: Some(body), ..
            } => body
                .get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    /// HTTP 状态码（仅 Api 错误）
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 凭据被后端拒绝
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// 格式化为彩色输出
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

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClientError {}

// 便捷的构造函数
impl ClientError {
    pub fn network<T: Into<String>>(msg: T) -> Self {
        ClientError::Network(msg.into())
    }

    pub fn api(status: u16, body: Option<Value>) -> Self {
        ClientError::Api { status, body }
    }

    pub fn shape<T: Into<String>>(msg: T) -> Self {
        ClientError::Shape(msg.into())
    }

    pub fn capability<T: Into<String>>(msg: T) -> Self {
        ClientError::Capability(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        ClientError::Storage(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ClientError::Config(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ClientError::Validation(msg.into())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Shape(err.to_string())
    }
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(format!("invalid URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_message_extracts_error_field() {
        let err = ClientError::api(400, Some(json!({"error": "bad url"})));
        assert_eq!(err.api_message(), Some("bad url"));
        assert_eq!(err.message(), "HTTP 400: bad url");
    }

    #[test]
    fn test_api_message_missing_or_blank() {
        assert_eq!(ClientError::api(500, None).api_message(), None);
        assert_eq!(
            ClientError::api(500, Some(json!({"error": ""}))).api_message(),
            None
        );
        assert_eq!(
            ClientError::api(500, Some(json!({"error": 42}))).api_message(),
            None
        );
        assert_eq!(ClientError::network("down").api_message(), None);
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ClientError::api(401, None).is_unauthorized());
        assert!(!ClientError::api(403, None).is_unauthorized());
        assert!(!ClientError::network("refused").is_unauthorized());
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            ClientError::network(""),
            ClientError::api(500, None),
            ClientError::shape(""),
            ClientError::capability(""),
            ClientError::storage(""),
            ClientError::config(""),
            ClientError::validation(""),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = ClientError::validation("URL cannot be empty");
        assert_eq!(err.to_string(), "Validation Error: URL cannot be empty");
    }

    #[test]
    fn test_from_serde_json_is_shape() {
        let parse_err = serde_json::from_str::<Value>("{not json").unwrap_err();
        assert!(matches!(ClientError::from(parse_err), ClientError::Shape(_)));
    }
}
