use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 与环境变量加载，启动时使用）
///
/// - api: 后端地址与超时
/// - session: 凭据存储位置
/// - clipboard: 剪贴板能力选择与 "已复制" 提示时长
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > 配置文件 > 默认值
    /// ENV 前缀：SHORTLINK，分隔符：__
    /// 示例：SHORTLINK__API__BASE_URL=https://sho.rt/api
    ///
    /// 显式指定的 `path` 必须存在且可解析，否则返回错误；
    /// 默认的 config.toml 可缺省，出错时回退到默认值。
    pub fn load(path: Option<&str>) -> Result<Self, ClientError> {
        match path {
            Some(p) => Self::build(p, true),
            None => Ok(Self::build(DEFAULT_CONFIG_PATH, false).unwrap_or_else(|e| {
                eprintln!("[ERROR] {}, using defaults", e);
                Self::default()
            })),
        }
    }

    fn build(path: &str, required: bool) -> Result<Self, ClientError> {
        use config::{Config, Environment, File};

        Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("SHORTLINK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|settings| settings.try_deserialize::<StaticConfig>())
            .map_err(|e| ClientError::config(format!("failed to load config {}: {}", path, e)))
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 后端 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 所有相对路径都基于此地址解析
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// 短链接的公开地址，后端未返回 short_url 时用于拼接
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 本地键值存储文件（凭据保存在固定键下）
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

/// 剪贴板配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default = "default_prefer_native")]
    pub prefer_native: bool,
    /// 回退复制命令，值通过 stdin 传入
    #[serde(default = "default_fallback_command")]
    pub fallback_command: String,
    #[serde(default = "default_copied_reset_ms")]
    pub copied_reset_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_api_timeout_secs() -> u64 {
    10
}

fn default_storage_path() -> String {
    "shortlink-storage.json".to_string()
}

fn default_prefer_native() -> bool {
    true
}

fn default_fallback_command() -> String {
    if cfg!(target_os = "macos") {
        "pbcopy".to_string()
    } else if cfg!(windows) {
        "clip".to_string()
    } else {
        "xclip -selection clipboard".to_string()
    }
}

fn default_copied_reset_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    false
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            public_base_url: default_public_base_url(),
            timeout_secs: default_api_timeout_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            prefer_native: default_prefer_native(),
            fallback_command: default_fallback_command(),
            copied_reset_ms: default_copied_reset_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
