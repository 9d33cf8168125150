use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub loyverse: LoyverseConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Loyverse API 连接配置
#[derive(Clone, Serialize, Deserialize)]
pub struct LoyverseConfig {
    pub base_url: String,
    pub token: String,
    /// 单次请求超时 (秒), 0 表示使用 reqwest 默认值
    pub timeout_secs: u64,
}

/// 库存同步节流配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// 两次库存写入之间的固定间隔 (毫秒)
    pub delay_ms: u64,
}

pub const DEFAULT_LOYVERSE_BASE_URL: &str = "https://api.loyverse.com/v1.0";

// token 不进日志
impl fmt::Debug for LoyverseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoyverseConfig")
            .field("base_url", &self.base_url)
            .field("token", &if self.token.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LoyverseConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout_secs: 30,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl SyncConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            loyverse: LoyverseConfig::new(DEFAULT_LOYVERSE_BASE_URL, ""),
            sync: SyncConfig { delay_ms: 100 },
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> scanner.toml (可选) -> 环境变量
    ///
    /// 环境变量使用 `SCANNER` 前缀和 `__` 分隔符, 例如 `SCANNER__LOYVERSE__TOKEN`。
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("scanner").required(false))
            .add_source(Environment::with_prefix("SCANNER").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("loyverse.base_url", defaults.loyverse.base_url)?
            .set_default("loyverse.token", defaults.loyverse.token)?
            .set_default("loyverse.timeout_secs", defaults.loyverse.timeout_secs)?
            .set_default("sync.delay_ms", defaults.sync.delay_ms)
    }
}
