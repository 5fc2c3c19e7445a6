//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，环境变量优先级更高

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use url::Url;

use crate::services::index::DataSourceMode;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// live: 调用东方财富；mock: 静态数据
    #[serde(default = "default_mode")]
    pub mode: DataSourceMode,
}

/// 行情源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// 东方财富历史行情地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 数据源配置
    #[serde(default)]
    pub source: SourceConfig,
    /// 行情源配置
    #[serde(default)]
    pub provider: ProviderConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
    /// 配置文件路径（使用默认配置时为空）
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5001 }
fn default_mode() -> DataSourceMode { DataSourceMode::Live }
fn default_base_url() -> String { crate::services::index::EASTMONEY_HIS_BASE_URL.to_string() }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            source: SourceConfig::default(),
            provider: ProviderConfig::default(),
            log: LogConfig::default(),
            loaded_from: None,
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件 {} 失败", path.display()))?;
        let mut config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件 {} 失败", path.display()))?;
        config.loaded_from = Some(path.to_path_buf());
        Ok(config)
    }

    /// 加载配置：先找配置文件，找不到用默认值，最后叠加环境变量
    ///
    /// 调用时日志系统尚未初始化，这里不打日志
    pub fn load() -> anyhow::Result<Self> {
        let config_paths = ["config.json", "config/config.json"];

        let mut config = match config_paths.iter().find(|p| Path::new(p).exists()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 叠加环境变量：PORT、HOST、DATA_SOURCE、PROVIDER_BASE_URL
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT 不是有效端口: {}", port))?;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(mode) = lookup("DATA_SOURCE") {
            self.source.mode = mode
                .parse()
                .with_context(|| format!("DATA_SOURCE 无效: {}", mode))?;
        }
        if let Some(base_url) = lookup("PROVIDER_BASE_URL") {
            self.provider.base_url = base_url;
        }
        Ok(())
    }

    /// 校验配置
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.provider.base_url)
            .with_context(|| format!("provider.base_url 无效: {}", self.provider.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("provider.base_url 必须是 http(s) 地址: {}", url));
        }
        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
