use std::fs;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tvns_core::FailureProbability;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("无法读取配置文件 {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("无法解析配置文件 {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid listen address {host}:{port}")]
    InvalidAddress { host: String, port: u16 },
}

// 模拟设备服务端设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSetting {
    // 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    // 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    // 合法命令被模拟失败的概率 [0.0, 1.0]
    #[serde(default)]
    pub failure_probability: FailureProbability,
    // 随机数种子，留空则使用系统熵
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    51523
}

impl Default for ServerSetting {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            failure_probability: FailureProbability::default(),
            seed: None,
        }
    }
}

impl ServerSetting {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| SettingsError::InvalidAddress {
                host: self.host.clone(),
                port: self.port,
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

// 客户端会话设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSetting {
    // 设备接口根地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    // 审计日志文件，已存在时自动加时间戳后缀
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    // 被试编号，写入每条日志
    #[serde(default)]
    pub participant: Option<String>,
    // 单次请求超时 (毫秒)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    tvns_infra::transport::DEFAULT_BASE_URL.to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tvnslog")
}

fn default_request_timeout_ms() -> u64 {
    tvns_infra::transport::DEFAULT_REQUEST_TIMEOUT.as_millis() as u64
}

impl Default for SessionSetting {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            log_file: default_log_file(),
            participant: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl SessionSetting {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Settings shared by both binaries, read from a TOML file.
///
/// Every field has a default, so a partial file (or none at all) is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSetting,
    #[serde(default)]
    pub session: SessionSetting,
}

impl Settings {
    /// 加载设置
    ///
    /// 未指定路径或文件不存在时返回默认设置
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "settings file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
