use std::net::SocketAddr;

use anyhow::anyhow;

use crate::app_config::env::{env_is_true, env_or_default, env_parse};

pub const DEFAULT_MODEL_ID: &str = "nlptown/bert-base-multilingual-uncased-sentiment";

/// 情感模型配置
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Hugging Face 模型仓库
    pub model_id: String,
    pub revision: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            revision: "main".to_string(),
        }
    }
}

/// 事件流与接口相关配置
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    /// /api/events 默认返回条数
    pub batch_size: usize,
    /// ?size= 参数上限
    pub max_batch_size: usize,
    /// 实时事件缓冲容量
    pub live_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            max_batch_size: 20,
            live_capacity: 10,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// LOCAL 输出到终端，其它环境写入滚动日志文件
    pub app_env: String,
    pub log_dir: String,
    pub filter: String,
    /// 文件日志是否使用JSON格式
    pub json: bool,
}

impl LogConfig {
    pub fn is_local(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("LOCAL")
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_env: "LOCAL".to_string(),
            log_dir: "log_files".to_string(),
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub model: ModelConfig,
    pub stream: StreamConfig,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model: ModelConfig::default(),
            stream: StreamConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从环境变量读取配置（调用前应先执行 dotenv）
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        Self {
            host: env_or_default("GAIA_HOST", &defaults.host),
            port: env_parse("GAIA_PORT", defaults.port),
            model: ModelConfig {
                model_id: env_or_default("GAIA_MODEL_ID", &defaults.model.model_id),
                revision: env_or_default("GAIA_MODEL_REVISION", &defaults.model.revision),
            },
            stream: StreamConfig {
                batch_size: env_parse("GAIA_BATCH_SIZE", defaults.stream.batch_size),
                max_batch_size: env_parse("GAIA_MAX_BATCH_SIZE", defaults.stream.max_batch_size),
                live_capacity: env_parse("GAIA_LIVE_CAPACITY", defaults.stream.live_capacity),
            },
            log: LogConfig {
                app_env: env_or_default("APP_ENV", &defaults.log.app_env),
                log_dir: env_or_default("GAIA_LOG_DIR", &defaults.log.log_dir),
                filter: env_or_default("RUST_LOG", &defaults.log.filter),
                json: env_is_true("GAIA_LOG_JSON", defaults.log.json),
            },
        }
    }

    /// 校验配置，返回错误信息
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.stream.batch_size == 0 {
            return Err(anyhow!("GAIA_BATCH_SIZE 必须大于0"));
        }
        if self.stream.max_batch_size < self.stream.batch_size {
            return Err(anyhow!(
                "GAIA_MAX_BATCH_SIZE({}) 不能小于 GAIA_BATCH_SIZE({})",
                self.stream.max_batch_size,
                self.stream.batch_size
            ));
        }
        if self.stream.live_capacity == 0 {
            return Err(anyhow!("GAIA_LIVE_CAPACITY 必须大于0"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .map_err(|e| anyhow!("监听地址无效 {}:{}: {}", self.host, self.port, e))
    }
}
