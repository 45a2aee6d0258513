pub mod env;
pub mod log;
pub mod settings;

pub use settings::{AppConfig, LogConfig, ModelConfig, StreamConfig};
