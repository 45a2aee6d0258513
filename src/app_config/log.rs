use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, FmtSubscriber, Layer, Registry};

use crate::app_config::LogConfig;

// 保持日志文件写入线程存活
static INFO_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static ERROR_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

// 设置日志
pub fn setup_logging(config: &LogConfig) -> anyhow::Result<()> {
    if config.is_local() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::new(&config.filter))
            .with_ansi(true)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_level(true)
            .with_writer(std::io::stdout)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        return Ok(());
    }

    let info_file = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "info.log");
    let error_file = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "error.log");

    let (info_non_blocking, info_guard) = tracing_appender::non_blocking(info_file);
    let (error_non_blocking, error_guard) = tracing_appender::non_blocking(error_file);
    let _ = INFO_GUARD.set(info_guard);
    let _ = ERROR_GUARD.set(error_guard);

    let (info_layer, error_layer) = if config.json {
        (
            fmt::layer()
                .json()
                .with_writer(info_non_blocking)
                .with_filter(EnvFilter::new(&config.filter))
                .boxed(),
            fmt::layer()
                .json()
                .with_writer(error_non_blocking)
                .with_filter(EnvFilter::new("error"))
                .boxed(),
        )
    } else {
        (
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(info_non_blocking)
                .with_filter(EnvFilter::new(&config.filter))
                .boxed(),
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(error_non_blocking)
                .with_filter(EnvFilter::new("error"))
                .boxed(),
        )
    };

    let subscriber = Registry::default().with(vec![info_layer, error_layer]);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
