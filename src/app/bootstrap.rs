use std::sync::Arc;

use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::app::shutdown::wait_for_shutdown_signal;
use crate::app_config::{AppConfig, ModelConfig};
use crate::error::AppError;
use crate::nlp::{BertStarClassifier, SentimentEngine};

/// 加载情感模型，失败时直接返回错误终止启动
pub async fn load_engine(config: &ModelConfig) -> Result<SentimentEngine, AppError> {
    let config = config.clone();
    let classifier = tokio::task::spawn_blocking(move || BertStarClassifier::load(&config))
        .await?
        .map_err(|e| AppError::ModelLoad(format!("{:#}", e)))?;
    Ok(SentimentEngine::new(Arc::new(classifier)))
}

/// 启动 HTTP 服务，直到收到关闭信号
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    config.validate()?;

    let engine = match load_engine(&config.model).await {
        Ok(engine) => engine,
        Err(e) => {
            error!("{}", e);
            return Err(anyhow!(e));
        }
    };

    let state = Arc::new(AppState::new(engine, config.stream));
    let app = create_router(state);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("GAIA API 启动，监听 {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = wait_for_shutdown_signal().await;
            info!("收到 {} 信号，开始优雅关闭", signal);
        })
        .await?;

    info!("GAIA API 已停止");
    Ok(())
}
