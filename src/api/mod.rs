pub mod dto;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_config::StreamConfig;
use crate::nlp::SentimentEngine;
use crate::stream::NewsStream;

/// 进程内共享状态
pub struct AppState {
    pub engine: SentimentEngine,
    pub stream: NewsStream,
    pub config: StreamConfig,
}

impl AppState {
    pub fn new(engine: SentimentEngine, config: StreamConfig) -> Self {
        Self {
            engine,
            stream: NewsStream::with_capacity(config.live_capacity),
            config,
        }
    }

    /// 请求的条数限制在 1..=max_batch_size，未指定时使用默认值
    pub fn batch_size(&self, requested: Option<usize>) -> usize {
        let max = self.config.max_batch_size.max(1);
        requested
            .unwrap_or(self.config.batch_size)
            .clamp(1, max)
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::read_root))
        .route("/api/events", get(handlers::get_events))
        .route("/api/scenarios", get(handlers::list_scenarios))
        .route("/api/scenario/:scenario_name", post(handlers::set_scenario))
        .route("/api/broadcast", post(handlers::broadcast_signal))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
