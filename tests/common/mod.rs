use std::sync::Arc;

use gaia::api::{create_router, AppState};
use gaia::app_config::StreamConfig;
use gaia::nlp::{Prediction, SentimentEngine, StarClassifier};

/// 按关键词返回固定星级，避免测试下载模型
pub struct KeywordClassifier;

impl StarClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> anyhow::Result<Prediction> {
        let lower = text.to_lowercase();
        let label = if lower.contains("panic") || lower.contains("miedo") {
            "1 star"
        } else if lower.contains("colony") || lower.contains("love") {
            "5 stars"
        } else if lower.contains("meh") {
            "3 stars"
        } else {
            "4 stars"
        };
        Ok(Prediction {
            label: label.to_string(),
            score: 0.9,
        })
    }
}

pub fn test_engine() -> SentimentEngine {
    SentimentEngine::new(Arc::new(KeywordClassifier))
}

pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(test_engine(), StreamConfig::default()))
}

pub fn test_router() -> (axum::Router, Arc<AppState>) {
    let state = test_state();
    (create_router(state.clone()), state)
}
