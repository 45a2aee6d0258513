use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::AppError;

/// 粗粒度情绪分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Fear,
    Neutral,
    Joy,
}

impl Sentiment {
    /// 1-2星 => fear，3星 => neutral，4-5星 => joy
    pub fn from_stars(stars: u8) -> Self {
        match stars {
            0..=2 => Sentiment::Fear,
            3 => Sentiment::Neutral,
            _ => Sentiment::Joy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Fear => "fear",
            Sentiment::Neutral => "neutral",
            Sentiment::Joy => "joy",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分类器原始输出，例如 {label: "1 star", score: 0.95}
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// 单条文本的分析结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Analysis {
    pub score: f32,
    pub stars: u8,
    pub sentiment: Sentiment,
}

/// 星级分类器，推理是同步阻塞的
pub trait StarClassifier: Send + Sync {
    fn classify(&self, text: &str) -> anyhow::Result<Prediction>;
}

/// 解析 "3 stars" / "1 star" 形式的标签，返回 1..=5
pub fn parse_star_label(label: &str) -> Option<u8> {
    let stars = label.trim().split_whitespace().next()?.parse::<u8>().ok()?;
    (1..=5).contains(&stars).then_some(stars)
}

/// 情感引擎：包装分类器并完成星级到情绪的映射
#[derive(Clone)]
pub struct SentimentEngine {
    classifier: Arc<dyn StarClassifier>,
}

impl SentimentEngine {
    pub fn new(classifier: Arc<dyn StarClassifier>) -> Self {
        Self { classifier }
    }

    pub fn analyze(&self, text: &str) -> Result<Analysis, AppError> {
        let prediction = self
            .classifier
            .classify(text)
            .map_err(|e| AppError::Inference(e.to_string()))?;

        let stars = parse_star_label(&prediction.label).ok_or_else(|| {
            AppError::Inference(format!("无法识别的模型标签: {}", prediction.label))
        })?;

        let analysis = Analysis {
            score: prediction.score,
            stars,
            sentiment: Sentiment::from_stars(stars),
        };
        debug!("情感分析: {:?} => {:?}", text, analysis);
        Ok(analysis)
    }
}
