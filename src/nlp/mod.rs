//! 情感分析引擎
//!
//! 多语言 BERT 模型输出 1-5 星评分，再映射为 fear / neutral / joy 三类情绪。

pub mod bert_classifier;
pub mod engine;

pub use bert_classifier::BertStarClassifier;
pub use engine::{parse_star_label, Analysis, Prediction, Sentiment, SentimentEngine, StarClassifier};
