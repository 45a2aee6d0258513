//! # GAIA
//!
//! 多语言情感地图演示服务：轮询模拟/用户广播的短文本，
//! 经预训练模型打分后返回带地理坐标的情绪事件。

pub mod api;
pub mod app;
pub mod app_config;
pub mod error;
pub mod nlp;
pub mod stream;
