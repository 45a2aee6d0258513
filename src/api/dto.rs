use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::nlp::{Analysis, Sentiment};
use crate::stream::{EventRecord, EventSource, StreamEvent};

pub const SYSTEM_NAME: &str = "GAIA Planetary Nervous System";
pub const TOPIC_GLOBAL: &str = "Global Sentiment";
pub const TOPIC_INTERCEPTED: &str = "Intercepted Signal";

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub system: String,
}

impl StatusResponse {
    pub fn online() -> Self {
        Self {
            status: "online".to_string(),
            system: SYSTEM_NAME.to_string(),
        }
    }
}

/// GET /api/events 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
    pub success: bool,
    pub current_scenario: String,
}

#[derive(Debug, Serialize)]
pub struct ScenarioListResponse {
    pub current_scenario: String,
    pub scenarios: Vec<String>,
}

/// POST /api/broadcast 请求体，缺省字段与 null 都使用默认值
#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    pub text: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub lang: Option<String>,
}

impl BroadcastRequest {
    pub fn into_record(self) -> EventRecord {
        EventRecord {
            text: self.text,
            lang: self.lang.unwrap_or_else(|| "unknown".to_string()),
            lat: self.lat.unwrap_or(0.0),
            lng: self.lng.unwrap_or(0.0),
        }
    }
}

/// 返回给前端地图的事件包
#[derive(Debug, Clone, Serialize)]
pub struct EventPacket {
    pub id: String,
    pub topic: String,
    pub lat: f64,
    pub lng: f64,
    pub sentiment: Sentiment,
    pub text: String,
    pub lang: String,
    pub score: f32,
    /// unix 秒，带小数
    pub timestamp: f64,
    pub is_live: bool,
}

impl EventPacket {
    pub fn new(record: EventRecord, source: EventSource, analysis: Analysis) -> Self {
        let topic = match source {
            EventSource::Scenario => TOPIC_GLOBAL,
            EventSource::Live => TOPIC_INTERCEPTED,
        };
        Self {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            lat: record.lat,
            lng: record.lng,
            sentiment: analysis.sentiment,
            text: record.text,
            lang: record.lang,
            score: analysis.score,
            timestamp: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
            is_live: source == EventSource::Live,
        }
    }

    pub fn from_stream_event(event: StreamEvent, analysis: Analysis) -> Self {
        Self::new(event.record, event.source, analysis)
    }
}
