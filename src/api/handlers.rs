use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::info;

use crate::api::dto::{
    BroadcastRequest, EventPacket, EventsQuery, ScenarioListResponse, ScenarioResponse,
    StatusResponse,
};
use crate::api::AppState;
use crate::error::AppError;
use crate::stream::{EventSource, StreamEvent};

pub async fn read_root() -> Json<StatusResponse> {
    Json(StatusResponse::online())
}

/// 取一批事件并实时做情感分析
pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<EventPacket>>, AppError> {
    let size = state.batch_size(query.size);
    let events = state.stream.get_batch(size).await;
    let packets = analyze_events(&state, events).await?;
    Ok(Json(packets))
}

pub async fn set_scenario(
    State(state): State<Arc<AppState>>,
    Path(scenario_name): Path<String>,
) -> Json<ScenarioResponse> {
    let success = state.stream.switch_scenario(&scenario_name).await;
    Json(ScenarioResponse {
        success,
        current_scenario: state.stream.current_scenario().await.to_string(),
    })
}

pub async fn list_scenarios(State(state): State<Arc<AppState>>) -> Json<ScenarioListResponse> {
    Json(ScenarioListResponse {
        current_scenario: state.stream.current_scenario().await.to_string(),
        scenarios: state
            .stream
            .scenario_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// 接收用户广播：立即分析并返回，同时放入实时队列供后续轮询
pub async fn broadcast_signal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BroadcastRequest>,
) -> Result<Json<EventPacket>, AppError> {
    // 有意收紧的校验：空白文本返回400，不写入实时队列
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("text 不能为空".to_string()));
    }

    let record = req.into_record();
    let event = StreamEvent {
        record: record.clone(),
        source: EventSource::Live,
    };
    let packet = analyze_events(&state, vec![event])
        .await?
        .pop()
        .ok_or_else(|| AppError::Unknown("广播分析结果为空".to_string()))?;

    state.stream.add_live_event(record).await;
    info!("收到广播信号: lang={} sentiment={}", packet.lang, packet.sentiment);

    Ok(Json(packet))
}

/// 推理是阻塞调用，放到 blocking 线程池执行
async fn analyze_events(
    state: &AppState,
    events: Vec<StreamEvent>,
) -> Result<Vec<EventPacket>, AppError> {
    if events.is_empty() {
        return Ok(Vec::new());
    }
    let engine = state.engine.clone();
    tokio::task::spawn_blocking(move || {
        events
            .into_iter()
            .map(|event| {
                let analysis = engine.analyze(&event.record.text)?;
                Ok(EventPacket::from_stream_event(event, analysis))
            })
            .collect::<Result<Vec<_>, AppError>>()
    })
    .await?
}
