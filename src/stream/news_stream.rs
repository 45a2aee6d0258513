use std::collections::VecDeque;

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::stream::scenario::{EventRecord, Scenario, DEFAULT_SCENARIO, SCENARIOS};

/// 实时事件缓冲默认容量
pub const DEFAULT_LIVE_CAPACITY: usize = 10;

/// 事件来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// 当前场景的样例数据
    Scenario,
    /// 用户广播的实时事件
    Live,
}

/// get_batch 返回的单条事件
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    pub record: EventRecord,
    pub source: EventSource,
}

impl StreamEvent {
    pub fn is_live(&self) -> bool {
        self.source == EventSource::Live
    }
}

#[derive(Debug)]
struct StreamState {
    current_scenario: &'static str,
    /// 最新的在最前
    live_events: VecDeque<EventRecord>,
}

/// 模拟新闻流：固定场景 + 有界的实时事件队列
pub struct NewsStream {
    scenarios: Vec<Scenario>,
    live_capacity: usize,
    state: RwLock<StreamState>,
}

impl Default for NewsStream {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsStream {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LIVE_CAPACITY)
    }

    pub fn with_capacity(live_capacity: usize) -> Self {
        Self::with_scenarios(SCENARIOS.clone(), live_capacity)
    }

    /// 第一个场景作为初始场景（若存在 ai_panic 则优先）
    pub fn with_scenarios(scenarios: Vec<Scenario>, live_capacity: usize) -> Self {
        let current_scenario = scenarios
            .iter()
            .find(|s| s.name == DEFAULT_SCENARIO)
            .or_else(|| scenarios.first())
            .map(|s| s.name)
            .unwrap_or(DEFAULT_SCENARIO);

        Self {
            scenarios,
            live_capacity: live_capacity.max(1),
            state: RwLock::new(StreamState {
                current_scenario,
                live_events: VecDeque::with_capacity(live_capacity.max(1)),
            }),
        }
    }

    pub fn scenario_names(&self) -> Vec<&'static str> {
        self.scenarios.iter().map(|s| s.name).collect()
    }

    pub async fn current_scenario(&self) -> &'static str {
        self.state.read().await.current_scenario
    }

    /// 取一批事件：先返回实时事件（新的在前），剩余名额从当前场景随机抽取。
    /// 实时事件不会因被读取而移除，只会被新事件挤出队列。
    pub async fn get_batch(&self, size: usize) -> Vec<StreamEvent> {
        let state = self.state.read().await;

        let mut batch: Vec<StreamEvent> = state
            .live_events
            .iter()
            .take(size)
            .map(|record| StreamEvent {
                record: record.clone(),
                source: EventSource::Live,
            })
            .collect();

        let remaining = size - batch.len();
        if remaining > 0 {
            if let Some(scenario) = self.find_scenario(state.current_scenario) {
                let mut rng = rand::thread_rng();
                batch.extend(
                    scenario
                        .events
                        .choose_multiple(&mut rng, remaining)
                        .map(|record| StreamEvent {
                            record: record.clone(),
                            source: EventSource::Scenario,
                        }),
                );
            }
        }

        batch
    }

    /// 切换场景，名称不存在时返回 false 且保持不变
    pub async fn switch_scenario(&self, scenario_name: &str) -> bool {
        let Some(scenario) = self.find_scenario(scenario_name) else {
            warn!("未知场景: {}", scenario_name);
            return false;
        };

        let mut state = self.state.write().await;
        state.current_scenario = scenario.name;
        info!("切换场景: {}", scenario.name);
        true
    }

    /// 插入到队首，超出容量时丢弃最旧的事件
    pub async fn add_live_event(&self, record: EventRecord) {
        let mut state = self.state.write().await;
        state.live_events.push_front(record);
        state.live_events.truncate(self.live_capacity);
    }

    /// 当前实时事件快照，新的在前
    pub async fn live_events(&self) -> Vec<EventRecord> {
        self.state.read().await.live_events.iter().cloned().collect()
    }

    fn find_scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}
