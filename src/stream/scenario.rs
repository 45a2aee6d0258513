use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// 默认场景
pub const DEFAULT_SCENARIO: &str = "ai_panic";

/// 一条带地理位置的文本事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub text: String,
    pub lang: String,
    pub lat: f64,
    pub lng: f64,
}

impl EventRecord {
    pub fn new(text: impl Into<String>, lang: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
            lat,
            lng,
        }
    }
}

/// 命名的样例事件集合
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub events: Vec<EventRecord>,
}

fn scenario(name: &'static str, rows: &[(&str, &str, f64, f64)]) -> Scenario {
    Scenario {
        name,
        events: rows
            .iter()
            .map(|(text, lang, lat, lng)| EventRecord::new(*text, *lang, *lat, *lng))
            .collect(),
    }
}

/// 内置场景数据
pub static SCENARIOS: Lazy<Vec<Scenario>> = Lazy::new(|| {
    vec![
        scenario(
            "ai_panic",
            &[
                ("AI Regulation Bill causes market panic", "en", 40.7128, -74.0060),
                ("El miedo a la IA paraliza las inversiones", "es", 40.4168, -3.7038),
                ("AIによる失業率の増加が懸念される", "ja", 35.6762, 139.6503),
                ("L'IA générative menace les emplois créatifs", "fr", 48.8566, 2.3522),
                ("الذكاء الاصطناعي يثير المخاوف الأمنية", "ar", 25.2048, 55.2708),
            ],
        ),
        scenario(
            "mars_colony",
            &[
                ("Humanity establishes first Mars colony", "en", 28.5383, -81.3792),
                ("Éxito histórico en la misión a Marte", "es", -34.6037, -58.3816),
                ("人类首次登陆火星取得巨大成功", "zh", 39.9042, 116.4074),
                ("Historic step for mankind in space", "en", 51.5074, -0.1278),
                ("मंगल ग्रह पर पहली मानव बस्ती", "hi", 28.6139, 77.2090),
            ],
        ),
    ]
});
