pub mod news_stream;
pub mod scenario;

pub use news_stream::{EventSource, NewsStream, StreamEvent};
pub use scenario::{EventRecord, Scenario, DEFAULT_SCENARIO, SCENARIOS};
