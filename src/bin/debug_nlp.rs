//! 模型冒烟测试：加载情感模型并分析一段文本
//!
//! cargo run --bin debug_nlp -- "I love AI"

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};

use gaia::app::bootstrap::load_engine;
use gaia::app_config::log::setup_logging;
use gaia::app_config::AppConfig;

/// 加载情感模型并打印单条文本的分析结果
#[derive(Debug, Parser)]
#[command(name = "debug_nlp", version, about)]
struct Args {
    /// 待分析文本，多个参数以空格拼接
    #[arg(default_value = "I love AI")]
    text: Vec<String>,

    /// Hugging Face 模型，覆盖 GAIA_MODEL_ID
    #[arg(long)]
    model_id: Option<String>,
}

impl Args {
    fn text(&self) -> String {
        self.text.join(" ")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(model_id) = args.model_id.clone() {
        config.model.model_id = model_id;
    }
    setup_logging(&config.log)?;

    info!("Initializing Engine: {}", config.model.model_id);
    let engine = match load_engine(&config.model).await {
        Ok(engine) => engine,
        Err(e) => {
            error!("CRITICAL ERROR: {}", e);
            return Err(e.into());
        }
    };
    info!("Initialization successful.");

    let analysis = engine.analyze(&args.text())?;
    println!("Analysis Result: {}", serde_json::to_string(&analysis)?);
    Ok(())
}
