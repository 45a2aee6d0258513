use clap::Parser;
use dotenv::dotenv;

use gaia::app::bootstrap;
use gaia::app_config::log::setup_logging;
use gaia::app_config::AppConfig;

/// GAIA 情感地图 API
#[derive(Debug, Parser)]
#[command(name = "gaia", version, about)]
struct Cli {
    /// 监听地址，覆盖 GAIA_HOST
    #[arg(long)]
    host: Option<String>,

    /// 监听端口，覆盖 GAIA_PORT
    #[arg(long, short)]
    port: Option<u16>,

    /// Hugging Face 模型，覆盖 GAIA_MODEL_ID
    #[arg(long)]
    model_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(model_id) = cli.model_id {
        config.model.model_id = model_id;
    }

    // 设置日志
    setup_logging(&config.log)?;

    bootstrap::run_server(config).await
}
