use tracing::warn;

/// 等待关闭信号，返回信号名称
pub async fn wait_for_shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => "SIGTERM",
                    _ = sigint.recv() => "SIGINT",
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("注册信号处理失败: {}，改为监听 Ctrl+C", e);
                ctrl_c().await
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await
    }
}

async fn ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("监听 Ctrl+C 失败: {}", e);
        std::future::pending::<()>().await;
    }
    "CTRL+C"
}
