use assistant::{Assistant, InferenceConfig};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "divvi={level},server={level},engine={level},assistant={level}",
            level = settings.app.level
        ))
        .init();

    if let Some(server) = settings.server {
        let inference = settings.assistant.map(|assistant| InferenceConfig {
            endpoint: assistant.endpoint,
            api_key: assistant.api_key,
        });

        tasks.spawn(async move {
            tracing::info!("Found server settings...");
            let assistant = match Assistant::new(inference) {
                Ok(assistant) => assistant,
                Err(err) => {
                    tracing::error!("failed to build assistant: {err}");
                    return;
                }
            };

            let engine = engine::Engine::new();
            let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
            let addr = format!("{}:{}", bind, server.port);
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!("failed to bind server listener: {err}");
                    return;
                }
            };
            if let Err(err) = server::run_with_listener(engine, assistant, listener).await {
                tracing::error!("server failed: {err}");
            }
        });
    } else {
        tracing::warn!("No server settings found, nothing to run");
    }

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    Ok(())
}
