use std::time::Duration;
use tracing::info;

use freshcheck::config::Config;
use freshcheck::routes;
use freshcheck::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!("[freshcheck] Starting freshcheck server");
    info!("[freshcheck] Prediction endpoint: {}", config.predict_url);
    info!(
        "[freshcheck] Preview TTL: {:?}, max previews: {}",
        config.preview_ttl, config.max_previews
    );

    let state = AppState::new(config.clone());

    // Previews are never released by the page that shows them; age them out here.
    let previews = state.previews.clone();
    let ttl = config.preview_ttl;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ttl.clamp(Duration::from_secs(1), Duration::from_secs(600)));
        loop {
            interval.tick().await;
            previews.cleanup(ttl);
        }
    });

    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("[freshcheck] Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
