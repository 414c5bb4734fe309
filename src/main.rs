use std::sync::Arc;

use tokio::sync::broadcast;

use tradediary::api::router::create_router;
use tradediary::api::ws_types::WsMessage;
use tradediary::config::AppConfig;
use tradediary::services::coach::CoachClient;
use tradediary::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database connected");

    let metrics_handle = metrics::init_metrics();

    let coach = match &config.gemini_api_key {
        Some(key) => {
            tracing::info!(model = %config.gemini_model, "LLM coach enabled");
            Some(Arc::new(CoachClient::new(
                key.clone(),
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
            )))
        }
        None => {
            tracing::info!("GEMINI_API_KEY unset — LLM coach disabled");
            None
        }
    };

    // Broadcast channel feeding journal snapshots to WebSocket clients
    let (ws_tx, _) = broadcast::channel::<WsMessage>(256);

    let state = AppState {
        db: pool,
        config,
        ws_tx,
        metrics_handle,
        coach,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
