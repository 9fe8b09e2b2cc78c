use std::sync::Arc;

use gateway::PaymentGateway;
use gateway::rest::RestGateway;
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;
use server::{database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    seed::seed_role_permissions(&db).await?;
    seed::ensure_indexes(&db).await?;
    seed::purge_expired_tokens(&db).await?;

    let gateway: Arc<dyn PaymentGateway> = Arc::new(RestGateway::new(config.gateway.clone()));

    let state = AppState {
        gateway,
        db,
        config: config.clone(),
    };

    let app = server::build_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
