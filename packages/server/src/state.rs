use std::sync::Arc;

use gateway::PaymentGateway;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Shared application state. The gateway client is injected here at startup
/// so handlers never reach for a process-global.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub db: DatabaseConnection,
    pub config: AppConfig,
}
