use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::catalog::client::CatalogClient;
use crate::config::Settings;
use crate::server::{self, AppState};

pub async fn execute_serve(bind: &str) -> Result<()> {
    let settings = Settings::from_env()?;
    let client = CatalogClient::new(&settings)?;
    let state = Arc::new(AppState::new(client));

    info!("Listening for product webhooks on {}", bind);
    server::serve(state, bind).await
}
