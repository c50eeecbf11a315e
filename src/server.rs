use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::catalog::ProductSnapshot;
use crate::catalog::client::CatalogClient;
use crate::commands::sync::SyncOutcome;
use crate::core::comparator::compare_snapshots;
use crate::core::formatter::format_variants;
use crate::core::patcher::apply_variant_summary;

/// Shared listener state: the store client and the per-product in-flight
/// registry that drops overlapping deliveries for the same product.
pub struct AppState {
    client: CatalogClient,
    in_flight: Mutex<HashSet<i64>>,
}

impl AppState {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            in_flight: Mutex::new(HashSet::new()),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/webhooks/products/update", post(product_update_handler))
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Webhook listener failed")
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `POST /webhooks/products/update`. Body is the new product snapshot.
async fn product_update_handler(
    State(state): State<Arc<AppState>>,
    Json(snapshot): Json<ProductSnapshot>,
) -> (StatusCode, Json<Value>) {
    let product_id = snapshot.id;

    {
        let mut in_flight = state.in_flight.lock().await;
        if !in_flight.insert(product_id) {
            debug!(
                "Product {} update already in flight, dropping event",
                product_id
            );
            return (
                StatusCode::OK,
                Json(json!({ "ok": true, "outcome": "in_flight" })),
            );
        }
    }

    let result = process_product_update(&state, &snapshot).await;
    state.in_flight.lock().await.remove(&product_id);

    match result {
        Ok(outcome) => {
            info!(
                "Product {} webhook processed: {}",
                product_id,
                outcome.as_str()
            );
            (
                StatusCode::OK,
                Json(json!({ "ok": true, "outcome": outcome.as_str() })),
            )
        }
        Err(e) => {
            error!("✗ product {} webhook failed: {:#}", product_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.to_string() })),
            )
        }
    }
}

/// Fetch the stored snapshot as the comparison baseline, then re-render the
/// variant bullet against the stored description when the variant surface
/// changed. Persists only when the patched document actually differs.
async fn process_product_update(
    state: &AppState,
    incoming: &ProductSnapshot,
) -> Result<SyncOutcome> {
    let stored = state.client.fetch_product(incoming.id).await?;

    let report = compare_snapshots(stored.as_ref(), incoming);
    if !report.has_changes {
        debug!(
            "Product {} variants unchanged ({})",
            incoming.id, report.new_summary
        );
        return Ok(SyncOutcome::Unchanged);
    }

    info!("Product {} variants changed: {}", incoming.id, report.detail);

    let Some(stored) = stored else {
        warn!(
            "Product {} has no stored snapshot, nothing to patch",
            incoming.id
        );
        return Ok(SyncOutcome::Skipped);
    };

    let Some(original) = stored
        .body_html
        .as_deref()
        .filter(|html| !html.trim().is_empty())
    else {
        info!(
            "Product {} has no stored description, skipping",
            incoming.id
        );
        return Ok(SyncOutcome::Skipped);
    };

    let summary = format_variants(&incoming.variants, &incoming.options);
    let patched = apply_variant_summary(original, &summary);

    if patched == original {
        debug!(
            "Product {} description already reflects \"{}\"",
            incoming.id, summary
        );
        return Ok(SyncOutcome::Unchanged);
    }

    state
        .client
        .update_description(incoming.id, &patched)
        .await?;

    Ok(SyncOutcome::Updated)
}
