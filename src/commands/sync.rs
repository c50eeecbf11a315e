use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, instrument};

use crate::catalog::ProductSnapshot;
use crate::catalog::client::CatalogClient;
use crate::config::Settings;
use crate::core::formatter::format_variants;
use crate::core::patcher::apply_variant_summary;

/// Outcome of a single product sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The stored description was rewritten.
    Updated,
    /// The description already reflected the current variant set.
    Unchanged,
    /// The product has no stored description to patch.
    Skipped,
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOutcome::Updated => "updated",
            SyncOutcome::Unchanged => "unchanged",
            SyncOutcome::Skipped => "skipped",
        }
    }
}

/// A variant summary applied to a product's stored description.
#[derive(Debug, Clone)]
pub struct PatchedDescription {
    pub summary: String,
    pub original: String,
    pub patched: String,
}

impl PatchedDescription {
    pub fn is_unchanged(&self) -> bool {
        self.original == self.patched
    }
}

/// Format the snapshot's variant summary and patch its stored description.
///
/// Returns `None` when the snapshot carries no description to patch.
pub fn patch_snapshot_description(snapshot: &ProductSnapshot) -> Option<PatchedDescription> {
    let original = match &snapshot.body_html {
        Some(html) if !html.trim().is_empty() => html.clone(),
        _ => return None,
    };

    let summary = format_variants(&snapshot.variants, &snapshot.options);
    let patched = apply_variant_summary(&original, &summary);

    Some(PatchedDescription {
        summary,
        original,
        patched,
    })
}

pub async fn execute_sync(
    product_id: Option<i64>,
    from_file: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    match (product_id, from_file) {
        (_, Some(path)) => preview_from_file(&path).await,
        (Some(id), None) => sync_remote(id, dry_run).await,
        (None, None) => {
            error!("Either --product-id or --from-file is required");
            std::process::exit(1);
        }
    }
}

#[instrument]
async fn preview_from_file(path: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

    let snapshot: ProductSnapshot =
        serde_json::from_str(&content).context("Failed to parse snapshot JSON")?;

    match patch_snapshot_description(&snapshot) {
        Some(patch) => {
            info!("Variant summary for product {}: {}", snapshot.id, patch.summary);
            println!("{}", patch.patched);
        }
        None => {
            info!(
                "Product {} has no stored description, nothing to patch",
                snapshot.id
            );
            println!("skipped: no stored description");
        }
    }

    Ok(())
}

#[instrument]
async fn sync_remote(product_id: i64, dry_run: bool) -> Result<()> {
    let settings = Settings::from_env()?;
    let client = CatalogClient::new(&settings)?;

    let snapshot = client
        .fetch_product(product_id)
        .await?
        .with_context(|| format!("Product {} not found in catalog store", product_id))?;

    let Some(patch) = patch_snapshot_description(&snapshot) else {
        info!("Product {} has no stored description, skipping", product_id);
        println!("{}", SyncOutcome::Skipped.as_str());
        return Ok(());
    };

    info!(
        "Variant summary for product {}: {}",
        product_id, patch.summary
    );

    if dry_run {
        info!("DRY RUN MODE - description will not be persisted");
        println!("{}", patch.patched);
        return Ok(());
    }

    if patch.is_unchanged() {
        info!("Description already up to date for product {}", product_id);
        println!("{}", SyncOutcome::Unchanged.as_str());
        return Ok(());
    }

    client.update_description(product_id, &patch.patched).await?;
    info!("✓ product {} description updated", product_id);
    println!("{}", SyncOutcome::Updated.as_str());

    Ok(())
}
