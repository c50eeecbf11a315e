use anyhow::{Context, Result};

/// Connection settings for the catalog store, read from the environment.
///
/// Offline commands (`sync --from-file`) never touch these.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store_base_url: String,
    pub store_token: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let store_base_url =
            std::env::var("VARSYNC_STORE_URL").context("VARSYNC_STORE_URL is not set")?;
        let store_token =
            std::env::var("VARSYNC_STORE_TOKEN").context("VARSYNC_STORE_TOKEN is not set")?;

        Ok(Self {
            store_base_url,
            store_token,
        })
    }
}
