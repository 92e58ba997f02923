pub mod clients;
pub mod devices;
pub mod types;
pub mod vaults;

use crate::config::AxcientConfig;
use anyhow::{Context, Result};
use reqwest::Client;

#[derive(Clone, Debug)]
pub struct AxcientClient {
    pub(crate) client: Client,
    pub(crate) config: AxcientConfig,
}

impl AxcientClient {
    pub fn new(config: AxcientConfig) -> Result<Self> {
        // No request timeout is set: a request that never completes leaves
        // its view section in the loading state instead of failing it.
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }
}
