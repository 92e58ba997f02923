use super::AxcientClient;
use crate::api::FetchError;
use crate::api::axcient::types::Vault;

pub(crate) trait VaultsApi {
    async fn get_vaults(&self) -> Result<Vec<Vault>, FetchError>;
    async fn get_vault(&self, vault_id: i64) -> Result<Vault, FetchError>;
}

impl VaultsApi for AxcientClient {
    /// Lists vaults without their nested device lists; devices are fetched
    /// on demand for the one vault the user selects.
    async fn get_vaults(&self) -> Result<Vec<Vault>, FetchError> {
        let url = format!("{}/vault", self.config.api_url);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .query(&[("display_devices", "false")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Server { status, body });
        }

        let text = response.text().await?;
        let vaults = serde_json::from_str(&text).map_err(FetchError::Parse)?;
        Ok(vaults)
    }

    async fn get_vault(&self, vault_id: i64) -> Result<Vault, FetchError> {
        let url = format!("{}/vault/{}", self.config.api_url, vault_id);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Server { status, body });
        }

        let text = response.text().await?;
        let vault = serde_json::from_str(&text).map_err(FetchError::Parse)?;
        Ok(vault)
    }
}
