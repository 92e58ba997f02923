use super::AxcientClient;
use crate::api::FetchError;
use crate::api::axcient::types::Client;

pub(crate) trait ClientsApi {
    async fn get_clients(&self) -> Result<Vec<Client>, FetchError>;
    async fn get_client(&self, client_id: i64) -> Result<Client, FetchError>;
}

impl ClientsApi for AxcientClient {
    async fn get_clients(&self) -> Result<Vec<Client>, FetchError> {
        let url = format!("{}/client", self.config.api_url);

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
        let clients = serde_json::from_str(&text).map_err(FetchError::Parse)?;
        Ok(clients)
    }

    async fn get_client(&self, client_id: i64) -> Result<Client, FetchError> {
        let url = format!("{}/client/{}", self.config.api_url, client_id);

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
        let client = serde_json::from_str(&text).map_err(FetchError::Parse)?;
        Ok(client)
    }
}
