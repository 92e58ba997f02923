use super::AxcientClient;
use crate::api::FetchError;
use crate::api::axcient::types::{Appliance, Device};

pub(crate) trait DevicesApi {
    async fn get_client_devices(&self, client_id: i64) -> Result<Vec<Device>, FetchError>;
    async fn get_client_appliances(&self, client_id: i64) -> Result<Vec<Appliance>, FetchError>;
}

impl DevicesApi for AxcientClient {
    async fn get_client_devices(&self, client_id: i64) -> Result<Vec<Device>, FetchError> {
        let url = format!("{}/client/{}/device", self.config.api_url, client_id);

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
        let devices = serde_json::from_str(&text).map_err(FetchError::Parse)?;
        Ok(devices)
    }

    async fn get_client_appliances(&self, client_id: i64) -> Result<Vec<Appliance>, FetchError> {
        let url = format!("{}/client/{}/appliance", self.config.api_url, client_id);

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
        let appliances = serde_json::from_str(&text).map_err(FetchError::Parse)?;
        Ok(appliances)
    }
}
