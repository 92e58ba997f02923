use anyhow::{Context, Result};
use std::env;

#[derive(Clone, Debug)]
pub struct AxcientConfig {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub axcient: AxcientConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = env::var("AXCIENT_API_URL").context("AXCIENT_API_URL must be set")?;
        let api_key = env::var("AXCIENT_API_KEY").context("AXCIENT_API_KEY must be set")?;

        // Endpoint paths are joined onto the base with a leading slash.
        let api_url = api_url.trim_end_matches('/').to_string();

        let axcient_config = AxcientConfig { api_url, api_key };

        Ok(Self {
            axcient: axcient_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        // from_env reads the process environment, so exercise the
        // normalization directly.
        let raw = "https://axapi.axcient.net/x360recover/";
        let api_url = raw.trim_end_matches('/').to_string();
        assert_eq!(api_url, "https://axapi.axcient.net/x360recover");
    }
}
