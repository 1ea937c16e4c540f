use anyhow::{Result, anyhow};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT},
};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Anonymous JSON fetcher for a single remote document.
pub struct JsonSourceClient {
    client: Client,
    url: String,
}

impl JsonSourceClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut builder = Client::builder().default_headers(Self::default_headers());

        if let Some(timeout) = config.fetch_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.directory_source_url.clone(),
        })
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// GET the document and decode it. No retries.
    pub async fn fetch<T>(&self) -> Result<T>
    where T: DeserializeOwned {
        debug!("Making request to {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Source error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("Source error ({}): {}", status, error_text),
            });
        }

        let body = response.bytes().await?;
        let data = serde_json::from_slice::<T>(&body)?;
        Ok(data)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::{MockServer, Mock, ResponseTemplate};
    use wiremock::matchers::{method, path};

    fn config_for(server: &MockServer) -> AppConfig {
        AppConfig {
            directory_source_url: format!("{}/doctors.json", server.uri()),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctors.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "1" }])))
            .mount(&server)
            .await;

        let client = JsonSourceClient::new(&config_for(&server)).unwrap();
        let data: Vec<Value> = client.fetch().await.unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], "1");
    }

    #[tokio::test]
    async fn test_fetch_reports_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctors.json"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let client = JsonSourceClient::new(&config_for(&server)).unwrap();
        let err = client.fetch::<Vec<Value>>().await.unwrap_err();

        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctors.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = JsonSourceClient::new(&config_for(&server)).unwrap();
        assert!(client.fetch::<Vec<Value>>().await.is_err());
    }
}
