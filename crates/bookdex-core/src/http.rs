use serde::de::DeserializeOwned;

use crate::error::{BookdexError, Result};

/// Plain GET client with a named user agent. Each call is a single attempt:
/// no retries, no backoff, no request timeout beyond the transport's own.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .build()
            .expect("failed to build reqwest client");
        Self { client }
    }

    pub async fn get_text(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(BookdexError::Api(
                url.to_string(),
                format!("HTTP {status}: {body}"),
            ));
        }
        resp.text().await.map_err(BookdexError::Http)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let text = self.get_text(url).await?;
        serde_json::from_str(&text).map_err(|e| BookdexError::MalformedPayload(e.to_string()))
    }

    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(BookdexError::Api(
                url.to_string(),
                format!("HTTP {status}: {body}"),
            ));
        }
        Ok(resp.bytes().await.map_err(BookdexError::Http)?.to_vec())
    }
}
