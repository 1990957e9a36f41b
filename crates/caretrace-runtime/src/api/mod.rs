//! HTTP client for the events, patient, level and annotation APIs.
//!
//! One `ApiClient` serves both backends: the events API (unauthenticated) and
//! the user/level API (bearer token when configured).

mod events;
mod patients;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_base: String,
    events_base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: trim_base(&config.api_base),
            events_base: trim_base(config.events_base()),
            token: config.token.clone().filter(|token| !token.is_empty()),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn events_url(&self, path: &str) -> String {
        format!("{}{}", self.events_base, path)
    }

    /// Attach the bearer token, if any, to a user/level API request.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "api response");

        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn trim_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
