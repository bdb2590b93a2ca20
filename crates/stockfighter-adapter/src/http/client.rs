/*
[INPUT]:  ClientConfig (API key, base URLs, timeouts, initial account)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::http::endpoint::{ApiRequest, Base, Endpoint};
use crate::http::normalize::normalize;
use crate::http::{Result, StockfighterError};
use crate::state::{AccountHolder, ClientConfig};
use crate::types::Outcome;

/// Main client for the Stockfighter API.
///
/// Cheap to clone; clones share the held account.
#[derive(Debug, Clone)]
pub struct StockfighterClient {
    http_client: Client,
    config: Arc<ClientConfig>,
    auth_header: HeaderName,
    auth_value: HeaderValue,
    account: AccountHolder,
}

impl StockfighterClient {
    /// Create a new client with default URLs and timeouts
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(StockfighterError::validation("api_key", "must not be empty"));
        }
        for url in [&config.base_rest_url, &config.base_stream_url, &config.gm_base_url] {
            reqwest::Url::parse(url)?;
        }

        let auth_header = HeaderName::from_bytes(config.auth_header.as_bytes()).map_err(|err| {
            StockfighterError::Config(format!("invalid auth header {}: {err}", config.auth_header))
        })?;
        let mut auth_value = HeaderValue::from_str(&config.api_key)
            .map_err(|_| StockfighterError::validation("api_key", "not a valid header value"))?;
        auth_value.set_sensitive(true);

        let http_client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            http_client,
            account: AccountHolder::new(config.account.clone()),
            config: Arc::new(config),
            auth_header,
            auth_value,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// The configured transport handle
    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Currently held trading account
    pub fn account(&self) -> Option<String> {
        self.account.get()
    }

    /// Replace the held trading account
    pub fn set_account(&self, account: impl Into<String>) {
        self.account.set(account);
    }

    pub(crate) fn account_holder(&self) -> &AccountHolder {
        &self.account
    }

    pub(crate) fn auth_header(&self) -> (&HeaderName, &HeaderValue) {
        (&self.auth_header, &self.auth_value)
    }

    fn base_url(&self, base: Base) -> &str {
        match base {
            Base::Rest => &self.config.base_rest_url,
            Base::Gm => &self.config.gm_base_url,
        }
    }

    /// Attach method, URL, API key header and JSON body
    pub(crate) fn request_builder(&self, request: &ApiRequest) -> RequestBuilder {
        let builder = self
            .http_client
            .request(request.method.clone(), request.url.clone())
            .header(self.auth_header.clone(), self.auth_value.clone());
        match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }

    /// Build, send and normalize one endpoint call
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Outcome<T>> {
        let request = endpoint.build(self.base_url(endpoint.base), params, query, body)?;
        self.send(request).await
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Outcome<T>> {
        debug!(method = %request.method, path = request.url.path(), "sending request");

        let response = self.request_builder(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            method = %request.method,
            path = request.url.path(),
            status = status.as_u16(),
            bytes = body.len(),
            "response received"
        );

        let outcome = normalize(status, &body, request.failure)?;
        if let Outcome::Rejected(rejection) = &outcome {
            debug!(
                path = request.url.path(),
                error = %rejection.error,
                "request rejected by exchange"
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::endpoint::endpoints;
    use crate::state::DEFAULT_AUTH_HEADER;

    fn client() -> StockfighterClient {
        StockfighterClient::new("test-api-key").expect("client init")
    }

    #[test]
    fn rejects_empty_api_key() {
        assert!(matches!(
            StockfighterClient::new("  "),
            Err(StockfighterError::Validation { field: "api_key", .. })
        ));
    }

    #[test]
    fn rejects_invalid_auth_header_name() {
        let config = ClientConfig::new("key").with_auth_header("bad header");
        assert!(matches!(
            StockfighterClient::with_config(config),
            Err(StockfighterError::Config(_))
        ));
    }

    #[test]
    fn api_key_travels_in_header_not_url() {
        let client = client();
        let request = endpoints::QUOTE
            .build(
                &client.config().base_rest_url,
                &[("venue", "TESTEX"), ("stock", "FOOBAR")],
                &[],
                None,
            )
            .expect("request");
        let built = client.request_builder(&request).build().expect("build");

        let header = built.headers().get(DEFAULT_AUTH_HEADER).expect("auth header");
        assert_eq!(header.to_str().unwrap(), "test-api-key");
        assert!(header.is_sensitive());
        assert!(!built.url().as_str().contains("test-api-key"));
    }

    #[test]
    fn json_body_is_attached_for_posts() {
        let client = client();
        let request = endpoints::PLACE_ORDER
            .build(
                &client.config().base_rest_url,
                &[("venue", "TESTEX"), ("stock", "FOOBAR")],
                &[],
                Some(serde_json::json!({ "qty": 10 })),
            )
            .expect("request");
        let built = client.request_builder(&request).build().expect("build");

        assert_eq!(built.method(), reqwest::Method::POST);
        let body = built.body().and_then(|body| body.as_bytes()).expect("body bytes");
        assert_eq!(body, br#"{"qty":10}"#);
    }

    #[test]
    fn clones_share_the_held_account() {
        let client = client();
        let clone = client.clone();
        clone.set_account("EXB123456");
        assert_eq!(client.account().as_deref(), Some("EXB123456"));
    }
}
