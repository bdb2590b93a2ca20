/*
[INPUT]:  Endpoint templates, path/query parameters, optional JSON body
[OUTPUT]: Concrete ApiRequest (method, URL, body, failure policy)
[POS]:    HTTP layer - request building, no I/O
[UPDATE]: When adding endpoints or changing URL layout
*/

use reqwest::{Method, Url};
use serde_json::Value;

use crate::http::{Result, StockfighterError};

/// Which API an endpoint lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// Trading API (`/ob/api`)
    Rest,
    /// Level orchestration API (`/gm`)
    Gm,
}

/// How failures are detected for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// `ok: false` bodies are rejections whatever the status; an error status
    /// without an `ok` field is an HTTP error.
    #[default]
    Body,
    /// Any error status is an HTTP error, even with an `ok: false` body.
    Status,
}

/// Endpoint template such as `/venues/:venue/stocks/:stock`.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub base: Base,
    pub template: &'static str,
    pub failure: FailurePolicy,
}

impl Endpoint {
    pub const fn new(method: Method, base: Base, template: &'static str) -> Self {
        Self {
            method,
            base,
            template,
            failure: FailurePolicy::Body,
        }
    }

    pub const fn with_failure(mut self, failure: FailurePolicy) -> Self {
        self.failure = failure;
        self
    }

    /// Substitute `:name` placeholders and append query pairs.
    ///
    /// Placeholders are looked up in `params`; a missing or blank value is a
    /// validation error. Values are percent-encoded as single path segments.
    pub fn url(
        &self,
        base_url: &str,
        params: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> Result<Url> {
        let mut url = Url::parse(base_url)?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StockfighterError::Config(format!("base URL cannot carry a path: {base_url}"))
            })?;
            segments.pop_if_empty();
            for part in self.template.split('/').filter(|part| !part.is_empty()) {
                match part.strip_prefix(':') {
                    Some(name) => {
                        segments.push(path_param(params, name)?);
                    }
                    None => {
                        segments.push(part);
                    }
                }
            }
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    pub fn build(
        &self,
        base_url: &str,
        params: &[(&str, &str)],
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<ApiRequest> {
        Ok(ApiRequest {
            method: self.method.clone(),
            url: self.url(base_url, params, query)?,
            body,
            failure: self.failure,
        })
    }
}

fn path_param<'a>(params: &[(&str, &'a str)], name: &'static str) -> Result<&'a str> {
    let value = params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
        .ok_or_else(|| StockfighterError::validation(name, "required path parameter is missing"))?;

    if value.trim().is_empty() {
        return Err(StockfighterError::validation(
            name,
            "required path parameter is empty",
        ));
    }
    Ok(value)
}

/// Fully resolved request, ready for the transport
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
    pub failure: FailurePolicy,
}

pub mod endpoints {
    use super::{Base, Endpoint};
    use reqwest::Method;

    pub const HEARTBEAT: Endpoint = Endpoint::new(Method::GET, Base::Rest, "/heartbeat");
    pub const VENUES: Endpoint = Endpoint::new(Method::GET, Base::Rest, "/venues");
    pub const VENUE_HEARTBEAT: Endpoint =
        Endpoint::new(Method::GET, Base::Rest, "/venues/:venue/heartbeat");
    pub const VENUE_STOCKS: Endpoint =
        Endpoint::new(Method::GET, Base::Rest, "/venues/:venue/stocks");
    pub const ORDERBOOK: Endpoint =
        Endpoint::new(Method::GET, Base::Rest, "/venues/:venue/stocks/:stock");
    pub const QUOTE: Endpoint =
        Endpoint::new(Method::GET, Base::Rest, "/venues/:venue/stocks/:stock/quote");
    pub const PLACE_ORDER: Endpoint =
        Endpoint::new(Method::POST, Base::Rest, "/venues/:venue/stocks/:stock/orders");
    pub const ORDER_STATUS: Endpoint =
        Endpoint::new(Method::GET, Base::Rest, "/venues/:venue/stocks/:stock/orders/:id");
    pub const CANCEL_ORDER: Endpoint =
        Endpoint::new(Method::DELETE, Base::Rest, "/venues/:venue/stocks/:stock/orders/:id");
    pub const ACCOUNT_ORDERS: Endpoint =
        Endpoint::new(Method::GET, Base::Rest, "/venues/:venue/accounts/:account/orders");
    pub const ACCOUNT_STOCK_ORDERS: Endpoint = Endpoint::new(
        Method::GET,
        Base::Rest,
        "/venues/:venue/accounts/:account/stocks/:stock/orders",
    );

    pub const START_LEVEL: Endpoint = Endpoint::new(Method::POST, Base::Gm, "/levels/:level");
    pub const LEVEL_STATUS: Endpoint = Endpoint::new(Method::GET, Base::Gm, "/instances/:id");
    pub const RESTART_LEVEL: Endpoint =
        Endpoint::new(Method::POST, Base::Gm, "/instances/:id/restart");
    pub const RESUME_LEVEL: Endpoint =
        Endpoint::new(Method::POST, Base::Gm, "/instances/:id/resume");
    pub const STOP_LEVEL: Endpoint = Endpoint::new(Method::POST, Base::Gm, "/instances/:id/stop");
}
