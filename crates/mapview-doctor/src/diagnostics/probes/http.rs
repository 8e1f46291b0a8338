//! reqwest backed HTTP probe

use super::{HttpClient, HttpResponse, ProbeError};
use async_trait::async_trait;
use std::error::Error as StdError;
use tracing::debug;
use url::Url;

/// HTTP client backed by `reqwest`
///
/// Relative locations such as `/api/status` are joined onto `base_url`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl ReqwestHttpClient {
    pub fn new(base_url: Option<Url>) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mapview-doctor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::Transport(error_chain(&e)))?;
        Ok(Self::from_client(client, base_url))
    }

    pub fn from_client(client: reqwest::Client, base_url: Option<Url>) -> Self {
        Self { client, base_url }
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, location: &str) -> Result<HttpResponse, ProbeError> {
        let url = resolve_url(self.base_url.as_ref(), location)?;
        debug!(%url, "sending status request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(error_chain(&e)))?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
        })
    }
}

/// Resolve `location` to an absolute URL, joining relative ones onto `base`
pub(crate) fn resolve_url(base: Option<&Url>, location: &str) -> Result<Url, ProbeError> {
    match Url::parse(location) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => base
                .join(location)
                .map_err(|e| ProbeError::Transport(format!("invalid URL {}: {}", location, e))),
            None => Err(ProbeError::Transport(format!(
                "relative URL {} requires a base URL",
                location
            ))),
        },
        Err(e) => Err(ProbeError::Transport(format!(
            "invalid URL {}: {}",
            location, e
        ))),
    }
}

/// Render an error with its sources, `outer: inner: root`
pub(crate) fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}
