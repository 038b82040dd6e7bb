use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use std::fmt::{self, Debug};
use tracing::{debug, error};

use crate::{
    config::Config,
    error::{Error, TransportError},
};

/// The two provider endpoints this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Condition,
    Forecast,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Condition => "/whapi/json/aliweather/briefcondition",
            Endpoint::Forecast => "/whapi/json/aliweather/briefforecast6days",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Condition => "condition",
            Endpoint::Forecast => "forecast",
        })
    }
}

/// Network collaborator: fetches the raw response body for a coordinate pair.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn post(&self, endpoint: Endpoint, lat: &str, lon: &str)
    -> Result<Vec<u8>, TransportError>;

    async fn fetch_condition_bytes(&self, lat: &str, lon: &str) -> Result<Vec<u8>, TransportError> {
        self.post(Endpoint::Condition, lat, lon).await
    }

    async fn fetch_forecast_bytes(&self, lat: &str, lon: &str) -> Result<Vec<u8>, TransportError> {
        self.post(Endpoint::Forecast, lat, lon).await
    }
}

/// Form-encoded POST over reqwest.
#[derive(Clone)]
pub struct HttpTransport {
    host: String,
    token: String,
    app_code: String,
    http: Client,
}

impl Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Fails with [`Error::Configuration`] before anything else when the app code is missing.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let app_code = config.app_code()?.to_owned();

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(TransportError::from)?;

        Ok(Self {
            host: config.host().to_owned(),
            token: config.token().to_owned(),
            app_code,
            http,
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.host, endpoint.path())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        endpoint: Endpoint,
        lat: &str,
        lon: &str,
    ) -> Result<Vec<u8>, TransportError> {
        let url = self.url(endpoint);
        debug!(%endpoint, lat, lon, "Sending request to {url}");

        let res = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("APPCODE {}", self.app_code))
            .form(&[("lat", lat), ("lon", lon), ("token", self.token.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            error!(%endpoint, %status, "Moji request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        debug!(%endpoint, len = body.len(), "Received response");
        Ok(body.to_vec())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
