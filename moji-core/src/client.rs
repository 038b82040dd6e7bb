use tracing::{debug, warn};

use crate::{
    config::Config,
    decode::{DecodeOptions, decode_condition_data, decode_forecast_data},
    error::Error,
    model::{ConditionData, ForecastData},
    transport::{HttpTransport, Transport},
};

/// Fetches and decodes current conditions and forecasts by coordinates.
#[derive(Debug)]
pub struct MojiClient<T = HttpTransport> {
    transport: T,
    options: DecodeOptions,
}

impl MojiClient<HttpTransport> {
    /// Build an HTTP-backed client. Fails if no app code is configured.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(transport, config.decode_options()))
    }
}

impl<T: Transport> MojiClient<T> {
    pub fn with_transport(transport: T, options: DecodeOptions) -> Self {
        Self { transport, options }
    }

    /// Current condition of the city containing `lat`/`lon`.
    pub async fn condition_by_lat_long(
        &self,
        lat: &str,
        lon: &str,
    ) -> Result<ConditionData, Error> {
        let content = self.transport.fetch_condition_bytes(lat, lon).await?;
        self.warn_on_status(&content);

        let data = decode_condition_data(&content, self.options)?;
        debug!(city = data.city.id, "Decoded current condition");
        Ok(data)
    }

    /// Day and night forecasts for the coming days, oldest first.
    pub async fn forecast_by_lat_long(&self, lat: &str, lon: &str) -> Result<ForecastData, Error> {
        let content = self.transport.fetch_forecast_bytes(lat, lon).await?;
        self.warn_on_status(&content);

        let data = decode_forecast_data(&content, self.options)?;
        debug!(city = data.city.id, days = data.forecasts.len(), "Decoded forecast");
        Ok(data)
    }

    fn warn_on_status(&self, content: &[u8]) {
        if self.options.strict_status {
            return;
        }

        #[derive(serde::Deserialize)]
        struct Status {
            #[serde(default)]
            code: i64,
            #[serde(default)]
            msg: String,
        }

        match serde_json::from_slice::<Status>(content) {
            Ok(Status { code, msg }) if code != 0 => {
                warn!(code, %msg, "Moji responded with a non-zero status, decoding anyway");
            }
            _ => {}
        }
    }
}
