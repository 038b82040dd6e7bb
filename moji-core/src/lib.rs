//! Client library for the Moji weather service.
//!
//! This crate defines:
//! - Typed domain models (city, condition, forecast)
//! - Decoding of the provider's JSON envelopes, including its quoted numbers,
//!   fixed timestamp layouts and wind-level ranges
//! - Configuration & credentials handling
//! - An HTTP transport and a client tying it to the decoders
//!
//! It is used by `moji-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod parse;
pub mod transport;

pub use client::MojiClient;
pub use config::Config;
pub use decode::{DecodeOptions, decode_condition_data, decode_forecast_data};
pub use error::{DecodeError, Error, MalformedFieldError, TemporalParseError, TransportError};
pub use model::{City, Condition, ConditionData, Forecast, ForecastData, WindLevel};
pub use transport::{Endpoint, HttpTransport, Transport};
