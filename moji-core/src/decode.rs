//! Turns raw provider JSON into the typed model.
//!
//! The provider sends numbers as quoted strings and flattens the day/night
//! halves of a forecast into one object, so conditions are decoded field by
//! field from a JSON object instead of through a derived `Deserialize`.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    error::{DecodeError, MalformedFieldError},
    model::{City, Condition, ConditionData, Forecast, ForecastData, WindLevel},
    parse::{Layout, parse_local, parse_wind_level},
};

type Object = Map<String, Value>;

/// How much of the envelope is trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail on a non-zero envelope `code` and on a missing payload instead of
    /// returning zero values.
    pub strict_status: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            strict_status: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct RawConditionData {
    city: Option<City>,
    condition: Option<Object>,
}

#[derive(Debug, Deserialize)]
struct RawForecastData {
    city: Option<City>,
    forecast: Option<Vec<Object>>,
}

/// Field names of one condition record. The two endpoints spell them differently.
struct ConditionFields {
    id: &'static str,
    name: &'static str,
    humidity: Option<&'static str>,
    temp: &'static str,
    wind_direction: &'static str,
    wind_level: &'static str,
}

const CURRENT: ConditionFields = ConditionFields {
    id: "icon",
    name: "condition",
    humidity: Some("humidity"),
    temp: "temp",
    wind_direction: "windDir",
    wind_level: "windLevel",
};

const DAY: ConditionFields = ConditionFields {
    id: "conditionIdDay",
    name: "conditionDay",
    humidity: None,
    temp: "tempDay",
    wind_direction: "windDirDay",
    wind_level: "windLevelDay",
};

const NIGHT: ConditionFields = ConditionFields {
    id: "conditionIdNight",
    name: "conditionNight",
    humidity: None,
    temp: "tempNight",
    wind_direction: "windDirNight",
    wind_level: "windLevelNight",
};

const UPDATE_TIME: &str = "updatetime";
const PREDICT_DATE: &str = "predictDate";

/// Decode a response of the current-condition endpoint.
pub fn decode_condition_data(
    content: &[u8],
    options: DecodeOptions,
) -> Result<ConditionData, DecodeError> {
    let envelope: Envelope<RawConditionData> = serde_json::from_slice(content)?;
    let Some(data) = open_envelope(envelope, options)? else {
        return Ok(ConditionData::default());
    };

    let city = required(data.city, "city", options)?.unwrap_or_default();
    let condition = match required(data.condition, "condition", options)? {
        Some(obj) => decode_condition(&obj)?,
        None => Condition::default(),
    };

    Ok(ConditionData { city, condition })
}

/// Decode a response of the forecast endpoint, keeping provider order.
pub fn decode_forecast_data(
    content: &[u8],
    options: DecodeOptions,
) -> Result<ForecastData, DecodeError> {
    let envelope: Envelope<RawForecastData> = serde_json::from_slice(content)?;
    let Some(data) = open_envelope(envelope, options)? else {
        return Ok(ForecastData::default());
    };

    let city = required(data.city, "city", options)?.unwrap_or_default();
    let forecasts = required(data.forecast, "forecast", options)?
        .unwrap_or_default()
        .iter()
        .map(decode_forecast)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForecastData { city, forecasts })
}

/// Build a [`Condition`] from a current-condition record.
pub fn decode_condition(obj: &Object) -> Result<Condition, DecodeError> {
    let update_time = parse_local(str_field(obj, UPDATE_TIME)?, Layout::Full).map_err(|source| {
        DecodeError::Temporal {
            field: UPDATE_TIME,
            source,
        }
    })?;

    Ok(build_condition(obj, &CURRENT, update_time)?)
}

/// Build a [`Forecast`] from one flattened day/night record.
pub fn decode_forecast(obj: &Object) -> Result<Forecast, DecodeError> {
    let predict_date = parse_local(str_field(obj, PREDICT_DATE)?, Layout::DateOnly)
        .map_err(|source| DecodeError::Temporal {
            field: PREDICT_DATE,
            source,
        })?
        .date_naive();

    let update_time = parse_local(str_field(obj, UPDATE_TIME)?, Layout::Full).map_err(|source| {
        DecodeError::Temporal {
            field: UPDATE_TIME,
            source,
        }
    })?;

    Ok(Forecast {
        predict_date,
        day: build_condition(obj, &DAY, update_time)?,
        night: build_condition(obj, &NIGHT, update_time)?,
    })
}

fn open_envelope<T>(
    envelope: Envelope<T>,
    options: DecodeOptions,
) -> Result<Option<T>, DecodeError> {
    if options.strict_status && envelope.code != 0 {
        return Err(DecodeError::Status {
            code: envelope.code,
            msg: envelope.msg,
        });
    }

    Ok(required(envelope.data, "data", options)?)
}

/// In strict mode an absent payload section is an error, otherwise it decodes as zero.
fn required<T>(
    value: Option<T>,
    field: &'static str,
    options: DecodeOptions,
) -> Result<Option<T>, MalformedFieldError> {
    match value {
        None if options.strict_status => Err(MalformedFieldError::Missing(field)),
        other => Ok(other),
    }
}

fn build_condition(
    obj: &Object,
    fields: &ConditionFields,
    update_time: chrono::DateTime<chrono::Local>,
) -> Result<Condition, MalformedFieldError> {
    let humidity = match fields.humidity {
        Some(field) => optional_stringified_u8(obj, field)?,
        None => 0,
    };

    Ok(Condition {
        id: stringified_i32(obj, fields.id)?,
        name: str_field(obj, fields.name)?.to_string(),
        humidity,
        temp: stringified_i32(obj, fields.temp)?,
        update_time,
        wind_direction: str_field(obj, fields.wind_direction)?.to_string(),
        wind_level: wind_level_field(obj, fields.wind_level),
    })
}

fn str_field<'a>(obj: &'a Object, field: &'static str) -> Result<&'a str, MalformedFieldError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(MalformedFieldError::Missing(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(MalformedFieldError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn stringified_i32(obj: &Object, field: &'static str) -> Result<i32, MalformedFieldError> {
    let raw = str_field(obj, field).map_err(|err| match err {
        MalformedFieldError::WrongType { field, .. } => MalformedFieldError::WrongType {
            field,
            expected: "a quoted integer",
        },
        other => other,
    })?;

    raw.parse().map_err(|_| MalformedFieldError::NotNumeric {
        field,
        value: raw.to_string(),
    })
}

/// Absent, null or empty humidity means unknown and reads as 0.
fn optional_stringified_u8(obj: &Object, field: &'static str) -> Result<u8, MalformedFieldError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::String(s)) if s.is_empty() => Ok(0),
        Some(Value::String(s)) => s.parse().map_err(|_| MalformedFieldError::NotNumeric {
            field,
            value: s.clone(),
        }),
        Some(_) => Err(MalformedFieldError::WrongType {
            field,
            expected: "a quoted integer",
        }),
    }
}

/// Wind level comes as `"3"`, `"3-4"` or a bare number depending on the endpoint.
/// Anything unusable reads as level 0.
fn wind_level_field(obj: &Object, field: &'static str) -> WindLevel {
    match obj.get(field) {
        Some(Value::String(s)) => parse_wind_level(s),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(WindLevel::single)
            .unwrap_or_default(),
        _ => WindLevel::default(),
    }
}
