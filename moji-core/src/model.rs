use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, time::UNIX_EPOCH};

/// Location the data pertains to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    #[serde(rename = "cityId")]
    pub id: i64,
    pub name: String,
    #[serde(rename = "counname")]
    pub county: String,
    #[serde(rename = "pname")]
    pub province: String,
}

/// Closed interval `[low, high]` of wind force. `low == high` for a single value.
///
/// Fields are private so `low <= high` holds for every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct WindLevel {
    low: i32,
    high: i32,
}

impl WindLevel {
    /// Bounds given in the wrong order are swapped.
    pub fn new(low: i32, high: i32) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    pub fn single(level: i32) -> Self {
        Self {
            low: level,
            high: level,
        }
    }

    pub fn low(&self) -> i32 {
        self.low
    }

    pub fn high(&self) -> i32 {
        self.high
    }

    pub fn is_range(&self) -> bool {
        self.low != self.high
    }
}

impl fmt::Display for WindLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_range() {
            write!(f, "{}-{}", self.low, self.high)
        } else {
            write!(f, "{}", self.low)
        }
    }
}

impl From<&str> for WindLevel {
    fn from(value: &str) -> Self {
        crate::parse::parse_wind_level(value)
    }
}

/// Weather snapshot at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// Provider icon / condition code.
    pub id: i32,
    pub name: String,
    /// Relative humidity in percent. 0 for forecast halves, which carry none, and
    /// for a current condition whose `humidity` is absent, null or `""`.
    pub humidity: u8,
    pub temp: i32,
    pub update_time: DateTime<Local>,
    pub wind_direction: String,
    pub wind_level: WindLevel,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            humidity: 0,
            temp: 0,
            update_time: DateTime::<Local>::from(UNIX_EPOCH),
            wind_direction: String::new(),
            wind_level: WindLevel::default(),
        }
    }
}

/// Prediction for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Forecast {
    pub predict_date: NaiveDate,
    pub day: Condition,
    pub night: Condition,
}

/// Response of the current-condition endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConditionData {
    pub city: City,
    pub condition: Condition,
}

/// Response of the forecast endpoint, in provider (chronological) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForecastData {
    pub city: City,
    pub forecasts: Vec<Forecast>,
}
