use serde::{Deserialize, Deserializer, Serialize};

/// `/apSSID` response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApSsid {
    pub ssid: String,
}

/// `/localTime` response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalTime {
    pub time: String,
}

/// `/Sensor` response body.
/// The firmware sends the temperature as a number and the humidity as a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceSensorReading {
    #[serde(deserialize_with = "string_or_number")]
    pub temp: String,
    #[serde(deserialize_with = "string_or_number")]
    pub humidity: String,
}

/// Latest sensor values for display
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SensorReading {
    pub temperature: String,
    pub humidity: String,
}

impl From<DeviceSensorReading> for SensorReading {
    fn from(reading: DeviceSensorReading) -> Self {
        Self {
            temperature: reading.temp,
            humidity: reading.humidity,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
