//! Submission validation
//!
//! Devices send loosely typed JSON. A [`RawReport`] keeps each field as an
//! untyped value so presence can be decided before types are checked.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use super::entity::NewTrackerReport;
use super::error::TrackingError;
use super::ids::DeviceId;

/// How the presence of a field is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Missing means absent or null. Zero coordinates are accepted.
    #[default]
    Presence,
    /// Missing means absent or falsy (null, false, 0, ""). Kept for clients
    /// that depend on zero coordinates being rejected.
    Truthiness,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "presence" => Ok(Self::Presence),
            "truthiness" | "legacy" => Ok(Self::Truthiness),
            other => Err(format!("unknown validation mode '{}'", other)),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presence => f.write_str("presence"),
            Self::Truthiness => f.write_str("truthiness"),
        }
    }
}

/// A report submission as received, before any checks
///
/// Fields are read by name from a JSON object. A JSON `null` becomes `None`,
/// the same as an absent key, and a body that is not an object carries no
/// fields at all.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawReport {
    pub device_id: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub timestamp: Option<Value>,
}

impl From<Value> for RawReport {
    fn from(body: Value) -> Self {
        match body {
            Value::Object(fields) => Self::from(fields),
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for RawReport {
    fn from(mut fields: Map<String, Value>) -> Self {
        let mut take = |key: &str| fields.remove(key).filter(|value| !value.is_null());
        Self {
            device_id: take("deviceId"),
            latitude: take("latitude"),
            longitude: take("longitude"),
            timestamp: take("timestamp"),
        }
    }
}

impl RawReport {
    /// Check presence of all four fields, then their types
    ///
    /// # Errors
    ///
    /// - `TrackingError::MissingFields` if any field is missing under `mode`,
    ///   or if deviceId or timestamp is an empty string
    /// - `TrackingError::InvalidField` if a present field has the wrong type
    pub fn validate(self, mode: ValidationMode) -> Result<NewTrackerReport, TrackingError> {
        let fields = [
            self.device_id.as_ref(),
            self.latitude.as_ref(),
            self.longitude.as_ref(),
            self.timestamp.as_ref(),
        ];
        if fields.into_iter().any(|field| is_missing(field, mode)) {
            return Err(TrackingError::MissingFields);
        }

        let device_id = text_field(self.device_id, "deviceId")?;
        let latitude = number_field(self.latitude, "latitude")?;
        let longitude = number_field(self.longitude, "longitude")?;
        let timestamp = text_field(self.timestamp, "timestamp")?;

        if timestamp.is_empty() {
            return Err(TrackingError::MissingFields);
        }

        Ok(NewTrackerReport::new(
            DeviceId::parse(device_id)?,
            latitude,
            longitude,
            timestamp,
        ))
    }
}

fn is_missing(value: Option<&Value>, mode: ValidationMode) -> bool {
    match (value, mode) {
        (None | Some(Value::Null), _) => true,
        (Some(_), ValidationMode::Presence) => false,
        (Some(value), ValidationMode::Truthiness) => is_falsy(value),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n == 0.0 || n.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

// Numbers are accepted for string fields and cast, the way the document
// mapper of the first deployment did.
fn text_field(value: Option<Value>, field: &'static str) -> Result<String, TrackingError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(number_text(&n)),
        _ => Err(TrackingError::invalid_field(field, "a string")),
    }
}

// Integral values print without a fraction, so `1.0` and `1` both become "1".
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

fn number_field(value: Option<Value>, field: &'static str) -> Result<f64, TrackingError> {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| TrackingError::invalid_field(field, "a number"))
}
