use std::{fmt::Display, str::FromStr};

use serde::{de::DeserializeOwned, de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The kinds of vehicles the parking server knows how to bill.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Car,
    Bike,
    Ev,
    Heavy,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Car,
        VehicleType::Bike,
        VehicleType::Ev,
        VehicleType::Heavy,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Bike => "bike",
            VehicleType::Ev => "ev",
            VehicleType::Heavy => "heavy",
        }
    }
}

impl Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|vtype| vtype.as_str() == wanted)
            .ok_or_else(|| Error::UnknownVehicleType(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("'{0}' is not a known vehicle type. Expected one of car, bike, ev or heavy.")]
    UnknownVehicleType(String),
}

/// Body of `POST /api/entry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRequest {
    pub number: String,
    pub vtype: VehicleType,
    pub vip: bool,
}

/// Body of `POST /api/exit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitRequest {
    pub number: String,
}

/// A vehicle currently occupying a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkedVehicle {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub vtype: String,
    #[serde(default)]
    pub entry_time: String,
    pub slot: u32,
    #[serde(default)]
    pub is_vip: bool,
}

/// What the server hands back once a vehicle has left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitRecord {
    pub vehicle_number: String,
    pub slot: u32,
    pub fee: f64,
    #[serde(default)]
    pub vtype: String,
    #[serde(default)]
    pub entry: Option<String>,
    #[serde(default)]
    pub exit: Option<String>,
    /// Dropped rather than failing the whole record when the server sends something unexpected.
    #[serde(default, deserialize_with = "lenient")]
    pub charge_meta: Option<ChargeBreakdown>,
}

/// How the server arrived at a fee. Every part is informational, missing ones read as zero.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeBreakdown {
    pub duration_seconds: f64,
    pub duration_hours: f64,
    pub charged_hours: f64,
    pub extra_hours: f64,
    pub fee: f64,
    pub multiplier: f64,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Answer of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub occupied_count: u32,
    pub free_count: u32,
    #[serde(default)]
    pub total_slots: u32,
    #[serde(default)]
    pub free_slots: Vec<u32>,
    #[serde(default)]
    pub occupied: Vec<ParkedVehicle>,
    #[serde(default)]
    pub vip_slots: Vec<u32>,
}

/// Answer of `GET /api/revenue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub date: String,
    pub total_vehicles: u32,
    pub total_revenue: f64,
    #[serde(default)]
    pub records: Vec<RevenueRecord>,
}

/// A single line of the daily revenue summary. A missing `exit` means the vehicle is still parked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub vehicle_number: String,
    #[serde(default)]
    pub vtype: String,
    #[serde(default)]
    pub entry: Option<String>,
    #[serde(default)]
    pub exit: Option<String>,
    pub slot: u32,
    #[serde(default)]
    pub fee: f64,
}

/// A decoded server answer. Logical failures reported by the server are data, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Accepted(T),
    Rejected(String),
}

impl<T: DeserializeOwned> Reply<T> {
    /// Decodes a response body.
    ///
    /// A body with `"success": false` is always [`Reply::Rejected`] carrying the `error` text verbatim.
    /// Otherwise the payload is read from `field` when given, or from the whole body.
    ///
    /// # Errors
    ///
    /// This function will return an error if the payload is missing or does not match `T`.
    pub fn from_body(mut body: Value, field: Option<&'static str>) -> Result<Self, serde_json::Error> {
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let error = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Ok(Reply::Rejected(error));
        }

        let payload = match field {
            Some(field) => body
                .get_mut(field)
                .map(Value::take)
                .ok_or_else(|| serde_json::Error::missing_field(field))?,
            None => body,
        };

        Ok(Reply::Accepted(serde_json::from_value(payload)?))
    }
}

impl<T> Reply<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Reply::Accepted(_))
    }
}
