//! Ports of call along a cruise route.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A port call (or sea day) on a cruise route.
///
/// `sort_order` defines route order and is unique within a cruise. A sea day
/// is represented as a port record without a country and without meaningful
/// coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    /// Port name. Sea days carry the fixed name "Seetag".
    pub name: String,

    /// Country; empty for sea days.
    #[serde(default)]
    pub country: String,

    /// Latitude in degrees. 0.0 when unknown.
    #[serde(default)]
    pub latitude: f64,

    /// Longitude in degrees. 0.0 when unknown.
    #[serde(default)]
    pub longitude: f64,

    /// Arrival timestamp (local, naive). Unix epoch when unknown.
    #[serde(default = "epoch")]
    pub arrival: NaiveDateTime,

    /// Departure timestamp (local, naive). Unix epoch when unknown.
    #[serde(default = "epoch")]
    pub departure: NaiveDateTime,

    /// Position within the route; unique per cruise, ascending with index.
    #[serde(default)]
    pub sort_order: i64,

    /// Whether this is a day at sea with no port call.
    #[serde(default)]
    pub is_sea_day: bool,

    /// Optional image of the port, raw bytes.
    #[serde(default, with = "crate::b64::opt_bytes")]
    pub image_data: Option<Vec<u8>>,

    /// Planned excursions, in booking order.
    #[serde(default)]
    pub excursions: Vec<String>,
}

fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

impl PortRecord {
    /// Create a port call with known coordinates.
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
            arrival: epoch(),
            departure: epoch(),
            sort_order: 0,
            is_sea_day: false,
            image_data: None,
            excursions: Vec::new(),
        }
    }

    /// Create a sea day at the given route position.
    pub fn sea_day(sort_order: i64) -> Self {
        Self {
            name: "Seetag".to_string(),
            country: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            arrival: epoch(),
            departure: epoch(),
            sort_order,
            is_sea_day: true,
            image_data: None,
            excursions: Vec::new(),
        }
    }

    /// Whether the port has real coordinates usable on a map.
    ///
    /// Sea days never do; (0, 0) counts as unknown.
    pub fn has_valid_coordinates(&self) -> bool {
        !self.is_sea_day && !(self.latitude == 0.0 && self.longitude == 0.0)
    }

    /// Time in port, whole hours, clamped at zero.
    pub fn stay_duration_hours(&self) -> i64 {
        (self.departure - self.arrival).num_hours().max(0)
    }
}
