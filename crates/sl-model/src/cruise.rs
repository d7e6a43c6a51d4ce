//! The cruise aggregate root.

use crate::{ExpenseRecord, PhotoBlob, PortRecord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single cruise trip with its route, expenses and photos.
///
/// Owns all children by value. Deleting a cruise is defined as dropping the
/// record; no child has an independent lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CruiseRecord {
    /// Trip title (e.g. "Mittelmeer Kreuzfahrt 2024").
    pub title: String,

    /// First day of the trip.
    pub start_date: NaiveDate,

    /// Last day of the trip.
    pub end_date: NaiveDate,

    /// Operating shipping line.
    pub shipping_line: String,

    /// Ship name.
    pub ship: String,

    /// Cabin type (e.g. "Balkonkabine"); empty when unset.
    #[serde(default)]
    pub cabin_type: String,

    /// Cabin number; empty when unset.
    #[serde(default)]
    pub cabin_number: String,

    /// Booking number; empty when unset.
    #[serde(default)]
    pub booking_number: String,

    /// Free-form notes; empty when unset.
    #[serde(default)]
    pub notes: String,

    /// Star rating, 0-5.
    #[serde(default)]
    pub rating: u8,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,

    /// Visited ports in route order (see [`PortRecord::sort_order`]).
    #[serde(default)]
    pub route: Vec<PortRecord>,

    /// Expenses for this trip, unordered.
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,

    /// Photos in display order (see [`PhotoBlob::sort_order`]).
    #[serde(default)]
    pub photos: Vec<PhotoBlob>,
}

impl CruiseRecord {
    /// Create a cruise with the required fields; everything else starts empty.
    pub fn new(
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        shipping_line: impl Into<String>,
        ship: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            start_date,
            end_date,
            shipping_line: shipping_line.into(),
            ship: ship.into(),
            cabin_type: String::new(),
            cabin_number: String::new(),
            booking_number: String::new(),
            notes: String::new(),
            rating: 0,
            created_at: now,
            updated_at: now,
            route: Vec::new(),
            expenses: Vec::new(),
            photos: Vec::new(),
        }
    }

    /// Trip length in days, inclusive of start and end day.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Whether the trip lies entirely in the future.
    pub fn is_upcoming(&self) -> bool {
        self.start_date > Utc::now().date_naive()
    }

    /// Whether the trip is currently underway.
    pub fn is_ongoing(&self) -> bool {
        let today = Utc::now().date_naive();
        self.start_date <= today && self.end_date >= today
    }

    /// Sum of all expense amounts.
    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Distinct countries along the route. Sea days contribute nothing.
    pub fn countries_visited(&self) -> BTreeSet<&str> {
        self.route
            .iter()
            .filter(|p| !p.country.is_empty())
            .map(|p| p.country.as_str())
            .collect()
    }

    /// Route sorted ascending by `sort_order`.
    pub fn sorted_route(&self) -> Vec<&PortRecord> {
        let mut ports: Vec<&PortRecord> = self.route.iter().collect();
        ports.sort_by_key(|p| p.sort_order);
        ports
    }

    /// Photos sorted ascending by `sort_order`.
    pub fn sorted_photos(&self) -> Vec<&PhotoBlob> {
        let mut photos: Vec<&PhotoBlob> = self.photos.iter().collect();
        photos.sort_by_key(|p| p.sort_order);
        photos
    }
}
