//! Expenses and the closed category enumeration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of expense categories.
///
/// The interchange format is string-typed; [`ExpenseCategory::from_token`] is
/// the total decoder for it and accepts both the English tokens the web app
/// writes and the German labels older exports used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Cruise,
    Flight,
    Hotel,
    Excursion,
    Onboard,
    Other,
}

impl ExpenseCategory {
    /// Decode a category token, case-insensitively. Unknown tokens map to
    /// [`ExpenseCategory::Other`]; this function is total.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "excursion" | "ausflug" => ExpenseCategory::Excursion,
            "cruise" | "kreuzfahrt" => ExpenseCategory::Cruise,
            "flight" | "flug" => ExpenseCategory::Flight,
            "hotel" => ExpenseCategory::Hotel,
            "onboard" | "an bord" => ExpenseCategory::Onboard,
            _ => ExpenseCategory::Other,
        }
    }

    /// Canonical lowercase token written to the interchange format.
    pub fn as_token(&self) -> &'static str {
        match self {
            ExpenseCategory::Cruise => "cruise",
            ExpenseCategory::Flight => "flight",
            ExpenseCategory::Hotel => "hotel",
            ExpenseCategory::Excursion => "excursion",
            ExpenseCategory::Onboard => "onboard",
            ExpenseCategory::Other => "other",
        }
    }

    /// All categories, for iteration in stats or forms.
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Cruise,
        ExpenseCategory::Flight,
        ExpenseCategory::Hotel,
        ExpenseCategory::Excursion,
        ExpenseCategory::Onboard,
        ExpenseCategory::Other,
    ];
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// A single expense booked against a cruise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Expense category.
    pub category: ExpenseCategory,

    /// Free-form description; empty when unset.
    #[serde(default)]
    pub description: String,

    /// Amount in the trip currency. Expected non-negative, not enforced.
    pub amount: f64,

    /// Day the expense occurred, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<NaiveDate>,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl ExpenseRecord {
    /// Create an expense with an empty description.
    pub fn new(category: ExpenseCategory, amount: f64) -> Self {
        Self {
            category,
            description: String::new(),
            amount,
            expense_date: None,
            created_at: Utc::now(),
        }
    }
}
