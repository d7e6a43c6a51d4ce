//! Transport records of the interchange format.
//!
//! String-typed and camelCase, exactly as the companion web app reads and
//! writes them. Empty optional fields travel as absent keys, never as `""`.

use serde::{Deserialize, Serialize};

/// One cruise in the interchange array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCruise {
    /// Freshly minted per export (`cruise_<uuid>`); not stable across exports.
    pub id: String,
    pub title: String,
    /// Date-only, `YYYY-MM-DD`.
    pub start_date: String,
    /// Date-only, `YYYY-MM-DD`.
    pub end_date: String,
    pub shipping_line: String,
    pub ship: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// 0-5.
    pub rating: i64,
    pub route: Vec<ExportPort>,
    /// `data:image/png;base64,...` strings or file references relative to
    /// the directory holding `data.json`.
    pub photos: Vec<String>,
    pub expenses: Vec<ExportExpense>,
}

/// One port call (or sea day) on an exported route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPort {
    /// Freshly minted per export (`port-<uuid>`).
    pub id: String,
    /// `"Seetag"` for sea days.
    pub name: String,
    /// Absent for sea days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Fixed 8-decimal string; absent for sea days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    /// Fixed 8-decimal string; absent for sea days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<String>,
    /// `YYYY-MM-DDThh:mm:ss`, local wall clock.
    pub arrival: String,
    /// `YYYY-MM-DDThh:mm:ss`, local wall clock.
    pub departure: String,
    /// File reference relative to the directory holding `data.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub excursions: Vec<String>,
}

/// One expense on an exported cruise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportExpense {
    /// Freshly minted per export (bare uuid).
    pub id: String,
    /// The minted id of the owning cruise.
    pub cruise_id: String,
    /// Category token; decoded through the closed category codec.
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    /// Date-only, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<String>,
    /// RFC 3339 export instant.
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_keys() {
        let json = r#"{
            "id": "cruise_1", "title": "t", "startDate": "2024-05-01",
            "endDate": "2024-05-08", "shippingLine": "TUI", "ship": "MS4",
            "rating": 4, "route": [], "photos": [], "expenses": []
        }"#;
        let cruise: ExportCruise = serde_json::from_str(json).unwrap();
        assert_eq!(cruise.start_date, "2024-05-01");
        assert!(cruise.cabin_type.is_none());
        assert!(cruise.notes.is_none());
    }

    #[test]
    fn test_missing_collection_is_structural() {
        // The web app always writes route/photos/expenses; their absence is
        // a schema violation, not a recoverable record.
        let json = r#"[{
            "id": "cruise_1", "title": "t", "startDate": "2024-05-01",
            "endDate": "2024-05-08", "shippingLine": "TUI", "ship": "MS4",
            "rating": 0
        }]"#;
        assert!(serde_json::from_str::<Vec<ExportCruise>>(json).is_err());
    }
}
