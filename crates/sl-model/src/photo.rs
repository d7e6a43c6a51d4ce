//! Cruise photos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A photo attached to a cruise.
///
/// `sort_order` defines display order; unlike the route it is not guaranteed
/// unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoBlob {
    /// Raw image bytes. Stored as base64 in the JSON store file.
    #[serde(with = "crate::b64::bytes")]
    pub image_data: Vec<u8>,

    /// Display order.
    #[serde(default)]
    pub sort_order: i64,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl PhotoBlob {
    /// Create a photo from raw bytes.
    pub fn new(image_data: Vec<u8>, sort_order: i64) -> Self {
        Self {
            image_data,
            sort_order,
            created_at: Utc::now(),
        }
    }
}
