//! Interchange to entity graph mapping with duplicate detection.

use crate::dates;
use crate::error::Result;
use crate::schema::{ExportCruise, ExportExpense, ExportPort};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::NaiveDate;
use sl_model::{CruiseRecord, ExpenseCategory, ExpenseRecord, PhotoBlob, PortRecord};
use std::path::{Component, Path};
use tracing::{debug, warn};

/// Candidate records decoded from one interchange payload.
///
/// Nothing is persisted yet; the orchestrator commits `records` in a single
/// batch.
#[derive(Debug)]
pub struct ImportBatch {
    /// New cruises, ready to commit.
    pub records: Vec<CruiseRecord>,
    /// Candidates dropped as duplicates of existing cruises.
    pub skipped: usize,
}

/// Decode an interchange payload into candidate cruises.
///
/// Structural failure (not a JSON array of the expected shape) aborts.
/// Record-level problems are contained: a cruise with unparsable start or
/// end date is dropped, a duplicate of `existing` is counted in `skipped`,
/// and bad sub-items (dates, images, categories) degrade to defaults.
///
/// Duplicate detection is heuristic by design: exports mint fresh
/// identifiers every time, so the only usable key is exact title, same start
/// day and case-insensitive ship name.
pub fn decode_batch(
    json: &[u8],
    images_dir: Option<&Path>,
    existing: &[CruiseRecord],
) -> Result<ImportBatch> {
    let exports: Vec<ExportCruise> = serde_json::from_slice(json)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for export in &exports {
        let (Some(start), Some(end)) = (
            dates::parse_date(&export.start_date),
            dates::parse_date(&export.end_date),
        ) else {
            warn!(title = %export.title, "cruise has unparsable dates, dropping");
            continue;
        };

        if is_duplicate(export, start, existing) {
            debug!(title = %export.title, "duplicate of existing cruise, skipping");
            skipped += 1;
            continue;
        }

        records.push(build_cruise(export, start, end, images_dir));
    }

    debug!(
        imported = records.len(),
        skipped,
        total = exports.len(),
        "interchange batch decoded"
    );

    Ok(ImportBatch { records, skipped })
}

fn is_duplicate(export: &ExportCruise, start: NaiveDate, existing: &[CruiseRecord]) -> bool {
    existing.iter().any(|cruise| {
        cruise.title == export.title
            && cruise.start_date == start
            && cruise.ship.to_lowercase() == export.ship.to_lowercase()
    })
}

fn build_cruise(
    export: &ExportCruise,
    start: NaiveDate,
    end: NaiveDate,
    images_dir: Option<&Path>,
) -> CruiseRecord {
    let mut cruise = CruiseRecord::new(
        &export.title,
        start,
        end,
        &export.shipping_line,
        &export.ship,
    );
    cruise.cabin_type = export.cabin_type.clone().unwrap_or_default();
    cruise.cabin_number = export.cabin_number.clone().unwrap_or_default();
    cruise.booking_number = export.booking_number.clone().unwrap_or_default();
    cruise.notes = export.notes.clone().unwrap_or_default();
    cruise.rating = export.rating.clamp(0, 5) as u8;

    for (index, port) in export.route.iter().enumerate() {
        cruise.route.push(build_port(port, index as i64, images_dir));
    }

    for (index, photo_ref) in export.photos.iter().enumerate() {
        if let Some(bytes) = resolve_photo(photo_ref, images_dir) {
            cruise.photos.push(PhotoBlob::new(bytes, index as i64));
        }
    }

    for expense in &export.expenses {
        cruise.expenses.push(build_expense(expense));
    }

    cruise
}

fn build_port(export: &ExportPort, sort_order: i64, images_dir: Option<&Path>) -> PortRecord {
    let name_lower = export.name.to_lowercase();
    let is_sea_day = name_lower == "seetag" || name_lower == "sea day" || export.lat.is_none();

    let latitude = parse_coordinate(export.lat.as_deref());
    let longitude = parse_coordinate(export.lng.as_deref());

    let mut port = PortRecord::new(
        &export.name,
        export.country.clone().unwrap_or_default(),
        latitude,
        longitude,
    );
    port.sort_order = sort_order;
    port.is_sea_day = is_sea_day;
    port.excursions = export.excursions.clone();

    if let Some(arrival) = dates::parse_port_timestamp(&export.arrival) {
        port.arrival = arrival;
    }
    if let Some(departure) = dates::parse_port_timestamp(&export.departure) {
        port.departure = departure;
    }

    if let (Some(dir), Some(image_url)) = (images_dir, export.image_url.as_deref()) {
        port.image_data = read_relative(dir, image_url);
    }

    port
}

fn build_expense(export: &ExportExpense) -> ExpenseRecord {
    let mut expense = ExpenseRecord::new(
        ExpenseCategory::from_token(&export.category),
        export.amount,
    );
    expense.description = export.description.clone().unwrap_or_default();
    expense.expense_date = export.expense_date.as_deref().and_then(dates::parse_date);
    expense
}

fn parse_coordinate(value: Option<&str>) -> f64 {
    value.unwrap_or("0").parse().unwrap_or(0.0)
}

/// Resolve a photo string: `data:image...` decodes in place, anything else
/// is a file reference relative to the images directory. Unresolvable
/// photos are dropped, never fatal.
fn resolve_photo(photo_ref: &str, images_dir: Option<&Path>) -> Option<Vec<u8>> {
    if photo_ref.starts_with("data:image") {
        let encoded = photo_ref.split_once(',').map(|(_, rest)| rest)?;
        return match STANDARD.decode(encoded.as_bytes()) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!(error = %err, "photo data uri failed to decode, dropping");
                None
            }
        };
    }

    read_relative(images_dir?, photo_ref)
}

/// Read a file reference strictly beneath `dir`. Absolute references and
/// parent traversal do not resolve.
fn read_relative(dir: &Path, reference: &str) -> Option<Vec<u8>> {
    let relative = Path::new(reference);
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !contained {
        debug!(reference, "image reference escapes the images directory, dropping");
        return None;
    }

    match std::fs::read(dir.join(relative)) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            debug!(reference, error = %err, "image reference unreadable, dropping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const MITTELMEER: &str = r#"[{
        "id": "cruise_abc",
        "title": "Mittelmeer",
        "startDate": "2024-05-01",
        "endDate": "2024-05-08",
        "shippingLine": "TUI Cruises",
        "ship": "Mein Schiff 4",
        "rating": 4,
        "route": [
            {
                "id": "port-1", "name": "Hamburg", "country": "Deutschland",
                "lat": "53.55110000", "lng": "9.99370000",
                "arrival": "2024-05-01T08:00:00", "departure": "2024-05-01T18:00:00",
                "excursions": ["Speicherstadt"]
            },
            {
                "id": "port-2", "name": "Seetag",
                "arrival": "2024-05-02", "departure": "2024-05-02",
                "excursions": []
            }
        ],
        "photos": [],
        "expenses": [
            {
                "id": "e1", "cruiseId": "cruise_abc", "category": "ausflug",
                "description": "Hafenrundfahrt", "amount": 49.9,
                "expenseDate": "2024-05-01", "createdAt": "2024-05-10T12:00:00.000Z"
            }
        ]
    }]"#;

    #[test]
    fn test_mittelmeer_scenario() {
        let batch = decode_batch(MITTELMEER.as_bytes(), None, &[]).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.skipped, 0);

        let cruise = &batch.records[0];
        assert_eq!(cruise.title, "Mittelmeer");
        assert_eq!(cruise.start_date, date(2024, 5, 1));
        assert_eq!(cruise.end_date, date(2024, 5, 8));
        assert_eq!(cruise.rating, 4);

        assert_eq!(cruise.route.len(), 2);
        let hamburg = &cruise.route[0];
        assert_eq!(hamburg.name, "Hamburg");
        assert_eq!(hamburg.sort_order, 0);
        assert!(!hamburg.is_sea_day);
        assert!((hamburg.latitude - 53.5511).abs() < 1e-9);
        assert_eq!(hamburg.excursions, vec!["Speicherstadt"]);
        assert_eq!(
            hamburg.arrival,
            "2024-05-01T08:00:00".parse::<chrono::NaiveDateTime>().unwrap()
        );

        let sea = &cruise.route[1];
        assert!(sea.is_sea_day);
        assert_eq!(sea.sort_order, 1);
        assert_eq!(sea.latitude, 0.0);

        assert_eq!(cruise.expenses.len(), 1);
        let expense = &cruise.expenses[0];
        assert_eq!(expense.category, ExpenseCategory::Excursion);
        assert!((expense.amount - 49.9).abs() < 1e-9);
        assert_eq!(expense.expense_date, Some(date(2024, 5, 1)));
        assert_eq!(expense.description, "Hafenrundfahrt");
    }

    #[test]
    fn test_duplicate_detection_case_insensitive_ship() {
        let existing = CruiseRecord::new(
            "Mittelmeer",
            date(2024, 5, 1),
            date(2024, 5, 8),
            "TUI Cruises",
            "MEIN SCHIFF 4",
        );

        let batch = decode_batch(MITTELMEER.as_bytes(), None, &[existing]).unwrap();
        assert_eq!(batch.records.len(), 0);
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn test_different_start_day_is_no_duplicate() {
        let existing = CruiseRecord::new(
            "Mittelmeer",
            date(2024, 5, 2),
            date(2024, 5, 9),
            "TUI Cruises",
            "Mein Schiff 4",
        );

        let batch = decode_batch(MITTELMEER.as_bytes(), None, &[existing]).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn test_unparsable_cruise_dates_drop_record_only() {
        let json = r#"[
            {"id": "c1", "title": "Bad", "startDate": "01.05.2024", "endDate": "2024-05-08",
             "shippingLine": "TUI", "ship": "MS4", "rating": 0,
             "route": [], "photos": [], "expenses": []},
            {"id": "c2", "title": "Good", "startDate": "2024-05-01", "endDate": "2024-05-08",
             "shippingLine": "TUI", "ship": "MS4", "rating": 0,
             "route": [], "photos": [], "expenses": []}
        ]"#;

        let batch = decode_batch(json.as_bytes(), None, &[]).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].title, "Good");
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn test_structural_error_aborts() {
        assert!(decode_batch(b"{\"not\": \"an array\"}", None, &[]).is_err());
        assert!(decode_batch(b"no json at all", None, &[]).is_err());
    }

    #[test]
    fn test_sea_day_by_absent_lat() {
        let json = r#"[{
            "id": "c1", "title": "t", "startDate": "2024-05-01", "endDate": "2024-05-08",
            "shippingLine": "TUI", "ship": "MS4", "rating": 0,
            "route": [{"id": "p", "name": "Irgendwo", "arrival": "2024-05-02",
                       "departure": "2024-05-02", "excursions": []}],
            "photos": [], "expenses": []
        }]"#;

        let batch = decode_batch(json.as_bytes(), None, &[]).unwrap();
        assert!(batch.records[0].route[0].is_sea_day);
    }

    #[test]
    fn test_base64_photo_decodes_without_images_dir() {
        let encoded = STANDARD.encode([1u8, 2, 3, 4]);
        let json = format!(
            r#"[{{
                "id": "c1", "title": "t", "startDate": "2024-05-01", "endDate": "2024-05-08",
                "shippingLine": "TUI", "ship": "MS4", "rating": 0,
                "route": [], "photos": ["data:image/png;base64,{encoded}"], "expenses": []
            }}]"#
        );

        let batch = decode_batch(json.as_bytes(), None, &[]).unwrap();
        assert_eq!(batch.records[0].photos.len(), 1);
        assert_eq!(batch.records[0].photos[0].image_data, vec![1, 2, 3, 4]);
        assert_eq!(batch.records[0].photos[0].sort_order, 0);
    }

    #[test]
    fn test_file_photo_resolves_and_unreadable_drops() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photo.jpg"), [7u8, 8]).unwrap();

        let json = r#"[{
            "id": "c1", "title": "t", "startDate": "2024-05-01", "endDate": "2024-05-08",
            "shippingLine": "TUI", "ship": "MS4", "rating": 0,
            "route": [], "photos": ["photo.jpg", "missing.jpg"], "expenses": []
        }]"#;

        let batch = decode_batch(json.as_bytes(), Some(dir.path()), &[]).unwrap();
        let photos = &batch.records[0].photos;
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].image_data, vec![7, 8]);
    }

    #[test]
    fn test_traversal_reference_does_not_resolve() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("inside.jpg"), [1u8]).unwrap();

        let json = r#"[{
            "id": "c1", "title": "t", "startDate": "2024-05-01", "endDate": "2024-05-08",
            "shippingLine": "TUI", "ship": "MS4", "rating": 0,
            "route": [], "photos": ["../inside.jpg", "/etc/hostname"], "expenses": []
        }]"#;

        let sub = dir.path().join("sub");
        let batch = decode_batch(json.as_bytes(), Some(sub.as_path()), &[]).unwrap();
        assert!(batch.records[0].photos.is_empty());
    }

    #[test]
    fn test_port_image_url_resolves() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hamburg.jpg"), [5u8, 6]).unwrap();

        let json = r#"[{
            "id": "c1", "title": "t", "startDate": "2024-05-01", "endDate": "2024-05-08",
            "shippingLine": "TUI", "ship": "MS4", "rating": 0,
            "route": [{"id": "p", "name": "Hamburg", "country": "DE",
                       "lat": "53.55110000", "lng": "9.99370000",
                       "arrival": "2024-05-01T08:00:00", "departure": "2024-05-01T18:00:00",
                       "imageUrl": "hamburg.jpg", "excursions": []}],
            "photos": [], "expenses": []
        }]"#;

        let batch = decode_batch(json.as_bytes(), Some(dir.path()), &[]).unwrap();
        assert_eq!(
            batch.records[0].route[0].image_data.as_deref(),
            Some([5u8, 6].as_slice())
        );
    }

    #[test]
    fn test_unknown_category_maps_to_other() {
        let json = r#"[{
            "id": "c1", "title": "t", "startDate": "2024-05-01", "endDate": "2024-05-08",
            "shippingLine": "TUI", "ship": "MS4", "rating": 0,
            "route": [], "photos": [],
            "expenses": [{"id": "e", "cruiseId": "c1", "category": "wellness",
                          "amount": 10.0, "createdAt": "2024-05-10T12:00:00.000Z"}]
        }]"#;

        let batch = decode_batch(json.as_bytes(), None, &[]).unwrap();
        assert_eq!(
            batch.records[0].expenses[0].category,
            ExpenseCategory::Other
        );
        assert!(batch.records[0].expenses[0].expense_date.is_none());
    }

    #[test]
    fn test_rating_clamped() {
        let json = r#"[{
            "id": "c1", "title": "t", "startDate": "2024-05-01", "endDate": "2024-05-08",
            "shippingLine": "TUI", "ship": "MS4", "rating": 11,
            "route": [], "photos": [], "expenses": []
        }]"#;

        let batch = decode_batch(json.as_bytes(), None, &[]).unwrap();
        assert_eq!(batch.records[0].rating, 5);
    }
}
