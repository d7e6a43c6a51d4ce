//! Archive import end to end, over fixture archives.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sl_archive::testutil::{build_archive, FixtureEntry};
use sl_core::{import_archive, TransferError};
use sl_model::{EntityStore, InMemoryStore};

const DATA_JSON: &str = r#"[{
    "id": "cruise_web",
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
            "imageUrl": "images/hamburg.jpg",
            "excursions": []
        },
        {
            "id": "port-2", "name": "Seetag",
            "arrival": "2024-05-02", "departure": "2024-05-02",
            "excursions": []
        }
    ],
    "photos": ["images/sunset.jpg"],
    "expenses": [
        {
            "id": "e1", "cruiseId": "cruise_web", "category": "ausflug",
            "amount": 49.9, "createdAt": "2024-05-10T12:00:00.000Z"
        }
    ]
}]"#;

fn web_archive(nested: bool) -> Vec<u8> {
    let prefix = if nested { "mittelmeer-export/" } else { "" };
    build_archive(&[
        FixtureEntry::stored(format!("{prefix}data.json"), DATA_JSON.as_bytes()),
        FixtureEntry::directory(format!("{prefix}images")),
        FixtureEntry::deflated(format!("{prefix}images/hamburg.jpg"), &[1, 2, 3, 4]),
        FixtureEntry::stored(format!("{prefix}images/sunset.jpg"), &[9, 8, 7]),
    ])
}

#[test]
fn archive_import_with_data_json_at_root() {
    let mut store = InMemoryStore::new();
    let result = import_archive(&mut store, &web_archive(false)).unwrap();

    assert_eq!(result.imported, 1);
    assert_eq!(result.skipped, 0);

    let cruise = &store.cruises()[0];
    assert_eq!(cruise.title, "Mittelmeer");
    assert_eq!(cruise.route.len(), 2);
    assert_eq!(cruise.route[0].name, "Hamburg");
    assert!(cruise.route[1].is_sea_day);

    // Image references resolved out of the extracted archive.
    assert_eq!(cruise.route[0].image_data.as_deref(), Some([1u8, 2, 3, 4].as_slice()));
    assert_eq!(cruise.photos.len(), 1);
    assert_eq!(cruise.photos[0].image_data, vec![9, 8, 7]);

    assert_eq!(cruise.expenses.len(), 1);
    assert_eq!(cruise.expenses[0].category, sl_model::ExpenseCategory::Excursion);
    assert!((cruise.expenses[0].amount - 49.9).abs() < 1e-9);
}

#[test]
fn archive_import_with_data_json_in_subdirectory() {
    let mut store = InMemoryStore::new();
    let result = import_archive(&mut store, &web_archive(true)).unwrap();

    assert_eq!(result.imported, 1);
    let cruise = &store.cruises()[0];
    // Sibling files resolve relative to the directory holding data.json.
    assert_eq!(cruise.route[0].image_data.as_deref(), Some([1u8, 2, 3, 4].as_slice()));
    assert_eq!(cruise.photos.len(), 1);
}

#[test]
fn importing_same_archive_twice_skips_everything() {
    let archive = web_archive(false);
    let mut store = InMemoryStore::new();

    let first = import_archive(&mut store, &archive).unwrap();
    assert_eq!((first.imported, first.skipped), (1, 0));

    let second = import_archive(&mut store, &archive).unwrap();
    assert_eq!((second.imported, second.skipped), (0, 1));
    assert_eq!(store.len(), 1);
}

#[test]
fn base64_photos_in_archive_need_no_image_files() {
    let encoded = STANDARD.encode([42u8; 8]);
    let data = format!(
        r#"[{{
            "id": "c", "title": "Fjorde", "startDate": "2024-06-01", "endDate": "2024-06-08",
            "shippingLine": "Hurtigruten", "ship": "MS Nordlys", "rating": 0,
            "route": [], "photos": ["data:image/png;base64,{encoded}"], "expenses": []
        }}]"#
    );
    let archive = build_archive(&[FixtureEntry::stored("data.json", data.as_bytes())]);

    let mut store = InMemoryStore::new();
    import_archive(&mut store, &archive).unwrap();
    assert_eq!(store.cruises()[0].photos[0].image_data, vec![42u8; 8]);
}

#[test]
fn missing_data_file_aborts_before_parsing() {
    let archive = build_archive(&[FixtureEntry::stored("readme.txt", b"hello")]);

    let mut store = InMemoryStore::new();
    let err = import_archive(&mut store, &archive).unwrap_err();
    assert!(matches!(err, TransferError::MissingDataFile));
    assert!(store.is_empty());
}

#[test]
fn corrupt_eocd_fails_closed() {
    let mut archive = web_archive(false);
    let eocd = archive.len() - 22;
    archive[eocd] ^= 0xff;

    let mut store = InMemoryStore::new();
    let err = import_archive(&mut store, &archive).unwrap_err();
    assert!(matches!(
        err,
        TransferError::Archive(sl_archive::ArchiveError::NoEocd)
    ));
    assert!(store.is_empty());
}

#[test]
fn undecodable_entry_does_not_block_the_rest() {
    // data.json is fine; one image entry uses an unsupported method and is
    // extracted as nothing, so the photo reference silently drops.
    let data = r#"[{
        "id": "c", "title": "Kanaren", "startDate": "2024-03-01", "endDate": "2024-03-10",
        "shippingLine": "AIDA", "ship": "AIDAcosma", "rating": 0,
        "route": [], "photos": ["images/broken.jpg"], "expenses": []
    }]"#;
    let archive = build_archive(&[
        FixtureEntry::stored("data.json", data.as_bytes()),
        FixtureEntry::with_method("images/broken.jpg", 12, vec![1, 2, 3], 3),
    ]);

    let mut store = InMemoryStore::new();
    let result = import_archive(&mut store, &archive).unwrap();
    assert_eq!(result.imported, 1);
    assert!(store.cruises()[0].photos.is_empty());
}
