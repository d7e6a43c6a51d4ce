//! Entity graph to interchange mapping.

use crate::dates;
use crate::error::Result;
use crate::schema::{ExportCruise, ExportExpense, ExportPort};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{SecondsFormat, Utc};
use sl_model::{CruiseRecord, ExpenseRecord, PortRecord};
use tracing::debug;
use uuid::Uuid;

/// Map the entity graph to interchange records.
///
/// Ports and photos are emitted in `sort_order`; identifiers are minted
/// fresh on every call.
pub fn to_interchange(cruises: &[CruiseRecord]) -> Vec<ExportCruise> {
    cruises.iter().map(export_cruise).collect()
}

/// Serialize the interchange array: pretty-printed, keys sorted, so two
/// exports of the same graph differ only in minted identifiers and
/// timestamps.
pub fn export_json(cruises: &[CruiseRecord]) -> Result<Vec<u8>> {
    let records = to_interchange(cruises);
    // Round-trip through Value: its map is ordered, which sorts the keys.
    let value = serde_json::to_value(&records)?;
    let bytes = serde_json::to_vec_pretty(&value)?;
    debug!(
        cruises = records.len(),
        bytes = bytes.len(),
        "interchange export serialized"
    );
    Ok(bytes)
}

fn export_cruise(cruise: &CruiseRecord) -> ExportCruise {
    let cruise_id = format!("cruise_{}", Uuid::new_v4());

    let route = cruise
        .sorted_route()
        .into_iter()
        .map(export_port)
        .collect();

    let photos = cruise
        .sorted_photos()
        .into_iter()
        .map(|photo| format!("data:image/png;base64,{}", STANDARD.encode(&photo.image_data)))
        .collect();

    let expenses = cruise
        .expenses
        .iter()
        .map(|expense| export_expense(expense, &cruise_id))
        .collect();

    ExportCruise {
        id: cruise_id,
        title: cruise.title.clone(),
        start_date: dates::format_date(cruise.start_date),
        end_date: dates::format_date(cruise.end_date),
        shipping_line: cruise.shipping_line.clone(),
        ship: cruise.ship.clone(),
        cabin_type: none_if_empty(&cruise.cabin_type),
        cabin_number: none_if_empty(&cruise.cabin_number),
        booking_number: none_if_empty(&cruise.booking_number),
        notes: none_if_empty(&cruise.notes),
        rating: i64::from(cruise.rating),
        route,
        photos,
        expenses,
    }
}

fn export_port(port: &PortRecord) -> ExportPort {
    let sea_day = port.is_sea_day;
    ExportPort {
        id: format!("port-{}", Uuid::new_v4()),
        name: if sea_day {
            "Seetag".to_string()
        } else {
            port.name.clone()
        },
        country: if sea_day {
            None
        } else {
            none_if_empty(&port.country)
        },
        lat: (!sea_day).then(|| format!("{:.8}", port.latitude)),
        lng: (!sea_day).then(|| format!("{:.8}", port.longitude)),
        arrival: dates::format_datetime(port.arrival),
        departure: dates::format_datetime(port.departure),
        image_url: None,
        excursions: port.excursions.clone(),
    }
}

fn export_expense(expense: &ExpenseRecord, cruise_id: &str) -> ExportExpense {
    ExportExpense {
        id: Uuid::new_v4().to_string(),
        cruise_id: cruise_id.to_string(),
        category: expense.category.as_token().to_string(),
        description: none_if_empty(&expense.description),
        amount: expense.amount,
        expense_date: expense.expense_date.map(dates::format_date),
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
