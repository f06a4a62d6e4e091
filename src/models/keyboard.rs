//! Keyboard row type.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A keyboard model in the catalog.
///
/// `firmware_type` physically lives on the `pcbs` table; every keyboard
/// query selects it as `pcbs.firmware AS firmware_type` so list and detail
/// responses share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Keyboard {
    /// Primary key
    pub keyboard_id: i64,
    /// Vendor that sells this board
    pub vendor_id: i64,
    /// Switch model the board ships with
    pub switch_id: i64,
    /// Physical layout of the board
    pub layout_id: i64,
    /// Display name (e.g., "Q1 Pro")
    pub name: String,
    /// First retail availability
    pub release_date: NaiveDate,
    /// Retail price in USD
    pub price: f64,
    /// Connection type: wired, wireless or both
    pub connectivity: String,
    /// Whether switches can be replaced without soldering
    pub hot_swappable: bool,
    /// Case material (e.g., "aluminum")
    pub case_material: String,
    /// Weight in grams
    pub weight: f64,
    /// Firmware family: QMK or proprietary
    pub firmware_type: String,
}
