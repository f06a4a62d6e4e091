//! Switch row type.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A key switch model sold by a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Switch {
    /// Primary key
    pub switch_id: i64,
    /// Vendor that manufactures this switch
    pub vendor_id: i64,
    /// Display name (e.g., "MX Red")
    pub name: String,
    /// Feel category: linear, tactile or clicky
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub switch_type: String,
    /// Actuation force in grams
    pub actuation_force: f64,
    /// Total travel distance in millimeters
    pub travel_distance: f64,
    /// Rated lifespan in millions of keystrokes
    pub lifespan: i32,
    /// First retail availability
    pub release_date: NaiveDate,
}
