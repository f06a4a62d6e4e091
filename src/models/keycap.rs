//! Keycap set row type.

use serde::Serialize;
use sqlx::FromRow;

/// A keycap set compatible with one or more layouts.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct KeycapSet {
    /// Primary key
    pub keycap_id: i64,
    /// Set name (e.g., "GMK Olivia")
    pub name: String,
    /// Cap material (e.g., "ABS", "PBT")
    pub material: String,
    /// Cap profile (e.g., "Cherry", "SA")
    pub profile: String,
    /// Manufacturer name
    pub manufacturer: String,
    /// Retail price in USD
    pub price: f64,
}
