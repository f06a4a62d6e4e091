//! Vendor row type.

use serde::Serialize;
use sqlx::FromRow;

/// A hardware vendor (keyboard, switch or mouse manufacturer).
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Vendor {
    /// Primary key
    pub vendor_id: i64,
    /// Display name (e.g., "Keychron")
    pub name: String,
    /// Country of origin
    pub country: String,
    /// Year the company was founded
    pub founded_year: i32,
    /// Company website, if known
    pub website: Option<String>,
    /// Headquarters location, if known
    pub headquarters: Option<String>,
}
