//! Mouse and mouse-button row types.

use serde::Serialize;
use sqlx::FromRow;

/// A mouse model in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Mouse {
    /// Primary key
    pub mouse_id: i64,
    /// Vendor that sells this mouse
    pub vendor_id: i64,
    /// Display name (e.g., "G Pro X Superlight")
    pub name: String,
    /// USB polling rate in Hz
    pub polling_rate: i32,
    /// Connection type: wired, wireless or both
    pub connection: String,
    /// Weight in grams
    pub weight: f64,
    /// Retail price in USD
    pub price: f64,
}

/// A physical button on a mouse.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MouseButton {
    /// Primary key
    pub button_id: i64,
    /// Mouse this button belongs to
    pub mouse_id: i64,
    /// Button label (e.g., "DPI shift")
    pub name: String,
    /// Whether the button can be rebound in software
    pub programmable: bool,
}
