//! Catalog core.
//!
//! Everything between the HTTP layer and MySQL lives here: the per-resource
//! filter tables, the value validators, the parameterized query builder,
//! pagination, and the list/lookup functions the handlers call. Validation
//! always completes before a query executes, so a request produces either
//! one page of rows or exactly one taxonomy error.

pub mod buttons;
pub mod filters;
pub mod keyboards;
pub mod keycaps;
pub mod layouts;
pub mod mice;
pub mod pagination;
pub mod query;
pub mod switches;
pub mod validate;
pub mod vendors;

/// Connection types keyboards and mice report.
pub const CONNECTION_TYPES: &[&str] = &["wired", "wireless", "both"];

/// Switch feel categories.
pub const SWITCH_TYPES: &[&str] = &["linear", "tactile", "clicky"];

/// Firmware families tracked on PCBs.
pub const FIRMWARE_TYPES: &[&str] = &["QMK", "proprietary"];

/// USB polling rates mice ship with, in Hz.
pub const POLLING_RATES: &[&str] = &["125", "500", "1000"];
