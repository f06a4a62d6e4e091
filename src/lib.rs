//! KeebDex Library
//!
//! This library provides the core functionality for the KeebDex REST API:
//! validating query-string filters against per-resource allow-lists, building
//! parameterized SQL for a MySQL hardware catalog, and serving the results
//! over HTTP.

// Module declarations
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod web;
