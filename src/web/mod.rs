//! Web API module for KeebDex.
//!
//! This module wires the catalog core to HTTP: one router, a shared
//! connection pool, and a thin handler per route. Handlers validate through
//! the catalog and return either a JSON payload or an [`ApiError`], whose
//! `IntoResponse` impl owns the error wire format.
//!
//! # Endpoints
//!
//! - `GET /` - Service description and per-resource filter summary
//! - `GET /health` - Health check
//! - `GET /vendors` - List vendors (filterable, sortable)
//! - `GET /vendors/{id}` - Vendor by id
//! - `GET /vendors/{id}/switches` - Switches sold by a vendor
//! - `GET /keyboards` - List keyboards (filterable, sortable)
//! - `GET /keyboards/{id}` - Keyboard by id
//! - `GET /mice` - List mice (filterable)
//! - `GET /mice/{id}` - Mouse by id
//! - `GET /mice/{id}/buttons` - Buttons of a mouse
//! - `GET /layouts` - List layouts
//! - `GET /layouts/{id}` - Layout by id
//! - `GET /layouts/{id}/keyboards` - Keyboards built for a layout
//! - `GET /layouts/{id}/keycap-sets` - Keycap sets compatible with a layout

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::MySqlPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog;
use crate::catalog::filters::FilterMap;
use crate::catalog::pagination::{ListResponse, Pagination};
use crate::config::Config;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{Keyboard, KeycapSet, Layout, Mouse, MouseButton, Switch, Vendor};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool (cheaply cloneable handle)
    pool: MySqlPool,
}

impl AppState {
    /// Creates a new application state around an existing pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Service description returned from the root route.
#[derive(Debug, Serialize)]
pub struct AboutResponse {
    /// API name.
    pub api: &'static str,
    /// Application version.
    pub version: String,
    /// Short description of the service.
    pub about: &'static str,
    /// Every route with its accepted query parameters.
    pub resources: Vec<ResourceInfo>,
}

/// One route summary in the [`AboutResponse`].
#[derive(Debug, Serialize)]
pub struct ResourceInfo {
    /// Route template.
    pub route: &'static str,
    /// Query parameters the route accepts.
    pub filters: &'static [&'static str],
}

// ============================================================================
// Meta Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET / - Service description with the filters each route accepts.
async fn about() -> Json<AboutResponse> {
    Json(AboutResponse {
        api: "keebdex",
        version: env!("CARGO_PKG_VERSION").to_string(),
        about: "Read-only catalog of keyboard and mouse hardware. \
                All list routes accept page and limit.",
        resources: vec![
            ResourceInfo {
                route: "/vendors",
                filters: &[
                    "name",
                    "country",
                    "founded_after",
                    "founded_before",
                    "keyboards_count",
                    "lower_price_limit",
                    "upper_price_limit",
                    "order_by",
                ],
            },
            ResourceInfo {
                route: "/vendors/{id}",
                filters: &[],
            },
            ResourceInfo {
                route: "/vendors/{id}/switches",
                filters: &[
                    "type",
                    "lower_actuation_force_limit",
                    "upper_actuation_force_limit",
                    "lower_travel_distance_limit",
                    "upper_travel_distance_limit",
                    "lifespan_minimum",
                    "released_after",
                    "released_before",
                ],
            },
            ResourceInfo {
                route: "/keyboards",
                filters: &[
                    "name",
                    "connectivity",
                    "switch_type",
                    "hotswappable",
                    "weight_maximum",
                    "released_after",
                    "released_before",
                    "firmware_type",
                    "order_by",
                ],
            },
            ResourceInfo {
                route: "/keyboards/{id}",
                filters: &[],
            },
            ResourceInfo {
                route: "/mice",
                filters: &[
                    "name",
                    "polling_rate",
                    "connection",
                    "weight_minimum",
                    "weight_maximum",
                    "lower_price_limit",
                    "upper_price_limit",
                    "button_count",
                    "rating",
                ],
            },
            ResourceInfo {
                route: "/mice/{id}",
                filters: &[],
            },
            ResourceInfo {
                route: "/mice/{id}/buttons",
                filters: &["name", "name_contains", "programmable"],
            },
            ResourceInfo {
                route: "/layouts",
                filters: &[],
            },
            ResourceInfo {
                route: "/layouts/{id}",
                filters: &[],
            },
            ResourceInfo {
                route: "/layouts/{id}/keyboards",
                filters: &[
                    "switch_type",
                    "lower_price_limit",
                    "upper_price_limit",
                    "connectivity",
                ],
            },
            ResourceInfo {
                route: "/layouts/{id}/keycap-sets",
                filters: &["material", "profile", "manufacturer", "price_maximum"],
            },
        ],
    })
}

// ============================================================================
// Vendor Handlers
// ============================================================================

/// GET /vendors - List vendors matching the query filters.
async fn list_vendors(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<Vendor>>> {
    let filters = FilterMap::new(params);
    let pagination = Pagination::from_filters(&filters)?;
    let vendors = catalog::vendors::list(&state.pool, &filters, &pagination).await?;

    Ok(Json(ListResponse::new(&pagination, vendors)))
}

/// GET /vendors/{id} - Look a vendor up by id.
async fn get_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<i64>,
) -> ApiResult<Json<Vendor>> {
    let vendor = catalog::vendors::find_by_id(&state.pool, vendor_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(vendor))
}

/// GET /vendors/{id}/switches - List a vendor's switches.
async fn list_vendor_switches(
    State(state): State<AppState>,
    Path(vendor_id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<Switch>>> {
    // Parent existence decides 404 before any filter validation runs.
    catalog::vendors::find_by_id(&state.pool, vendor_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let filters = FilterMap::new(params);
    let pagination = Pagination::from_filters(&filters)?;
    let switches =
        catalog::switches::list_by_vendor(&state.pool, vendor_id, &filters, &pagination).await?;

    Ok(Json(ListResponse::new(&pagination, switches)))
}

// ============================================================================
// Keyboard Handlers
// ============================================================================

/// GET /keyboards - List keyboards matching the query filters.
async fn list_keyboards(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<Keyboard>>> {
    let filters = FilterMap::new(params);
    let pagination = Pagination::from_filters(&filters)?;
    let keyboards = catalog::keyboards::list(&state.pool, &filters, &pagination).await?;

    Ok(Json(ListResponse::new(&pagination, keyboards)))
}

/// GET /keyboards/{id} - Look a keyboard up by id.
async fn get_keyboard(
    State(state): State<AppState>,
    Path(keyboard_id): Path<i64>,
) -> ApiResult<Json<Keyboard>> {
    let keyboard = catalog::keyboards::find_by_id(&state.pool, keyboard_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(keyboard))
}

// ============================================================================
// Mouse Handlers
// ============================================================================

/// GET /mice - List mice matching the query filters.
async fn list_mice(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<Mouse>>> {
    let filters = FilterMap::new(params);
    let pagination = Pagination::from_filters(&filters)?;
    let mice = catalog::mice::list(&state.pool, &filters, &pagination).await?;

    Ok(Json(ListResponse::new(&pagination, mice)))
}

/// GET /mice/{id} - Look a mouse up by id.
async fn get_mouse(
    State(state): State<AppState>,
    Path(mouse_id): Path<i64>,
) -> ApiResult<Json<Mouse>> {
    let mouse = catalog::mice::find_by_id(&state.pool, mouse_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(mouse))
}

/// GET /mice/{id}/buttons - List a mouse's buttons.
async fn list_mouse_buttons(
    State(state): State<AppState>,
    Path(mouse_id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<MouseButton>>> {
    catalog::mice::find_by_id(&state.pool, mouse_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let filters = FilterMap::new(params);
    let pagination = Pagination::from_filters(&filters)?;
    let buttons =
        catalog::buttons::list_by_mouse(&state.pool, mouse_id, &filters, &pagination).await?;

    Ok(Json(ListResponse::new(&pagination, buttons)))
}

// ============================================================================
// Layout Handlers
// ============================================================================

/// GET /layouts - List layouts.
async fn list_layouts(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<Layout>>> {
    let filters = FilterMap::new(params);
    let pagination = Pagination::from_filters(&filters)?;
    let layouts = catalog::layouts::list(&state.pool, &filters, &pagination).await?;

    Ok(Json(ListResponse::new(&pagination, layouts)))
}

/// GET /layouts/{id} - Look a layout up by id.
async fn get_layout(
    State(state): State<AppState>,
    Path(layout_id): Path<i64>,
) -> ApiResult<Json<Layout>> {
    let layout = catalog::layouts::find_by_id(&state.pool, layout_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(layout))
}

/// GET /layouts/{id}/keyboards - List keyboards built for a layout.
async fn list_layout_keyboards(
    State(state): State<AppState>,
    Path(layout_id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<Keyboard>>> {
    catalog::layouts::find_by_id(&state.pool, layout_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let filters = FilterMap::new(params);
    let pagination = Pagination::from_filters(&filters)?;
    let keyboards =
        catalog::keyboards::list_by_layout(&state.pool, layout_id, &filters, &pagination).await?;

    Ok(Json(ListResponse::new(&pagination, keyboards)))
}

/// GET /layouts/{id}/keycap-sets - List keycap sets compatible with a layout.
async fn list_layout_keycap_sets(
    State(state): State<AppState>,
    Path(layout_id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<KeycapSet>>> {
    catalog::layouts::find_by_id(&state.pool, layout_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let filters = FilterMap::new(params);
    let pagination = Pagination::from_filters(&filters)?;
    let sets =
        catalog::keycaps::list_by_layout(&state.pool, layout_id, &filters, &pagination).await?;

    Ok(Json(ListResponse::new(&pagination, sets)))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins. The API is read-only and
    // unauthenticated, so there is no state a cross-origin caller could abuse.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Meta
        .route("/", get(about))
        .route("/health", get(health_check))
        // Vendor endpoints
        .route("/vendors", get(list_vendors))
        .route("/vendors/{id}", get(get_vendor))
        .route("/vendors/{id}/switches", get(list_vendor_switches))
        // Keyboard endpoints
        .route("/keyboards", get(list_keyboards))
        .route("/keyboards/{id}", get(get_keyboard))
        // Mouse endpoints
        .route("/mice", get(list_mice))
        .route("/mice/{id}", get(get_mouse))
        .route("/mice/{id}/buttons", get(list_mouse_buttons))
        // Layout endpoints
        .route("/layouts", get(list_layouts))
        .route("/layouts/{id}", get(get_layout))
        .route("/layouts/{id}/keyboards", get(list_layout_keyboards))
        .route("/layouts/{id}/keycap-sets", get(list_layout_keycap_sets))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the database URL cannot be parsed or the listener
/// fails to bind.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let pool = db::connect(&config.database)?;
    let state = AppState::new(pool);
    let app = create_router(state);
    let addr = config.bind_addr();

    info!(
        "Starting KeebDex API on {} (pool size {})",
        addr, config.database.max_connections
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
