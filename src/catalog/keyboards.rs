//! Keyboard listings and lookups.

use sqlx::MySqlPool;

use crate::catalog::filters::{self, Cmp, FilterMap, FilterSpec};
use crate::catalog::pagination::Pagination;
use crate::catalog::query::{QueryBuilder, SqlQuery, SqlValue};
use crate::catalog::{CONNECTION_TYPES, FIRMWARE_TYPES, SWITCH_TYPES};
use crate::error::ApiResult;
use crate::models::Keyboard;

/// Columns `order_by` may name.
const SORT_COLUMNS: &[&str] = &[
    "vendor_id",
    "switch_id",
    "layout_id",
    "name",
    "release_date",
    "price",
    "connectivity",
    "hot_swappable",
    "case_material",
    "weight",
];

/// Filters accepted by `GET /keyboards`, in application order.
const FILTERS: &[FilterSpec] = &[
    FilterSpec::contains("name", "keyboards.name"),
    FilterSpec::one_of("connectivity", "keyboards.connectivity", CONNECTION_TYPES),
    FilterSpec::one_of("switch_type", "switches.type", SWITCH_TYPES),
    FilterSpec::flag("hotswappable", "keyboards.hot_swappable"),
    FilterSpec::numeric("weight_maximum", "keyboards.weight", Cmp::Le),
    FilterSpec::date_range("released_after", "released_before", "keyboards.release_date"),
    FilterSpec::one_of("firmware_type", "pcbs.firmware", FIRMWARE_TYPES),
    FilterSpec::sort_by("order_by", "keyboards", SORT_COLUMNS),
];

/// Filters accepted by `GET /layouts/{id}/keyboards`, in application order.
const LAYOUT_FILTERS: &[FilterSpec] = &[
    FilterSpec::one_of("switch_type", "switches.type", SWITCH_TYPES),
    FilterSpec::numeric_range("lower_price_limit", "upper_price_limit", "keyboards.price"),
    FilterSpec::one_of("connectivity", "keyboards.connectivity", CONNECTION_TYPES),
];

// Both joins are many-to-one, so no DISTINCT is needed. pcbs carries the
// firmware column the model exposes as firmware_type.
const BASE: &str = "SELECT keyboards.*, pcbs.firmware AS firmware_type FROM keyboards \
                    JOIN switches ON switches.switch_id = keyboards.switch_id \
                    JOIN pcbs ON pcbs.keyboard_id = keyboards.keyboard_id \
                    WHERE 1=1";

/// One page of keyboards matching the request's filters.
pub async fn list(
    pool: &MySqlPool,
    filters: &FilterMap,
    pagination: &Pagination,
) -> ApiResult<Vec<Keyboard>> {
    let mut builder = QueryBuilder::new(BASE, "keyboards.keyboard_id");
    filters::apply_filters(FILTERS, filters, &mut builder)?;

    Ok(builder.finish(pagination).fetch_all(pool).await?)
}

/// One page of keyboards built for the given layout.
pub async fn list_by_layout(
    pool: &MySqlPool,
    layout_id: i64,
    filters: &FilterMap,
    pagination: &Pagination,
) -> ApiResult<Vec<Keyboard>> {
    let mut builder = QueryBuilder::new(BASE, "keyboards.keyboard_id");
    builder.filter("keyboards.layout_id = ?", SqlValue::Int(layout_id));
    filters::apply_filters(LAYOUT_FILTERS, filters, &mut builder)?;

    Ok(builder.finish(pagination).fetch_all(pool).await?)
}

/// Looks a keyboard up by primary key.
pub async fn find_by_id(pool: &MySqlPool, keyboard_id: i64) -> ApiResult<Option<Keyboard>> {
    let query = SqlQuery::of(
        "SELECT keyboards.*, pcbs.firmware AS firmware_type FROM keyboards \
         JOIN pcbs ON pcbs.keyboard_id = keyboards.keyboard_id \
         WHERE keyboards.keyboard_id = ?",
        vec![SqlValue::Int(keyboard_id)],
    );

    Ok(query.fetch_optional(pool).await?)
}
