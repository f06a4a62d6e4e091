//! Switch listings, scoped to a vendor.

use sqlx::MySqlPool;

use crate::catalog::filters::{self, Cmp, FilterMap, FilterSpec};
use crate::catalog::pagination::Pagination;
use crate::catalog::query::{QueryBuilder, SqlValue};
use crate::catalog::SWITCH_TYPES;
use crate::error::ApiResult;
use crate::models::Switch;

/// Filters accepted by `GET /vendors/{id}/switches`, in application order.
const FILTERS: &[FilterSpec] = &[
    FilterSpec::one_of("type", "switches.type", SWITCH_TYPES),
    FilterSpec::numeric_range(
        "lower_actuation_force_limit",
        "upper_actuation_force_limit",
        "switches.actuation_force",
    ),
    FilterSpec::numeric_range(
        "lower_travel_distance_limit",
        "upper_travel_distance_limit",
        "switches.travel_distance",
    ),
    FilterSpec::numeric("lifespan_minimum", "switches.lifespan", Cmp::Ge),
    FilterSpec::date_range("released_after", "released_before", "switches.release_date"),
];

const BASE: &str = "SELECT switches.* FROM switches WHERE 1=1";

/// One page of a vendor's switches matching the request's filters.
pub async fn list_by_vendor(
    pool: &MySqlPool,
    vendor_id: i64,
    filters: &FilterMap,
    pagination: &Pagination,
) -> ApiResult<Vec<Switch>> {
    let mut builder = QueryBuilder::new(BASE, "switches.switch_id");
    builder.filter("switches.vendor_id = ?", SqlValue::Int(vendor_id));
    filters::apply_filters(FILTERS, filters, &mut builder)?;

    Ok(builder.finish(pagination).fetch_all(pool).await?)
}
