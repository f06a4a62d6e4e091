//! Keycap-set listings, scoped to a compatible layout.

use sqlx::MySqlPool;

use crate::catalog::filters::{self, Cmp, FilterMap, FilterSpec};
use crate::catalog::pagination::Pagination;
use crate::catalog::query::{QueryBuilder, SqlValue};
use crate::error::ApiResult;
use crate::models::KeycapSet;

/// Filters accepted by `GET /layouts/{id}/keycap-sets`, in application order.
const FILTERS: &[FilterSpec] = &[
    FilterSpec::contains("material", "keycap_sets.material"),
    FilterSpec::contains("profile", "keycap_sets.profile"),
    FilterSpec::contains("manufacturer", "keycap_sets.manufacturer"),
    FilterSpec::numeric("price_maximum", "keycap_sets.price", Cmp::Le),
];

const BASE: &str = "SELECT keycap_sets.* FROM keycap_sets \
                    JOIN keycap_compatibility ON keycap_compatibility.keycap_id = keycap_sets.keycap_id \
                    WHERE 1=1";

/// One page of keycap sets compatible with the given layout.
pub async fn list_by_layout(
    pool: &MySqlPool,
    layout_id: i64,
    filters: &FilterMap,
    pagination: &Pagination,
) -> ApiResult<Vec<KeycapSet>> {
    let mut builder = QueryBuilder::new(BASE, "keycap_sets.keycap_id");
    builder.filter("keycap_compatibility.layout_id = ?", SqlValue::Int(layout_id));
    filters::apply_filters(FILTERS, filters, &mut builder)?;

    Ok(builder.finish(pagination).fetch_all(pool).await?)
}
