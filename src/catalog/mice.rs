//! Mouse listings and lookups.

use sqlx::MySqlPool;

use crate::catalog::filters::{self, FilterMap, FilterSpec};
use crate::catalog::pagination::Pagination;
use crate::catalog::query::{QueryBuilder, SqlQuery, SqlValue};
use crate::catalog::{CONNECTION_TYPES, POLLING_RATES};
use crate::error::ApiResult;
use crate::models::Mouse;

/// Filters accepted by `GET /mice`, in application order.
///
/// Both aggregates group on the mouse primary key. The button count uses
/// COUNT(DISTINCT) because the two LEFT JOINs multiply rows: a mouse with
/// three buttons and four reviews produces twelve joined rows, which would
/// otherwise count as twelve buttons. AVG is unaffected by that duplication
/// since every review repeats the same number of times.
const FILTERS: &[FilterSpec] = &[
    FilterSpec::contains("name", "mice.name"),
    FilterSpec::one_of("polling_rate", "mice.polling_rate", POLLING_RATES),
    FilterSpec::one_of("connection", "mice.connection", CONNECTION_TYPES),
    FilterSpec::numeric_range("weight_minimum", "weight_maximum", "mice.weight"),
    FilterSpec::numeric_range("lower_price_limit", "upper_price_limit", "mice.price"),
    FilterSpec::aggregate(
        "button_count",
        "COUNT(DISTINCT mouse_buttons.button_id)",
        "mice.mouse_id",
    ),
    FilterSpec::aggregate("rating", "AVG(mouse_reviews.rating)", "mice.mouse_id"),
];

// LEFT JOINs so mice without buttons or reviews still appear in unfiltered
// listings; DISTINCT collapses the join multiplication when no GROUP BY is
// in play.
const BASE: &str = "SELECT DISTINCT mice.* FROM mice \
                    LEFT JOIN mouse_buttons ON mouse_buttons.mouse_id = mice.mouse_id \
                    LEFT JOIN mouse_reviews ON mouse_reviews.mouse_id = mice.mouse_id \
                    WHERE 1=1";

/// One page of mice matching the request's filters.
pub async fn list(
    pool: &MySqlPool,
    filters: &FilterMap,
    pagination: &Pagination,
) -> ApiResult<Vec<Mouse>> {
    let mut builder = QueryBuilder::new(BASE, "mice.mouse_id");
    filters::apply_filters(FILTERS, filters, &mut builder)?;

    Ok(builder.finish(pagination).fetch_all(pool).await?)
}

/// Looks a mouse up by primary key.
pub async fn find_by_id(pool: &MySqlPool, mouse_id: i64) -> ApiResult<Option<Mouse>> {
    let query = SqlQuery::of(
        "SELECT * FROM mice WHERE mouse_id = ?",
        vec![SqlValue::Int(mouse_id)],
    );

    Ok(query.fetch_optional(pool).await?)
}
