//! Layout listings and lookups.

use sqlx::MySqlPool;

use crate::catalog::filters::{self, FilterMap, FilterSpec};
use crate::catalog::pagination::Pagination;
use crate::catalog::query::{QueryBuilder, SqlQuery, SqlValue};
use crate::error::ApiResult;
use crate::models::Layout;

/// Layouts accept no filters beyond pagination; the empty table still
/// drives the unknown-key check.
const FILTERS: &[FilterSpec] = &[];

const BASE: &str = "SELECT layouts.* FROM layouts WHERE 1=1";

/// One page of layouts.
pub async fn list(
    pool: &MySqlPool,
    filters: &FilterMap,
    pagination: &Pagination,
) -> ApiResult<Vec<Layout>> {
    let mut builder = QueryBuilder::new(BASE, "layouts.layout_id");
    filters::apply_filters(FILTERS, filters, &mut builder)?;

    Ok(builder.finish(pagination).fetch_all(pool).await?)
}

/// Looks a layout up by primary key.
pub async fn find_by_id(pool: &MySqlPool, layout_id: i64) -> ApiResult<Option<Layout>> {
    let query = SqlQuery::of(
        "SELECT * FROM layouts WHERE layout_id = ?",
        vec![SqlValue::Int(layout_id)],
    );

    Ok(query.fetch_optional(pool).await?)
}
