//! Mouse-button listings, scoped to a mouse.

use sqlx::MySqlPool;

use crate::catalog::filters::{self, FilterMap, FilterSpec};
use crate::catalog::pagination::Pagination;
use crate::catalog::query::{QueryBuilder, SqlValue};
use crate::error::ApiResult;
use crate::models::MouseButton;

/// Filters accepted by `GET /mice/{id}/buttons`, in application order.
///
/// `name` matches exactly, `name_contains` matches a substring; a request
/// may use one or the other, never both.
const FILTERS: &[FilterSpec] = &[
    FilterSpec::equals("name", "mouse_buttons.name"),
    FilterSpec::contains("name_contains", "mouse_buttons.name"),
    FilterSpec::flag("programmable", "mouse_buttons.programmable"),
];

const BASE: &str = "SELECT mouse_buttons.* FROM mouse_buttons WHERE 1=1";

/// One page of a mouse's buttons matching the request's filters.
pub async fn list_by_mouse(
    pool: &MySqlPool,
    mouse_id: i64,
    filters: &FilterMap,
    pagination: &Pagination,
) -> ApiResult<Vec<MouseButton>> {
    filters::ensure_not_combined(filters, "name", "name_contains")?;

    let mut builder = QueryBuilder::new(BASE, "mouse_buttons.button_id");
    builder.filter("mouse_buttons.mouse_id = ?", SqlValue::Int(mouse_id));
    filters::apply_filters(FILTERS, filters, &mut builder)?;

    Ok(builder.finish(pagination).fetch_all(pool).await?)
}
