//! Parameterized SQL assembly.
//!
//! [`QueryBuilder`] accumulates predicate fragments and their bound values
//! while a resource's filter table is applied, then finalizes exactly once
//! into a [`SqlQuery`]. Values always travel as `?` placeholders; the only
//! identifier ever interpolated is a sort column that already passed its
//! allow-list. Clause order in the finalized SQL is WHERE, GROUP BY, HAVING,
//! ORDER BY, LIMIT/OFFSET, and the bind vector follows the same order.

use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, MySql, MySqlPool};

use crate::catalog::pagination::Pagination;

/// A value bound into a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Integer bind (ids, years, pagination)
    Int(i64),
    /// Floating-point bind (prices, weights, thresholds)
    Float(f64),
    /// Text bind (names, enum values, dates)
    Text(String),
}

/// Accumulates a list query while filters are applied.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base: String,
    predicates: Vec<String>,
    where_binds: Vec<SqlValue>,
    group_by: Option<&'static str>,
    having: Vec<String>,
    having_binds: Vec<SqlValue>,
    order: String,
}

impl QueryBuilder {
    /// Starts a query from a base SELECT ending in `WHERE 1=1`.
    ///
    /// `default_order` is the resource's primary key; it keeps pagination
    /// stable when the request names no sort column.
    #[must_use]
    pub fn new(base: &str, default_order: &str) -> Self {
        Self {
            base: base.to_string(),
            predicates: Vec::new(),
            where_binds: Vec::new(),
            group_by: None,
            having: Vec::new(),
            having_binds: Vec::new(),
            order: default_order.to_string(),
        }
    }

    /// Appends one WHERE predicate with a single bound value.
    pub fn filter(&mut self, predicate: &str, value: SqlValue) {
        self.predicates.push(predicate.to_string());
        self.where_binds.push(value);
    }

    /// Appends an inclusive `BETWEEN ? AND ?` predicate on `column`.
    pub fn filter_between(&mut self, column: &str, low: SqlValue, high: SqlValue) {
        self.predicates.push(format!("{column} BETWEEN ? AND ?"));
        self.where_binds.push(low);
        self.where_binds.push(high);
    }

    /// Sets the grouping key for aggregate filters.
    ///
    /// All aggregate filters of a resource group on the same primary key, so
    /// repeated calls with the same key collapse into one GROUP BY clause.
    pub fn group_by(&mut self, key: &'static str) {
        self.group_by = Some(key);
    }

    /// Appends one HAVING predicate with a single bound value.
    pub fn having(&mut self, predicate: &str, value: SqlValue) {
        self.having.push(predicate.to_string());
        self.having_binds.push(value);
    }

    /// Replaces the default sort column. The caller has already checked the
    /// identifier against the resource's sort allow-list.
    pub fn order_by(&mut self, column: &str) {
        self.order = column.to_string();
    }

    /// Finalizes into executable SQL plus its bind vector.
    #[must_use]
    pub fn finish(self, pagination: &Pagination) -> SqlQuery {
        let mut sql = self.base;

        for predicate in &self.predicates {
            sql.push_str(" AND ");
            sql.push_str(predicate);
        }

        if let Some(key) = self.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(key);
        }

        if !self.having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&self.having.join(" AND "));
        }

        sql.push_str(" ORDER BY ");
        sql.push_str(&self.order);
        sql.push_str(" ASC LIMIT ? OFFSET ?");

        let mut binds = self.where_binds;
        binds.extend(self.having_binds);
        binds.push(SqlValue::Int(pagination.limit()));
        binds.push(SqlValue::Int(pagination.offset()));

        SqlQuery { sql, binds }
    }
}

/// A finalized query: one SQL string and its binds in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    sql: String,
    binds: Vec<SqlValue>,
}

impl SqlQuery {
    /// Wraps a hand-written statement, e.g. a primary-key lookup.
    #[must_use]
    pub fn of(sql: &str, binds: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.to_string(),
            binds,
        }
    }

    /// The SQL text with `?` placeholders.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values in placeholder order.
    #[must_use]
    pub fn binds(&self) -> &[SqlValue] {
        &self.binds
    }

    /// Runs the query and decodes every row.
    pub async fn fetch_all<T>(&self, pool: &MySqlPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        tracing::debug!(sql = %self.sql, "executing catalog query");

        let mut query = sqlx::query_as::<MySql, T>(&self.sql);
        for value in &self.binds {
            query = match value {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Float(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
            };
        }

        query.fetch_all(pool).await
    }

    /// Runs the query and decodes at most one row.
    pub async fn fetch_optional<T>(&self, pool: &MySqlPool) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        tracing::debug!(sql = %self.sql, "executing catalog lookup");

        let mut query = sqlx::query_as::<MySql, T>(&self.sql);
        for value in &self.binds {
            query = match value {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Float(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
            };
        }

        query.fetch_optional(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_page() -> Pagination {
        Pagination::new(1, 10)
    }

    #[test]
    fn test_bare_query_orders_and_paginates() {
        let builder = QueryBuilder::new(
            "SELECT * FROM layouts WHERE 1=1",
            "layouts.layout_id",
        );
        let query = builder.finish(&first_page());

        assert_eq!(
            query.sql(),
            "SELECT * FROM layouts WHERE 1=1 ORDER BY layouts.layout_id ASC LIMIT ? OFFSET ?"
        );
        assert_eq!(query.binds(), &[SqlValue::Int(10), SqlValue::Int(0)]);
    }

    #[test]
    fn test_predicates_keep_declaration_order() {
        let mut builder =
            QueryBuilder::new("SELECT * FROM vendors WHERE 1=1", "vendors.vendor_id");
        builder.filter(
            "vendors.name LIKE CONCAT('%', ?, '%')",
            SqlValue::Text(String::from("key")),
        );
        builder.filter("vendors.founded_year > ?", SqlValue::Int(2010));
        let query = builder.finish(&first_page());

        assert_eq!(
            query.sql(),
            "SELECT * FROM vendors WHERE 1=1 \
             AND vendors.name LIKE CONCAT('%', ?, '%') \
             AND vendors.founded_year > ? \
             ORDER BY vendors.vendor_id ASC LIMIT ? OFFSET ?"
        );
        assert_eq!(
            query.binds(),
            &[
                SqlValue::Text(String::from("key")),
                SqlValue::Int(2010),
                SqlValue::Int(10),
                SqlValue::Int(0),
            ]
        );
    }

    #[test]
    fn test_between_binds_low_then_high() {
        let mut builder =
            QueryBuilder::new("SELECT * FROM mice WHERE 1=1", "mice.mouse_id");
        builder.filter_between("mice.price", SqlValue::Float(20.0), SqlValue::Float(80.0));
        let query = builder.finish(&first_page());

        assert!(query.sql().contains("mice.price BETWEEN ? AND ?"));
        assert_eq!(
            query.binds(),
            &[
                SqlValue::Float(20.0),
                SqlValue::Float(80.0),
                SqlValue::Int(10),
                SqlValue::Int(0),
            ]
        );
    }

    #[test]
    fn test_having_binds_come_after_where_binds() {
        let mut builder = QueryBuilder::new(
            "SELECT DISTINCT vendors.* FROM vendors WHERE 1=1",
            "vendors.vendor_id",
        );
        builder.group_by("vendors.vendor_id");
        builder.having("COUNT(keyboards.keyboard_id) >= ?", SqlValue::Float(3.0));
        builder.filter_between(
            "keyboards.price",
            SqlValue::Float(50.0),
            SqlValue::Float(150.0),
        );
        let query = builder.finish(&first_page());

        // HAVING renders after WHERE even though it was pushed first, and the
        // bind order follows the rendered clause order.
        assert_eq!(
            query.sql(),
            "SELECT DISTINCT vendors.* FROM vendors WHERE 1=1 \
             AND keyboards.price BETWEEN ? AND ? \
             GROUP BY vendors.vendor_id \
             HAVING COUNT(keyboards.keyboard_id) >= ? \
             ORDER BY vendors.vendor_id ASC LIMIT ? OFFSET ?"
        );
        assert_eq!(
            query.binds(),
            &[
                SqlValue::Float(50.0),
                SqlValue::Float(150.0),
                SqlValue::Float(3.0),
                SqlValue::Int(10),
                SqlValue::Int(0),
            ]
        );
    }

    #[test]
    fn test_group_by_is_emitted_once() {
        let mut builder = QueryBuilder::new(
            "SELECT DISTINCT mice.* FROM mice WHERE 1=1",
            "mice.mouse_id",
        );
        builder.group_by("mice.mouse_id");
        builder.having("COUNT(DISTINCT mouse_buttons.button_id) >= ?", SqlValue::Float(5.0));
        builder.group_by("mice.mouse_id");
        builder.having("AVG(mouse_reviews.rating) >= ?", SqlValue::Float(4.0));
        let query = builder.finish(&first_page());

        assert_eq!(query.sql().matches("GROUP BY").count(), 1);
        assert!(query
            .sql()
            .contains("HAVING COUNT(DISTINCT mouse_buttons.button_id) >= ? AND AVG(mouse_reviews.rating) >= ?"));
    }

    #[test]
    fn test_order_by_replaces_default_sort() {
        let mut builder =
            QueryBuilder::new("SELECT * FROM vendors WHERE 1=1", "vendors.vendor_id");
        builder.order_by("country");
        let query = builder.finish(&first_page());

        assert!(query.sql().ends_with("ORDER BY country ASC LIMIT ? OFFSET ?"));
    }

    #[test]
    fn test_pagination_binds_reflect_page() {
        let builder =
            QueryBuilder::new("SELECT * FROM layouts WHERE 1=1", "layouts.layout_id");
        let query = builder.finish(&Pagination::new(3, 5));

        // page 3 at limit 5 starts at offset 10
        assert_eq!(
            query.binds().last_chunk::<2>(),
            Some(&[SqlValue::Int(5), SqlValue::Int(10)])
        );
    }
}
