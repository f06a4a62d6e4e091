//! Filter validation and predicate assembly.
//!
//! Each resource declares a static table of [`FilterSpec`] entries. Applying
//! a table to a request happens in two passes: a set-difference check that
//! rejects any supplied key the table (or pagination) does not know, then
//! each entry in declared order validating its value and pushing its SQL
//! fragment into the [`QueryBuilder`]. The first failure aborts the request
//! before any SQL executes.

use std::collections::HashMap;

use crate::catalog::query::{QueryBuilder, SqlValue};
use crate::catalog::validate;
use crate::error::{ApiError, ApiResult};

/// Accepted by every list endpoint, never part of a resource table.
const PAGINATION_KEYS: [&str; 2] = ["page", "limit"];

/// The query-string parameters of one request.
///
/// A parameter supplied with an empty value counts for the unknown-key check
/// but is otherwise treated as not supplied, so `?country=` behaves like no
/// country filter at all.
#[derive(Debug, Clone, Default)]
pub struct FilterMap {
    params: HashMap<String, String>,
}

impl FilterMap {
    /// Wraps the decoded query-string map.
    #[must_use]
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Value of a parameter, treating empty text as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// True when the parameter is supplied with a non-empty value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every supplied key, including ones with empty values.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }
}

/// Comparison operator for single-ended numeric and year filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    /// Strictly less than
    Lt,
    /// Strictly greater than
    Gt,
    /// At most
    Le,
    /// At least
    Ge,
}

impl Cmp {
    fn sql(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }
}

/// How one filter parameter validates and folds into the query.
#[derive(Debug, Clone, Copy)]
enum FilterKind {
    /// Case-insensitive substring match on a text column.
    Contains { column: &'static str },
    /// Exact string equality.
    Equals { column: &'static str },
    /// Membership in a fixed value set, then equality on the column.
    OneOf {
        column: &'static str,
        allowed: &'static [&'static str],
    },
    /// Boolean coercion, compared as 1/0.
    Flag { column: &'static str },
    /// Single numeric comparison.
    Numeric { column: &'static str, cmp: Cmp },
    /// Single four-digit-year comparison.
    Year { column: &'static str, cmp: Cmp },
    /// Paired numeric range rendered as one BETWEEN; `upper` names the
    /// matching opposite parameter.
    NumericRange {
        column: &'static str,
        upper: &'static str,
    },
    /// Paired calendar-date range rendered as one BETWEEN.
    DateRange {
        column: &'static str,
        upper: &'static str,
    },
    /// Aggregate threshold: GROUP BY `key` HAVING `expr >= value`.
    Aggregate {
        expr: &'static str,
        key: &'static str,
    },
    /// Ascending sort on an allow-listed column of `table`.
    SortBy {
        table: &'static str,
        allowed: &'static [&'static str],
    },
}

/// One row of a resource's filter table.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    name: &'static str,
    kind: FilterKind,
}

impl FilterSpec {
    /// Substring filter (`LIKE CONCAT('%', ?, '%')`).
    #[must_use]
    pub const fn contains(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            kind: FilterKind::Contains { column },
        }
    }

    /// Exact-match filter (`column = ?`).
    #[must_use]
    pub const fn equals(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            kind: FilterKind::Equals { column },
        }
    }

    /// Enum filter: the value must be one of `allowed`, compared exactly.
    #[must_use]
    pub const fn one_of(
        name: &'static str,
        column: &'static str,
        allowed: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind: FilterKind::OneOf { column, allowed },
        }
    }

    /// Boolean filter; loose text coerces via [`validate::as_bool`].
    #[must_use]
    pub const fn flag(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            kind: FilterKind::Flag { column },
        }
    }

    /// Single-ended numeric filter.
    #[must_use]
    pub const fn numeric(name: &'static str, column: &'static str, cmp: Cmp) -> Self {
        Self {
            name,
            kind: FilterKind::Numeric { column, cmp },
        }
    }

    /// Single-ended year filter.
    #[must_use]
    pub const fn year(name: &'static str, column: &'static str, cmp: Cmp) -> Self {
        Self {
            name,
            kind: FilterKind::Year { column, cmp },
        }
    }

    /// Paired numeric range; registered under the lower parameter's name.
    #[must_use]
    pub const fn numeric_range(
        lower: &'static str,
        upper: &'static str,
        column: &'static str,
    ) -> Self {
        Self {
            name: lower,
            kind: FilterKind::NumericRange { column, upper },
        }
    }

    /// Paired date range; registered under the lower parameter's name.
    #[must_use]
    pub const fn date_range(
        lower: &'static str,
        upper: &'static str,
        column: &'static str,
    ) -> Self {
        Self {
            name: lower,
            kind: FilterKind::DateRange { column, upper },
        }
    }

    /// Aggregate threshold filter.
    #[must_use]
    pub const fn aggregate(name: &'static str, expr: &'static str, key: &'static str) -> Self {
        Self {
            name,
            kind: FilterKind::Aggregate { expr, key },
        }
    }

    /// Sort parameter validated against a column allow-list. The chosen
    /// column renders qualified as `table.column` to stay unambiguous in
    /// joined queries.
    #[must_use]
    pub const fn sort_by(
        name: &'static str,
        table: &'static str,
        allowed: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind: FilterKind::SortBy { table, allowed },
        }
    }

    /// Parameter names this entry accepts (range entries own two).
    fn names(&self) -> (&'static str, Option<&'static str>) {
        match self.kind {
            FilterKind::NumericRange { upper, .. } | FilterKind::DateRange { upper, .. } => {
                (self.name, Some(upper))
            }
            _ => (self.name, None),
        }
    }

    /// Validates this entry against the request and pushes its predicate.
    fn apply(&self, filters: &FilterMap, builder: &mut QueryBuilder) -> ApiResult<()> {
        match self.kind {
            FilterKind::Contains { column } => {
                if let Some(value) = filters.get(self.name) {
                    builder.filter(
                        &format!("{column} LIKE CONCAT('%', ?, '%')"),
                        SqlValue::Text(value.to_string()),
                    );
                }
                Ok(())
            }
            FilterKind::Equals { column } => {
                if let Some(value) = filters.get(self.name) {
                    builder.filter(&format!("{column} = ?"), SqlValue::Text(value.to_string()));
                }
                Ok(())
            }
            FilterKind::OneOf { column, allowed } => {
                if let Some(value) = filters.get(self.name) {
                    if !allowed.contains(&value) {
                        return Err(ApiError::InvalidParameterValue);
                    }
                    // Numeric sets (polling rates) bind as integers so the
                    // column comparison stays typed.
                    let bind = value
                        .parse::<i64>()
                        .map_or_else(|_| SqlValue::Text(value.to_string()), SqlValue::Int);
                    builder.filter(&format!("{column} = ?"), bind);
                }
                Ok(())
            }
            FilterKind::Flag { column } => {
                if let Some(value) = filters.get(self.name) {
                    let flag = i64::from(validate::as_bool(value));
                    builder.filter(&format!("{column} = ?"), SqlValue::Int(flag));
                }
                Ok(())
            }
            FilterKind::Numeric { column, cmp } => {
                if let Some(value) = filters.get(self.name) {
                    let number = parse_numeric(value)?;
                    builder.filter(
                        &format!("{column} {} ?", cmp.sql()),
                        SqlValue::Float(number),
                    );
                }
                Ok(())
            }
            FilterKind::Year { column, cmp } => {
                if let Some(value) = filters.get(self.name) {
                    if !validate::is_year(value) {
                        return Err(ApiError::InvalidParameterValue);
                    }
                    let year = value.parse::<i64>().map_err(|_| ApiError::InvalidParameterValue)?;
                    builder.filter(&format!("{column} {} ?", cmp.sql()), SqlValue::Int(year));
                }
                Ok(())
            }
            FilterKind::NumericRange { column, upper } => {
                match (filters.get(self.name), filters.get(upper)) {
                    (None, None) => Ok(()),
                    (Some(low), Some(high)) => {
                        let low = parse_numeric(low)?;
                        let high = parse_numeric(high)?;
                        builder.filter_between(column, SqlValue::Float(low), SqlValue::Float(high));
                        Ok(())
                    }
                    _ => Err(ApiError::RangeIncomplete),
                }
            }
            FilterKind::DateRange { column, upper } => {
                match (filters.get(self.name), filters.get(upper)) {
                    (None, None) => Ok(()),
                    (Some(low), Some(high)) => {
                        if !validate::is_date(low) || !validate::is_date(high) {
                            return Err(ApiError::InvalidDate);
                        }
                        builder.filter_between(
                            column,
                            SqlValue::Text(low.to_string()),
                            SqlValue::Text(high.to_string()),
                        );
                        Ok(())
                    }
                    _ => Err(ApiError::RangeIncomplete),
                }
            }
            FilterKind::Aggregate { expr, key } => {
                if let Some(value) = filters.get(self.name) {
                    let threshold = parse_numeric(value)?;
                    builder.group_by(key);
                    builder.having(&format!("{expr} >= ?"), SqlValue::Float(threshold));
                }
                Ok(())
            }
            FilterKind::SortBy { table, allowed } => {
                if let Some(value) = filters.get(self.name) {
                    if !allowed.contains(&value) {
                        return Err(ApiError::InvalidParameterValue);
                    }
                    builder.order_by(&format!("{table}.{value}"));
                }
                Ok(())
            }
        }
    }
}

fn parse_numeric(value: &str) -> ApiResult<f64> {
    if !validate::is_numeric(value) {
        return Err(ApiError::InvalidParameterValue);
    }
    value
        .parse::<f64>()
        .map_err(|_| ApiError::InvalidParameterValue)
}

/// Applies a resource's filter table to one request.
///
/// # Errors
///
/// Returns the first failure encountered: unknown keys, then each table
/// entry's validation in declared order.
pub fn apply_filters(
    specs: &[FilterSpec],
    filters: &FilterMap,
    builder: &mut QueryBuilder,
) -> ApiResult<()> {
    ensure_allowed(specs, filters)?;

    for spec in specs {
        spec.apply(filters, builder)?;
    }

    Ok(())
}

/// Rejects any supplied key the table does not declare.
fn ensure_allowed(specs: &[FilterSpec], filters: &FilterMap) -> ApiResult<()> {
    for key in filters.keys() {
        if PAGINATION_KEYS.contains(&key) {
            continue;
        }

        let known = specs.iter().any(|spec| {
            let (name, upper) = spec.names();
            name == key || upper == Some(key)
        });

        if !known {
            return Err(ApiError::InvalidParameter);
        }
    }

    Ok(())
}

/// Rejects requests supplying both of two contradictory parameters.
pub fn ensure_not_combined(filters: &FilterMap, first: &str, second: &str) -> ApiResult<()> {
    if filters.contains(first) && filters.contains(second) {
        return Err(ApiError::TooManyParameters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::pagination::Pagination;

    fn filters(pairs: &[(&str, &str)]) -> FilterMap {
        FilterMap::new(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn builder() -> QueryBuilder {
        QueryBuilder::new("SELECT * FROM things WHERE 1=1", "things.thing_id")
    }

    const TABLE: &[FilterSpec] = &[
        FilterSpec::contains("name", "things.name"),
        FilterSpec::one_of("size", "things.size", &["small", "large"]),
        FilterSpec::flag("active", "things.active"),
        FilterSpec::numeric("weight_maximum", "things.weight", Cmp::Le),
        FilterSpec::year("made_after", "things.made_year", Cmp::Gt),
        FilterSpec::numeric_range("lower_price_limit", "upper_price_limit", "things.price"),
        FilterSpec::date_range("released_after", "released_before", "things.release_date"),
        FilterSpec::aggregate("part_count", "COUNT(parts.part_id)", "things.thing_id"),
        FilterSpec::one_of("rate", "things.rate", &["125", "500"]),
        FilterSpec::sort_by("order_by", "things", &["name", "weight"]),
    ];

    fn finish(filters: &FilterMap) -> ApiResult<crate::catalog::query::SqlQuery> {
        let mut builder = builder();
        apply_filters(TABLE, filters, &mut builder)?;
        Ok(builder.finish(&Pagination::new(1, 10)))
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = finish(&filters(&[("color", "red")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter));
    }

    #[test]
    fn test_pagination_keys_are_implicitly_allowed() {
        assert!(finish(&filters(&[("page", "2"), ("limit", "5")])).is_ok());
    }

    #[test]
    fn test_unknown_key_with_empty_value_is_still_rejected() {
        let err = finish(&filters(&[("color", "")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter));
    }

    #[test]
    fn test_known_key_with_empty_value_is_ignored() {
        let query = finish(&filters(&[("name", "")])).unwrap();
        assert!(!query.sql().contains("LIKE"));
    }

    #[test]
    fn test_contains_renders_like_concat() {
        let query = finish(&filters(&[("name", "cherry")])).unwrap();
        assert!(query
            .sql()
            .contains("things.name LIKE CONCAT('%', ?, '%')"));
        assert_eq!(query.binds()[0], SqlValue::Text(String::from("cherry")));
    }

    #[test]
    fn test_one_of_accepts_member_and_compares_exactly() {
        let query = finish(&filters(&[("size", "small")])).unwrap();
        assert!(query.sql().contains("things.size = ?"));
    }

    #[test]
    fn test_one_of_rejects_non_member() {
        let err = finish(&filters(&[("size", "medium")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue));
    }

    #[test]
    fn test_one_of_numeric_member_binds_as_integer() {
        let query = finish(&filters(&[("rate", "500")])).unwrap();
        assert!(query.sql().contains("things.rate = ?"));
        assert_eq!(query.binds()[0], SqlValue::Int(500));
    }

    #[test]
    fn test_flag_coerces_loose_text_to_false() {
        let query = finish(&filters(&[("active", "maybe")])).unwrap();
        assert!(query.sql().contains("things.active = ?"));
        assert_eq!(query.binds()[0], SqlValue::Int(0));
    }

    #[test]
    fn test_flag_true() {
        let query = finish(&filters(&[("active", "YES")])).unwrap();
        assert_eq!(query.binds()[0], SqlValue::Int(1));
    }

    #[test]
    fn test_numeric_comparison_renders_operator() {
        let query = finish(&filters(&[("weight_maximum", "85.5")])).unwrap();
        assert!(query.sql().contains("things.weight <= ?"));
        assert_eq!(query.binds()[0], SqlValue::Float(85.5));
    }

    #[test]
    fn test_numeric_rejects_text() {
        let err = finish(&filters(&[("weight_maximum", "heavy")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue));
    }

    #[test]
    fn test_year_filter() {
        let query = finish(&filters(&[("made_after", "2015")])).unwrap();
        assert!(query.sql().contains("things.made_year > ?"));
        assert_eq!(query.binds()[0], SqlValue::Int(2015));

        let err = finish(&filters(&[("made_after", "201")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue));
    }

    #[test]
    fn test_numeric_range_requires_both_halves() {
        let err = finish(&filters(&[("lower_price_limit", "20")])).unwrap_err();
        assert!(matches!(err, ApiError::RangeIncomplete));

        let err = finish(&filters(&[("upper_price_limit", "90")])).unwrap_err();
        assert!(matches!(err, ApiError::RangeIncomplete));
    }

    #[test]
    fn test_numeric_range_validates_both_halves() {
        let err = finish(&filters(&[
            ("lower_price_limit", "cheap"),
            ("upper_price_limit", "90"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue));
    }

    #[test]
    fn test_numeric_range_renders_between() {
        let query = finish(&filters(&[
            ("lower_price_limit", "20"),
            ("upper_price_limit", "90"),
        ]))
        .unwrap();
        assert!(query.sql().contains("things.price BETWEEN ? AND ?"));
        assert_eq!(query.binds()[0], SqlValue::Float(20.0));
        assert_eq!(query.binds()[1], SqlValue::Float(90.0));
    }

    #[test]
    fn test_date_range_half_supplied() {
        let err = finish(&filters(&[("released_after", "2020-01-01")])).unwrap_err();
        assert!(matches!(err, ApiError::RangeIncomplete));
    }

    #[test]
    fn test_date_range_rejects_malformed_date() {
        let err = finish(&filters(&[
            ("released_after", "2020-13-40"),
            ("released_before", "2021-01-01"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidDate));
    }

    #[test]
    fn test_date_range_renders_between() {
        let query = finish(&filters(&[
            ("released_after", "2020-01-01"),
            ("released_before", "2021-06-30"),
        ]))
        .unwrap();
        assert!(query
            .sql()
            .contains("things.release_date BETWEEN ? AND ?"));
    }

    #[test]
    fn test_aggregate_groups_and_thresholds() {
        let query = finish(&filters(&[("part_count", "3")])).unwrap();
        assert!(query.sql().contains("GROUP BY things.thing_id"));
        assert!(query.sql().contains("HAVING COUNT(parts.part_id) >= ?"));
    }

    #[test]
    fn test_aggregate_rejects_non_numeric_threshold() {
        let err = finish(&filters(&[("part_count", "lots")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue));
    }

    #[test]
    fn test_sort_by_allow_list_and_qualification() {
        let query = finish(&filters(&[("order_by", "weight")])).unwrap();
        assert!(query.sql().contains("ORDER BY things.weight ASC"));

        let err = finish(&filters(&[("order_by", "thing_id; DROP TABLE")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue));
    }

    #[test]
    fn test_predicates_follow_table_order() {
        let query = finish(&filters(&[
            ("weight_maximum", "100"),
            ("name", "alu"),
            ("size", "large"),
        ]))
        .unwrap();

        let sql = query.sql();
        let name_at = sql.find("things.name").unwrap();
        let size_at = sql.find("things.size").unwrap();
        let weight_at = sql.find("things.weight").unwrap();
        assert!(name_at < size_at && size_at < weight_at);
    }

    #[test]
    fn test_ensure_not_combined() {
        let map = filters(&[("name", "a"), ("name_contains", "b")]);
        let err = ensure_not_combined(&map, "name", "name_contains").unwrap_err();
        assert!(matches!(err, ApiError::TooManyParameters));

        let map = filters(&[("name", "a")]);
        assert!(ensure_not_combined(&map, "name", "name_contains").is_ok());
    }
}
