//! Vendor listings and lookups.

use sqlx::MySqlPool;

use crate::catalog::filters::{self, Cmp, FilterMap, FilterSpec};
use crate::catalog::pagination::Pagination;
use crate::catalog::query::{QueryBuilder, SqlQuery, SqlValue};
use crate::error::ApiResult;
use crate::models::Vendor;

/// Columns `order_by` may name.
const SORT_COLUMNS: &[&str] = &[
    "vendor_id",
    "name",
    "country",
    "founded_year",
    "website",
    "headquarters",
];

/// Filters accepted by `GET /vendors`, in application order.
///
/// `founded_after` and `founded_before` are independent year filters, not a
/// pair; either may appear alone. The keyboards LEFT JOIN feeds both the
/// keyboards_count aggregate and the price range.
const FILTERS: &[FilterSpec] = &[
    FilterSpec::contains("name", "vendors.name"),
    FilterSpec::contains("country", "vendors.country"),
    FilterSpec::year("founded_after", "vendors.founded_year", Cmp::Gt),
    FilterSpec::year("founded_before", "vendors.founded_year", Cmp::Lt),
    FilterSpec::aggregate(
        "keyboards_count",
        "COUNT(keyboards.keyboard_id)",
        "vendors.vendor_id",
    ),
    FilterSpec::numeric_range("lower_price_limit", "upper_price_limit", "keyboards.price"),
    FilterSpec::sort_by("order_by", "vendors", SORT_COLUMNS),
];

const BASE: &str = "SELECT DISTINCT vendors.* FROM vendors \
                    LEFT JOIN keyboards ON keyboards.vendor_id = vendors.vendor_id \
                    WHERE 1=1";

/// One page of vendors matching the request's filters.
pub async fn list(
    pool: &MySqlPool,
    filters: &FilterMap,
    pagination: &Pagination,
) -> ApiResult<Vec<Vendor>> {
    let mut builder = QueryBuilder::new(BASE, "vendors.vendor_id");
    filters::apply_filters(FILTERS, filters, &mut builder)?;

    Ok(builder.finish(pagination).fetch_all(pool).await?)
}

/// Looks a vendor up by primary key.
pub async fn find_by_id(pool: &MySqlPool, vendor_id: i64) -> ApiResult<Option<Vendor>> {
    let query = SqlQuery::of(
        "SELECT * FROM vendors WHERE vendor_id = ?",
        vec![SqlValue::Int(vendor_id)],
    );

    Ok(query.fetch_optional(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::collections::HashMap;

    fn filter_map(pairs: &[(&str, &str)]) -> FilterMap {
        FilterMap::new(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn build(pairs: &[(&str, &str)]) -> ApiResult<crate::catalog::query::SqlQuery> {
        let mut builder = QueryBuilder::new(BASE, "vendors.vendor_id");
        filters::apply_filters(FILTERS, &filter_map(pairs), &mut builder)?;
        Ok(builder.finish(&Pagination::new(1, 10)))
    }

    #[test]
    fn test_unfiltered_listing() {
        let query = build(&[]).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT DISTINCT vendors.* FROM vendors \
             LEFT JOIN keyboards ON keyboards.vendor_id = vendors.vendor_id \
             WHERE 1=1 ORDER BY vendors.vendor_id ASC LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn test_founded_years_are_independent_filters() {
        let query = build(&[("founded_after", "1999")]).unwrap();
        assert!(query.sql().contains("vendors.founded_year > ?"));
        assert_eq!(query.binds()[0], SqlValue::Int(1999));

        let query = build(&[("founded_before", "2005")]).unwrap();
        assert!(query.sql().contains("vendors.founded_year < ?"));
        assert_eq!(query.binds()[0], SqlValue::Int(2005));
    }

    #[test]
    fn test_founded_year_validates_its_own_value() {
        let err = build(&[("founded_before", "two-thousand")]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue));
    }

    #[test]
    fn test_keyboards_count_with_price_range_share_one_group_by() {
        let query = build(&[
            ("keyboards_count", "2"),
            ("lower_price_limit", "50"),
            ("upper_price_limit", "200"),
        ])
        .unwrap();

        assert_eq!(query.sql().matches("GROUP BY").count(), 1);
        assert!(query.sql().contains("keyboards.price BETWEEN ? AND ?"));
        assert!(query
            .sql()
            .contains("GROUP BY vendors.vendor_id HAVING COUNT(keyboards.keyboard_id) >= ?"));
        // price binds (WHERE) precede the count threshold (HAVING)
        assert_eq!(
            &query.binds()[..3],
            &[
                SqlValue::Float(50.0),
                SqlValue::Float(200.0),
                SqlValue::Float(2.0),
            ]
        );
    }

    #[test]
    fn test_order_by_is_validated_and_qualified() {
        let query = build(&[("order_by", "country")]).unwrap();
        assert!(query.sql().contains("ORDER BY vendors.country ASC"));

        let err = build(&[("order_by", "password")]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue));
    }

    #[test]
    fn test_price_range_half_fails() {
        let err = build(&[("upper_price_limit", "100")]).unwrap_err();
        assert!(matches!(err, ApiError::RangeIncomplete));
    }

    #[test]
    fn test_unknown_filter_fails() {
        let err = build(&[("founded", "1999")]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter));
    }
}
