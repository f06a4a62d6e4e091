//! Error taxonomy for the catalog API.
//!
//! Every request failure maps to one of a fixed set of kinds, each carrying a
//! stable HTTP status, a machine-readable `code` and a human-readable
//! `message`. Handlers return [`ApiError`] and the [`IntoResponse`] impl
//! renders the JSON body, so the wire format lives in exactly one place.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Convenience alias used by catalog functions and request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// All failure kinds the API can report.
///
/// Validation kinds abort a request before any SQL runs; `Database` is the
/// unclassified fault for pool or driver problems and never leaks driver
/// detail to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A supplied filter key is not in the resource's allow-list.
    #[error("A provided filter parameter does not exist.")]
    InvalidParameter,

    /// A filter value failed its validator (numeric, enum, year or sort column).
    #[error("A provided filter parameter value is invalid.")]
    InvalidParameterValue,

    /// A date filter value is not a real `yyyy-mm-dd` calendar date.
    #[error("All dates are in the form yyyy-mm-dd. Please ensure that the inputted data types follow this format.")]
    InvalidDate,

    /// Exactly one half of a paired range filter was supplied.
    #[error("One or more filter parameters are invalid. Specifying one upper/lower range limit requires a matching opposite limit.")]
    RangeIncomplete,

    /// Two filters that cannot be combined were both supplied.
    #[error("Some provided parameters cannot exist together because they are contradictory. This includes \"name\" and \"name_contains\".")]
    TooManyParameters,

    /// `page` or `limit` is not an integer greater than zero.
    #[error("Pagination parameters must be numeric and greater than zero.")]
    InvalidPagination,

    /// A primary-key lookup matched no row.
    #[error("The provided resource id was not found and does not exist.")]
    NotFound,

    /// Pool or driver fault while executing a query.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// HTTP status for this failure kind.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter
            | Self::InvalidParameterValue
            | Self::InvalidDate
            | Self::TooManyParameters => StatusCode::BAD_REQUEST,
            Self::RangeIncomplete => StatusCode::RANGE_NOT_SATISFIABLE,
            Self::InvalidPagination => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable title for this failure kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "Bad Request - Unknown Parameters",
            Self::InvalidParameterValue => "Bad Request - Invalid Parameter Value",
            Self::InvalidDate => "Bad Request - Invalid Date Format",
            Self::RangeIncomplete => "Range Not Satisfiable",
            Self::TooManyParameters => "Bad Request - Too Many Parameters",
            Self::InvalidPagination => "Unprocessable Content - Invalid Pagination",
            Self::NotFound => "ID Not Found",
            Self::Database(_) => "Internal Server Error",
        }
    }
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Driver detail stays in the logs.
            Self::Database(source) => {
                tracing::error!(error = %source, "catalog query failed");
                String::from("An unexpected error occurred while querying the catalog.")
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            status: status.as_u16(),
            code: self.code(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
