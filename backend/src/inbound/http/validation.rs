//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures are rewritten into the domain [`Error`] payload so
//! malformed bodies and query strings produce the same JSON envelope as every
//! other client error.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{Error, HistoryLimit, HistoryLimitError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBody,
    InvalidQuery,
    InvalidLimit,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidLimit => "invalid_limit",
        }
    }
}

fn json_payload_error(err: &JsonPayloadError) -> Error {
    Error::invalid_request("request body must be valid JSON").with_details(json!({
        "code": ErrorCode::InvalidBody.as_str(),
        "reason": err.to_string(),
    }))
}

fn query_payload_error(err: &QueryPayloadError) -> Error {
    Error::invalid_request("query string is invalid").with_details(json!({
        "code": ErrorCode::InvalidQuery.as_str(),
        "reason": err.to_string(),
    }))
}

/// JSON extractor configuration returning a 400 `invalid_request` payload on
/// malformed, mistyped or non-JSON bodies.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::validation::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req: &HttpRequest| json_payload_error(&err).into())
}

/// Query extractor configuration mirroring [`json_config`].
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req: &HttpRequest| query_payload_error(&err).into())
}

/// Validate the optional `limit` query parameter of the history endpoint.
pub(crate) fn parse_history_limit(raw: Option<u32>) -> Result<Option<HistoryLimit>, Error> {
    raw.map(|value| {
        HistoryLimit::new(value).map_err(|err| match err {
            HistoryLimitError::Zero => Error::invalid_request(err.to_string()).with_details(
                json!({
                    "field": "limit",
                    "value": value,
                    "code": ErrorCode::InvalidLimit.as_str(),
                }),
            ),
        })
    })
    .transpose()
}
