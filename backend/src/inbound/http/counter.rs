//! Counter HTTP handlers.
//!
//! ```text
//! GET  /
//! GET  /count
//! POST /count/increment
//! POST /count/decrement
//! POST /count/reset
//! POST /count/custom
//! GET  /count/history[?limit=N]
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Counter, CounterAction, HistoryEntry};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_history_limit;

/// Banner returned by the root endpoint.
pub const ROOT_MESSAGE: &str = "Counter API - backend for the generative AI workshop";
/// Confirmation returned alongside the value by the increment endpoint.
pub const INCREMENT_MESSAGE: &str = "Counter incremented successfully";

/// Banner payload for `GET /`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

/// Counter value payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    #[schema(example = 6)]
    pub count: i32,
}

impl From<Counter> for CountResponse {
    fn from(value: Counter) -> Self {
        Self {
            count: value.value(),
        }
    }
}

/// Counter value with a confirmation message, returned by increment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountIncrementResponse {
    #[schema(example = 1)]
    pub count: i32,
    #[schema(example = "Counter incremented successfully")]
    pub message: String,
}

/// Body of `POST /count/custom`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomDeltaRequest {
    /// Signed delta added to the counter.
    #[schema(example = -3)]
    pub value: i32,
}

/// Query parameters of `GET /count/history`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    /// Maximum number of entries to return, newest first.
    #[param(minimum = 1)]
    pub limit: Option<u32>,
}

/// One audit entry as exposed on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryItem {
    pub id: i32,
    pub count_value: i32,
    #[schema(example = "increment_5")]
    pub action: String,
    /// Creation time, serialised as RFC 3339 in UTC.
    pub timestamp: DateTime<Utc>,
}

impl From<HistoryEntry> for HistoryItem {
    fn from(value: HistoryEntry) -> Self {
        Self {
            id: value.id,
            count_value: value.count_value,
            action: value.action,
            timestamp: value.timestamp,
        }
    }
}

/// Payload of `GET /count/history`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<HistoryItem>,
}

async fn apply(state: &HttpState, action: CounterAction) -> ApiResult<CountResponse> {
    let counter = state.counter.apply(action).await?;
    Ok(CountResponse::from(counter))
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = RootResponse)),
    tags = ["counter"],
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> web::Json<RootResponse> {
    web::Json(RootResponse {
        message: ROOT_MESSAGE.to_owned(),
    })
}

/// Read the counter, creating it at zero on first use.
#[utoipa::path(
    get,
    path = "/count",
    responses(
        (status = 200, description = "Current counter value", body = CountResponse),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["counter"],
    operation_id = "getCount"
)]
#[get("/count")]
pub async fn get_count(state: web::Data<HttpState>) -> ApiResult<web::Json<CountResponse>> {
    let counter = state.counter_query.current().await?;
    Ok(web::Json(CountResponse::from(counter)))
}

/// Add one to the counter.
#[utoipa::path(
    post,
    path = "/count/increment",
    responses(
        (status = 200, description = "Counter after increment", body = CountIncrementResponse),
        (status = 400, description = "Counter out of range", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["counter"],
    operation_id = "incrementCount"
)]
#[post("/count/increment")]
pub async fn increment(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CountIncrementResponse>> {
    let CountResponse { count } = apply(&state, CounterAction::Increment).await?;
    Ok(web::Json(CountIncrementResponse {
        count,
        message: INCREMENT_MESSAGE.to_owned(),
    }))
}

/// Subtract one from the counter.
#[utoipa::path(
    post,
    path = "/count/decrement",
    responses(
        (status = 200, description = "Counter after decrement", body = CountResponse),
        (status = 400, description = "Counter out of range", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["counter"],
    operation_id = "decrementCount"
)]
#[post("/count/decrement")]
pub async fn decrement(state: web::Data<HttpState>) -> ApiResult<web::Json<CountResponse>> {
    apply(&state, CounterAction::Decrement).await.map(web::Json)
}

/// Reset the counter to zero.
#[utoipa::path(
    post,
    path = "/count/reset",
    responses(
        (status = 200, description = "Counter after reset", body = CountResponse),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["counter"],
    operation_id = "resetCount"
)]
#[post("/count/reset")]
pub async fn reset(state: web::Data<HttpState>) -> ApiResult<web::Json<CountResponse>> {
    apply(&state, CounterAction::Reset).await.map(web::Json)
}

/// Add an arbitrary signed delta to the counter.
#[utoipa::path(
    post,
    path = "/count/custom",
    request_body = CustomDeltaRequest,
    responses(
        (status = 200, description = "Counter after applying the delta", body = CountResponse),
        (status = 400, description = "Malformed body or counter out of range", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["counter"],
    operation_id = "customCount"
)]
#[post("/count/custom")]
pub async fn custom(
    state: web::Data<HttpState>,
    payload: web::Json<CustomDeltaRequest>,
) -> ApiResult<web::Json<CountResponse>> {
    let CustomDeltaRequest { value } = payload.into_inner();
    apply(&state, CounterAction::Custom(value))
        .await
        .map(web::Json)
}

/// List audit entries, newest first.
#[utoipa::path(
    get,
    path = "/count/history",
    params(HistoryParams),
    responses(
        (status = 200, description = "Audit trail, newest first", body = HistoryResponse),
        (status = 400, description = "Invalid limit", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["counter"],
    operation_id = "getCountHistory"
)]
#[get("/count/history")]
pub async fn history(
    state: web::Data<HttpState>,
    params: web::Query<HistoryParams>,
) -> ApiResult<web::Json<HistoryResponse>> {
    let limit = parse_history_limit(params.into_inner().limit)?;
    let entries = state.counter_query.history(limit).await?;
    Ok(web::Json(HistoryResponse {
        history: entries.into_iter().map(HistoryItem::from).collect(),
    }))
}

/// Register every counter route on an Actix service config.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::counter::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(get_count)
        .service(increment)
        .service(decrement)
        .service(reset)
        .service(custom)
        .service(history);
}

#[cfg(test)]
#[path = "counter_tests.rs"]
mod tests;
