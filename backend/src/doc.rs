//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the counter endpoints and the health probes
//! - **Schemas**: request and response payloads plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that keep utoipa out of the domain
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::counter::{
    CountIncrementResponse, CountResponse, CustomDeltaRequest, HistoryItem, HistoryResponse,
    RootResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Counter backend API",
        description = "Persisted counter with an append-only audit history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::counter::root,
        crate::inbound::http::counter::get_count,
        crate::inbound::http::counter::increment,
        crate::inbound::http::counter::decrement,
        crate::inbound::http::counter::reset,
        crate::inbound::http::counter::custom,
        crate::inbound::http::counter::history,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RootResponse,
        CountResponse,
        CountIncrementResponse,
        CustomDeltaRequest,
        HistoryItem,
        HistoryResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "counter", description = "Read and mutate the counter"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
