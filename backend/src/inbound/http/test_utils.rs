//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::CounterService;
use crate::inbound::http::counter::configure;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, query_config};
use crate::test_support::InMemoryCounterRepository;

/// Build HTTP state over a fresh in-memory repository.
pub fn in_memory_state() -> HttpState {
    let service = Arc::new(CounterService::new(Arc::new(
        InMemoryCounterRepository::default(),
    )));
    HttpState::new(service.clone(), service)
}

/// Build an application exposing the counter routes over `state`, wired with
/// the same extractor configuration and middleware as the server.
pub fn counter_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .configure(configure)
}
