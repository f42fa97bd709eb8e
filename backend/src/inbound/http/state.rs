//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CounterCommand, CounterQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub counter: Arc<dyn CounterCommand>,
    pub counter_query: Arc<dyn CounterQuery>,
}

impl HttpState {
    /// Construct state from the counter ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::CounterService;
    /// use backend::domain::ports::CounterRepository;
    /// use backend::inbound::http::state::HttpState;
    ///
    /// fn state_for<R: CounterRepository + 'static>(repository: R) -> HttpState {
    ///     let service = Arc::new(CounterService::new(Arc::new(repository)));
    ///     HttpState::new(service.clone(), service)
    /// }
    /// ```
    pub fn new(counter: Arc<dyn CounterCommand>, counter_query: Arc<dyn CounterQuery>) -> Self {
        Self {
            counter,
            counter_query,
        }
    }
}
