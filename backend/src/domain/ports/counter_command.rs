//! Driving port for counter mutations.
//!
//! HTTP handlers call [`CounterCommand`] for every endpoint that changes the
//! counter. Each call appends exactly one history entry.

use async_trait::async_trait;

use crate::domain::{Counter, CounterAction, Error};

/// Driving port for counter mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterCommand: Send + Sync {
    /// Apply `action` and return the counter value afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the result
    /// leaves the storable range, and service-unavailable or internal errors
    /// for storage failures.
    async fn apply(&self, action: CounterAction) -> Result<Counter, Error>;
}
