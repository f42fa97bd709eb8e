//! Driving port for reading the counter and its history.

use async_trait::async_trait;

use crate::domain::{Counter, Error, HistoryEntry, HistoryLimit};

/// Driving port for read-only counter operations.
///
/// Reading the counter lazily creates it, but never appends history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterQuery: Send + Sync {
    /// Current counter value, creating the counter at zero when absent.
    async fn current(&self) -> Result<Counter, Error>;

    /// Audit entries, most recent first.
    async fn history(&self, limit: Option<HistoryLimit>) -> Result<Vec<HistoryEntry>, Error>;
}
