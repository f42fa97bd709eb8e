//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/` through
//! the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{CounterRepository, CounterRepositoryError, EnsureOutcome};
use crate::domain::{Counter, CounterAction, CounterEffect, HistoryEntry, HistoryLimit};

#[derive(Default)]
struct State {
    counter: Option<i32>,
    history: Vec<HistoryEntry>,
    next_id: i32,
    failure: Option<CounterRepositoryError>,
}

/// In-memory [`CounterRepository`] with the same observable behaviour as the
/// Diesel adapter: lazy singleton creation, atomic mutation plus history
/// append, 32-bit overflow rejection and newest-first history.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::ports::CounterCommand;
/// use backend::domain::{CounterAction, CounterService};
/// use backend::test_support::InMemoryCounterRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = CounterService::new(Arc::new(InMemoryCounterRepository::default()));
/// let counter = service.apply(CounterAction::Custom(3)).await.expect("apply");
/// assert_eq!(counter.value(), 3);
/// # });
/// ```
pub struct InMemoryCounterRepository {
    state: Mutex<State>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for InMemoryCounterRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryCounterRepository {
    /// Create a repository stamping history entries with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
            clock,
        }
    }

    /// Create a repository whose counter row already holds `value`.
    pub fn seeded(value: i32) -> Self {
        let repository = Self::default();
        repository.lock().counter = Some(value);
        repository
    }

    /// Make every subsequent call fail with `error` until cleared with `None`.
    pub fn set_failure(&self, error: Option<CounterRepositoryError>) {
        self.lock().failure = error;
    }

    /// Stored counter value, `None` before the row is created.
    pub fn stored_value(&self) -> Option<i32> {
        self.lock().counter
    }

    /// Number of stored history entries.
    pub fn history_len(&self) -> usize {
        self.lock().history.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("counter state mutex"),
        }
    }
}

fn check_failure(state: &State) -> Result<(), CounterRepositoryError> {
    state.failure.clone().map_or(Ok(()), Err)
}

#[async_trait]
impl CounterRepository for InMemoryCounterRepository {
    async fn ensure(&self) -> Result<EnsureOutcome, CounterRepositoryError> {
        let mut state = self.lock();
        check_failure(&state)?;
        Ok(match state.counter {
            Some(value) => EnsureOutcome::Existing(Counter::new(value)),
            None => {
                state.counter = Some(0);
                EnsureOutcome::Created(Counter::zero())
            }
        })
    }

    async fn apply(&self, action: CounterAction) -> Result<HistoryEntry, CounterRepositoryError> {
        let mut state = self.lock();
        check_failure(&state)?;
        let current = state.counter.unwrap_or(0);
        let count_value = match action.effect() {
            CounterEffect::Add(delta) => current
                .checked_add(delta)
                .ok_or_else(|| CounterRepositoryError::out_of_range("integer out of range"))?,
            CounterEffect::Reset => 0,
        };
        let entry = HistoryEntry {
            id: state.next_id,
            count_value,
            action: action.label(),
            timestamp: self.clock.utc(),
        };
        state.counter = Some(count_value);
        state.next_id += 1;
        state.history.push(entry.clone());
        Ok(entry)
    }

    async fn history(
        &self,
        limit: Option<HistoryLimit>,
    ) -> Result<Vec<HistoryEntry>, CounterRepositoryError> {
        let state = self.lock();
        check_failure(&state)?;
        let mut entries = state.history.clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            entries.truncate(usize::try_from(limit.get()).unwrap_or(usize::MAX));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn overflow_leaves_state_untouched() {
        let repository = InMemoryCounterRepository::seeded(i32::MAX);

        let err = repository
            .apply(CounterAction::Increment)
            .await
            .expect_err("overflow rejected");

        assert!(matches!(err, CounterRepositoryError::OutOfRange { .. }));
        assert_eq!(repository.stored_value(), Some(i32::MAX));
        assert_eq!(repository.history_len(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn injected_failure_applies_to_every_operation() {
        let repository = InMemoryCounterRepository::default();
        repository.set_failure(Some(CounterRepositoryError::connection("down")));

        assert!(repository.ensure().await.is_err());
        assert!(repository.apply(CounterAction::Reset).await.is_err());
        assert!(repository.history(None).await.is_err());

        repository.set_failure(None);
        assert!(repository.ensure().await.is_ok());
    }
}
