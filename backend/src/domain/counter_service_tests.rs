//! Tests for the counter service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{EnsureOutcome, MockCounterRepository};
use crate::test_support::InMemoryCounterRepository;
use chrono::Utc;
use rstest::rstest;

fn make_service(repo: MockCounterRepository) -> CounterService<MockCounterRepository> {
    CounterService::new(Arc::new(repo))
}

fn entry(id: i32, count_value: i32, action: CounterAction) -> HistoryEntry {
    HistoryEntry {
        id,
        count_value,
        action: action.label(),
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn apply_returns_value_recorded_in_history() {
    let mut repo = MockCounterRepository::new();
    repo.expect_apply()
        .withf(|action| *action == CounterAction::Custom(5))
        .times(1)
        .return_once(|action| Ok(entry(1, 6, action)));

    let counter = make_service(repo)
        .apply(CounterAction::Custom(5))
        .await
        .expect("apply succeeds");

    assert_eq!(counter.value(), 6);
}

#[tokio::test]
async fn current_reads_existing_counter_without_history() {
    let mut repo = MockCounterRepository::new();
    repo.expect_ensure()
        .times(1)
        .return_once(|| Ok(EnsureOutcome::Existing(Counter::new(42))));
    repo.expect_apply().never();

    let counter = make_service(repo).current().await.expect("current succeeds");

    assert_eq!(counter.value(), 42);
}

#[tokio::test]
async fn current_reports_zero_for_created_counter() {
    let mut repo = MockCounterRepository::new();
    repo.expect_ensure()
        .times(1)
        .return_once(|| Ok(EnsureOutcome::Created(Counter::zero())));

    let counter = make_service(repo).current().await.expect("current succeeds");

    assert_eq!(counter, Counter::zero());
}

#[tokio::test]
async fn history_forwards_limit() {
    let limit = HistoryLimit::new(2).expect("valid limit");
    let mut repo = MockCounterRepository::new();
    repo.expect_history()
        .withf(move |requested| *requested == Some(limit))
        .times(1)
        .return_once(|_| {
            Ok(vec![
                entry(2, 0, CounterAction::Reset),
                entry(1, 1, CounterAction::Increment),
            ])
        });

    let history = make_service(repo)
        .history(Some(limit))
        .await
        .expect("history succeeds");

    assert_eq!(history.len(), 2);
}

#[rstest]
#[case(
    CounterRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case(CounterRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(
    CounterRepositoryError::out_of_range("integer out of range"),
    ErrorCode::InvalidRequest
)]
#[tokio::test]
async fn repository_errors_map_to_domain_codes(
    #[case] failure: CounterRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockCounterRepository::new();
    repo.expect_apply()
        .times(1)
        .return_once(move |_| Err(failure));

    let error = make_service(repo)
        .apply(CounterAction::Increment)
        .await
        .expect_err("apply fails");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn out_of_range_error_carries_detail_code() {
    let mut repo = MockCounterRepository::new();
    repo.expect_apply()
        .times(1)
        .return_once(|_| Err(CounterRepositoryError::out_of_range("integer out of range")));

    let error = make_service(repo)
        .apply(CounterAction::Custom(i32::MAX))
        .await
        .expect_err("apply fails");

    let code = error
        .details()
        .and_then(|details| details.get("code"))
        .and_then(serde_json::Value::as_str);
    assert_eq!(code, Some("counter_out_of_range"));
}

#[rstest]
#[case(vec![CounterAction::Increment, CounterAction::Increment, CounterAction::Decrement], 1)]
#[case(vec![CounterAction::Custom(10), CounterAction::Custom(-25)], -15)]
#[case(vec![CounterAction::Decrement, CounterAction::Custom(0), CounterAction::Custom(3)], 2)]
#[tokio::test]
async fn value_equals_sum_of_applied_deltas(
    #[case] actions: Vec<CounterAction>,
    #[case] expected: i32,
) {
    let service = CounterService::new(Arc::new(InMemoryCounterRepository::default()));

    for action in &actions {
        service.apply(*action).await.expect("apply succeeds");
    }

    let current = service.current().await.expect("current succeeds");
    assert_eq!(current.value(), expected);

    let history = service.history(None).await.expect("history succeeds");
    assert_eq!(history.len(), actions.len());
}

#[tokio::test]
async fn reading_twice_is_idempotent_and_writes_no_history() {
    let service = CounterService::new(Arc::new(InMemoryCounterRepository::default()));
    service
        .apply(CounterAction::Custom(4))
        .await
        .expect("apply succeeds");

    let first = service.current().await.expect("first read");
    let second = service.current().await.expect("second read");

    assert_eq!(first, second);
    let history = service.history(None).await.expect("history succeeds");
    assert_eq!(history.len(), 1);
}
