//! Counter aggregate, mutation actions, and audit history records.
//!
//! The counter is a single persisted integer. Every mutation is described by a
//! [`CounterAction`], which knows both its effect on the stored value and the
//! label recorded in the audit trail.

use std::fmt;
use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current value of the singleton counter.
///
/// # Examples
/// ```
/// use backend::domain::Counter;
///
/// let counter = Counter::new(6);
/// assert_eq!(counter.value(), 6);
/// assert_eq!(Counter::zero().value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    value: i32,
}

impl Counter {
    /// Wrap a stored counter value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self { value }
    }

    /// The value a freshly created counter starts from.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// The stored integer.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.value
    }
}

/// How an action changes the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterEffect {
    /// Add a signed delta to the current value.
    Add(i32),
    /// Overwrite the current value with zero.
    Reset,
}

/// A mutation applied to the counter.
///
/// Labels are kept byte-for-byte compatible with existing clients:
/// `increment`, `decrement`, `reset`, and `increment_<N>`, `decrement_<N>` or
/// `no_change_0` for custom deltas.
///
/// # Examples
/// ```
/// use backend::domain::CounterAction;
///
/// assert_eq!(CounterAction::Increment.label(), "increment");
/// assert_eq!(CounterAction::Custom(5).label(), "increment_5");
/// assert_eq!(CounterAction::Custom(-3).label(), "decrement_3");
/// assert_eq!(CounterAction::Custom(0).label(), "no_change_0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    /// Add one.
    Increment,
    /// Subtract one.
    Decrement,
    /// Return to zero.
    Reset,
    /// Add an arbitrary signed delta.
    Custom(i32),
}

impl CounterAction {
    /// Effect of the action on the stored value.
    #[must_use]
    pub const fn effect(self) -> CounterEffect {
        match self {
            Self::Increment => CounterEffect::Add(1),
            Self::Decrement => CounterEffect::Add(-1),
            Self::Reset => CounterEffect::Reset,
            Self::Custom(delta) => CounterEffect::Add(delta),
        }
    }

    /// Audit label recorded in the history table.
    #[must_use]
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CounterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Increment => f.write_str("increment"),
            Self::Decrement => f.write_str("decrement"),
            Self::Reset => f.write_str("reset"),
            Self::Custom(delta) => {
                let verb = match delta.signum() {
                    1 => "increment",
                    -1 => "decrement",
                    _ => "no_change",
                };
                write!(f, "{verb}_{}", delta.unsigned_abs())
            }
        }
    }
}

/// Immutable audit record of one counter mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Surrogate identifier assigned by storage.
    pub id: i32,
    /// Counter value immediately after the action.
    pub count_value: i32,
    /// Action label, see [`CounterAction`].
    pub action: String,
    /// Server-assigned creation time.
    pub timestamp: DateTime<Utc>,
}

/// Validation errors for [`HistoryLimit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HistoryLimitError {
    /// A limit of zero would always return an empty page.
    #[error("history limit must be greater than zero")]
    Zero,
}

/// Upper bound on the number of history entries returned.
///
/// # Examples
/// ```
/// use backend::domain::HistoryLimit;
///
/// let limit = HistoryLimit::new(10).expect("non-zero limit");
/// assert_eq!(limit.get(), 10);
/// assert!(HistoryLimit::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimit(NonZeroU32);

impl HistoryLimit {
    /// Validate and wrap a requested limit.
    pub fn new(limit: u32) -> Result<Self, HistoryLimitError> {
        NonZeroU32::new(limit)
            .map(Self)
            .ok_or(HistoryLimitError::Zero)
    }

    /// The limit as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}
