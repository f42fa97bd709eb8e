//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`CounterCommand`], [`CounterQuery`]) are consumed by inbound
//! adapters. The driven port ([`CounterRepository`]) is implemented by
//! outbound persistence adapters.

mod counter_command;
mod counter_query;
mod counter_repository;
mod macros;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use counter_command::MockCounterCommand;
pub use counter_command::CounterCommand;
#[cfg(test)]
pub use counter_query::MockCounterQuery;
pub use counter_query::CounterQuery;
#[cfg(test)]
pub use counter_repository::MockCounterRepository;
pub use counter_repository::{CounterRepository, CounterRepositoryError, EnsureOutcome};
