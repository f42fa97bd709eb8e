//! Domain primitives, services, and ports.
//!
//! Purpose: Model the persisted counter and its audit trail independently of
//! HTTP and SQL. Inbound adapters talk to the driving ports, outbound adapters
//! implement the driven port.
//!
//! Public surface:
//! - Counter, CounterAction, HistoryEntry, HistoryLimit: counter model.
//! - CounterService: implementation of the driving ports.
//! - Error and ErrorCode: transport-agnostic failure payload.
//! - TraceId: request-scoped correlation identifier.

pub mod counter;
pub mod counter_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::counter::{
    Counter, CounterAction, CounterEffect, HistoryEntry, HistoryLimit, HistoryLimitError,
};
pub use self::counter_service::CounterService;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

