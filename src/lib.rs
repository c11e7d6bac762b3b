//! Leave request approval engine.
//!
//! Embeddable library that owns the full lifecycle of employee leave
//! requests: a two-stage approval state machine (department head, then
//! manager), a configurable leave-type catalog, per-employee day balances
//! with monthly accrual and an annual emergency reset, overlap detection,
//! and an append-only history/audit trail. State is persisted in an
//! embedded [sled] database; records are CBOR-encoded.
//!
//! [`service::LeaveService`] is the front door; everything else backs it.

pub mod dates;
pub mod employee;
pub mod error;
pub mod history;
pub mod ledger;
pub mod notify;
pub mod overlap;
pub mod request;
pub mod service;
pub mod store;
pub mod types;
pub mod utils;

pub use employee::Employee;
pub use error::{EngineError, Result};
pub use notify::{LogSink, NoopSink, NotificationSink};
pub use request::{LeaveRequest, Role, Status};
pub use service::{Actor, LeaveService, RequestFilter};
pub use types::{LeaveType, LeaveTypeRegistry};
