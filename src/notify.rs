//! Notification sink interface.
//!
//! The engine always calls the sink after a commit; the sink decides how
//! delivery works. Delivery is fire-and-forget: a sink error is logged and
//! swallowed so it can never affect the committed transaction.

use crate::dates::Day;
use crate::request::{LeaveRequest, Role, Status};

/// Snapshot of a request handed to the sink.
#[derive(Debug, Clone)]
pub struct RequestEvent {
    pub request_id: String,
    pub employee_id: String,
    pub type_code: String,
    pub start_date: Day,
    pub end_date: Day,
    pub status: Status,
}

impl From<&LeaveRequest> for RequestEvent {
    fn from(req: &LeaveRequest) -> Self {
        Self {
            request_id: req.id.clone(),
            employee_id: req.employee_id.clone(),
            type_code: req.type_code.clone(),
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status,
        }
    }
}

/// Fixed capability set the engine raises events over.
pub trait NotificationSink: Send + Sync {
    fn on_created(&self, event: &RequestEvent) -> anyhow::Result<()>;
    fn on_dept_approved(&self, event: &RequestEvent) -> anyhow::Result<()>;
    fn on_manager_approved(&self, event: &RequestEvent) -> anyhow::Result<()>;
    fn on_rejected(&self, event: &RequestEvent, by: Role, reason: &str) -> anyhow::Result<()>;
    fn on_cancelled(&self, event: &RequestEvent, by: Role) -> anyhow::Result<()>;
}

/// Default sink: structured log lines, nothing else.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn on_created(&self, event: &RequestEvent) -> anyhow::Result<()> {
        tracing::info!(
            request_id = %event.request_id,
            employee_id = %event.employee_id,
            type_code = %event.type_code,
            "new leave request"
        );
        Ok(())
    }

    fn on_dept_approved(&self, event: &RequestEvent) -> anyhow::Result<()> {
        tracing::info!(request_id = %event.request_id, "department approved");
        Ok(())
    }

    fn on_manager_approved(&self, event: &RequestEvent) -> anyhow::Result<()> {
        tracing::info!(request_id = %event.request_id, "manager approved");
        Ok(())
    }

    fn on_rejected(&self, event: &RequestEvent, by: Role, reason: &str) -> anyhow::Result<()> {
        tracing::info!(request_id = %event.request_id, by = by.as_str(), reason, "rejected");
        Ok(())
    }

    fn on_cancelled(&self, event: &RequestEvent, by: Role) -> anyhow::Result<()> {
        tracing::info!(request_id = %event.request_id, by = by.as_str(), "cancelled");
        Ok(())
    }
}

/// Sink that drops everything. Useful in tests.
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn on_created(&self, _: &RequestEvent) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_dept_approved(&self, _: &RequestEvent) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_manager_approved(&self, _: &RequestEvent) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_rejected(&self, _: &RequestEvent, _: Role, _: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_cancelled(&self, _: &RequestEvent, _: Role) -> anyhow::Result<()> {
        Ok(())
    }
}
