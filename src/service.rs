//! Service layer API for the leave request lifecycle.
//!
//! Every operation that reads-then-writes shared state runs under a
//! per-employee mutex and commits its writes (request, balances, history)
//! in a single `sled::Batch`, so no other operation observes an
//! intermediate state. Audit entries and notifications happen after the
//! commit and are best-effort.

use crate::dates::{Day, TimeStamp};
use crate::employee::Employee;
use crate::error::{EngineError, Result};
use crate::history::{AuditEntry, HistoryAction, HistoryEntry};
use crate::ledger;
use crate::notify::{NotificationSink, RequestEvent};
use crate::overlap;
use crate::request::{LeaveRequest, Role, Status, can_transition, role_may};
use crate::store::Store;
use crate::types::LeaveTypeRegistry;
use crate::utils;
use sled::Batch;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Who is performing an operation. Department heads carry their department
/// so the engine can scope them to their own employees.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub role: Role,
    pub department_id: Option<String>,
}

impl Actor {
    pub fn employee(id: impl Into<String>) -> Self {
        Self { id: id.into(), role: Role::Employee, department_id: None }
    }

    pub fn department_head(id: impl Into<String>, department_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::DepartmentHead,
            department_id: Some(department_id.into()),
        }
    }

    pub fn manager(id: impl Into<String>) -> Self {
        Self { id: id.into(), role: Role::Manager, department_id: None }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self { id: id.into(), role: Role::Admin, department_id: None }
    }
}

/// Listing filters. `page` is 1-based; `limit` is clamped to 200.
#[derive(Debug, Clone)]
pub struct RequestFilter {
    pub status: Option<Status>,
    pub employee_id: Option<String>,
    pub type_code: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl Default for RequestFilter {
    fn default() -> Self {
        Self { status: None, employee_id: None, type_code: None, page: 1, limit: 10 }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
    pub limit: usize,
}

/// Partial update for a still-pending request. `None` keeps the field.
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    pub type_code: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub relation: Option<String>,
    pub notes: Option<String>,
}

/// Outcome of one monthly accrual invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualRun {
    /// False when this (year, month) had already accrued.
    pub ran: bool,
    pub credited: usize,
}

pub struct LeaveService {
    store: Store,
    registry: LeaveTypeRegistry,
    sink: Arc<dyn NotificationSink>,
    /// Serializes read-modify-write windows per employee. Requests are
    /// guarded by their owner's lock, so status checks, overlap checks and
    /// balance mutations on one employee never interleave.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    /// Serializes the accrual job so two invocations cannot both pass the
    /// run-marker check before either commits.
    accrual_gate: Mutex<()>,
}

impl LeaveService {
    pub fn new(
        db: Arc<sled::Db>,
        registry: LeaveTypeRegistry,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store: Store::new(db),
            registry,
            sink,
            locks: Mutex::new(HashMap::new()),
            accrual_gate: Mutex::new(()),
        }
    }

    /// The catalog in force. Reload through this handle.
    pub fn registry(&self) -> &LeaveTypeRegistry {
        &self.registry
    }

    fn employee_lock(&self, employee_id: &str) -> Arc<Mutex<()>> {
        let mut map = self.locks.lock().expect("employee lock map poisoned");
        map.entry(employee_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn audit(&self, action: &str, entity: &str, record_id: &str, changes: String) {
        let entry = AuditEntry::new(action, entity, record_id, changes);
        if let Err(e) = self.store.append_audit(&entry) {
            tracing::warn!(error = %e, action, record_id, "audit append failed");
        }
    }

    fn emit(&self, what: &str, result: anyhow::Result<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, event = what, "notification delivery failed");
        }
    }

    // ---- employees (HR boundary) ----

    pub fn put_employee(&self, employee: &Employee) -> Result<()> {
        self.store.put_employee(employee)
    }

    pub fn employee(&self, id: &str) -> Result<Employee> {
        self.store
            .get_employee(id)?
            .ok_or_else(|| EngineError::NotFound(format!("unknown employee {id:?}")))
    }

    // ---- lifecycle ----

    /// Submit a new leave request. It lands in `pending_dept`.
    pub fn create_request(
        &self,
        employee_id: &str,
        type_code: &str,
        start_date: &str,
        end_date: &str,
        relation: Option<&str>,
        notes: Option<&str>,
    ) -> Result<LeaveRequest> {
        let leave_type = self.registry.resolve(type_code)?;
        let start = Day::parse(start_date)?;
        let end = Day::parse(end_date)?;

        let relation = relation
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from);
        if leave_type.requires_relation && relation.is_none() {
            return Err(EngineError::Policy(format!(
                "{} requests must name the kinship relation",
                leave_type.code
            )));
        }

        let (start, end, days) = leave_type.derive_span(start, end)?;

        let lock = self.employee_lock(employee_id);
        let _guard = lock.lock().expect("employee lock poisoned");

        let employee = self.employee(employee_id)?;

        if leave_type.is_one_time {
            let already_granted = self
                .store
                .requests_for_employee(employee_id)?
                .iter()
                .any(|r| r.type_code == leave_type.code && r.status == Status::Approved);
            if already_granted {
                return Err(EngineError::Policy(format!(
                    "{} leave is granted at most once per employee",
                    leave_type.code
                )));
            }
        }

        if overlap::has_conflict(&self.store, employee_id, start, end, None)? {
            return Err(EngineError::Conflict(
                "date range overlaps an active leave request for this employee".into(),
            ));
        }

        // Sufficiency is advisory at creation; the approval-completing
        // transition is the hard gate and performs the debit.
        if let Some(account) = leave_type.balance_account() {
            let available = ledger::available(&employee, account);
            if (days as f64) > available {
                tracing::warn!(
                    employee_id,
                    type_code,
                    days,
                    available,
                    "projected debit exceeds current balance"
                );
            }
        }

        let request = LeaveRequest {
            id: utils::new_scoped_id("req")?,
            employee_id: employee_id.to_string(),
            type_code: leave_type.code.clone(),
            relation,
            start_date: start,
            end_date: end,
            requested_days: days,
            status: Status::PendingDept,
            rejection_reason: None,
            notes: notes.unwrap_or_default().to_string(),
            created_at: TimeStamp::now(),
            dept_decision_at: None,
            manager_decision_at: None,
        };

        let mut batch = Batch::default();
        self.store.batch_put_request(&mut batch, &request)?;
        let seq = self.store.next_seq()?;
        self.store.batch_append_history(
            &mut batch,
            seq,
            &HistoryEntry {
                request_id: request.id.clone(),
                action: HistoryAction::Create,
                from_status: None,
                to_status: Status::PendingDept,
                actor_role: None,
                actor_id: None,
                note: Some(format!("create {}", leave_type.code)),
                created_at: TimeStamp::now(),
            },
        )?;
        self.store.apply_batch(batch)?;

        self.audit(
            "CREATE",
            "leave_requests",
            &request.id,
            format!(
                "type={} start={} end={} days={}",
                leave_type.code, request.start_date, request.end_date, days
            ),
        );
        tracing::info!(
            request_id = %request.id,
            employee_id,
            type_code = %leave_type.code,
            days,
            "leave request created"
        );
        self.emit("on_created", self.sink.on_created(&RequestEvent::from(&request)));

        Ok(request)
    }

    /// Advance a request one approval stage. The expected stage is implied
    /// by the actor's role: department heads move `pending_dept` on to the
    /// manager, managers/admins complete the approval (which debits the
    /// leave type's balance account). A persisted status different from
    /// the expected stage is a [`EngineError::Conflict`].
    pub fn approve(&self, request_id: &str, actor: &Actor) -> Result<LeaveRequest> {
        let (expected, target, action) = match actor.role {
            Role::DepartmentHead => {
                (Status::PendingDept, Status::PendingManager, HistoryAction::Advance)
            }
            Role::Manager | Role::Admin => {
                (Status::PendingManager, Status::Approved, HistoryAction::Approve)
            }
            Role::Employee => {
                return Err(EngineError::Forbidden(
                    "employees cannot approve leave requests".into(),
                ));
            }
        };

        let request =
            self.apply_transition(request_id, actor, Some(expected), target, action, None, None)?;

        let event = RequestEvent::from(&request);
        match request.status {
            Status::PendingManager => self.emit("on_dept_approved", self.sink.on_dept_approved(&event)),
            Status::Approved => self.emit("on_manager_approved", self.sink.on_manager_approved(&event)),
            _ => {}
        }
        Ok(request)
    }

    /// Reject at the stage implied by the actor's role. The reason is
    /// mandatory and checked before any state change.
    pub fn reject(&self, request_id: &str, actor: &Actor, reason: &str) -> Result<LeaveRequest> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(EngineError::Validation("a rejection reason is required".into()));
        }

        let (expected, target) = match actor.role {
            Role::DepartmentHead => (Status::PendingDept, Status::RejectedDept),
            Role::Manager | Role::Admin => (Status::PendingManager, Status::RejectedManager),
            Role::Employee => {
                return Err(EngineError::Forbidden(
                    "employees cannot reject leave requests".into(),
                ));
            }
        };

        let request = self.apply_transition(
            request_id,
            actor,
            Some(expected),
            target,
            HistoryAction::Reject,
            None,
            Some(reason.to_string()),
        )?;

        let event = RequestEvent::from(&request);
        self.emit("on_rejected", self.sink.on_rejected(&event, actor.role, reason));
        Ok(request)
    }

    /// Cancel a pending or approved request. Owning employees may cancel
    /// their own; department heads theirs within the department; managers
    /// and admins any. Cancelling an approved request credits the debited
    /// days back.
    pub fn cancel(
        &self,
        request_id: &str,
        actor: &Actor,
        note: Option<&str>,
    ) -> Result<LeaveRequest> {
        let request = self.apply_transition(
            request_id,
            actor,
            None,
            Status::Cancelled,
            HistoryAction::Cancel,
            note.map(String::from),
            None,
        )?;

        let event = RequestEvent::from(&request);
        self.emit("on_cancelled", self.sink.on_cancelled(&event, actor.role));
        Ok(request)
    }

    fn apply_transition(
        &self,
        request_id: &str,
        actor: &Actor,
        expected: Option<Status>,
        target: Status,
        action: HistoryAction,
        note: Option<String>,
        rejection_reason: Option<String>,
    ) -> Result<LeaveRequest> {
        // Peek outside the lock to learn the owning employee, then re-read
        // under it; the request may have changed or vanished in between.
        let peek = self.load_request(request_id)?;
        let lock = self.employee_lock(&peek.employee_id);
        let _guard = lock.lock().expect("employee lock poisoned");

        let mut request = self.load_request(request_id)?;
        let current = request.status;

        if let Some(expected) = expected {
            if current != expected {
                return Err(EngineError::Conflict(format!(
                    "request is {}, expected {}",
                    current.as_str(),
                    expected.as_str()
                )));
            }
        }
        if !can_transition(current, target) {
            return Err(EngineError::Conflict(format!(
                "no transition from {} to {}",
                current.as_str(),
                target.as_str()
            )));
        }
        if !role_may(actor.role, current, target) {
            return Err(EngineError::Forbidden(format!(
                "role {} may not drive {} to {}",
                actor.role.as_str(),
                current.as_str(),
                target.as_str()
            )));
        }

        let mut employee = self.employee(&request.employee_id)?;

        match actor.role {
            Role::Employee => {
                if actor.id != request.employee_id {
                    return Err(EngineError::Forbidden(
                        "employees may only act on their own requests".into(),
                    ));
                }
            }
            Role::DepartmentHead => {
                if actor.department_id.is_none() || actor.department_id != employee.department_id {
                    return Err(EngineError::Forbidden(
                        "department heads may only act within their own department".into(),
                    ));
                }
            }
            Role::Manager | Role::Admin => {}
        }

        // Balance side effects: debit on the approval-completing
        // transition, credit back on post-approval cancellation.
        let mut employee_dirty = false;
        if target == Status::Approved {
            let leave_type = self.registry.resolve(&request.type_code)?;
            if let Some(account) = leave_type.balance_account() {
                let needed = request.requested_days as f64;
                let available = ledger::available(&employee, account);
                if needed > available {
                    return Err(EngineError::Policy(format!(
                        "insufficient {} balance: have {:.2}, need {:.0}",
                        account.as_str(),
                        available,
                        needed
                    )));
                }
                ledger::debit(&mut employee, account, needed);
                employee_dirty = true;
            }
        }
        if target == Status::Cancelled && current == Status::Approved {
            let leave_type = self.registry.resolve(&request.type_code)?;
            if let Some(account) = leave_type.balance_account() {
                ledger::credit(&mut employee, account, request.requested_days as f64);
                employee_dirty = true;
            }
        }

        request.status = target;
        match actor.role {
            Role::DepartmentHead => request.dept_decision_at = Some(TimeStamp::now()),
            Role::Manager | Role::Admin => request.manager_decision_at = Some(TimeStamp::now()),
            Role::Employee => {}
        }
        if rejection_reason.is_some() {
            request.rejection_reason = rejection_reason.clone();
        }

        let mut batch = Batch::default();
        self.store.batch_put_request(&mut batch, &request)?;
        if employee_dirty {
            self.store.batch_put_employee(&mut batch, &employee)?;
        }
        let seq = self.store.next_seq()?;
        self.store.batch_append_history(
            &mut batch,
            seq,
            &HistoryEntry {
                request_id: request.id.clone(),
                action,
                from_status: Some(current),
                to_status: target,
                actor_role: Some(actor.role),
                actor_id: Some(actor.id.clone()),
                note: note.or(rejection_reason.clone()),
                created_at: TimeStamp::now(),
            },
        )?;
        self.store.apply_batch(batch)?;

        let mut changes = format!("{} -> {}", current.as_str(), target.as_str());
        if let Some(reason) = &rejection_reason {
            changes.push_str(&format!(" reason={reason}"));
        }
        self.audit("TRANSITION", "leave_requests", &request.id, changes);
        tracing::info!(
            request_id = %request.id,
            from = current.as_str(),
            to = target.as_str(),
            actor = %actor.id,
            role = actor.role.as_str(),
            "status transition"
        );

        Ok(request)
    }

    /// Constrained edit of a still-pending request. Re-runs the full policy
    /// derivation and the overlap check; the status does not change.
    pub fn edit_request(
        &self,
        request_id: &str,
        actor: &Actor,
        patch: EditRequest,
    ) -> Result<LeaveRequest> {
        let peek = self.load_request(request_id)?;
        let lock = self.employee_lock(&peek.employee_id);
        let _guard = lock.lock().expect("employee lock poisoned");

        let mut request = self.load_request(request_id)?;

        if !matches!(request.status, Status::PendingDept | Status::PendingManager) {
            return Err(EngineError::Conflict(format!(
                "cannot edit a request in status {}",
                request.status.as_str()
            )));
        }

        let employee = self.employee(&request.employee_id)?;
        match actor.role {
            Role::Employee => {
                if actor.id != request.employee_id {
                    return Err(EngineError::Forbidden(
                        "employees may only edit their own requests".into(),
                    ));
                }
            }
            Role::DepartmentHead => {
                if actor.department_id.is_none() || actor.department_id != employee.department_id {
                    return Err(EngineError::Forbidden(
                        "department heads may only act within their own department".into(),
                    ));
                }
                if request.status != Status::PendingDept {
                    return Err(EngineError::Forbidden(
                        "request has already left the department stage".into(),
                    ));
                }
            }
            Role::Manager | Role::Admin => {}
        }

        let type_code = patch.type_code.as_deref().unwrap_or(&request.type_code);
        let leave_type = self.registry.resolve(type_code)?;

        let relation = match patch.relation {
            Some(r) => {
                let trimmed = r.trim().to_string();
                if trimmed.is_empty() { None } else { Some(trimmed) }
            }
            None => request.relation.clone(),
        };
        if leave_type.requires_relation && relation.is_none() {
            return Err(EngineError::Policy(format!(
                "{} requests must name the kinship relation",
                leave_type.code
            )));
        }

        let start = match &patch.start_date {
            Some(s) => Day::parse(s)?,
            None => request.start_date,
        };
        let end = match &patch.end_date {
            Some(s) => Day::parse(s)?,
            None => request.end_date,
        };
        let (start, end, days) = leave_type.derive_span(start, end)?;

        if leave_type.is_one_time && leave_type.code != request.type_code {
            let already_granted = self
                .store
                .requests_for_employee(&request.employee_id)?
                .iter()
                .any(|r| r.type_code == leave_type.code && r.status == Status::Approved);
            if already_granted {
                return Err(EngineError::Policy(format!(
                    "{} leave is granted at most once per employee",
                    leave_type.code
                )));
            }
        }

        let dates_changed = start != request.start_date || end != request.end_date;
        if dates_changed
            && overlap::has_conflict(
                &self.store,
                &request.employee_id,
                start,
                end,
                Some(&request.id),
            )?
        {
            return Err(EngineError::Conflict(
                "date range overlaps an active leave request for this employee".into(),
            ));
        }

        request.type_code = leave_type.code.clone();
        request.relation = relation;
        request.start_date = start;
        request.end_date = end;
        request.requested_days = days;
        if let Some(notes) = patch.notes {
            request.notes = notes;
        }

        let mut batch = Batch::default();
        self.store.batch_put_request(&mut batch, &request)?;
        let seq = self.store.next_seq()?;
        self.store.batch_append_history(
            &mut batch,
            seq,
            &HistoryEntry {
                request_id: request.id.clone(),
                action: HistoryAction::Edit,
                from_status: Some(request.status),
                to_status: request.status,
                actor_role: Some(actor.role),
                actor_id: Some(actor.id.clone()),
                note: Some(format!(
                    "edit start={start} end={end} type={}",
                    leave_type.code
                )),
                created_at: TimeStamp::now(),
            },
        )?;
        self.store.apply_batch(batch)?;

        self.audit(
            "EDIT",
            "leave_requests",
            &request.id,
            format!("start={start} end={end} type={} days={days}", leave_type.code),
        );
        tracing::info!(request_id = %request.id, "leave request edited");

        Ok(request)
    }

    /// Hard delete, privileged. Approved requests cannot be deleted; the
    /// history trail is retained either way.
    pub fn delete_request(&self, request_id: &str, actor: &Actor) -> Result<()> {
        if !matches!(actor.role, Role::Manager | Role::Admin) {
            return Err(EngineError::Forbidden(
                "only managers or admins may delete requests".into(),
            ));
        }

        let peek = self.load_request(request_id)?;
        let lock = self.employee_lock(&peek.employee_id);
        let _guard = lock.lock().expect("employee lock poisoned");

        let request = self.load_request(request_id)?;
        if request.status == Status::Approved {
            return Err(EngineError::Policy(
                "approved requests cannot be deleted".into(),
            ));
        }

        let mut batch = Batch::default();
        self.store.batch_remove_request(&mut batch, &request.id);
        self.store.apply_batch(batch)?;

        self.audit(
            "DELETE",
            "leave_requests",
            &request.id,
            format!("deleted in status {}", request.status.as_str()),
        );
        tracing::info!(request_id = %request.id, actor = %actor.id, "leave request deleted");
        Ok(())
    }

    // ---- queries ----

    pub fn get_request(&self, request_id: &str) -> Result<LeaveRequest> {
        self.load_request(request_id)
    }

    fn load_request(&self, request_id: &str) -> Result<LeaveRequest> {
        self.store
            .get_request(request_id)?
            .ok_or_else(|| EngineError::NotFound(format!("unknown request {request_id:?}")))
    }

    /// Filtered, paginated listing, newest first.
    pub fn list_requests(&self, filter: &RequestFilter) -> Result<Page<LeaveRequest>> {
        let limit = filter.limit.clamp(1, 200);
        let page = filter.page.max(1);

        let mut items = self.store.requests()?;
        items.retain(|r| {
            filter.status.is_none_or(|s| r.status == s)
                && filter.employee_id.as_deref().is_none_or(|e| r.employee_id == e)
                && filter.type_code.as_deref().is_none_or(|t| r.type_code == t)
        });
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = items.len();
        let pages = if total == 0 { 1 } else { total.div_ceil(limit) };
        let items = items
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(limit))
            .take(limit)
            .collect();

        Ok(Page { items, total, page, pages, limit })
    }

    /// Ordered timeline of a request, also available after deletion.
    pub fn history(&self, request_id: &str) -> Result<Vec<HistoryEntry>> {
        self.store.history_for(request_id)
    }

    // ---- batch jobs ----

    /// Idempotent monthly accrual entry point for the external scheduler.
    pub fn run_monthly_accrual(&self) -> Result<AccrualRun> {
        self.run_monthly_accrual_on(Day::today())
    }

    /// Accrue one twelfth of the yearly cap to every employee with a
    /// usable hire date. Runs at most once per (year, month); employees
    /// without a hire date are skipped without failing the batch.
    ///
    /// The run marker and every credit commit in one `sled::Batch`, so a
    /// storage failure leaves the month fully unrun and safe to retry.
    pub fn run_monthly_accrual_on(&self, today: Day) -> Result<AccrualRun> {
        let (year, month) = (today.year(), today.month());
        let _job = self.accrual_gate.lock().expect("accrual gate poisoned");
        if self.store.accrual_ran(year, month)? {
            tracing::info!(year, month, "monthly accrual already ran, skipping");
            return Ok(AccrualRun { ran: false, credited: 0 });
        }

        // Hold every employee lock for the duration so no lifecycle
        // operation interleaves with the staged balance reads.
        let employees = self.store.employees()?;
        let locks: Vec<_> = employees
            .iter()
            .map(|e| self.employee_lock(&e.id))
            .collect();
        let _guards: Vec<_> = locks
            .iter()
            .map(|l| l.lock().expect("employee lock poisoned"))
            .collect();

        let mut batch = Batch::default();
        let mut credited = 0;
        for employee in &employees {
            let Some(hire_date) = employee.hire_date else {
                tracing::debug!(employee_id = %employee.id, "no hire date, skipping accrual");
                continue;
            };
            let Some(amount) = ledger::monthly_accrual(hire_date, today) else {
                continue;
            };

            let Some(mut current) = self.store.get_employee(&employee.id)? else {
                continue;
            };
            ledger::credit(&mut current, ledger::BalanceAccount::Annual, amount);
            self.store.batch_put_employee(&mut batch, &current)?;
            credited += 1;
        }
        self.store.batch_mark_accrual_run(&mut batch, year, month);
        self.store.apply_batch(batch)?;

        self.audit(
            "ACCRUAL",
            "employees",
            &format!("{year}-{month:02}"),
            format!("credited {credited} employees"),
        );
        tracing::info!(year, month, credited, "monthly accrual complete");
        Ok(AccrualRun { ran: true, credited })
    }

    /// Scheduler entry point for the annual reset.
    pub fn reset_emergency_balances(&self, force: bool) -> Result<usize> {
        self.reset_emergency_balances_on(Day::today(), force)
    }

    /// On January 1st (or when forced) overwrite every emergency balance
    /// with the fixed yearly grant. Naturally idempotent per day.
    pub fn reset_emergency_balances_on(&self, today: Day, force: bool) -> Result<usize> {
        if !force && !(today.month() == 1 && today.day() == 1) {
            return Ok(0);
        }

        let mut reset = 0;
        for employee in self.store.employees()? {
            let lock = self.employee_lock(&employee.id);
            let _guard = lock.lock().expect("employee lock poisoned");
            let Some(mut current) = self.store.get_employee(&employee.id)? else {
                continue;
            };
            current.emergency_balance = ledger::EMERGENCY_RESET_DAYS;
            self.store.put_employee(&current)?;
            reset += 1;
        }

        self.audit(
            "RESET",
            "employees",
            &format!("{}", today),
            format!("reset {reset} emergency balances"),
        );
        tracing::info!(count = reset, "emergency balances reset");
        Ok(reset)
    }
}
