//! Persistence layout on sled.
//!
//! All records live in the default tree under key prefixes:
//! `emp/{id}`, `req/{id}`, `hist/{request_id}/{seq}`, `audit/{seq}` and
//! `run/{year}-{month}` for the accrual run-log. History keys embed a
//! zero-padded monotonic sequence so a prefix scan yields entries in
//! creation order. Multi-record mutations go through one `sled::Batch`.

use crate::employee::Employee;
use crate::error::Result;
use crate::history::{AuditEntry, HistoryEntry};
use crate::request::LeaveRequest;
use sled::Batch;
use std::sync::Arc;

const EMPLOYEE_PREFIX: &str = "emp/";
const REQUEST_PREFIX: &str = "req/";
const HISTORY_PREFIX: &str = "hist/";
const AUDIT_PREFIX: &str = "audit/";
const RUN_PREFIX: &str = "run/";

pub struct Store {
    db: Arc<sled::Db>,
}

impl Store {
    pub fn new(db: Arc<sled::Db>) -> Self {
        Self { db }
    }

    fn employee_key(id: &str) -> String {
        format!("{EMPLOYEE_PREFIX}{id}")
    }

    fn request_key(id: &str) -> String {
        format!("{REQUEST_PREFIX}{id}")
    }

    fn history_key(request_id: &str, seq: u64) -> String {
        format!("{HISTORY_PREFIX}{request_id}/{seq:020}")
    }

    /// Monotonic sequence numbers for history/audit ordering.
    pub fn next_seq(&self) -> Result<u64> {
        Ok(self.db.generate_id()?)
    }

    // ---- employees ----

    pub fn put_employee(&self, employee: &Employee) -> Result<()> {
        let bytes = minicbor::to_vec(employee)?;
        self.db.insert(Self::employee_key(&employee.id), bytes)?;
        Ok(())
    }

    pub fn get_employee(&self, id: &str) -> Result<Option<Employee>> {
        match self.db.get(Self::employee_key(id))? {
            Some(bytes) => Ok(Some(minicbor::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn employees(&self) -> Result<Vec<Employee>> {
        let mut out = Vec::new();
        for item in self.db.scan_prefix(EMPLOYEE_PREFIX) {
            let (_, bytes) = item?;
            out.push(minicbor::decode(&bytes)?);
        }
        Ok(out)
    }

    /// Stage an employee write on a batch.
    pub fn batch_put_employee(&self, batch: &mut Batch, employee: &Employee) -> Result<()> {
        let bytes = minicbor::to_vec(employee)?;
        batch.insert(Self::employee_key(&employee.id).into_bytes(), bytes);
        Ok(())
    }

    // ---- requests ----

    pub fn get_request(&self, id: &str) -> Result<Option<LeaveRequest>> {
        match self.db.get(Self::request_key(id))? {
            Some(bytes) => Ok(Some(minicbor::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn requests(&self) -> Result<Vec<LeaveRequest>> {
        let mut out = Vec::new();
        for item in self.db.scan_prefix(REQUEST_PREFIX) {
            let (_, bytes) = item?;
            out.push(minicbor::decode(&bytes)?);
        }
        Ok(out)
    }

    pub fn requests_for_employee(&self, employee_id: &str) -> Result<Vec<LeaveRequest>> {
        let mut out = self.requests()?;
        out.retain(|r| r.employee_id == employee_id);
        Ok(out)
    }

    pub fn batch_put_request(&self, batch: &mut Batch, request: &LeaveRequest) -> Result<()> {
        let bytes = minicbor::to_vec(request)?;
        batch.insert(Self::request_key(&request.id).into_bytes(), bytes);
        Ok(())
    }

    pub fn batch_remove_request(&self, batch: &mut Batch, id: &str) {
        batch.remove(Self::request_key(id).into_bytes());
    }

    // ---- history ----

    /// Stage a history append on the same batch as the state change so the
    /// two commit or fail together.
    pub fn batch_append_history(
        &self,
        batch: &mut Batch,
        seq: u64,
        entry: &HistoryEntry,
    ) -> Result<()> {
        let bytes = minicbor::to_vec(entry)?;
        batch.insert(Self::history_key(&entry.request_id, seq).into_bytes(), bytes);
        Ok(())
    }

    /// Ordered history for one request. Key order is creation order.
    pub fn history_for(&self, request_id: &str) -> Result<Vec<HistoryEntry>> {
        let prefix = format!("{HISTORY_PREFIX}{request_id}/");
        let mut out = Vec::new();
        for item in self.db.scan_prefix(prefix) {
            let (_, bytes) = item?;
            out.push(minicbor::decode(&bytes)?);
        }
        Ok(out)
    }

    // ---- audit ----

    /// Direct (non-batched) audit append. Callers treat failures as
    /// non-fatal; this just reports them.
    pub fn append_audit(&self, entry: &AuditEntry) -> Result<()> {
        let seq = self.next_seq()?;
        let bytes = minicbor::to_vec(entry)?;
        self.db.insert(format!("{AUDIT_PREFIX}{seq:020}").into_bytes(), bytes)?;
        Ok(())
    }

    pub fn audit_entries(&self) -> Result<Vec<AuditEntry>> {
        let mut out = Vec::new();
        for item in self.db.scan_prefix(AUDIT_PREFIX) {
            let (_, bytes) = item?;
            out.push(minicbor::decode(&bytes)?);
        }
        Ok(out)
    }

    // ---- accrual run-log ----

    fn run_key(year: i32, month: u32) -> String {
        format!("{RUN_PREFIX}{year}-{month:02}")
    }

    /// Whether the accrual for (year, month) has already committed.
    pub fn accrual_ran(&self, year: i32, month: u32) -> Result<bool> {
        Ok(self.db.get(Self::run_key(year, month))?.is_some())
    }

    /// Stage the run marker on the same batch as the credits it covers, so
    /// the marker only exists once every credit is durable.
    pub fn batch_mark_accrual_run(&self, batch: &mut Batch, year: i32, month: u32) {
        batch.insert(Self::run_key(year, month).into_bytes(), &[1u8][..]);
    }

    pub fn apply_batch(&self, batch: Batch) -> Result<()> {
        self.db.apply_batch(batch)?;
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store() -> (tempfile::TempDir, Store) {
        let dir = tempdir().unwrap();
        let db = sled::open(dir.path().join("store_test.db")).unwrap();
        (dir, Store::new(Arc::new(db)))
    }

    #[test]
    fn employee_roundtrip() {
        let (_dir, store) = open_store();
        let emp = Employee::new("emp1", "Huda").with_balances(30.0, 12.0);

        store.put_employee(&emp).unwrap();
        assert_eq!(store.get_employee("emp1").unwrap(), Some(emp));
        assert_eq!(store.get_employee("emp2").unwrap(), None);
        assert_eq!(store.employees().unwrap().len(), 1);
    }

    #[test]
    fn accrual_marker_commits_with_its_credits() {
        let (_dir, store) = open_store();
        let emp = Employee::new("emp1", "Huda").with_balances(32.5, 12.0);

        let mut batch = Batch::default();
        store.batch_put_employee(&mut batch, &emp).unwrap();
        store.batch_mark_accrual_run(&mut batch, 2025, 8);

        // nothing is visible until the batch lands, then everything is
        assert!(!store.accrual_ran(2025, 8).unwrap());
        assert_eq!(store.get_employee("emp1").unwrap(), None);
        store.apply_batch(batch).unwrap();
        assert!(store.accrual_ran(2025, 8).unwrap());
        assert_eq!(store.get_employee("emp1").unwrap(), Some(emp));

        assert!(!store.accrual_ran(2025, 9).unwrap());
    }

    #[test]
    fn history_scan_preserves_append_order() {
        use crate::dates::TimeStamp;
        use crate::history::HistoryAction;
        use crate::request::Status;

        let (_dir, store) = open_store();
        for (i, to) in [Status::PendingDept, Status::PendingManager, Status::Approved]
            .into_iter()
            .enumerate()
        {
            let entry = HistoryEntry {
                request_id: "req1".into(),
                action: HistoryAction::Create,
                from_status: None,
                to_status: to,
                actor_role: None,
                actor_id: None,
                note: Some(format!("step {i}")),
                created_at: TimeStamp::now(),
            };
            let seq = store.next_seq().unwrap();
            let mut batch = Batch::default();
            store.batch_append_history(&mut batch, seq, &entry).unwrap();
            store.apply_batch(batch).unwrap();
        }

        let entries = store.history_for("req1").unwrap();
        let notes: Vec<_> = entries.iter().filter_map(|e| e.note.clone()).collect();
        assert_eq!(notes, vec!["step 0", "step 1", "step 2"]);
    }
}
