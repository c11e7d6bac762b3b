//! Overlap detector.
//!
//! A conflict exists when any other active request of the same employee
//! intersects the candidate range (closed intervals on both sides).
//! Callers run this under the per-employee serialization guard so the
//! check and the subsequent insert/update form one atomic unit.

use crate::dates::Day;
use crate::error::Result;
use crate::store::Store;

pub fn has_conflict(
    store: &Store,
    employee_id: &str,
    start: Day,
    end: Day,
    exclude_id: Option<&str>,
) -> Result<bool> {
    for request in store.requests_for_employee(employee_id)? {
        if exclude_id == Some(request.id.as_str()) {
            continue;
        }
        if request.is_active() && request.overlaps(start, end) {
            return Ok(true);
        }
    }
    Ok(false)
}
