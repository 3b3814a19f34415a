//! Domain model for a salary slip (pay record) and the filter used to query it.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::DocStatus;

/// A pay computation for one employee covering one pay cycle.
///
/// Records are read-only once fetched; only `Submitted` records are
/// considered finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRecord {
    pub name: String,
    pub employee: String,
    pub company: String,
    pub payroll_period: String,
    pub docstatus: DocStatus,
    pub absent_days: u32,
    pub leave_without_pay_days: u32,
    pub posting_date: NaiveDate,
    pub total_working_days: u32,
}

impl PayRecord {
    /// Absence plus leave-without-pay days recorded on this slip, saturating at `u32::MAX`
    pub fn total_days_applied(&self) -> u32 {
        self.absent_days.saturating_add(self.leave_without_pay_days)
    }
}

/// Filter set of the generic pay record query
#[derive(Debug, Clone, PartialEq)]
pub struct PayRecordFilter {
    pub employee: String,
    pub payroll_period: String,
    pub company: String,
    pub docstatus: DocStatus,
}

impl PayRecordFilter {
    /// Filter for finalized slips of one employee, period and company
    pub fn finalized(employee: &str, payroll_period: &str, company: &str) -> Self {
        Self {
            employee: employee.to_string(),
            payroll_period: payroll_period.to_string(),
            company: company.to_string(),
            docstatus: DocStatus::Submitted,
        }
    }

    pub fn matches(&self, record: &PayRecord) -> bool {
        record.employee == self.employee
            && record.payroll_period == self.payroll_period
            && record.company == self.company
            && record.docstatus == self.docstatus
    }
}
