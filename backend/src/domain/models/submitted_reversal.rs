//! Domain model for a payroll correction that has already been submitted.
use serde::{Deserialize, Serialize};

/// Days already reversed against a salary slip by an earlier correction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedReversal {
    pub name: String,
    pub employee: String,
    pub payroll_period: String,
    pub salary_slip_reference: String,
    pub days_to_reverse: u32,
}
