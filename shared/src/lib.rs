use serde::{Deserialize, Serialize};
use std::fmt;
use chrono::NaiveDate;

/// Lifecycle status of a pay record or correction document.
///
/// Serialized as the integer used by the payroll source (0 = draft,
/// 1 = submitted, 2 = cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DocStatus {
    Draft,
    Submitted,
    Cancelled,
}

impl From<DocStatus> for u8 {
    fn from(status: DocStatus) -> Self {
        match status {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }
}

impl TryFrom<u8> for DocStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DocStatus::Draft),
            1 => Ok(DocStatus::Submitted),
            2 => Ok(DocStatus::Cancelled),
            other => Err(format!("Unknown docstatus: {}", other)),
        }
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// A finalized salary slip as returned by the generic record query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySlipSummary {
    /// Salary slip identifier
    pub name: String,
    pub absent_days: u32,
    pub leave_without_pay: u32,
    /// Posting date (YYYY-MM-DD)
    pub posting_date: NaiveDate,
    pub total_working_days: u32,
}

/// Query parameters for the generic salary slip listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SalarySlipListRequest {
    pub employee: Option<String>,
    pub payroll_period: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySlipListResponse {
    pub slips: Vec<SalarySlipSummary>,
}

/// Selection keys of a payroll correction draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LwpMonthsRequest {
    pub employee: Option<String>,
    pub payroll_period: Option<String>,
    pub company: Option<String>,
}

/// One salary slip with absence or LWP days, keyed by the month it was posted in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LwpSlipDetail {
    /// Long month name of the posting date, e.g. "March"
    pub month_name: String,
    pub salary_slip_reference: String,
    pub absent_days: u32,
    pub leave_without_pay: u32,
    pub working_days: u32,
    pub total_lwp_applied: u32,
    pub posting_date: NaiveDate,
}

/// Delegated aggregation result: month options plus one detail per slip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LwpMonthsResponse {
    /// Month options, starting with the empty "no selection" entry
    pub months: Vec<String>,
    pub slip_details: Vec<LwpSlipDetail>,
}

/// Kind of field-level validation failure raised while editing a correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReversalErrorKind {
    InvalidDate,
    NonPositiveDays,
    ExceedsAvailableDays,
    CumulativeReversalExceeded,
    SlipNotFound,
}

/// User-facing description of a rejected field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReversalFieldError {
    pub kind: ReversalErrorKind,
    pub title: String,
    pub message: String,
    /// Name of the offending draft field
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateDaysToReverseRequest {
    pub days_to_reverse: Option<i64>,
    /// Total LWP applied on the selected slip; treated as 0 when absent
    pub total_lwp_applied: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateAdditionalSalaryDateRequest {
    pub additional_salary_date: Option<NaiveDate>,
}

/// Outcome of a field rule. `value` is the field value to keep (None when cleared).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValidationResponse<T> {
    pub accepted: bool,
    pub value: Option<T>,
    pub error: Option<ReversalFieldError>,
}

/// Draft fields needed to check a correction against earlier reversals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateSubmissionRequest {
    pub employee: String,
    pub payroll_period: String,
    pub salary_slip_reference: Option<String>,
    pub days_to_reverse: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateSubmissionResponse {
    pub accepted: bool,
    pub working_days: Option<u32>,
    pub absent_days: Option<u32>,
    pub lwp_days: Option<u32>,
    pub total_lwp_applied: Option<u32>,
    pub already_reversed: u64,
    pub error: Option<ReversalFieldError>,
}
