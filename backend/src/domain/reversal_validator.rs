//! Field rules for a payroll correction draft.
//!
//! Two independent rules, each run when its own field changes:
//!
//! - **Additional salary date**: must not lie before today.
//! - **Days to reverse**: must be positive and no larger than the total days
//!   applied on the selected slip (0 when no slip is selected).
//!
//! A rejected value clears the field instead of being clamped; the operator
//! has to enter a new one.

use chrono::{Local, NaiveDate};
use log::{info, warn};
use shared::ReversalErrorKind;

use super::models::correction_draft::CorrectionDraft;

pub const ADDITIONAL_SALARY_DATE_FIELD: &str = "additional_salary_date";
pub const DAYS_TO_REVERSE_FIELD: &str = "days_to_reverse";
pub const SALARY_SLIP_REFERENCE_FIELD: &str = "salary_slip_reference";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReversalValidationError {
    #[error("You cannot select a past date for 'Additional Salary Date'.")]
    InvalidDate { date: NaiveDate, today: NaiveDate },
    #[error("The number of days to reverse must be a positive number.")]
    NonPositiveDays { requested: i64 },
    #[error("The number of days planned for reversal cannot exceed the total LWP days.")]
    ExceedsAvailableDays { requested: i64, available: u32 },
    #[error("You cannot reverse more than the total LWP days {total_days_applied}. You have already reversed {already_reversed} days for this employee.")]
    CumulativeReversalExceeded {
        total_days_applied: u32,
        already_reversed: u64,
    },
    #[error("Salary Slip {0} not found.")]
    SlipNotFound(String),
}

impl ReversalValidationError {
    pub fn kind(&self) -> ReversalErrorKind {
        match self {
            Self::InvalidDate { .. } => ReversalErrorKind::InvalidDate,
            Self::NonPositiveDays { .. } => ReversalErrorKind::NonPositiveDays,
            Self::ExceedsAvailableDays { .. } => ReversalErrorKind::ExceedsAvailableDays,
            Self::CumulativeReversalExceeded { .. } => ReversalErrorKind::CumulativeReversalExceeded,
            Self::SlipNotFound(_) => ReversalErrorKind::SlipNotFound,
        }
    }

    /// Short heading shown above the message
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "Invalid Date",
            Self::NonPositiveDays { .. }
            | Self::ExceedsAvailableDays { .. }
            | Self::CumulativeReversalExceeded { .. } => "Invalid Number of Days",
            Self::SlipNotFound(_) => "Missing Salary Slip",
        }
    }

    /// Draft field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => ADDITIONAL_SALARY_DATE_FIELD,
            Self::NonPositiveDays { .. }
            | Self::ExceedsAvailableDays { .. }
            | Self::CumulativeReversalExceeded { .. } => DAYS_TO_REVERSE_FIELD,
            Self::SlipNotFound(_) => SALARY_SLIP_REFERENCE_FIELD,
        }
    }
}

/// Source of the current date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReversalValidator;

impl ReversalValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_additional_salary_date(
        &self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), ReversalValidationError> {
        if date < today {
            return Err(ReversalValidationError::InvalidDate { date, today });
        }
        Ok(())
    }

    /// Check a requested day count against the days applied on the selected slip.
    ///
    /// The lower bound is checked first, so at most one error is reported.
    pub fn validate_days_to_reverse(
        &self,
        requested: i64,
        available: u32,
    ) -> Result<(), ReversalValidationError> {
        if requested <= 0 {
            return Err(ReversalValidationError::NonPositiveDays { requested });
        }
        if requested > i64::from(available) {
            return Err(ReversalValidationError::ExceedsAvailableDays { requested, available });
        }
        Ok(())
    }

    /// Run the date rule on the draft, clearing the field on violation
    pub fn apply_additional_salary_date(
        &self,
        draft: &mut CorrectionDraft,
        today: NaiveDate,
    ) -> Option<ReversalValidationError> {
        let date = draft.additional_salary_date?;

        match self.validate_additional_salary_date(date, today) {
            Ok(()) => None,
            Err(error) => {
                warn!("Rejected additional salary date {} (today is {})", date, today);
                draft.additional_salary_date = None;
                Some(error)
            }
        }
    }

    /// Run the day-count rule on the draft, clearing the field on violation
    pub fn apply_days_to_reverse(&self, draft: &mut CorrectionDraft) -> Option<ReversalValidationError> {
        let requested = draft.days_to_reverse?;
        let available = draft.available_days();

        match self.validate_days_to_reverse(requested, available) {
            Ok(()) => {
                info!("Accepted {} of {} days for reversal", requested, available);
                None
            }
            Err(error) => {
                warn!("Rejected days to reverse {} (available {}): {}", requested, available, error);
                draft.days_to_reverse = None;
                Some(error)
            }
        }
    }
}
