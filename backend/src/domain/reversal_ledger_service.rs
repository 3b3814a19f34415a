//! Submission check for payroll corrections.
//!
//! Before a correction is submitted, the days it reverses are checked against
//! the referenced salary slip as stored (not as copied into the draft) and
//! against every correction already submitted for the same employee, payroll
//! period and slip. Nothing is written here.

use anyhow::Result;
use log::{info, warn};

use super::models::correction_draft::CorrectionDraft;
use super::reversal_validator::ReversalValidationError;
use crate::storage::{CorrectionStorage, PayRecordStorage};

/// Result of checking a draft before submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReview {
    /// Days reversed by corrections already submitted against the slip
    pub already_reversed: u64,
    pub error: Option<ReversalValidationError>,
}

impl SubmissionReview {
    pub fn is_accepted(&self) -> bool {
        self.error.is_none()
    }

    fn accepted(already_reversed: u64) -> Self {
        Self {
            already_reversed,
            error: None,
        }
    }

    fn rejected(already_reversed: u64, error: ReversalValidationError) -> Self {
        Self {
            already_reversed,
            error: Some(error),
        }
    }
}

#[derive(Clone)]
pub struct ReversalLedgerService<P: PayRecordStorage, C: CorrectionStorage> {
    pay_records: P,
    corrections: C,
}

impl<P: PayRecordStorage, C: CorrectionStorage> ReversalLedgerService<P, C> {
    pub fn new(pay_records: P, corrections: C) -> Self {
        Self {
            pay_records,
            corrections,
        }
    }

    /// Check a draft against the stored slip and earlier reversals.
    ///
    /// The slip fields of the draft are refreshed from storage. Drafts without
    /// a day count or slip reference have nothing to check and are accepted.
    pub async fn review_submission(&self, draft: &mut CorrectionDraft) -> Result<SubmissionReview> {
        let (Some(requested), Some(reference)) = (draft.days_to_reverse, draft.record_reference.clone()) else {
            return Ok(SubmissionReview::accepted(0));
        };

        if requested == 0 {
            return Ok(SubmissionReview::accepted(0));
        }
        if requested < 0 {
            return Ok(SubmissionReview::rejected(
                0,
                ReversalValidationError::NonPositiveDays { requested },
            ));
        }

        let Some(slip) = self.pay_records.get_pay_record(&reference).await? else {
            warn!("Salary slip {} referenced by correction not found", reference);
            return Ok(SubmissionReview::rejected(0, ReversalValidationError::SlipNotFound(reference)));
        };

        let total_days_applied = slip.total_days_applied();
        draft.working_days = Some(slip.total_working_days);
        draft.absent_days = Some(slip.absent_days);
        draft.lwp_days = Some(slip.leave_without_pay_days);
        draft.total_days_applied = Some(total_days_applied);

        let employee = draft.employee.as_deref().unwrap_or_default();
        let payroll_period = draft.payroll_period.as_deref().unwrap_or_default();
        let already_reversed: u64 = self
            .corrections
            .list_submitted_reversals(employee, payroll_period, &reference)
            .await?
            .iter()
            .map(|r| u64::from(r.days_to_reverse))
            .sum();

        if already_reversed.saturating_add(requested.unsigned_abs()) > u64::from(total_days_applied) {
            warn!(
                "Correction for {} would reverse {} + {} of {} days on {}",
                employee, already_reversed, requested, total_days_applied, reference
            );
            return Ok(SubmissionReview::rejected(
                already_reversed,
                ReversalValidationError::CumulativeReversalExceeded {
                    total_days_applied,
                    already_reversed,
                },
            ));
        }

        info!(
            "Correction for {} on {} accepted: {} days ({} already reversed of {})",
            employee, reference, requested, already_reversed, total_days_applied
        );
        Ok(SubmissionReview::accepted(already_reversed))
    }
}
