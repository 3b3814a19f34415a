//! Month selection for LWP reversal.
//!
//! Resolves the month chosen by the operator to a bucket and projects the
//! bucket into the correction draft. A month with no bucket leaves the draft
//! untouched; the reversal day count is always reset on an editable draft
//! that already had one, so it must be re-entered for the new month.

use log::{debug, info};

use super::models::correction_draft::CorrectionDraft;
use super::models::month_bucket::MonthBucket;

/// What happened when a month selection was applied to a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Slip the selection resolved to, if any bucket matched
    pub resolved_reference: Option<String>,
    /// Whether `days_to_reverse` was reset to zero
    pub days_reset: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionResolver;

impl SelectionResolver {
    pub fn new() -> Self {
        Self
    }

    /// First bucket carrying the selected month label
    pub fn resolve<'a>(&self, selected_month: &str, buckets: &'a [MonthBucket]) -> Option<&'a MonthBucket> {
        buckets.iter().find(|b| b.month_label == selected_month)
    }

    /// Every bucket carrying the month label, in bucket order
    pub fn buckets_for_month<'a>(&self, month_label: &str, buckets: &'a [MonthBucket]) -> Vec<&'a MonthBucket> {
        buckets.iter().filter(|b| b.month_label == month_label).collect()
    }

    /// Bucket of a specific slip, for callers that disambiguate same-month slips
    pub fn resolve_by_reference<'a>(&self, reference: &str, buckets: &'a [MonthBucket]) -> Option<&'a MonthBucket> {
        buckets.iter().find(|b| b.record_reference == reference)
    }

    /// Record the selection on the draft and project the matching bucket
    pub fn apply_selection(
        &self,
        draft: &mut CorrectionDraft,
        selected_month: Option<String>,
        buckets: &[MonthBucket],
    ) -> SelectionOutcome {
        let hit = selected_month
            .as_deref()
            .and_then(|month| self.resolve(month, buckets));

        let resolved_reference = match hit {
            Some(bucket) => {
                info!(
                    "Month {} resolved to slip {} ({} days applied)",
                    bucket.month_label, bucket.record_reference, bucket.total_days_applied
                );
                draft.project_bucket(bucket);
                Some(bucket.record_reference.clone())
            }
            None => {
                debug!("No bucket for month {:?}, keeping current slip fields", selected_month);
                None
            }
        };

        draft.selected_month = selected_month;

        let days_reset = draft.is_editable() && draft.days_to_reverse.is_some_and(|days| days != 0);
        if days_reset {
            draft.days_to_reverse = Some(0);
        }

        SelectionOutcome {
            resolved_reference,
            days_reset,
        }
    }

    /// Select a specific slip by reference, setting the month to the slip's month
    pub fn apply_reference(
        &self,
        draft: &mut CorrectionDraft,
        reference: &str,
        buckets: &[MonthBucket],
    ) -> SelectionOutcome {
        match self.resolve_by_reference(reference, buckets) {
            Some(bucket) => {
                let outcome = self.apply_selection(draft, Some(bucket.month_label.clone()), &[]);
                draft.project_bucket(bucket);
                SelectionOutcome {
                    resolved_reference: Some(bucket.record_reference.clone()),
                    days_reset: outcome.days_reset,
                }
            }
            None => {
                debug!("No bucket for slip {}, selection unchanged", reference);
                SelectionOutcome {
                    resolved_reference: None,
                    days_reset: false,
                }
            }
        }
    }
}
