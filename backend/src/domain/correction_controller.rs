//! Event-driven controller for one payroll correction editing session.
//!
//! Every field change on the draft is an explicit [`CorrectionEvent`].
//! [`CorrectionController::handle`] applies one event synchronously and
//! returns the validation errors it raised, plus a [`FetchTicket`] when the
//! salary slips must be reloaded. The caller runs the fetch and hands the
//! result back through [`CorrectionController::apply_fetch`].
//!
//! ## Event flow
//!
//! - employee / payroll period / company change or refresh: reload slips;
//!   a changed key clears the selected slip, and with incomplete keys the
//!   month options are cleared too and no fetch is issued
//! - reloaded slips: a selected slip that is still offered is re-projected,
//!   otherwise the selection is cleared
//! - month selected: project the first matching bucket into the draft
//! - days to reverse / additional salary date changed: run that field's rule
//!
//! ## Overlapping fetches
//!
//! Each ticket carries a generation number. Only the most recently issued
//! ticket may update the month options; a result for an older ticket is
//! discarded as stale, whatever order the results arrive in.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, info, warn};

use super::models::correction_draft::{CorrectionDraft, DocumentState, SelectionKeys};
use super::models::month_bucket::MonthBucket;
use super::month_aggregator::{Aggregation, MonthAggregator};
use super::reversal_validator::{Clock, ReversalValidationError, ReversalValidator};
use super::selection_resolver::SelectionResolver;
use super::slip_fetcher::{FetchOutcome, SlipFetcher};

#[derive(Debug, Clone, PartialEq)]
pub enum CorrectionEvent {
    EmployeeChanged(Option<String>),
    PayrollPeriodChanged(Option<String>),
    CompanyChanged(Option<String>),
    /// Form reopened or reloaded; reload slips for the current keys
    Refresh,
    MonthSelected(Option<String>),
    /// Select one specific slip when several share a month
    SlipSelected(String),
    DaysToReverseChanged(Option<i64>),
    AdditionalSalaryDateChanged(Option<NaiveDate>),
    DocumentFinalized,
}

/// A slip fetch the caller must run for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub keys: SelectionKeys,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    pub errors: Vec<ReversalValidationError>,
    pub fetch: Option<FetchTicket>,
}

impl Transition {
    fn errors(errors: impl IntoIterator<Item = ReversalValidationError>) -> Self {
        Self {
            errors: errors.into_iter().collect(),
            fetch: None,
        }
    }

    fn fetch(ticket: FetchTicket) -> Self {
        Self {
            errors: Vec::new(),
            fetch: Some(ticket),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplication {
    Applied,
    /// A newer fetch was issued after this one; its result was discarded
    Stale,
}

/// State of the most recent slip load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Pending { generation: u64 },
    /// Slips loaded and at least one bucket produced
    Loaded { buckets: usize },
    /// Slips loaded but none recorded absence or LWP days
    Empty,
    /// Selection keys incomplete, nothing fetched
    Skipped,
    Failed(String),
}

pub struct CorrectionController {
    draft: CorrectionDraft,
    aggregation: Aggregation,
    generation: u64,
    last_fetch: FetchStatus,
    aggregator: MonthAggregator,
    resolver: SelectionResolver,
    validator: ReversalValidator,
    fetcher: Arc<dyn SlipFetcher>,
    clock: Arc<dyn Clock>,
}

impl CorrectionController {
    pub fn new(fetcher: Arc<dyn SlipFetcher>, aggregator: MonthAggregator, clock: Arc<dyn Clock>) -> Self {
        Self::with_draft(CorrectionDraft::new(), fetcher, aggregator, clock)
    }

    /// Resume a session on an existing draft. Call `handle(Refresh)` to load its slips.
    pub fn with_draft(
        draft: CorrectionDraft,
        fetcher: Arc<dyn SlipFetcher>,
        aggregator: MonthAggregator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            draft,
            aggregation: Aggregation::empty(),
            generation: 0,
            last_fetch: FetchStatus::Idle,
            aggregator,
            resolver: SelectionResolver::new(),
            validator: ReversalValidator::new(),
            fetcher,
            clock,
        }
    }

    pub fn draft(&self) -> &CorrectionDraft {
        &self.draft
    }

    pub fn buckets(&self) -> &[MonthBucket] {
        &self.aggregation.buckets
    }

    pub fn last_fetch(&self) -> &FetchStatus {
        &self.last_fetch
    }

    /// Apply one event to the draft
    pub fn handle(&mut self, event: CorrectionEvent) -> Transition {
        debug!("Handling {:?}", event);

        match event {
            CorrectionEvent::EmployeeChanged(value) => {
                let changed = self.draft.employee != value;
                self.draft.employee = value;
                self.reload_after_key_change(changed)
            }
            CorrectionEvent::PayrollPeriodChanged(value) => {
                let changed = self.draft.payroll_period != value;
                self.draft.payroll_period = value;
                self.reload_after_key_change(changed)
            }
            CorrectionEvent::CompanyChanged(value) => {
                let changed = self.draft.company != value;
                self.draft.company = value;
                self.reload_after_key_change(changed)
            }
            CorrectionEvent::Refresh => self.reload(),
            CorrectionEvent::MonthSelected(month) => {
                self.resolver
                    .apply_selection(&mut self.draft, month, &self.aggregation.buckets);
                Transition::default()
            }
            CorrectionEvent::SlipSelected(reference) => {
                self.resolver
                    .apply_reference(&mut self.draft, &reference, &self.aggregation.buckets);
                Transition::default()
            }
            CorrectionEvent::DaysToReverseChanged(days) => {
                self.draft.days_to_reverse = days;
                Transition::errors(self.validator.apply_days_to_reverse(&mut self.draft))
            }
            CorrectionEvent::AdditionalSalaryDateChanged(date) => {
                self.draft.additional_salary_date = date;
                let today = self.clock.today();
                Transition::errors(self.validator.apply_additional_salary_date(&mut self.draft, today))
            }
            CorrectionEvent::DocumentFinalized => {
                self.draft.document_state = DocumentState::Finalized;
                Transition::default()
            }
        }
    }

    /// Apply the result of a fetch issued by `handle`
    pub fn apply_fetch(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> FetchApplication {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale fetch result (generation {} < {})",
                ticket.generation, self.generation
            );
            return FetchApplication::Stale;
        }

        match outcome {
            FetchOutcome::MissingKeys => {
                self.clear_for_incomplete_keys();
            }
            FetchOutcome::Records(records) => {
                let aggregation = self.aggregator.aggregate_for_keys(&ticket.keys, &records);
                self.publish(aggregation);
            }
            FetchOutcome::Aggregated(aggregation) => {
                let aggregation = self.aggregator.sanitize(aggregation);
                self.publish(aggregation);
            }
            FetchOutcome::Failed(reason) => {
                warn!("Salary slip fetch failed, offering no months: {}", reason);
                self.aggregation = Aggregation::empty();
                self.draft.available_months = self.aggregation.available_months.clone();
                self.reconcile_selection();
                self.last_fetch = FetchStatus::Failed(reason);
            }
        }

        FetchApplication::Applied
    }

    /// Handle an event and run any fetch it requires to completion
    pub async fn dispatch(&mut self, event: CorrectionEvent) -> Vec<ReversalValidationError> {
        let transition = self.handle(event);

        if let Some(ticket) = transition.fetch {
            let fetcher = Arc::clone(&self.fetcher);
            let outcome = fetcher.fetch(&ticket.keys).await;
            self.apply_fetch(ticket, outcome);
        }

        transition.errors
    }

    /// A slip selected under other keys never carries over to the new ones
    fn reload_after_key_change(&mut self, changed: bool) -> Transition {
        if changed {
            self.draft.clear_selection();
        }
        self.reload()
    }

    fn reload(&mut self) -> Transition {
        // Any fetch still outstanding is superseded from here on
        self.generation += 1;
        let keys = self.draft.selection_keys();

        if !keys.is_complete() {
            self.clear_for_incomplete_keys();
            return Transition::default();
        }

        self.last_fetch = FetchStatus::Pending {
            generation: self.generation,
        };
        Transition::fetch(FetchTicket {
            generation: self.generation,
            keys,
        })
    }

    fn clear_for_incomplete_keys(&mut self) {
        self.aggregation = Aggregation::empty();
        self.draft.available_months = self.aggregation.available_months.clone();
        self.draft.clear_selection();
        self.last_fetch = FetchStatus::Skipped;
    }

    fn publish(&mut self, aggregation: Aggregation) {
        let buckets = aggregation.buckets.len();
        info!(
            "Publishing {} month options ({} buckets)",
            aggregation.available_months.len().saturating_sub(1),
            buckets
        );

        self.draft.available_months = aggregation.available_months.clone();
        self.aggregation = aggregation;
        self.reconcile_selection();
        self.last_fetch = if buckets == 0 {
            FetchStatus::Empty
        } else {
            FetchStatus::Loaded { buckets }
        };
    }

    /// Re-project the selected slip from the new buckets, or drop it when gone
    fn reconcile_selection(&mut self) {
        let Some(reference) = self.draft.record_reference.clone() else {
            return;
        };

        match self.resolver.resolve_by_reference(&reference, &self.aggregation.buckets) {
            Some(bucket) => self.draft.project_bucket(bucket),
            None => {
                info!("Slip {} is no longer offered, clearing the selection", reference);
                self.draft.clear_selection();
            }
        }
    }
}
