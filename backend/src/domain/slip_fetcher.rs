//! Retrieval of finalized salary slips for a correction draft.
//!
//! A fetcher either returns raw slips (generic record query, aggregated by
//! the caller) or an aggregation already computed by a remote service.
//! Failures never propagate as errors; they are reported as
//! [`FetchOutcome::Failed`] so callers can tell them apart from an empty result.

use async_trait::async_trait;
use log::{error, info};

use super::models::correction_draft::SelectionKeys;
use super::models::pay_record::{PayRecord, PayRecordFilter};
use super::month_aggregator::Aggregation;
use crate::storage::PayRecordStorage;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// One of employee, payroll period or company was missing; nothing was queried
    MissingKeys,
    /// Finalized slips matching the keys, possibly none
    Records(Vec<PayRecord>),
    /// Month options and buckets aggregated by the remote side
    Aggregated(Aggregation),
    /// The source could not be reached or answered with an error
    Failed(String),
}

impl FetchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

#[async_trait]
pub trait SlipFetcher: Send + Sync {
    async fn fetch(&self, keys: &SelectionKeys) -> FetchOutcome;
}

/// Generic record query against a storage backend
#[derive(Clone)]
pub struct StoredSlipFetcher<S: PayRecordStorage> {
    storage: S,
}

impl<S: PayRecordStorage> StoredSlipFetcher<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: PayRecordStorage> SlipFetcher for StoredSlipFetcher<S> {
    async fn fetch(&self, keys: &SelectionKeys) -> FetchOutcome {
        let Some((employee, payroll_period, company)) = keys.complete() else {
            return FetchOutcome::MissingKeys;
        };

        let filter = PayRecordFilter::finalized(employee, payroll_period, company);
        match self.storage.list_pay_records(&filter).await {
            Ok(records) => {
                info!(
                    "Fetched {} finalized slips for {} / {} / {}",
                    records.len(),
                    employee,
                    payroll_period,
                    company
                );
                FetchOutcome::Records(records)
            }
            Err(e) => {
                error!("Failed to fetch salary slips for {}: {}", employee, e);
                FetchOutcome::Failed(e.to_string())
            }
        }
    }
}
