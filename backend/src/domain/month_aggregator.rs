//! Month aggregation for LWP reversal.
//!
//! Turns the finalized salary slips of one employee into the month options
//! offered for reversal, plus one bucket per slip that recorded absence or
//! leave-without-pay days. Slips without such days never produce a bucket.
//!
//! Buckets are not merged across slips sharing a month. They are emitted in
//! posting-date order so that resolving a month always picks its earliest slip.

use std::collections::{BTreeSet, HashSet};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::models::correction_draft::SelectionKeys;
use super::models::month_bucket::MonthBucket;
use super::models::pay_record::PayRecord;

/// How month labels are ordered in the option list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonthOrdering {
    /// Sort labels as strings ("April" before "January")
    #[default]
    Lexicographic,
    /// Order labels by the earliest posting date carrying them
    Chronological,
}

impl std::str::FromStr for MonthOrdering {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lexicographic" => Ok(MonthOrdering::Lexicographic),
            "chronological" => Ok(MonthOrdering::Chronological),
            other => Err(anyhow::anyhow!("Unknown month ordering: {}", other)),
        }
    }
}

/// Month options and buckets produced by one aggregation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Distinct month labels, preceded by the empty sentinel
    pub available_months: Vec<String>,
    pub buckets: Vec<MonthBucket>,
}

impl Aggregation {
    /// Only the empty sentinel and no buckets
    pub fn empty() -> Self {
        Self {
            available_months: vec![String::new()],
            buckets: Vec::new(),
        }
    }

    /// Month labels without the sentinel
    pub fn month_labels(&self) -> &[String] {
        self.available_months.get(1..).unwrap_or(&[])
    }
}

impl Default for Aggregation {
    fn default() -> Self {
        Self::empty()
    }
}

/// Service that buckets salary slips by posting month
#[derive(Debug, Clone, Default)]
pub struct MonthAggregator {
    ordering: MonthOrdering,
}

impl MonthAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ordering(ordering: MonthOrdering) -> Self {
        Self { ordering }
    }

    /// Aggregate fetched slips into month options and buckets
    pub fn aggregate(&self, records: &[PayRecord]) -> Aggregation {
        let mut buckets: Vec<MonthBucket> = records
            .iter()
            .filter_map(MonthBucket::from_record)
            .collect();

        buckets.sort_by(|a, b| {
            a.posting_date
                .cmp(&b.posting_date)
                .then_with(|| a.record_reference.cmp(&b.record_reference))
        });

        let available_months = self.month_options(&buckets);

        info!(
            "Aggregated {} slips into {} buckets across {} months",
            records.len(),
            buckets.len(),
            available_months.len() - 1
        );

        Aggregation {
            available_months,
            buckets,
        }
    }

    /// Aggregate only when all selection keys are present
    pub fn aggregate_for_keys(&self, keys: &SelectionKeys, records: &[PayRecord]) -> Aggregation {
        if !keys.is_complete() {
            debug!("Selection keys incomplete, skipping aggregation");
            return Aggregation::empty();
        }
        self.aggregate(records)
    }

    /// Repair an aggregation computed elsewhere so it satisfies the bucket invariants.
    ///
    /// Inconsistent buckets are dropped, month labels are deduplicated and
    /// restricted to labels that still have a bucket, and the sentinel is
    /// put back in front.
    pub fn sanitize(&self, aggregation: Aggregation) -> Aggregation {
        let Aggregation {
            available_months,
            buckets,
        } = aggregation;

        let buckets: Vec<MonthBucket> = buckets
            .into_iter()
            .filter(|bucket| {
                let consistent = bucket.is_consistent();
                if !consistent {
                    warn!(
                        "Dropping inconsistent bucket for slip {} ({} + {} != {})",
                        bucket.record_reference,
                        bucket.absent_days,
                        bucket.lwp_days,
                        bucket.total_days_applied
                    );
                }
                consistent
            })
            .collect();

        let backed: HashSet<&str> = buckets.iter().map(|b| b.month_label.as_str()).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut months = vec![String::new()];

        for label in available_months {
            if label.is_empty() || !backed.contains(label.as_str()) {
                continue;
            }
            if seen.insert(label.clone()) {
                months.push(label);
            }
        }

        // Labels the remote side forgot to list
        for bucket in &buckets {
            if seen.insert(bucket.month_label.clone()) {
                months.push(bucket.month_label.clone());
            }
        }

        Aggregation {
            available_months: months,
            buckets,
        }
    }

    fn month_options(&self, buckets: &[MonthBucket]) -> Vec<String> {
        let labels: Vec<String> = match self.ordering {
            MonthOrdering::Lexicographic => buckets
                .iter()
                .map(|b| b.month_label.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            MonthOrdering::Chronological => {
                // Buckets are already in posting-date order
                let mut seen = HashSet::new();
                buckets
                    .iter()
                    .filter(|b| seen.insert(b.month_label.clone()))
                    .map(|b| b.month_label.clone())
                    .collect()
            }
        };

        std::iter::once(String::new()).chain(labels).collect()
    }
}
