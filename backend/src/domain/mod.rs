//! # Domain Module
//!
//! Business logic for reconciling leave-without-pay reversals on payroll
//! corrections. Nothing here knows about HTTP or file formats.
//!
//! ## Module Organization
//!
//! - **models**: salary slips, month buckets, the correction draft
//! - **slip_fetcher**: loading finalized slips for the draft's selection keys
//! - **month_aggregator**: bucketing slips with absence/LWP days by posting month
//! - **selection_resolver**: projecting the chosen month's bucket into the draft
//! - **reversal_validator**: the additional-salary-date and days-to-reverse rules
//! - **reversal_ledger_service**: checking a draft against earlier reversals
//! - **correction_controller**: the editing session as explicit events
//!
//! ## Business Rules
//!
//! - Only submitted (finalized) slips are candidates for reversal
//! - A slip without absence or LWP days never produces a bucket
//! - Days to reverse must be positive and within the selected slip's total
//! - The additional salary date cannot be in the past
//! - Cumulative reversals on one slip never exceed the days it applied

pub mod models;
pub mod slip_fetcher;
pub mod month_aggregator;
pub mod selection_resolver;
pub mod reversal_validator;
pub mod reversal_ledger_service;
pub mod correction_controller;

pub use slip_fetcher::*;
pub use month_aggregator::*;
pub use selection_resolver::*;
pub use reversal_validator::*;
pub use reversal_ledger_service::*;
pub use correction_controller::*;
