//! # LWP Reversal Backend
//!
//! Reconciles leave-without-pay (LWP) reversals on payroll corrections: it
//! finds the finalized salary slips of an employee that carry absence or LWP
//! days, groups them by posting month, projects the chosen month into a
//! correction draft and checks the days the correction may reverse.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, remote aggregation client)
//!     ↓
//! Domain Layer (aggregation, selection, validation, editing session)
//!     ↓
//! Storage Layer (CSV files under the data directory)
//! ```
//!
//! [`initialize_backend`] wires the layers together from an [`AppConfig`]
//! and [`create_router`] exposes them over HTTP.

pub mod config;
pub mod domain;
pub mod storage;
pub mod io;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

pub use config::AppConfig;

use crate::domain::{
    Clock, MonthAggregator, ReversalLedgerService, ReversalValidator, SlipFetcher, StoredSlipFetcher, SystemClock,
};
use crate::io::HttpSlipFetcher;
use crate::storage::csv::{CorrectionRepository, CsvConnection, PayRecordRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    /// Generic record query over local storage
    pub slip_fetcher: StoredSlipFetcher<PayRecordRepository>,
    /// Source for month aggregation: local storage or a remote service
    pub month_source: Arc<dyn SlipFetcher>,
    /// True when `month_source` is a remote service
    pub delegated_aggregation: bool,
    pub month_aggregator: MonthAggregator,
    pub reversal_validator: ReversalValidator,
    pub reversal_ledger_service: ReversalLedgerService<PayRecordRepository, CorrectionRepository>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Build every service on top of an existing data directory
    pub fn from_connection(connection: CsvConnection, config: &AppConfig) -> Result<Self> {
        connection.ensure_salary_slips_file_exists()?;
        connection.ensure_payroll_corrections_file_exists()?;

        let pay_records = PayRecordRepository::new(connection.clone());
        let corrections = CorrectionRepository::new(connection);
        let slip_fetcher = StoredSlipFetcher::new(pay_records.clone());

        let month_source: Arc<dyn SlipFetcher> = match &config.remote_url {
            Some(url) => {
                info!("Delegating LWP month aggregation to {}", url);
                Arc::new(HttpSlipFetcher::new(url, config.remote_timeout())?)
            }
            None => Arc::new(slip_fetcher.clone()),
        };

        Ok(Self {
            slip_fetcher,
            month_source,
            delegated_aggregation: config.remote_url.is_some(),
            month_aggregator: MonthAggregator::with_ordering(config.month_ordering),
            reversal_validator: ReversalValidator::new(),
            reversal_ledger_service: ReversalLedgerService::new(pay_records, corrections),
            clock: Arc::new(SystemClock),
        })
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up data directory {}", config.data_directory.display());
    let connection = CsvConnection::new(&config.data_directory)?;

    info!("Setting up domain services");
    AppState::from_connection(connection, config)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: &str) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(io::rest::slip_apis::router())
        .merge(io::rest::lwp_apis::router())
        .merge(io::rest::validation_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
