//! # REST API Interface Layer
//!
//! - `GET  /api/salary-slips` - finalized slips for employee, payroll period and company
//! - `POST /api/payroll-correction/lwp-months` - month options and slip details
//! - `POST /api/payroll-correction/validate-days` - days-to-reverse rule
//! - `POST /api/payroll-correction/validate-additional-salary-date` - date rule
//! - `POST /api/payroll-correction/validate-submission` - check against earlier reversals
//!
//! A broken field rule still answers 200, with `accepted: false` and a
//! user-facing error. Malformed bodies are rejected by the extractors; 5xx
//! means storage or the upstream aggregation failed.

pub mod slip_apis;
pub mod lwp_apis;
pub mod validation_apis;
pub mod mappers;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::config::AppConfig;
    use crate::domain::FixedClock;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::AppState;

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    /// App state over the environment's data directory with the clock pinned to [`today`]
    pub fn create_test_state(env: &TestEnvironment) -> AppState {
        let config = AppConfig {
            data_directory: env.base_path.clone(),
            ..AppConfig::default()
        };
        let mut state = AppState::from_connection(env.connection.clone(), &config).unwrap();
        state.clock = Arc::new(FixedClock(today()));
        state
    }

    pub async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
