//! # REST API for LWP Months
//!
//! Delegated aggregation: the caller sends its selection keys and gets back
//! the month options (sentinel first) and one detail per slip that carries
//! absence or LWP days.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::{error, info};

use crate::domain::month_aggregator::Aggregation;
use crate::domain::slip_fetcher::FetchOutcome;
use crate::io::rest::mappers::bucket_mapper::BucketMapper;
use crate::io::rest::mappers::pay_record_mapper::PayRecordMapper;
use crate::AppState;
use shared::LwpMonthsRequest;

/// Create a router for LWP month APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/payroll-correction/lwp-months", post(load_lwp_months))
}

/// Aggregate the finalized slips for the given keys into months
pub async fn load_lwp_months(
    State(state): State<AppState>,
    Json(request): Json<LwpMonthsRequest>,
) -> impl IntoResponse {
    info!("POST /api/payroll-correction/lwp-months - request: {:?}", request);

    let keys = PayRecordMapper::keys_from_months_request(request);
    let aggregation = match state.month_source.fetch(&keys).await {
        FetchOutcome::MissingKeys => Aggregation::empty(),
        FetchOutcome::Records(records) => state.month_aggregator.aggregate(&records),
        FetchOutcome::Aggregated(aggregation) => state.month_aggregator.sanitize(aggregation),
        FetchOutcome::Failed(e) => {
            error!("Failed to load LWP months: {}", e);
            let status = if state.delegated_aggregation {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            return (status, "Error loading LWP months").into_response();
        }
    };

    info!(
        "Returning {} month options and {} slip details",
        aggregation.available_months.len(),
        aggregation.buckets.len()
    );
    (StatusCode::OK, Json(BucketMapper::to_response(&aggregation))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{create_test_state, read_json};
    use crate::storage::csv::test_utils::TestEnvironment;
    use shared::LwpMonthsResponse;

    fn request(company: Option<&str>) -> LwpMonthsRequest {
        LwpMonthsRequest {
            employee: Some("EMP-001".to_string()),
            payroll_period: Some("FY-2025".to_string()),
            company: company.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_months_and_details_for_finalized_slips() {
        let env = TestEnvironment::new().unwrap();
        let state = create_test_state(&env);
        env.write_salary_slips(&[
            "SS-1,EMP-001,Acme,FY-2025,1,2,0,2025-01-15,22",
            "SS-2,EMP-001,Acme,FY-2025,1,0,0,2025-02-15,20",
            "SS-3,EMP-001,Acme,FY-2025,1,1,3,2025-03-05,21",
            "SS-4,EMP-001,Acme,FY-2025,0,5,5,2025-04-05,21",
        ])
        .unwrap();

        let response = load_lwp_months(State(state), Json(request(Some("Acme"))))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body: LwpMonthsResponse = read_json(response).await;
        assert_eq!(body.months, vec!["", "January", "March"]);
        assert_eq!(body.slip_details.len(), 2);

        let march = &body.slip_details[1];
        assert_eq!(march.month_name, "March");
        assert_eq!(march.salary_slip_reference, "SS-3");
        assert_eq!(march.total_lwp_applied, 4);
        assert_eq!(march.working_days, 21);
    }

    #[tokio::test]
    async fn test_incomplete_keys_yield_sentinel_only() {
        let env = TestEnvironment::new().unwrap();
        let state = create_test_state(&env);
        env.write_salary_slips(&["SS-1,EMP-001,Acme,FY-2025,1,2,0,2025-01-15,22"]).unwrap();

        let response = load_lwp_months(State(state), Json(request(None))).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body: LwpMonthsResponse = read_json(response).await;
        assert_eq!(body.months, vec![""]);
        assert!(body.slip_details.is_empty());
    }
}
