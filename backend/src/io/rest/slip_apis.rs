//! # REST API for Salary Slips
//!
//! Generic record query: finalized salary slips for one employee, payroll
//! period and company. Callers aggregate the result into months themselves.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use crate::domain::slip_fetcher::{FetchOutcome, SlipFetcher};
use crate::io::rest::mappers::pay_record_mapper::PayRecordMapper;
use crate::AppState;
use shared::{SalarySlipListRequest, SalarySlipListResponse};

/// Create a router for salary slip APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/salary-slips", get(list_salary_slips))
}

/// List finalized salary slips; an incomplete key set yields an empty list
pub async fn list_salary_slips(
    State(state): State<AppState>,
    Query(request): Query<SalarySlipListRequest>,
) -> impl IntoResponse {
    info!("GET /api/salary-slips - request: {:?}", request);

    let keys = PayRecordMapper::keys_from_list_request(request);
    match state.slip_fetcher.fetch(&keys).await {
        FetchOutcome::Records(records) => {
            let response = SalarySlipListResponse {
                slips: records.iter().map(PayRecordMapper::to_summary).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        FetchOutcome::MissingKeys => {
            (StatusCode::OK, Json(SalarySlipListResponse { slips: Vec::new() })).into_response()
        }
        FetchOutcome::Aggregated(_) => {
            error!("Salary slip query returned an aggregation instead of records");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving salary slips").into_response()
        }
        FetchOutcome::Failed(e) => {
            error!("Failed to list salary slips: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving salary slips").into_response()
        }
    }
}
