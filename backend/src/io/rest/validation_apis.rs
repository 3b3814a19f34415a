//! # REST API for Correction Validation
//!
//! Field rules for a correction being edited, plus the check a correction
//! must pass before it is submitted. Rule violations are not HTTP errors:
//! they answer 200 with `accepted: false` and a message meant for the user.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use chrono::NaiveDate;
use log::{error, info};

use crate::domain::models::correction_draft::CorrectionDraft;
use crate::io::rest::mappers::error_mapper::ErrorMapper;
use crate::AppState;
use shared::{
    FieldValidationResponse, ValidateAdditionalSalaryDateRequest, ValidateDaysToReverseRequest,
    ValidateSubmissionRequest, ValidateSubmissionResponse,
};

/// Create a router for validation APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payroll-correction/validate-days", post(validate_days_to_reverse))
        .route(
            "/payroll-correction/validate-additional-salary-date",
            post(validate_additional_salary_date),
        )
        .route("/payroll-correction/validate-submission", post(validate_submission))
}

/// Check days to reverse against the days applied on the selected slip
pub async fn validate_days_to_reverse(
    State(state): State<AppState>,
    Json(request): Json<ValidateDaysToReverseRequest>,
) -> impl IntoResponse {
    info!("POST /api/payroll-correction/validate-days - request: {:?}", request);

    let Some(requested) = request.days_to_reverse else {
        return (StatusCode::OK, Json(accepted::<i64>(None))).into_response();
    };

    let available = request.total_lwp_applied.unwrap_or(0);
    let response = match state.reversal_validator.validate_days_to_reverse(requested, available) {
        Ok(()) => accepted(Some(requested)),
        Err(e) => {
            info!("Days to reverse rejected: {}", e);
            FieldValidationResponse {
                accepted: false,
                value: None,
                error: Some(ErrorMapper::to_dto(&e)),
            }
        }
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Check that the additional salary date is not before today
pub async fn validate_additional_salary_date(
    State(state): State<AppState>,
    Json(request): Json<ValidateAdditionalSalaryDateRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/payroll-correction/validate-additional-salary-date - request: {:?}",
        request
    );

    let Some(date) = request.additional_salary_date else {
        return (StatusCode::OK, Json(accepted::<NaiveDate>(None))).into_response();
    };

    let today = state.clock.today();
    let response = match state.reversal_validator.validate_additional_salary_date(date, today) {
        Ok(()) => accepted(Some(date)),
        Err(e) => {
            info!("Additional salary date rejected: {}", e);
            FieldValidationResponse {
                accepted: false,
                value: None,
                error: Some(ErrorMapper::to_dto(&e)),
            }
        }
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Check a correction against the stored slip and earlier submitted reversals
pub async fn validate_submission(
    State(state): State<AppState>,
    Json(request): Json<ValidateSubmissionRequest>,
) -> impl IntoResponse {
    info!("POST /api/payroll-correction/validate-submission - request: {:?}", request);

    let mut draft = CorrectionDraft::new();
    draft.employee = Some(request.employee);
    draft.payroll_period = Some(request.payroll_period);
    draft.record_reference = request.salary_slip_reference;
    draft.days_to_reverse = request.days_to_reverse;

    match state.reversal_ledger_service.review_submission(&mut draft).await {
        Ok(review) => {
            let response = ValidateSubmissionResponse {
                accepted: review.is_accepted(),
                working_days: draft.working_days,
                absent_days: draft.absent_days,
                lwp_days: draft.lwp_days,
                total_lwp_applied: draft.total_days_applied,
                already_reversed: review.already_reversed,
                error: review.error.as_ref().map(ErrorMapper::to_dto),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to validate correction submission: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error validating correction").into_response()
        }
    }
}

fn accepted<T>(value: Option<T>) -> FieldValidationResponse<T> {
    FieldValidationResponse {
        accepted: true,
        value,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{create_test_state, read_json, today};
    use crate::storage::csv::test_utils::TestEnvironment;
    use shared::ReversalErrorKind;

    #[tokio::test]
    async fn test_days_within_total_accepted() {
        let env = TestEnvironment::new().unwrap();
        let state = create_test_state(&env);
        let request = ValidateDaysToReverseRequest {
            days_to_reverse: Some(3),
            total_lwp_applied: Some(4),
        };

        let response = validate_days_to_reverse(State(state), Json(request)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body: FieldValidationResponse<i64> = read_json(response).await;
        assert!(body.accepted);
        assert_eq!(body.value, Some(3));
        assert!(body.error.is_none());
    }

    #[tokio::test]
    async fn test_days_above_total_rejected_with_message() {
        let env = TestEnvironment::new().unwrap();
        let state = create_test_state(&env);
        let request = ValidateDaysToReverseRequest {
            days_to_reverse: Some(5),
            total_lwp_applied: Some(4),
        };

        let response = validate_days_to_reverse(State(state), Json(request)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body: FieldValidationResponse<i64> = read_json(response).await;
        assert!(!body.accepted);
        assert!(body.value.is_none());
        let error = body.error.unwrap();
        assert_eq!(error.kind, ReversalErrorKind::ExceedsAvailableDays);
        assert_eq!(error.field, "days_to_reverse");
    }

    #[tokio::test]
    async fn test_zero_days_rejected_without_selected_slip() {
        let env = TestEnvironment::new().unwrap();
        let state = create_test_state(&env);
        let request = ValidateDaysToReverseRequest {
            days_to_reverse: Some(0),
            total_lwp_applied: None,
        };

        let response = validate_days_to_reverse(State(state), Json(request)).await.into_response();

        let body: FieldValidationResponse<i64> = read_json(response).await;
        assert_eq!(body.error.unwrap().kind, ReversalErrorKind::NonPositiveDays);
    }

    #[tokio::test]
    async fn test_past_date_rejected_today_accepted() {
        let env = TestEnvironment::new().unwrap();
        let state = create_test_state(&env);

        let past = ValidateAdditionalSalaryDateRequest {
            additional_salary_date: today().pred_opt(),
        };
        let response = validate_additional_salary_date(State(state.clone()), Json(past))
            .await
            .into_response();
        let body: FieldValidationResponse<NaiveDate> = read_json(response).await;
        assert!(!body.accepted);
        assert_eq!(body.error.unwrap().kind, ReversalErrorKind::InvalidDate);

        let current = ValidateAdditionalSalaryDateRequest {
            additional_salary_date: Some(today()),
        };
        let response = validate_additional_salary_date(State(state), Json(current))
            .await
            .into_response();
        let body: FieldValidationResponse<NaiveDate> = read_json(response).await;
        assert!(body.accepted);
        assert_eq!(body.value, Some(today()));
    }

    #[tokio::test]
    async fn test_submission_counts_earlier_reversals() {
        let env = TestEnvironment::new().unwrap();
        let state = create_test_state(&env);
        env.write_salary_slips(&["SS-3,EMP-001,Acme,FY-2025,1,1,3,2025-03-05,21"]).unwrap();
        env.write_payroll_corrections(&["PC-1,EMP-001,FY-2025,SS-3,3,1"]).unwrap();

        let request = ValidateSubmissionRequest {
            employee: "EMP-001".to_string(),
            payroll_period: "FY-2025".to_string(),
            salary_slip_reference: Some("SS-3".to_string()),
            days_to_reverse: Some(2),
        };
        let response = validate_submission(State(state), Json(request)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ValidateSubmissionResponse = read_json(response).await;
        assert!(!body.accepted);
        assert_eq!(body.already_reversed, 3);
        assert_eq!(body.total_lwp_applied, Some(4));
        assert_eq!(body.working_days, Some(21));
        assert_eq!(body.error.unwrap().kind, ReversalErrorKind::CumulativeReversalExceeded);
    }
}
