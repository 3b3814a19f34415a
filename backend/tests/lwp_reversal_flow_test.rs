//! End-to-end tests over a CSV data directory: the editing session against
//! local storage, the HTTP router, and the remote aggregation client talking
//! to a locally served router.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::NaiveDate;
use tempfile::TempDir;
use tower::ServiceExt;

use lwp_reversal_backend::domain::{
    CorrectionController, CorrectionEvent, FetchApplication, FetchStatus, FixedClock, MonthAggregator, SlipFetcher,
    StoredSlipFetcher,
};
use lwp_reversal_backend::io::HttpSlipFetcher;
use lwp_reversal_backend::storage::csv::{CsvConnection, PayRecordRepository};
use lwp_reversal_backend::{create_router, initialize_backend, AppConfig};
use shared::{LwpMonthsResponse, ReversalErrorKind, SalarySlipListResponse, ValidateSubmissionResponse};

const SALARY_SLIPS: &str = "\
name,employee,company,payroll_period,docstatus,absent_days,leave_without_pay,posting_date,total_working_days
SS-1,EMP-001,Acme,FY-2025,1,2,1,2025-01-15,22
SS-2,EMP-001,Acme,FY-2025,1,0,0,2025-02-10,20
SS-3,EMP-001,Acme,FY-2025,1,0,3,2025-03-05,21
SS-9,EMP-001,Acme,FY-2025,0,4,4,2025-04-05,21
";

const PAYROLL_CORRECTIONS: &str = "\
name,employee,payroll_period,salary_slip_reference,days_to_reverse,docstatus
PC-1,EMP-001,FY-2025,SS-3,2,1
PC-2,EMP-001,FY-2025,SS-3,1,2
";

fn data_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("salary_slips.csv"), SALARY_SLIPS).unwrap();
    fs::write(temp_dir.path().join("payroll_corrections.csv"), PAYROLL_CORRECTIONS).unwrap();
    temp_dir
}

fn config_for(temp_dir: &TempDir) -> AppConfig {
    AppConfig {
        data_directory: temp_dir.path().to_path_buf(),
        ..AppConfig::default()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn controller_over(fetcher: Arc<dyn SlipFetcher>) -> CorrectionController {
    CorrectionController::new(fetcher, MonthAggregator::new(), Arc::new(FixedClock(today())))
}

async fn select_keys(controller: &mut CorrectionController) {
    controller.dispatch(CorrectionEvent::EmployeeChanged(Some("EMP-001".to_string()))).await;
    controller.dispatch(CorrectionEvent::PayrollPeriodChanged(Some("FY-2025".to_string()))).await;
    controller.dispatch(CorrectionEvent::CompanyChanged(Some("Acme".to_string()))).await;
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_correction_session_over_csv_storage() {
    let temp_dir = data_directory();
    let connection = CsvConnection::new(temp_dir.path()).unwrap();
    let fetcher = StoredSlipFetcher::new(PayRecordRepository::new(connection));
    let mut controller = controller_over(Arc::new(fetcher));

    select_keys(&mut controller).await;
    assert_eq!(controller.draft().available_months, vec!["", "January", "March"]);
    assert_eq!(controller.last_fetch(), &FetchStatus::Loaded { buckets: 2 });

    controller.dispatch(CorrectionEvent::MonthSelected(Some("March".to_string()))).await;
    assert_eq!(controller.draft().record_reference.as_deref(), Some("SS-3"));
    assert_eq!(controller.draft().total_days_applied, Some(3));
    assert_eq!(controller.draft().working_days, Some(21));

    let errors = controller.dispatch(CorrectionEvent::DaysToReverseChanged(Some(3))).await;
    assert!(errors.is_empty());

    let errors = controller.dispatch(CorrectionEvent::DaysToReverseChanged(Some(4))).await;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ReversalErrorKind::ExceedsAvailableDays);
    assert!(controller.draft().days_to_reverse.is_none());

    let errors = controller
        .dispatch(CorrectionEvent::AdditionalSalaryDateChanged(today().pred_opt()))
        .await;
    assert_eq!(errors[0].kind(), ReversalErrorKind::InvalidDate);
    assert!(controller.draft().additional_salary_date.is_none());
}

#[tokio::test]
async fn test_stale_fetch_result_is_discarded() {
    let temp_dir = data_directory();
    let connection = CsvConnection::new(temp_dir.path()).unwrap();
    let fetcher = Arc::new(StoredSlipFetcher::new(PayRecordRepository::new(connection)));
    let mut controller = controller_over(fetcher.clone());
    select_keys(&mut controller).await;

    // Two reloads in flight; the first answer arrives last
    let first = controller.handle(CorrectionEvent::Refresh).fetch.unwrap();
    let second = controller
        .handle(CorrectionEvent::EmployeeChanged(Some("EMP-404".to_string())))
        .fetch
        .unwrap();

    let second_outcome = fetcher.fetch(&second.keys).await;
    assert_eq!(controller.apply_fetch(second, second_outcome), FetchApplication::Applied);
    assert_eq!(controller.draft().available_months, vec![""]);
    assert_eq!(controller.last_fetch(), &FetchStatus::Empty);

    let first_outcome = fetcher.fetch(&first.keys).await;
    assert_eq!(controller.apply_fetch(first, first_outcome), FetchApplication::Stale);
    assert_eq!(controller.draft().available_months, vec![""]);
}

#[tokio::test]
async fn test_router_serves_slips_months_and_checks() {
    let temp_dir = data_directory();
    let config = config_for(&temp_dir);
    let state = initialize_backend(&config).await.unwrap();
    let app = create_router(state, &config.allowed_origin).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/salary-slips?employee=EMP-001&payroll_period=FY-2025&company=Acme")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let slips: SalarySlipListResponse = read_json(response).await;
    let names: Vec<&str> = slips.slips.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["SS-1", "SS-2", "SS-3"]);

    let response = app
        .clone()
        .oneshot(json_request(
            "/api/payroll-correction/lwp-months",
            serde_json::json!({"employee": "EMP-001", "payroll_period": "FY-2025", "company": "Acme"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let months: LwpMonthsResponse = read_json(response).await;
    assert_eq!(months.months, vec!["", "January", "March"]);
    assert_eq!(months.slip_details[0].total_lwp_applied, 3);

    // PC-2 is cancelled, so only PC-1's two days count
    let response = app
        .oneshot(json_request(
            "/api/payroll-correction/validate-submission",
            serde_json::json!({
                "employee": "EMP-001",
                "payroll_period": "FY-2025",
                "salary_slip_reference": "SS-3",
                "days_to_reverse": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let review: ValidateSubmissionResponse = read_json(response).await;
    assert!(review.accepted);
    assert_eq!(review.already_reversed, 2);
    assert_eq!(review.total_lwp_applied, Some(3));
}

#[tokio::test]
async fn test_remote_aggregation_against_served_router() {
    let temp_dir = data_directory();
    let config = config_for(&temp_dir);
    let state = initialize_backend(&config).await.unwrap();
    let app = create_router(state, &config.allowed_origin).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let fetcher = HttpSlipFetcher::new(&format!("http://{}", address), Duration::from_secs(5)).unwrap();
    let mut controller = controller_over(Arc::new(fetcher));

    select_keys(&mut controller).await;
    assert_eq!(controller.draft().available_months, vec!["", "January", "March"]);

    controller.dispatch(CorrectionEvent::MonthSelected(Some("January".to_string()))).await;
    assert_eq!(controller.draft().record_reference.as_deref(), Some("SS-1"));
    assert_eq!(controller.draft().absent_days, Some(2));
    assert_eq!(controller.draft().lwp_days, Some(1));
    assert_eq!(controller.draft().total_days_applied, Some(3));
}

#[tokio::test]
async fn test_unreachable_remote_reports_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpSlipFetcher::new(&format!("http://{}", address), Duration::from_secs(2)).unwrap();
    let mut controller = controller_over(Arc::new(fetcher));

    select_keys(&mut controller).await;

    assert!(matches!(controller.last_fetch(), FetchStatus::Failed(_)));
    assert_eq!(controller.draft().available_months, vec![""]);
}
