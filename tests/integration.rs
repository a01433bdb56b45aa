//! Integration tests for the HR administration API.
//!
//! Every test drives one router over a fresh in-memory database:
//! - Employee, contract, transfer and leave lifecycles
//! - Cached current contract and project fields
//! - Leave accrual and deduction
//! - Contract list filters and form defaults
//! - File information sheet rendering
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use hr_admin::api::{AppState, create_router};
use hr_admin::config::AdminConfig;
use hr_admin::report::ReportRenderer;
use hr_admin::service::HrService;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let state = AppState::new(
        HrService::in_memory(AdminConfig::default()).unwrap(),
        ReportRenderer::new().unwrap(),
    );
    create_router(state)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(router: &Router, uri: &str) -> Value {
    let (status, body) = send(router, "GET", uri, None).await;
    assert_eq!(status, StatusCode::OK, "GET {} failed: {}", uri, body);
    body
}

async fn post(router: &Router, uri: &str, body: Value) -> Value {
    let (status, body) = send(router, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} failed: {}", uri, body);
    body
}

/// Seeds one row in every reference table, plus a second job and project.
async fn seed_references(router: &Router) {
    for (kind, label) in [
        ("countries", "Philippines"),
        ("insurance-classes", "Class A"),
        ("education-levels", "Bachelor"),
        ("degrees", "Civil Engineering"),
        ("projects", "Riyadh Metro"),
        ("projects", "Jeddah Tower"),
        ("jobs", "Site Engineer"),
        ("jobs", "Foreman"),
    ] {
        post(router, &format!("/reference/{}", kind), json!({ "label": label })).await;
    }
}

fn employee_body(number: i64, name: &str) -> Value {
    json!({
        "employee_number": number,
        "full_name": name,
        "country_id": 1,
        "email": format!("{}@example.com", number),
        "mobile_number": "+966500000000",
        "iqama_number": "2345678901",
        "iqama_expiration_hijri": "1448-03-01",
        "iqama_expiration_gregorian": "2026-08-14",
        "passport_number": "P1234567",
        "passport_expiration": "2030-01-01",
        "company_start_date": "2020-01-05",
        "birthdate": "1990-06-15",
        "insurance_class_id": 1,
        "education_level_id": 1,
        "degree_id": 1,
        "iban_number": "SA0380000000608010167519"
    })
}

fn contract_body(number: i64, job: i64, start: &str, end: &str) -> Value {
    json!({
        "employee_number": number,
        "employee_job_id": job,
        "start_date": start,
        "end_date": end,
        "basic_salary": "1500.00",
        "housing_allowance": "375.00",
        "transportation_allowance": "150.00",
        "food_allowance": "300.00",
        "remarks": "Initial contract"
    })
}

async fn setup_employee(router: &Router, number: i64, name: &str) {
    post(router, "/employees", employee_body(number, name)).await;
}

// =============================================================================
// Employees
// =============================================================================

#[tokio::test]
async fn test_employee_crud() {
    let router = create_router_for_test();
    seed_references(&router).await;

    let created = post(&router, "/employees", employee_body(1042, "Ahmed Al-Harbi")).await;
    assert_eq!(created["record"]["employee_number"], 1042);
    assert_eq!(created["record"]["leave_balance"], 0);
    assert!(created["record"]["employee_job_id"].is_null());

    let mut body = employee_body(1042, "Ahmed Al Harbi");
    body["email"] = json!("ahmed@example.com");
    let (status, updated) = send(&router, "PUT", "/employees/1042", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["record"]["full_name"], "Ahmed Al Harbi");

    let fetched = get(&router, "/employees/1042").await;
    assert_eq!(fetched["email"], "ahmed@example.com");

    let (status, _) = send(&router, "DELETE", "/employees/1042", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, "GET", "/employees/1042", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_search_matches_name_and_number() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1042, "Ahmed Al-Harbi").await;
    setup_employee(&router, 2001, "Jose Rizal").await;

    let by_name = get(&router, "/employees?search=rizal").await;
    assert_eq!(by_name.as_array().unwrap().len(), 1);
    assert_eq!(by_name[0]["employee_number"], 2001);

    let by_number = get(&router, "/employees?search=104").await;
    assert_eq!(by_number.as_array().unwrap().len(), 1);
    assert_eq!(by_number[0]["full_name"], "Ahmed Al-Harbi");

    let everyone = get(&router, "/employees").await;
    assert_eq!(everyone.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_employee_search_treats_wildcards_literally() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1042, "Ahmed Al-Harbi").await;
    setup_employee(&router, 2001, "Jose_Rizal").await;

    let percent = get(&router, "/employees?search=%25").await;
    assert!(percent.as_array().unwrap().is_empty());

    let underscore = get(&router, "/employees?search=_").await;
    assert_eq!(underscore.as_array().unwrap().len(), 1);
    assert_eq!(underscore[0]["employee_number"], 2001);
}

#[tokio::test]
async fn test_duplicate_employee_number_returns_409() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;

    let (status, error) = send(&router, "POST", "/employees", Some(employee_body(1, "Omar"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "CONSTRAINT_VIOLATION");
}

#[tokio::test]
async fn test_missing_required_fields_are_listed() {
    let router = create_router_for_test();

    let (status, error) = send(
        &router,
        "POST",
        "/employees",
        Some(json!({ "employee_number": 1, "email": "not-an-email" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = error["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"full_name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"iban_number"));
}

#[tokio::test]
async fn test_deleting_employee_removes_owned_rows() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;
    post(&router, "/contracts", contract_body(1, 1, "2024-01-01", "2024-12-31")).await;

    send(&router, "DELETE", "/employees/1", None).await;

    let contracts = get(&router, "/contracts?include_deleted=true").await;
    assert!(contracts.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_renumbering_employee_carries_contracts() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;
    post(&router, "/contracts", contract_body(1, 1, "2024-01-01", "2024-12-31")).await;

    let (status, _) = send(&router, "PUT", "/employees/1", Some(employee_body(5, "Ahmed"))).await;
    assert_eq!(status, StatusCode::OK);

    let contracts = get(&router, "/contracts?employee_number=5").await;
    assert_eq!(contracts.as_array().unwrap().len(), 1);
    assert_eq!(contracts[0]["employee_label"], "5 - Ahmed");
}

// =============================================================================
// Contracts and cached current fields
// =============================================================================

#[tokio::test]
async fn test_contract_lifecycle_keeps_current_fields_in_sync() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;

    let first = post(&router, "/contracts", contract_body(1, 1, "2020-01-01", "2021-12-31")).await;
    let first_id = first["record"]["id"].as_i64().unwrap();
    let employee = get(&router, "/employees/1").await;
    assert_eq!(employee["employee_job_id"], 1);
    assert_eq!(employee["electronic_contract_end_date"], "2021-12-31");

    let second = post(&router, "/contracts", contract_body(1, 2, "2022-01-01", "2022-12-31")).await;
    let second_id = second["record"]["id"].as_i64().unwrap();
    let employee = get(&router, "/employees/1").await;
    assert_eq!(employee["employee_job_id"], 2);
    assert_eq!(employee["electronic_contract_start_date"], "2022-01-01");

    // Soft delete falls back to the earlier contract
    let (status, _) = send(&router, "DELETE", &format!("/contracts/{}", second_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let employee = get(&router, "/employees/1").await;
    assert_eq!(employee["employee_job_id"], 1);
    assert_eq!(employee["electronic_contract_end_date"], "2021-12-31");

    let visible = get(&router, "/contracts").await;
    assert_eq!(visible.as_array().unwrap().len(), 1);
    let all = get(&router, "/contracts?include_deleted=true").await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, _) = send(&router, "POST", &format!("/contracts/{}/restore", second_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(get(&router, "/employees/1").await["employee_job_id"], 2);

    let (status, _) = send(&router, "DELETE", &format!("/contracts/{}/force", second_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, "GET", &format!("/contracts/{}", second_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(get(&router, "/employees/1").await["employee_job_id"], 1);

    send(&router, "DELETE", &format!("/contracts/{}/force", first_id), None).await;
    let employee = get(&router, "/employees/1").await;
    assert!(employee["employee_job_id"].is_null());
    assert!(employee["electronic_contract_start_date"].is_null());
    assert!(employee["electronic_contract_end_date"].is_null());
}

#[tokio::test]
async fn test_contract_creation_accrues_leave() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;

    // 731 days rounds to 2 contract years
    let saved = post(&router, "/contracts", contract_body(1, 1, "2020-01-01", "2021-12-31")).await;
    assert_eq!(get(&router, "/employees/1").await["leave_balance"], 2);
    let rules: Vec<&str> = saved["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(rules, vec!["current_contract_sync", "leave_accrual"]);

    post(&router, "/contracts", contract_body(1, 2, "2022-01-01", "2022-12-31")).await;
    assert_eq!(get(&router, "/employees/1").await["leave_balance"], 3);
}

#[tokio::test]
async fn test_updating_dates_resyncs_without_accrual() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;
    let saved = post(&router, "/contracts", contract_body(1, 1, "2024-01-01", "2024-12-31")).await;
    let id = saved["record"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &router,
        "PUT",
        &format!("/contracts/{}", id),
        Some(contract_body(1, 2, "2024-01-01", "2026-12-31")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let employee = get(&router, "/employees/1").await;
    assert_eq!(employee["employee_job_id"], 2);
    assert_eq!(employee["electronic_contract_end_date"], "2026-12-31");
    assert_eq!(employee["leave_balance"], 1);
}

#[tokio::test]
async fn test_moving_contract_resyncs_both_employees() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;
    setup_employee(&router, 2, "Jose").await;
    let saved = post(&router, "/contracts", contract_body(1, 1, "2024-01-01", "2024-12-31")).await;
    let id = saved["record"]["id"].as_i64().unwrap();

    send(
        &router,
        "PUT",
        &format!("/contracts/{}", id),
        Some(contract_body(2, 1, "2024-01-01", "2024-12-31")),
    )
    .await;

    assert!(get(&router, "/employees/1").await["employee_job_id"].is_null());
    assert_eq!(get(&router, "/employees/2").await["employee_job_id"], 1);
}

#[tokio::test]
async fn test_contract_validation_errors() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;

    let (status, error) = send(
        &router,
        "POST",
        "/contracts",
        Some(contract_body(1, 1, "2024-12-31", "2024-01-01")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["fields"][0]["field"], "end_date");

    let (status, error) = send(
        &router,
        "POST",
        "/contracts",
        Some(contract_body(99, 1, "2024-01-01", "2024-12-31")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["fields"][0]["field"], "employee_number");

    let mut body = contract_body(1, 1, "2024-01-01", "2024-12-31");
    body["basic_salary"] = json!("-1");
    let (status, _) = send(&router, "POST", "/contracts", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_bulk_delete_is_all_or_nothing() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;
    let a = post(&router, "/contracts", contract_body(1, 1, "2022-01-01", "2022-12-31")).await;
    let b = post(&router, "/contracts", contract_body(1, 2, "2023-01-01", "2023-12-31")).await;
    let a = a["record"]["id"].as_i64().unwrap();
    let b = b["record"]["id"].as_i64().unwrap();

    let (status, _) = send(&router, "DELETE", "/contracts", Some(json!({ "ids": [a, 999] }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(get(&router, "/contracts").await.as_array().unwrap().len(), 2);

    let (status, deleted) = send(&router, "DELETE", "/contracts", Some(json!({ "ids": [a, b] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["record"].as_array().unwrap().len(), 2);
    assert!(get(&router, "/contracts").await.as_array().unwrap().is_empty());
    assert!(get(&router, "/employees/1").await["employee_job_id"].is_null());
}

#[tokio::test]
async fn test_bulk_delete_with_repeated_id() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;
    let a = post(&router, "/contracts", contract_body(1, 1, "2022-01-01", "2022-12-31")).await;
    let a = a["record"]["id"].as_i64().unwrap();

    let (status, deleted) = send(&router, "DELETE", "/contracts", Some(json!({ "ids": [a, a] }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["record"].as_array().unwrap().len(), 1);
    assert!(get(&router, "/contracts").await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_contract_list_rows_and_filters() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;
    setup_employee(&router, 2, "Jose").await;
    post(&router, "/contracts", contract_body(1, 1, "2020-01-01", "2021-12-31")).await;
    post(&router, "/contracts", contract_body(1, 2, "2022-01-01", "2022-06-30")).await;
    post(&router, "/contracts", contract_body(2, 2, "2023-03-01", "2024-02-29")).await;

    let all = get(&router, "/contracts").await;
    let starts: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["start_date"].as_str().unwrap())
        .collect();
    assert_eq!(starts, vec!["2023-03-01", "2022-01-01", "2020-01-01"]);
    assert_eq!(all[0]["employee_label"], "2 - Jose");
    assert_eq!(all[0]["job_title"], "Foreman");
    assert_eq!(all[2]["duration"], "1 year, 11 months, 30 days");

    let foremen = get(&router, "/contracts?job_ids=2").await;
    assert_eq!(foremen.as_array().unwrap().len(), 2);

    let both_jobs = get(&router, "/contracts?job_ids=1,2&employee_number=1").await;
    assert_eq!(both_jobs.as_array().unwrap().len(), 2);

    let long = get(&router, "/contracts?min_years=1").await;
    let long_starts: Vec<&str> = long
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["start_date"].as_str().unwrap())
        .collect();
    assert_eq!(long_starts, vec!["2020-01-01"]);

    let recent = get(&router, "/contracts?start_from=2022-01-01&end_to=2022-12-31").await;
    assert_eq!(recent.as_array().unwrap().len(), 1);
    assert_eq!(recent[0]["start_date"], "2022-01-01");

    let (status, error) = send(&router, "GET", "/contracts?job_ids=foreman", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["fields"][0]["field"], "job_ids");
}

#[tokio::test]
async fn test_contract_defaults_follow_latest_contract() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;

    let empty = get(&router, "/contracts/defaults?employee_number=1").await;
    assert!(empty["employee_job_id"].is_null());
    assert!(empty["basic_salary"].is_null());

    post(&router, "/contracts", contract_body(1, 1, "2020-01-01", "2021-12-31")).await;
    let mut raise = contract_body(1, 2, "2022-01-01", "2023-12-31");
    raise["basic_salary"] = json!("1800.00");
    post(&router, "/contracts", raise).await;

    let defaults = get(&router, "/contracts/defaults?employee_number=1").await;
    assert_eq!(defaults["employee_job_id"], 2);
    assert_eq!(defaults["basic_salary"], "1800.00");
    assert_eq!(defaults["food_allowance"], "300.00");

    let (status, _) = send(&router, "GET", "/contracts/defaults?employee_number=77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Project assignments
// =============================================================================

#[tokio::test]
async fn test_transfers_track_current_project() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;

    let first = post(
        &router,
        "/project-assignments",
        json!({ "employee_number": 1, "project_id": 1, "transfer_date": "2023-01-01" }),
    )
    .await;
    assert!(first["record"]["from_project_id"].is_null());
    assert_eq!(get(&router, "/employees/1").await["project_id"], 1);

    let second = post(
        &router,
        "/project-assignments",
        json!({ "employee_number": 1, "project_id": 2, "transfer_date": "2024-06-01" }),
    )
    .await;
    // Origin defaults to the project the employee was on
    assert_eq!(second["record"]["from_project_id"], 1);
    assert_eq!(get(&router, "/employees/1").await["project_id"], 2);

    let on_site = get(&router, "/employees?project_id=2").await;
    assert_eq!(on_site.as_array().unwrap().len(), 1);

    let history = get(&router, "/project-assignments?employee_number=1").await;
    assert_eq!(history[0]["transfer_date"], "2024-06-01");

    let second_id = second["record"]["id"].as_i64().unwrap();
    send(&router, "DELETE", &format!("/project-assignments/{}", second_id), None).await;
    assert_eq!(get(&router, "/employees/1").await["project_id"], 1);

    let first_id = first["record"]["id"].as_i64().unwrap();
    send(&router, "DELETE", &format!("/project-assignments/{}", first_id), None).await;
    assert!(get(&router, "/employees/1").await["project_id"].is_null());
}

#[tokio::test]
async fn test_backdated_transfer_does_not_replace_current_project() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;

    post(
        &router,
        "/project-assignments",
        json!({ "employee_number": 1, "project_id": 2, "transfer_date": "2024-06-01" }),
    )
    .await;
    post(
        &router,
        "/project-assignments",
        json!({
            "employee_number": 1,
            "from_project_id": 2,
            "project_id": 1,
            "transfer_date": "2022-01-01"
        }),
    )
    .await;

    assert_eq!(get(&router, "/employees/1").await["project_id"], 2);
}

// =============================================================================
// Leaves
// =============================================================================

#[tokio::test]
async fn test_leave_lifecycle_moves_balance() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;
    // Two contract years of accrual
    post(&router, "/contracts", contract_body(1, 1, "2020-01-01", "2021-12-31")).await;

    let leave = post(
        &router,
        "/leaves",
        json!({
            "employee_number": 1,
            "start_date": "2025-07-01",
            "end_date": "2025-07-01",
            "visa_expiration": "2025-09-30"
        }),
    )
    .await;
    assert_eq!(leave["record"]["remaining_leave_days"], 1);
    assert!(leave["audit_trace"]["warnings"].as_array().unwrap().is_empty());
    assert_eq!(get(&router, "/employees/1").await["leave_balance"], 1);

    // Lengthen to ten days: the balance goes negative with a warning
    let id = leave["record"]["id"].as_i64().unwrap();
    let (status, updated) = send(
        &router,
        "PUT",
        &format!("/leaves/{}", id),
        Some(json!({
            "employee_number": 1,
            "start_date": "2025-07-01",
            "end_date": "2025-07-10",
            "visa_expiration": "2025-09-30"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["record"]["remaining_leave_days"], -8);
    assert_eq!(
        updated["audit_trace"]["warnings"][0]["code"],
        "NEGATIVE_LEAVE_BALANCE"
    );
    assert_eq!(get(&router, "/employees/1").await["leave_balance"], -8);

    let (status, _) = send(&router, "DELETE", &format!("/leaves/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(get(&router, "/employees/1").await["leave_balance"], 2);
    assert!(get(&router, "/leaves?employee_number=1").await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_leave_return_before_departure_is_rejected() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;

    let (status, error) = send(
        &router,
        "POST",
        "/leaves",
        Some(json!({
            "employee_number": 1,
            "start_date": "2025-07-10",
            "end_date": "2025-07-01",
            "visa_expiration": "2025-09-30"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["fields"][0]["field"], "end_date");
    assert_eq!(get(&router, "/employees/1").await["leave_balance"], 0);
}

// =============================================================================
// Reference tables
// =============================================================================

#[tokio::test]
async fn test_reference_tables() {
    let router = create_router_for_test();
    seed_references(&router).await;

    let projects = get(&router, "/reference/projects").await;
    let labels: Vec<&str> = projects
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Jeddah Tower", "Riyadh Metro"]);

    let (status, error) = send(&router, "POST", "/reference/jobs", Some(json!({ "label": "" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["fields"][0]["field"], "label");
}

#[tokio::test]
async fn test_referenced_rows_cannot_be_deleted() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1, "Ahmed").await;

    let (status, error) = send(&router, "DELETE", "/reference/countries/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "CONSTRAINT_VIOLATION");

    // The unused second job can go
    let (status, _) = send(&router, "DELETE", "/reference/jobs/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(get(&router, "/reference/jobs").await.as_array().unwrap().len(), 1);
}

// =============================================================================
// File information sheet
// =============================================================================

async fn get_sheet(router: &Router, uri: &str) -> (StatusCode, String, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_file_information_sheet_renders_history() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 1042, "Ahmed Al-Harbi").await;
    post(&router, "/contracts", contract_body(1042, 2, "2020-01-01", "2021-12-31")).await;
    post(
        &router,
        "/project-assignments",
        json!({ "employee_number": 1042, "project_id": 1, "transfer_date": "2020-01-05" }),
    )
    .await;
    post(
        &router,
        "/leaves",
        json!({
            "employee_number": 1042,
            "start_date": "2021-07-01",
            "end_date": "2021-07-01",
            "visa_expiration": "2021-09-30"
        }),
    )
    .await;

    let (status, content_type, html) =
        get_sheet(&router, "/employees/1042/file-information-sheet?date=2026-10-15").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert!(html.contains("Ahmed Al-Harbi"));
    assert!(html.contains("Thursday, October 15, 2026"));
    assert!(html.contains("Foreman"));
    assert!(html.contains("Riyadh Metro"));
    assert!(html.contains("1 year, 11 months, 30 days"));
    assert!(html.contains("1 day"));
    assert!(html.contains("OCC Weavers Ltd."));
}

#[tokio::test]
async fn test_file_information_sheet_placeholders_without_contracts() {
    let router = create_router_for_test();
    seed_references(&router).await;
    setup_employee(&router, 7, "Omar Farouk").await;

    let (status, _, html) = get_sheet(&router, "/employees/7/file-information-sheet").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<dt>Job title</dt><dd>-</dd>"));
    assert!(html.contains("No contracts recorded."));
}

#[tokio::test]
async fn test_non_numeric_path_segment_returns_json_error() {
    let router = create_router_for_test();

    for (method, uri) in [
        ("GET", "/employees/abc"),
        ("DELETE", "/contracts/abc"),
        ("POST", "/contracts/1x/restore"),
        ("GET", "/leaves/abc"),
        ("DELETE", "/reference/projects/abc"),
        ("GET", "/employees/abc/file-information-sheet"),
    ] {
        let (status, error) = send(&router, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(error["code"], "INVALID_PATH", "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_file_information_sheet_for_unknown_employee_returns_404() {
    let router = create_router_for_test();

    let (status, content_type, _) = get_sheet(&router, "/employees/9/file-information-sheet").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type, "application/json");
}
