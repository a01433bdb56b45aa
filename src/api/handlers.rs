//! HTTP request handlers for the HR API.
//!
//! Every handler opens a [`RequestLog`] that tags its log events with a
//! correlation id, decodes its input, runs one service operation under the
//! state lock and maps the outcome to a JSON response.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AdminError, AdminResult};
use crate::models::{
    ContractForm, EmployeeForm, LeaveForm, ProjectAssignmentForm, ReferenceForm, ReferenceKind,
};

use super::request::{
    BulkDeleteRequest, ContractListQuery, EmployeeListQuery, EmployeeQuery, SheetQuery,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/:number",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route(
            "/employees/:number/file-information-sheet",
            get(file_information_sheet),
        )
        .route(
            "/contracts",
            get(list_contracts)
                .post(create_contract)
                .delete(bulk_delete_contracts),
        )
        .route("/contracts/defaults", get(contract_defaults))
        .route(
            "/contracts/:id",
            get(get_contract).put(update_contract).delete(delete_contract),
        )
        .route("/contracts/:id/restore", post(restore_contract))
        .route("/contracts/:id/force", delete(force_delete_contract))
        .route(
            "/project-assignments",
            get(list_assignments).post(create_assignment),
        )
        .route(
            "/project-assignments/:id",
            get(get_assignment)
                .put(update_assignment)
                .delete(delete_assignment),
        )
        .route("/leaves", get(list_leaves).post(create_leave))
        .route(
            "/leaves/:id",
            get(get_leave).put(update_leave).delete(delete_leave),
        )
        .route(
            "/reference/:kind",
            get(list_references).post(create_reference),
        )
        .route("/reference/:kind/:id", delete(delete_reference))
        .with_state(state)
}

/// Logging scope of one request.
struct RequestLog {
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
}

impl RequestLog {
    fn begin(operation: &'static str) -> Self {
        // Generate correlation ID for request tracking
        let correlation_id = Uuid::new_v4();
        info!(correlation_id = %correlation_id, operation, "Processing request");
        Self {
            correlation_id,
            operation,
            started: Instant::now(),
        }
    }

    /// Unwraps a JSON body, turning a rejection into a 400 response.
    fn json<T>(&self, payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
        let rejection = match payload {
            Ok(Json(body)) => return Ok(body),
            Err(rejection) => rejection,
        };

        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                // The body text carries serde's description of the bad field
                let body_text = err.body_text();
                warn!(
                    correlation_id = %self.correlation_id,
                    error = %body_text,
                    "JSON data error"
                );
                ApiError::malformed_json(body_text)
            }
            JsonRejection::JsonSyntaxError(err) => {
                warn!(
                    correlation_id = %self.correlation_id,
                    error = %err,
                    "JSON syntax error"
                );
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        Err(ApiErrorResponse::bad_request(error).into_response())
    }

    /// Unwraps a query string, turning a rejection into a 400 response.
    fn query<T>(&self, query: Result<Query<T>, QueryRejection>) -> Result<T, Response> {
        query.map(|Query(q)| q).map_err(|rejection| {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %self.correlation_id,
                error = %body_text,
                "Query string error"
            );
            ApiErrorResponse::bad_request(ApiError::invalid_query(body_text)).into_response()
        })
    }

    /// Unwraps path parameters, turning a rejection into a 400 response.
    fn path<T>(&self, path: Result<Path<T>, PathRejection>) -> Result<T, Response> {
        path.map(|Path(p)| p).map_err(|rejection| {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %self.correlation_id,
                error = %body_text,
                "Path parameter error"
            );
            ApiErrorResponse::bad_request(ApiError::invalid_path(body_text)).into_response()
        })
    }

    /// Serializes a successful result with `status`, or maps the error.
    fn respond<T: Serialize>(&self, status: StatusCode, result: AdminResult<T>) -> Response {
        match result {
            Ok(body) => {
                info!(
                    correlation_id = %self.correlation_id,
                    operation = self.operation,
                    status = status.as_u16(),
                    duration_us = self.started.elapsed().as_micros() as u64,
                    "Request completed"
                );
                (
                    status,
                    [(header::CONTENT_TYPE, "application/json")],
                    Json(body),
                )
                    .into_response()
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&self, err: AdminError) -> Response {
        warn!(
            correlation_id = %self.correlation_id,
            operation = self.operation,
            error = %err,
            "Request failed"
        );
        ApiErrorResponse::from(err).into_response()
    }
}

/// Decodes the `:kind` segment of the reference routes.
fn reference_kind(slug: &str) -> AdminResult<ReferenceKind> {
    slug.parse()
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

/// Handler for GET /health.
async fn health() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(Health {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
        .into_response()
}

// Employees

async fn list_employees(
    State(state): State<AppState>,
    query: Result<Query<EmployeeListQuery>, QueryRejection>,
) -> Response {
    let request = RequestLog::begin("employee.list");
    let query = match request.query(query) {
        Ok(q) => q,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.list_employees(&query.into())).await;
    request.respond(StatusCode::OK, result)
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeForm>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("employee.create");
    let form = match request.json(payload) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.create_employee(&form)).await;
    request.respond(StatusCode::CREATED, result)
}

async fn get_employee(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("employee.get");
    let number = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.get_employee(number)).await;
    request.respond(StatusCode::OK, result)
}

async fn update_employee(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EmployeeForm>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("employee.update");
    let number = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let form = match request.json(payload) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.update_employee(number, &form)).await;
    request.respond(StatusCode::OK, result)
}

async fn delete_employee(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("employee.delete");
    let number = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.delete_employee(number)).await;
    request.respond(StatusCode::OK, result)
}

/// Handler for GET /employees/:number/file-information-sheet.
///
/// Returns the printable HTML sheet; `?date=YYYY-MM-DD` overrides the print
/// date.
async fn file_information_sheet(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<SheetQuery>, QueryRejection>,
) -> Response {
    let request = RequestLog::begin("employee.file_information_sheet");
    let number = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let query = match request.query(query) {
        Ok(q) => q,
        Err(response) => return response,
    };
    let today = query.date.unwrap_or_else(|| Local::now().date_naive());

    let html = state
        .with_service(move |s| s.file_information_sheet(number, today))
        .await
        .and_then(|sheet| state.renderer().render_sheet(&sheet));

    match html {
        Ok(html) => {
            info!(
                correlation_id = %request.correlation_id,
                employee_number = number,
                bytes = html.len(),
                duration_us = request.started.elapsed().as_micros() as u64,
                "File information sheet rendered"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                html,
            )
                .into_response()
        }
        Err(err) => request.fail(err),
    }
}

// Contracts

async fn list_contracts(
    State(state): State<AppState>,
    query: Result<Query<ContractListQuery>, QueryRejection>,
) -> Response {
    let request = RequestLog::begin("contract.list");
    let query = match request.query(query) {
        Ok(q) => q,
        Err(response) => return response,
    };
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(err) => return request.fail(err),
    };
    let result = state.with_service(move |s| s.list_contracts(&filter)).await;
    request.respond(StatusCode::OK, result)
}

async fn create_contract(
    State(state): State<AppState>,
    payload: Result<Json<ContractForm>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("contract.create");
    let form = match request.json(payload) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.create_contract(&form)).await;
    request.respond(StatusCode::CREATED, result)
}

async fn bulk_delete_contracts(
    State(state): State<AppState>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("contract.bulk_delete");
    let body = match request.json(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.delete_contracts(&body.ids)).await;
    request.respond(StatusCode::OK, result)
}

/// Handler for GET /contracts/defaults.
///
/// Returns the job and compensation of the employee's latest contract so a
/// new contract form can be prefilled.
async fn contract_defaults(
    State(state): State<AppState>,
    query: Result<Query<EmployeeQuery>, QueryRejection>,
) -> Response {
    let request = RequestLog::begin("contract.defaults");
    let query = match request.query(query) {
        Ok(q) => q,
        Err(response) => return response,
    };
    let Some(number) = query.employee_number else {
        return request.fail(AdminError::invalid("employee_number", "is required"));
    };
    let result = state.with_service(move |s| s.contract_defaults(number)).await;
    request.respond(StatusCode::OK, result)
}

async fn get_contract(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("contract.get");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.get_contract(id)).await;
    request.respond(StatusCode::OK, result)
}

async fn update_contract(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ContractForm>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("contract.update");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let form = match request.json(payload) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.update_contract(id, &form)).await;
    request.respond(StatusCode::OK, result)
}

async fn delete_contract(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("contract.delete");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.delete_contract(id)).await;
    request.respond(StatusCode::OK, result)
}

async fn restore_contract(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("contract.restore");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.restore_contract(id)).await;
    request.respond(StatusCode::OK, result)
}

async fn force_delete_contract(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("contract.force_delete");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.force_delete_contract(id)).await;
    request.respond(StatusCode::OK, result)
}

// Project assignments

async fn list_assignments(
    State(state): State<AppState>,
    query: Result<Query<EmployeeQuery>, QueryRejection>,
) -> Response {
    let request = RequestLog::begin("project_assignment.list");
    let query = match request.query(query) {
        Ok(q) => q,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.list_assignments(query.employee_number)).await;
    request.respond(StatusCode::OK, result)
}

async fn create_assignment(
    State(state): State<AppState>,
    payload: Result<Json<ProjectAssignmentForm>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("project_assignment.create");
    let form = match request.json(payload) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.create_assignment(&form)).await;
    request.respond(StatusCode::CREATED, result)
}

async fn get_assignment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("project_assignment.get");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.get_assignment(id)).await;
    request.respond(StatusCode::OK, result)
}

async fn update_assignment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProjectAssignmentForm>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("project_assignment.update");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let form = match request.json(payload) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.update_assignment(id, &form)).await;
    request.respond(StatusCode::OK, result)
}

async fn delete_assignment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("project_assignment.delete");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.delete_assignment(id)).await;
    request.respond(StatusCode::OK, result)
}

// Leaves

async fn list_leaves(
    State(state): State<AppState>,
    query: Result<Query<EmployeeQuery>, QueryRejection>,
) -> Response {
    let request = RequestLog::begin("leave.list");
    let query = match request.query(query) {
        Ok(q) => q,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.list_leaves(query.employee_number)).await;
    request.respond(StatusCode::OK, result)
}

async fn create_leave(
    State(state): State<AppState>,
    payload: Result<Json<LeaveForm>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("leave.create");
    let form = match request.json(payload) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.create_leave(&form)).await;
    request.respond(StatusCode::CREATED, result)
}

async fn get_leave(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("leave.get");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.get_leave(id)).await;
    request.respond(StatusCode::OK, result)
}

async fn update_leave(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<LeaveForm>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("leave.update");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let form = match request.json(payload) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.update_leave(id, &form)).await;
    request.respond(StatusCode::OK, result)
}

async fn delete_leave(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("leave.delete");
    let id = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = state.with_service(move |s| s.delete_leave(id)).await;
    request.respond(StatusCode::OK, result)
}

// Reference tables

async fn list_references(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("reference.list");
    let kind = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let kind = match reference_kind(&kind) {
        Ok(kind) => kind,
        Err(err) => return request.fail(err),
    };
    let result = state.with_service(move |s| s.list_references(kind)).await;
    request.respond(StatusCode::OK, result)
}

async fn create_reference(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ReferenceForm>, JsonRejection>,
) -> Response {
    let request = RequestLog::begin("reference.create");
    let kind = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let form = match request.json(payload) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let kind = match reference_kind(&kind) {
        Ok(kind) => kind,
        Err(err) => return request.fail(err),
    };
    let result = state.with_service(move |s| s.create_reference(kind, &form)).await;
    request.respond(StatusCode::CREATED, result)
}

async fn delete_reference(
    State(state): State<AppState>,
    path: Result<Path<(String, i64)>, PathRejection>,
) -> Response {
    let request = RequestLog::begin("reference.delete");
    let (kind, id) = match request.path(path) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let kind = match reference_kind(&kind) {
        Ok(kind) => kind,
        Err(err) => return request.fail(err),
    };
    let result = state.with_service(move |s| s.delete_reference(kind, id)).await;
    request.respond(StatusCode::OK, result)
}
