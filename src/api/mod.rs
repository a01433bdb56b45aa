//! HTTP API module for the HR administration backend.
//!
//! This module provides the REST endpoints for employees, contracts,
//! project transfers, leaves, reference tables and the file information
//! sheet.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BulkDeleteRequest, ContractListQuery, EmployeeListQuery, EmployeeQuery, SheetQuery,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
