//! Application state for the HR API.
//!
//! The service owns one SQLite connection, so requests take turns through a
//! mutex. Each operation holds the lock for the duration of its single
//! transaction.

use std::io;
use std::sync::{Arc, Mutex};

use crate::error::AdminResult;
use crate::report::ReportRenderer;
use crate::service::HrService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    service: Arc<Mutex<HrService>>,
    renderer: Arc<ReportRenderer>,
}

impl AppState {
    /// Creates a new application state around a service and a renderer.
    pub fn new(service: HrService, renderer: ReportRenderer) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            renderer: Arc::new(renderer),
        }
    }

    /// Runs `f` with exclusive access to the service on the blocking pool.
    ///
    /// A poisoned lock is recovered: a panicking request drops its
    /// transaction uncommitted, so the connection is still consistent.
    pub async fn with_service<T, F>(&self, f: F) -> AdminResult<T>
    where
        F: FnOnce(&mut HrService) -> AdminResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = Arc::clone(&self.service);
        tokio::task::spawn_blocking(move || {
            let mut service = service
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&mut service)
        })
        .await
        .map_err(io::Error::from)?
    }

    /// Returns the report renderer.
    pub fn renderer(&self) -> &ReportRenderer {
        &self.renderer
    }
}
