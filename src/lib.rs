//! HR administration backend
//!
//! This crate manages employees of a contracting company together with their
//! contracts, project transfers and leaves. Writes run through observers that
//! keep each employee's cached current contract, current project and leave
//! balance in sync, and the `report` module renders the per-employee file
//! information sheet.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod observers;
pub mod report;
pub mod service;
pub mod store;
pub mod telemetry;
