//! Core data models for the HR administration backend.
//!
//! This module contains the stored records, the forms they are created
//! from, and the audit types returned by observer-driven writes.

mod assignment;
mod audit;
mod contract;
mod dossier;
mod employee;
mod form;
mod leave;
mod reference;

pub use assignment::{ProjectAssignment, ProjectAssignmentDraft, ProjectAssignmentForm};
pub use audit::{AuditStep, AuditTrace, AuditWarning, Saved};
pub use contract::{Contract, ContractDraft, ContractForm};
pub use dossier::{DossierContract, DossierTransfer, EmployeeDossier};
pub use employee::{Employee, EmployeeDraft, EmployeeForm};
pub use form::MAX_TEXT_LENGTH;
pub use leave::{EmployeeLeave, LeaveDraft, LeaveForm};
pub use reference::{ReferenceEntry, ReferenceForm, ReferenceKind};
