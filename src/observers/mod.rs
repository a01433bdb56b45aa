//! Write observers.
//!
//! After a repository write, the service dispatches a [`ModelEvent`] to the
//! model's observer inside the same transaction. Observers keep the
//! employee's cached fields in step with its contracts, transfers and
//! leaves, and report what they did as an [`AuditTrace`].

mod assignment;
mod contract;
mod leave;

pub use assignment::ProjectAssignmentObserver;
pub use contract::ContractObserver;
pub use leave::EmployeeLeaveObserver;

use rusqlite::Connection;

use crate::config::PolicyConfig;
use crate::error::AdminResult;
use crate::models::AuditTrace;

/// A persisted change to a model.
#[derive(Debug)]
pub enum ModelEvent<'a, M> {
    /// A row was inserted.
    Created(&'a M),
    /// A row was changed.
    Updated {
        /// The row as it was before the write.
        original: &'a M,
        /// The row as stored now.
        current: &'a M,
    },
    /// A row was removed, or a contract soft-deleted.
    Deleted(&'a M),
    /// A soft-deleted contract was restored.
    Restored(&'a M),
    /// A contract was removed permanently.
    ForceDeleted(&'a M),
}

impl<M> ModelEvent<'_, M> {
    /// Event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ModelEvent::Created(_) => "created",
            ModelEvent::Updated { .. } => "updated",
            ModelEvent::Deleted(_) => "deleted",
            ModelEvent::Restored(_) => "restored",
            ModelEvent::ForceDeleted(_) => "force_deleted",
        }
    }
}

/// What an observer can reach while handling an event.
pub struct ObserverContext<'a> {
    /// The connection of the running transaction.
    pub conn: &'a Connection,
    /// Leave policy in effect.
    pub policy: &'a PolicyConfig,
}

/// Reacts to model events. Every hook defaults to doing nothing.
pub trait Observer<M> {
    /// Called after an insert.
    fn created(&self, _ctx: &ObserverContext<'_>, _model: &M) -> AdminResult<AuditTrace> {
        Ok(AuditTrace::default())
    }

    /// Called after an update.
    fn updated(
        &self,
        _ctx: &ObserverContext<'_>,
        _original: &M,
        _current: &M,
    ) -> AdminResult<AuditTrace> {
        Ok(AuditTrace::default())
    }

    /// Called after a delete or soft delete.
    fn deleted(&self, _ctx: &ObserverContext<'_>, _model: &M) -> AdminResult<AuditTrace> {
        Ok(AuditTrace::default())
    }

    /// Called after a soft-deleted row is restored.
    fn restored(&self, _ctx: &ObserverContext<'_>, _model: &M) -> AdminResult<AuditTrace> {
        Ok(AuditTrace::default())
    }

    /// Called after a permanent delete.
    fn force_deleted(&self, _ctx: &ObserverContext<'_>, _model: &M) -> AdminResult<AuditTrace> {
        Ok(AuditTrace::default())
    }
}

/// Routes an event to the matching observer hook.
pub fn dispatch<M, O>(
    observer: &O,
    ctx: &ObserverContext<'_>,
    event: ModelEvent<'_, M>,
) -> AdminResult<AuditTrace>
where
    O: Observer<M> + ?Sized,
{
    match event {
        ModelEvent::Created(model) => observer.created(ctx, model),
        ModelEvent::Updated { original, current } => observer.updated(ctx, original, current),
        ModelEvent::Deleted(model) => observer.deleted(ctx, model),
        ModelEvent::Restored(model) => observer.restored(ctx, model),
        ModelEvent::ForceDeleted(model) => observer.force_deleted(ctx, model),
    }
}

/// Employees touched by an update: the current owner, plus the previous
/// one when the row moved.
fn affected_employees(original: i64, current: i64) -> Vec<i64> {
    if original == current {
        vec![current]
    } else {
        vec![original, current]
    }
}
