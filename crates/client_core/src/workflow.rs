//! Add/edit/delete state machines and the notices they produce.
//!
//! Add:    closed -> open -> submitting -> closed
//! Edit:   idle -> editing -> submitting -> idle
//! Delete: idle -> confirming -> submitting -> removed
//!
//! A failed remote call always ends in an error [`Notice`] and leaves the
//! roster untouched; a failed add or edit returns the dialog to its open
//! state with the typed values intact.

use std::collections::BTreeSet;

use shared::{
    domain::{Employee, EmployeeId},
    error::FieldErrors,
    protocol::EmployeePayload,
    validation::EmployeeForm,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{api::EmployeeApi, error::ApiResult, roster::EmployeeRoster};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient user-facing message about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn success_message(self) -> &'static str {
        match self {
            MutationKind::Create => "Employee added successfully!",
            MutationKind::Update => "Employee updated successfully!",
            MutationKind::Delete => "Employee deleted successfully!",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            MutationKind::Create => "Failed to add employee.",
            MutationKind::Update => "Failed to update employee.",
            MutationKind::Delete => "Failed to delete employee.",
        }
    }
}

/// Tags one add/edit dialog submission so its result can be told apart from
/// a later submission's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(pub u64);

/// A remote call the workflow wants made. Only produced for input that
/// passed validation (or a confirmed delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    Create {
        submission: SubmissionId,
        payload: EmployeePayload,
    },
    Update {
        submission: SubmissionId,
        id: EmployeeId,
        payload: EmployeePayload,
        /// Local record to show once the server accepts the update.
        merged: Employee,
    },
    Delete {
        id: EmployeeId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Created(Employee),
    Updated(Employee),
    Deleted(EmployeeId),
}

impl MutationRequest {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationRequest::Create { .. } => MutationKind::Create,
            MutationRequest::Update { .. } => MutationKind::Update,
            MutationRequest::Delete { .. } => MutationKind::Delete,
        }
    }

    pub fn submission(&self) -> Option<SubmissionId> {
        match self {
            MutationRequest::Create { submission, .. }
            | MutationRequest::Update { submission, .. } => Some(*submission),
            MutationRequest::Delete { .. } => None,
        }
    }

    pub fn employee_id(&self) -> Option<EmployeeId> {
        match self {
            MutationRequest::Create { .. } => None,
            MutationRequest::Update { id, .. } | MutationRequest::Delete { id } => Some(*id),
        }
    }

    /// Performs the call once, without retry.
    pub async fn execute(&self, api: &dyn EmployeeApi) -> ApiResult<MutationOutcome> {
        match self {
            MutationRequest::Create { payload, .. } => api
                .create_employee(payload)
                .await
                .map(MutationOutcome::Created),
            MutationRequest::Update {
                id,
                payload,
                merged,
                ..
            } => {
                api.update_employee(*id, payload).await?;
                Ok(MutationOutcome::Updated(merged.clone()))
            }
            MutationRequest::Delete { id } => {
                api.delete_employee(*id).await?;
                Ok(MutationOutcome::Deleted(*id))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("the employee dialog is not open")]
    NotOpen,
    #[error("a submission is already in flight")]
    InFlight,
    #[error(transparent)]
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorTarget {
    New,
    Existing(Employee),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Closed,
    Open,
    Submitting,
}

/// The add/edit dialog: which record it targets, the typed values, and the
/// field errors from the last submit attempt.
///
/// Only the result of the submission the dialog is currently waiting on may
/// change its phase or form. Results of earlier submissions (the dialog was
/// closed and reopened meanwhile) still update the roster.
#[derive(Debug, Clone)]
pub struct EditorFlow {
    phase: EditorPhase,
    target: EditorTarget,
    form: EmployeeForm,
    errors: FieldErrors,
    awaiting: Option<SubmissionId>,
    last_submission: u64,
}

impl Default for EditorFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorFlow {
    pub fn new() -> Self {
        Self {
            phase: EditorPhase::Closed,
            target: EditorTarget::New,
            form: EmployeeForm::default(),
            errors: FieldErrors::default(),
            awaiting: None,
            last_submission: 0,
        }
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn target(&self) -> &EditorTarget {
        &self.target
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EmployeeForm {
        &mut self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_open(&self) -> bool {
        self.phase != EditorPhase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == EditorPhase::Submitting
    }

    pub fn awaiting(&self) -> Option<SubmissionId> {
        self.awaiting
    }

    pub fn open_add(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.phase = EditorPhase::Open;
        self.target = EditorTarget::New;
        self.form = EmployeeForm::default();
        self.errors = FieldErrors::default();
        true
    }

    pub fn open_edit(&mut self, employee: &Employee) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.phase = EditorPhase::Open;
        self.target = EditorTarget::Existing(employee.clone());
        self.form = EmployeeForm::from_employee(employee);
        self.errors = FieldErrors::default();
        true
    }

    /// Dismisses the dialog and resets the form. A submission already in
    /// flight still lands in the roster when it resolves.
    pub fn close(&mut self) {
        self.phase = EditorPhase::Closed;
        self.awaiting = None;
        self.target = EditorTarget::New;
        self.form = EmployeeForm::default();
        self.errors = FieldErrors::default();
    }

    /// Validates the current form. On success the dialog moves to
    /// `Submitting` and the remote call to make is returned.
    pub fn submit(&mut self) -> Result<MutationRequest, SubmitRejection> {
        match self.phase {
            EditorPhase::Closed => return Err(SubmitRejection::NotOpen),
            EditorPhase::Submitting => return Err(SubmitRejection::InFlight),
            EditorPhase::Open => {}
        }

        let valid = match self.form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SubmitRejection::Invalid(errors));
            }
        };
        self.errors = FieldErrors::default();

        self.last_submission = self.last_submission.wrapping_add(1);
        let submission = SubmissionId(self.last_submission);
        let request = match &self.target {
            EditorTarget::New => MutationRequest::Create {
                submission,
                payload: valid.create_payload(),
            },
            EditorTarget::Existing(current) => MutationRequest::Update {
                submission,
                id: current.id,
                payload: valid.update_payload(current),
                merged: valid.apply_to(current),
            },
        };
        self.phase = EditorPhase::Submitting;
        self.awaiting = Some(submission);
        Ok(request)
    }

    /// Applies the result of the create/update call made for `submission`.
    pub fn finish(
        &mut self,
        submission: SubmissionId,
        kind: MutationKind,
        result: Result<MutationOutcome, String>,
        roster: &mut EmployeeRoster,
    ) -> Notice {
        match result {
            Ok(MutationOutcome::Created(employee)) => {
                info!(employee_id = employee.id.0, "employee added");
                roster.insert_created(employee);
                self.settle_success(submission);
                Notice::success(MutationKind::Create.success_message())
            }
            Ok(MutationOutcome::Updated(employee)) => {
                let id = employee.id;
                if roster.replace(employee) {
                    info!(employee_id = id.0, "employee updated");
                } else {
                    warn!(employee_id = id.0, "updated employee no longer in list");
                }
                self.settle_success(submission);
                Notice::success(MutationKind::Update.success_message())
            }
            Ok(MutationOutcome::Deleted(id)) => {
                warn!(employee_id = id.0, "delete outcome routed to editor; ignoring");
                Notice::error(kind.failure_message())
            }
            Err(reason) => {
                warn!(
                    ?kind,
                    submission = submission.0,
                    "employee dialog submission failed: {reason}"
                );
                if self.awaiting == Some(submission) {
                    self.awaiting = None;
                    self.phase = EditorPhase::Open;
                }
                Notice::error(kind.failure_message())
            }
        }
    }

    fn settle_success(&mut self, submission: SubmissionId) {
        if self.awaiting == Some(submission) {
            self.close();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePhase {
    Idle,
    Confirming,
    Submitting,
}

/// Delete confirmation and in-flight tracking. One confirmation prompt at a
/// time; several confirmed deletes may be outstanding.
#[derive(Debug, Clone, Default)]
pub struct DeleteFlow {
    confirming: Option<Employee>,
    in_flight: BTreeSet<EmployeeId>,
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for confirmation before deleting `employee`.
    pub fn request(&mut self, employee: &Employee) -> bool {
        if self.in_flight.contains(&employee.id) {
            return false;
        }
        self.confirming = Some(employee.clone());
        true
    }

    pub fn pending_confirmation(&self) -> Option<&Employee> {
        self.confirming.as_ref()
    }

    pub fn phase_of(&self, id: EmployeeId) -> DeletePhase {
        if self.in_flight.contains(&id) {
            DeletePhase::Submitting
        } else if self.confirming.as_ref().is_some_and(|e| e.id == id) {
            DeletePhase::Confirming
        } else {
            DeletePhase::Idle
        }
    }

    /// Answer to the confirmation prompt. Only a `true` answer yields a
    /// request.
    pub fn resolve(&mut self, confirmed: bool) -> Option<MutationRequest> {
        let employee = self.confirming.take()?;
        if !confirmed {
            return None;
        }
        self.in_flight.insert(employee.id);
        Some(MutationRequest::Delete { id: employee.id })
    }

    pub fn finish(
        &mut self,
        id: EmployeeId,
        result: Result<(), String>,
        roster: &mut EmployeeRoster,
    ) -> Notice {
        self.in_flight.remove(&id);
        match result {
            Ok(()) => {
                if roster.remove(id).is_none() {
                    warn!(employee_id = id.0, "deleted employee was already gone locally");
                }
                info!(employee_id = id.0, "employee deleted");
                Notice::success(MutationKind::Delete.success_message())
            }
            Err(reason) => {
                warn!(employee_id = id.0, "employee delete failed: {reason}");
                Notice::error(MutationKind::Delete.failure_message())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
