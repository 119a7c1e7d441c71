//! View state and the reducer that folds backend events into it.
//!
//! Exactly one view is mounted at a time. Every mount gets a fresh
//! generation number; backend results carry the generation they were issued
//! for and are dropped once that mount is gone.

use client_core::{
    DeleteFlow, EditorFlow, EmployeeRoster, FetchState, MutationKind, MutationOutcome, Notice,
    SubmissionId, SubmitRejection,
};
use serde::{Deserialize, Serialize};
use shared::domain::{Employee, EmployeeId};
use tracing::{debug, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_load_failure, UiError, UiErrorContext, UiEvent};
use crate::controller::notices::NoticeBoard;

pub const INVALID_FORM_NOTICE: &str = "Please fix the highlighted fields.";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    #[default]
    Card,
    Table,
}

impl ViewKind {
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Card => "Card View",
            ViewKind::Table => "Table View",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MountId(pub u64);

/// Everything one mounted view owns.
#[derive(Debug)]
pub struct EmployeeView {
    pub kind: ViewKind,
    pub mount: MountId,
    pub fetch: FetchState,
    pub search: String,
    pub editor: EditorFlow,
    pub deletes: DeleteFlow,
}

impl EmployeeView {
    fn mounted(kind: ViewKind, mount: MountId) -> Self {
        Self {
            kind,
            mount,
            fetch: FetchState::Loading,
            search: String::new(),
            editor: EditorFlow::new(),
            deletes: DeleteFlow::new(),
        }
    }

    pub fn roster(&self) -> Option<&EmployeeRoster> {
        self.fetch.roster()
    }

    pub fn visible_employees(&self) -> Vec<&Employee> {
        self.roster()
            .map(|roster| roster.filtered(&self.search))
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct AppState {
    pub view: EmployeeView,
    pub notices: NoticeBoard,
    pub status: String,
    next_mount: u64,
}

impl AppState {
    /// Builds the state with `kind` mounted. The returned command performs
    /// the mount's initial load.
    pub fn new(kind: ViewKind) -> (Self, BackendCommand) {
        let mount = MountId(1);
        let state = Self {
            view: EmployeeView::mounted(kind, mount),
            notices: NoticeBoard::default(),
            status: "Starting...".to_string(),
            next_mount: mount.0,
        };
        (state, BackendCommand::LoadEmployees { mount })
    }

    pub fn current_mount(&self) -> MountId {
        self.view.mount
    }

    /// Unmounts the current view and mounts `kind` in its place.
    pub fn mount(&mut self, kind: ViewKind) -> BackendCommand {
        self.next_mount = self.next_mount.wrapping_add(1);
        let mount = MountId(self.next_mount);
        info!(
            previous = self.view.mount.0,
            mount = mount.0,
            view = kind.label(),
            "mounting employee view"
        );
        self.view = EmployeeView::mounted(kind, mount);
        BackendCommand::LoadEmployees { mount }
    }

    /// Navigation to the already mounted view is a no-op.
    pub fn switch_view(&mut self, kind: ViewKind) -> Option<BackendCommand> {
        (self.view.kind != kind).then(|| self.mount(kind))
    }

    pub fn reload(&mut self) -> BackendCommand {
        self.mount(self.view.kind)
    }

    pub fn open_add(&mut self) -> bool {
        self.view.roster().is_some() && self.view.editor.open_add()
    }

    pub fn open_edit(&mut self, id: EmployeeId) -> bool {
        let Some(employee) = self.view.fetch.roster().and_then(|roster| roster.get(id)) else {
            warn!(employee_id = id.0, "edit requested for unknown employee");
            return false;
        };
        self.view.editor.open_edit(employee)
    }

    pub fn close_editor(&mut self) {
        self.view.editor.close();
    }

    pub fn request_delete(&mut self, id: EmployeeId) -> bool {
        let Some(employee) = self.view.fetch.roster().and_then(|roster| roster.get(id)) else {
            warn!(employee_id = id.0, "delete requested for unknown employee");
            return false;
        };
        self.view.deletes.request(employee)
    }

    /// Validates the open dialog. Invalid input never produces a command.
    pub fn submit_editor(&mut self) -> Option<BackendCommand> {
        match self.view.editor.submit() {
            Ok(request) => Some(BackendCommand::Mutate {
                mount: self.current_mount(),
                request,
            }),
            Err(SubmitRejection::Invalid(errors)) => {
                debug!(errors = errors.len(), "employee form rejected");
                self.notices.post(Notice::error(INVALID_FORM_NOTICE));
                None
            }
            Err(rejection) => {
                debug!("ignoring submit: {rejection}");
                None
            }
        }
    }

    pub fn resolve_delete(&mut self, confirmed: bool) -> Option<BackendCommand> {
        let request = self.view.deletes.resolve(confirmed)?;
        Some(BackendCommand::Mutate {
            mount: self.current_mount(),
            request,
        })
    }

    /// Surfaces a command that never reached the backend as the failure it
    /// would have produced.
    pub fn command_undeliverable(&mut self, cmd: BackendCommand, reason: String) {
        match cmd {
            BackendCommand::LoadEmployees { mount } => self.apply(UiEvent::EmployeesLoaded {
                mount,
                result: Err(UiError::from_message(UiErrorContext::Load, reason)),
            }),
            BackendCommand::Mutate { mount, request } => {
                let kind = request.kind();
                self.apply(UiEvent::MutationFinished {
                    mount,
                    kind,
                    employee_id: request.employee_id(),
                    submission: request.submission(),
                    result: Err(UiError::from_message(
                        UiErrorContext::for_mutation(kind),
                        reason,
                    )),
                })
            }
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::Error(err) => self.apply_error(err),
            UiEvent::EmployeesLoaded { mount, result } => {
                if !self.is_current(mount, "employees_loaded") {
                    return;
                }
                if !self.view.fetch.is_loading() {
                    debug!(mount = mount.0, "view already settled; ignoring load result");
                    return;
                }
                self.view.fetch = match result {
                    Ok(employees) => {
                        self.status = format!("Loaded {} employees", employees.len());
                        FetchState::Ready(EmployeeRoster::from_employees(employees))
                    }
                    Err(err) => {
                        self.status = "Employee load failed".to_string();
                        FetchState::Failed(classify_load_failure(err.message()))
                    }
                };
            }
            UiEvent::MutationFinished {
                mount,
                kind,
                employee_id,
                submission,
                result,
            } => {
                if !self.is_current(mount, "mutation_finished") {
                    return;
                }
                self.apply_mutation(kind, employee_id, submission, result);
            }
        }
    }

    fn apply_error(&mut self, err: UiError) {
        warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
        self.status = err.message().to_string();
        if err.context() == UiErrorContext::BackendStartup && self.view.fetch.is_loading() {
            self.view.fetch = FetchState::Failed(classify_load_failure(&format!(
                "backend worker startup failure: {}",
                err.message()
            )));
        } else {
            self.notices.post(Notice::error(err.message()));
        }
    }

    fn apply_mutation(
        &mut self,
        kind: MutationKind,
        employee_id: Option<EmployeeId>,
        submission: Option<SubmissionId>,
        result: Result<MutationOutcome, UiError>,
    ) {
        let view = &mut self.view;
        let Some(roster) = view.fetch.roster_mut() else {
            warn!(?kind, "mutation finished for a view without a list; dropping");
            return;
        };
        let result = result.map_err(|err| err.message().to_string());

        let notice = match kind {
            MutationKind::Delete => {
                let Some(id) = employee_id else {
                    warn!("delete finished without an employee id; dropping");
                    return;
                };
                view.deletes.finish(id, result.map(|_| ()), roster)
            }
            MutationKind::Create | MutationKind::Update => {
                let Some(submission) = submission else {
                    warn!(?kind, "dialog mutation finished without a submission tag; dropping");
                    return;
                };
                view.editor.finish(submission, kind, result, roster)
            }
        };
        self.status = notice.message.clone();
        self.notices.post(notice);
    }

    fn is_current(&self, mount: MountId, event: &'static str) -> bool {
        let current = self.current_mount();
        if mount == current {
            return true;
        }
        warn!(
            event,
            mount = mount.0,
            current = current.0,
            "dropping result for unmounted view"
        );
        false
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
