//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{EmployeeApi, HttpEmployeeApi};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        deliver(&ui_tx, UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                deliver(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let api: Arc<dyn EmployeeApi> = match HttpEmployeeApi::with_timeout(
            &settings.api_base_url,
            settings.request_timeout(),
        ) {
            Ok(api) => Arc::new(api),
            Err(err) => {
                deliver(
                    &ui_tx,
                    UiEvent::Error(UiError::from_api_error(UiErrorContext::BackendStartup, &err)),
                );
                tracing::error!("backend worker startup failure: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            deliver(&ui_tx, UiEvent::Info("Backend worker ready".to_string()));
            tracing::info!(api = %settings.api_base_url, "backend worker ready");
            serve_commands(cmd_rx, ui_tx, api).await;
            tracing::info!("backend command queue closed; worker exiting");
        });
    });
}

/// Each command runs as its own task, so slow calls never hold up the queue
/// and independent requests overlap. Nothing is cancelled once started.
async fn serve_commands(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn EmployeeApi>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        let api = Arc::clone(&api);
        let ui_tx = ui_tx.clone();
        tokio::spawn(async move {
            let event = run_command(api.as_ref(), cmd).await;
            deliver(&ui_tx, event);
        });
    }
}

/// Hands `event` to the UI without blocking the worker. Returns false when
/// the event had to be dropped.
pub(crate) fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    let label = event.label();
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::error!(event = label, "ui event queue full; dropping backend result");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(event = label, "ui event queue closed; dropping backend result");
            false
        }
    }
}

pub(crate) async fn run_command(api: &dyn EmployeeApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadEmployees { mount } => {
            tracing::info!(mount = mount.0, "backend: load_employees");
            let result = api.list_employees().await.map_err(|err| {
                tracing::error!(mount = mount.0, "backend: load_employees failed: {err}");
                UiError::from_api_error(UiErrorContext::Load, &err)
            });
            UiEvent::EmployeesLoaded { mount, result }
        }
        BackendCommand::Mutate { mount, request } => {
            let kind = request.kind();
            let employee_id = request.employee_id();
            let submission = request.submission();
            tracing::info!(
                mount = mount.0,
                ?kind,
                employee_id = employee_id.map(|id| id.0),
                "backend: mutate"
            );
            let result = request.execute(api).await.map_err(|err| {
                tracing::error!(?kind, "backend: mutation failed: {err}");
                UiError::from_api_error(UiErrorContext::for_mutation(kind), &err)
            });
            UiEvent::MutationFinished {
                mount,
                kind,
                employee_id,
                submission,
                result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use client_core::{
        ApiError, ApiResult, MutationKind, MutationOutcome, MutationRequest, SubmissionId,
    };
    use shared::{
        domain::{Address, Employee, EmployeeId},
        protocol::EmployeePayload,
    };

    use crate::controller::events::UiErrorCategory;
    use crate::controller::reducer::MountId;

    struct StaticApi {
        available: bool,
    }

    impl StaticApi {
        fn check(&self, endpoint: &str) -> ApiResult<()> {
            if self.available {
                Ok(())
            } else {
                Err(ApiError::Status {
                    endpoint: endpoint.to_string(),
                    status: 503,
                })
            }
        }
    }

    fn alice() -> Employee {
        Employee {
            id: EmployeeId(1),
            name: "Alice".to_string(),
            phone: "555-0101".to_string(),
            email: "alice@example.com".to_string(),
            address: Address::with_street("Kulas Light"),
            profile_picture: None,
        }
    }

    #[async_trait]
    impl EmployeeApi for StaticApi {
        async fn list_employees(&self) -> ApiResult<Vec<Employee>> {
            self.check("http://fake/users")?;
            Ok(vec![alice()])
        }

        async fn create_employee(&self, _payload: &EmployeePayload) -> ApiResult<Employee> {
            self.check("http://fake/users")?;
            Ok(alice())
        }

        async fn update_employee(
            &self,
            id: EmployeeId,
            _payload: &EmployeePayload,
        ) -> ApiResult<Employee> {
            self.check(&format!("http://fake/users/{id}"))?;
            Ok(alice())
        }

        async fn delete_employee(&self, id: EmployeeId) -> ApiResult<()> {
            self.check(&format!("http://fake/users/{id}"))
        }
    }

    #[tokio::test]
    async fn load_command_answers_for_its_mount() {
        let api = StaticApi { available: true };
        let event = run_command(&api, BackendCommand::LoadEmployees { mount: MountId(7) }).await;
        match event {
            UiEvent::EmployeesLoaded { mount, result } => {
                assert_eq!(mount, MountId(7));
                assert_eq!(result.expect("loaded").len(), 1);
            }
            _ => panic!("expected EmployeesLoaded"),
        }
    }

    #[tokio::test]
    async fn failed_delete_is_reported_with_context() {
        let api = StaticApi { available: false };
        let cmd = BackendCommand::Mutate {
            mount: MountId(2),
            request: MutationRequest::Delete { id: EmployeeId(1) },
        };
        match run_command(&api, cmd).await {
            UiEvent::MutationFinished {
                kind,
                employee_id,
                result,
                ..
            } => {
                assert_eq!(kind, MutationKind::Delete);
                assert_eq!(employee_id, Some(EmployeeId(1)));
                let err = result.expect_err("service unavailable");
                assert_eq!(err.category(), UiErrorCategory::Server);
                assert_eq!(err.context(), UiErrorContext::Delete);
            }
            _ => panic!("expected MutationFinished"),
        }
    }

    #[tokio::test]
    async fn update_reports_locally_merged_record() {
        let api = StaticApi { available: true };
        let mut merged = alice();
        merged.phone = "555-0000".to_string();
        let cmd = BackendCommand::Mutate {
            mount: MountId(1),
            request: MutationRequest::Update {
                submission: SubmissionId(4),
                id: merged.id,
                payload: EmployeePayload::from(&merged),
                merged: merged.clone(),
            },
        };
        match run_command(&api, cmd).await {
            UiEvent::MutationFinished {
                submission, result, ..
            } => {
                assert_eq!(submission, Some(SubmissionId(4)));
                assert_eq!(result.expect("updated"), MutationOutcome::Updated(merged));
            }
            _ => panic!("expected MutationFinished"),
        }
    }

    #[test]
    fn deliver_reports_full_and_closed_queues() {
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(1);
        assert!(deliver(&ui_tx, UiEvent::Info("ready".to_string())));
        assert!(!deliver(
            &ui_tx,
            UiEvent::EmployeesLoaded {
                mount: MountId(1),
                result: Ok(Vec::new()),
            }
        ));
        match ui_rx.try_recv() {
            Ok(UiEvent::Info(message)) => assert_eq!(message, "ready"),
            _ => panic!("expected the first event to be queued"),
        }

        drop(ui_rx);
        assert!(!deliver(&ui_tx, UiEvent::Info("late".to_string())));
    }
}
