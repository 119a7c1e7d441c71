//! Backend commands queued from UI to backend worker.

use client_core::MutationRequest;

use crate::controller::reducer::MountId;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    LoadEmployees {
        mount: MountId,
    },
    Mutate {
        mount: MountId,
        request: MutationRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadEmployees { .. } => "load_employees",
            BackendCommand::Mutate { request, .. } => match request {
                MutationRequest::Create { .. } => "create_employee",
                MutationRequest::Update { .. } => "update_employee",
                MutationRequest::Delete { .. } => "delete_employee",
            },
        }
    }
}
