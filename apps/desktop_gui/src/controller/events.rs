//! Backend-to-UI events and error modeling for the employee desk controller.

use client_core::{ApiError, MutationKind, MutationOutcome, SubmissionId};
use shared::domain::{Employee, EmployeeId};

use crate::controller::reducer::MountId;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    EmployeesLoaded {
        mount: MountId,
        result: Result<Vec<Employee>, UiError>,
    },
    MutationFinished {
        mount: MountId,
        kind: MutationKind,
        employee_id: Option<EmployeeId>,
        submission: Option<SubmissionId>,
        result: Result<MutationOutcome, UiError>,
    },
}

impl UiEvent {
    pub fn label(&self) -> &'static str {
        match self {
            UiEvent::Info(_) => "info",
            UiEvent::Error(_) => "error",
            UiEvent::EmployeesLoaded { .. } => "employees_loaded",
            UiEvent::MutationFinished { .. } => "mutation_finished",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    NotFound,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Load,
    Create,
    Update,
    Delete,
}

impl UiErrorContext {
    pub fn for_mutation(kind: MutationKind) -> Self {
        match kind {
            MutationKind::Create => UiErrorContext::Create,
            MutationKind::Update => UiErrorContext::Update,
            MutationKind::Delete => UiErrorContext::Delete,
        }
    }
}

pub fn classify_load_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure") {
        "Backend worker startup failure; check the API settings and relaunch.".to_string()
    } else if lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
        || lower.contains("error sending request")
    {
        "Employee service unreachable; check the network or API URL.".to_string()
    } else {
        format!("Could not load employees: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_api_error(context: UiErrorContext, err: &ApiError) -> Self {
        let category = match err {
            ApiError::Transport { .. } | ApiError::ClientBuild(_) => UiErrorCategory::Transport,
            ApiError::Status { status: 404, .. } => UiErrorCategory::NotFound,
            ApiError::Status { status, .. } if *status >= 500 => UiErrorCategory::Server,
            ApiError::Status { .. } | ApiError::Decode { .. } => UiErrorCategory::Unknown,
            ApiError::InvalidBaseUrl { .. } => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("404") || message_lower.contains("not found") {
            UiErrorCategory::NotFound
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("http 5") {
            UiErrorCategory::Server
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_codes_map_to_categories() {
        let not_found = ApiError::Status {
            endpoint: "http://x/users/9".to_string(),
            status: 404,
        };
        let server = ApiError::Status {
            endpoint: "http://x/users/9".to_string(),
            status: 500,
        };
        assert_eq!(
            UiError::from_api_error(UiErrorContext::Delete, &not_found).category(),
            UiErrorCategory::NotFound
        );
        let err = UiError::from_api_error(UiErrorContext::Update, &server);
        assert_eq!(err.category(), UiErrorCategory::Server);
        assert_eq!(err.context(), UiErrorContext::Update);
        assert!(err.message().contains("HTTP 500"));
    }

    #[test]
    fn classifies_command_queue_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::Load,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn load_failures_get_actionable_wording() {
        assert_eq!(
            classify_load_failure("request to http://x failed: error sending request"),
            "Employee service unreachable; check the network or API URL."
        );
        assert!(classify_load_failure("http://x returned HTTP 500").starts_with("Could not load"));
    }
}
