//! One-shot employee collection load for a mounted view.

use shared::domain::Employee;
use tracing::{error, info};

use crate::{api::EmployeeApi, error::ApiResult, roster::EmployeeRoster};

/// Observable state of the collection load. `Failed` is terminal for the
/// mount: there is no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Loading,
    Failed(String),
    Ready(EmployeeRoster),
}

impl FetchState {
    pub fn from_result(result: ApiResult<Vec<Employee>>) -> Self {
        match result {
            Ok(employees) => FetchState::Ready(EmployeeRoster::from_employees(employees)),
            Err(err) => FetchState::Failed(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn roster(&self) -> Option<&EmployeeRoster> {
        match self {
            FetchState::Ready(roster) => Some(roster),
            _ => None,
        }
    }

    pub fn roster_mut(&mut self) -> Option<&mut EmployeeRoster> {
        match self {
            FetchState::Ready(roster) => Some(roster),
            _ => None,
        }
    }
}

/// Issues exactly one list request and settles into `Ready` or `Failed`.
pub async fn fetch_employees(api: &dyn EmployeeApi) -> FetchState {
    let result = api.list_employees().await;
    match &result {
        Ok(employees) => info!(count = employees.len(), "employee collection loaded"),
        Err(err) => error!("employee collection load failed: {err}"),
    }
    FetchState::from_result(result)
}
