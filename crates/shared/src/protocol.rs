use serde::{Deserialize, Serialize};

use crate::domain::{Address, Employee};

/// Request body for create and update calls against the employee resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: Address,
}

impl From<&Employee> for EmployeePayload {
    fn from(value: &Employee) -> Self {
        Self {
            name: value.name.clone(),
            phone: value.phone.clone(),
            email: value.email.clone(),
            address: value.address.clone(),
        }
    }
}
