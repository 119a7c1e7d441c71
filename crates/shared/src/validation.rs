//! Employee form schema: what a user may submit from the add/edit dialog.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Address, Employee},
    error::{FieldErrors, FormField},
    protocol::EmployeePayload,
};

const LOCAL_PART_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-.";

/// Raw text as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub street: String,
}

/// A form that passed validation, with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmployee {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub street: String,
}

impl EmployeeForm {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            phone: employee.phone.clone(),
            email: employee.email.clone(),
            street: employee.address.street.clone(),
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Phone => &mut self.phone,
            FormField::Email => &mut self.email,
            FormField::Street => &mut self.street,
        }
    }

    pub fn validate(&self) -> Result<ValidEmployee, FieldErrors> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let email = self.email.trim();
        let street = self.street.trim();

        let mut errors = FieldErrors::default();
        if name.is_empty() {
            errors.push(FormField::Name, "Name is required");
        }
        if phone.is_empty() {
            errors.push(FormField::Phone, "Phone is required");
        }
        if !is_valid_email(email) {
            errors.push(FormField::Email, "Invalid email address");
        }
        if street.is_empty() {
            errors.push(FormField::Street, "Address is required");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidEmployee {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            street: street.to_string(),
        })
    }
}

impl ValidEmployee {
    /// Body for a create call; only the street is known, the other address
    /// parts go out blank.
    pub fn create_payload(&self) -> EmployeePayload {
        EmployeePayload {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: Address::with_street(self.street.clone()),
        }
    }

    /// Body for an update call: the full record with the edited fields.
    pub fn update_payload(&self, current: &Employee) -> EmployeePayload {
        EmployeePayload::from(&self.apply_to(current))
    }

    /// `current` with the editable fields replaced; id, suite, city, zipcode
    /// and picture are kept.
    pub fn apply_to(&self, current: &Employee) -> Employee {
        Employee {
            id: current.id,
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: Address {
                street: self.street.clone(),
                ..current.address.clone()
            },
            profile_picture: current.profile_picture.clone(),
        }
    }
}

/// Structural email check: `local@domain.tld` with no whitespace, a
/// dot-separated domain of alphanumeric/hyphen labels and an alphabetic TLD
/// of at least two letters.
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    valid_local_part(local) && valid_domain(domain)
}

fn valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SPECIALS.contains(c))
}

fn valid_domain(domain: &str) -> bool {
    if domain.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    labels_ok && tld_ok
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
