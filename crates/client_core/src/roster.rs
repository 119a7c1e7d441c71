//! In-memory employee list owned by a mounted view.

use std::collections::HashSet;

use shared::{
    domain::{Employee, EmployeeId},
    search::filter_by_name,
};
use tracing::warn;

/// Ordered employee list with unique ids. Every local mutation of the list
/// goes through these methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeRoster {
    employees: Vec<Employee>,
}

impl EmployeeRoster {
    /// Builds a roster from a fetched collection. Later duplicates of an id
    /// are dropped.
    pub fn from_employees(employees: Vec<Employee>) -> Self {
        let mut seen = HashSet::with_capacity(employees.len());
        let mut unique = Vec::with_capacity(employees.len());
        for employee in employees {
            if seen.insert(employee.id) {
                unique.push(employee);
            } else {
                warn!(employee_id = employee.id.0, "dropping duplicate employee id");
            }
        }
        Self { employees: unique }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn filtered(&self, query: &str) -> Vec<&Employee> {
        filter_by_name(&self.employees, query)
    }

    /// Puts a newly created record at the front. If the server handed back an
    /// id already present, the stale entry is replaced; returns `true` then.
    pub fn insert_created(&mut self, employee: Employee) -> bool {
        let collided = self.remove(employee.id).is_some();
        if collided {
            warn!(
                employee_id = employee.id.0,
                "server reused an existing employee id; replacing local entry"
            );
        }
        self.employees.insert(0, employee);
        collided
    }

    /// Replaces the record with the same id in place. Returns `false` when no
    /// such record exists (e.g. it was deleted meanwhile).
    pub fn replace(&mut self, employee: Employee) -> bool {
        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(slot) => {
                *slot = employee;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EmployeeId) -> Option<Employee> {
        let index = self.employees.iter().position(|e| e.id == id)?;
        Some(self.employees.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Address;

    fn employee(id: i64, name: &str) -> Employee {
        Employee {
            id: EmployeeId(id),
            name: name.to_string(),
            phone: format!("555-01{id:02}"),
            email: format!("{}@example.com", name.to_lowercase()),
            address: Address::with_street("Main St"),
            profile_picture: None,
        }
    }

    #[test]
    fn from_employees_keeps_first_of_duplicate_ids() {
        let roster = EmployeeRoster::from_employees(vec![
            employee(1, "Alice"),
            employee(2, "Bob"),
            employee(1, "Impostor"),
        ]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(EmployeeId(1)).map(|e| e.name.as_str()), Some("Alice"));
    }

    #[test]
    fn created_records_go_first() {
        let mut roster = EmployeeRoster::from_employees(vec![employee(1, "Alice")]);
        assert!(!roster.insert_created(employee(11, "Zed")));
        let ids: Vec<i64> = roster.employees().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![11, 1]);
    }

    #[test]
    fn created_record_with_reused_id_keeps_ids_unique() {
        let mut roster =
            EmployeeRoster::from_employees(vec![employee(1, "Alice"), employee(11, "First")]);
        assert!(roster.insert_created(employee(11, "Second")));
        let names: Vec<&str> = roster.employees().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "Alice"]);
    }

    #[test]
    fn replace_swaps_matching_record_only() {
        let mut roster =
            EmployeeRoster::from_employees(vec![employee(1, "Alice"), employee(2, "Bob")]);
        let mut changed = employee(1, "Alice");
        changed.phone = "555-0000".to_string();
        assert!(roster.replace(changed.clone()));
        assert_eq!(roster.get(EmployeeId(1)), Some(&changed));
        assert_eq!(roster.get(EmployeeId(2)), Some(&employee(2, "Bob")));
        assert!(!roster.replace(employee(3, "Ghost")));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn remove_by_id() {
        let mut roster =
            EmployeeRoster::from_employees(vec![employee(1, "Alice"), employee(2, "Bob")]);
        assert_eq!(roster.remove(EmployeeId(2)).map(|e| e.id), Some(EmployeeId(2)));
        assert_eq!(roster.remove(EmployeeId(2)), None);
        assert_eq!(roster.employees(), &[employee(1, "Alice")]);
    }

    #[test]
    fn filtered_uses_name_search() {
        let roster =
            EmployeeRoster::from_employees(vec![employee(1, "Alice"), employee(2, "Bob")]);
        let hits: Vec<EmployeeId> = roster.filtered("AL").iter().map(|e| e.id).collect();
        assert_eq!(hits, vec![EmployeeId(1)]);
    }
}
