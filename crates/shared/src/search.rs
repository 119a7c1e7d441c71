//! Client-side name search over an employee list.

use crate::domain::Employee;

/// Employees whose name contains `query`, ignoring case. Order is preserved
/// and an empty query matches everyone.
pub fn filter_by_name<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let needle = query.to_lowercase();
    employees
        .iter()
        .filter(|employee| name_matches(&employee.name, &needle))
        .collect()
}

pub fn filter_by_name_owned(employees: &[Employee], query: &str) -> Vec<Employee> {
    filter_by_name(employees, query)
        .into_iter()
        .cloned()
        .collect()
}

fn name_matches(name: &str, lowered_query: &str) -> bool {
    lowered_query.is_empty() || name.to_lowercase().contains(lowered_query)
}
