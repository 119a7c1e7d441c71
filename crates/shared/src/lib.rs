//! Types shared between the employee desk client crates.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod search;
pub mod validation;
