//! UI layer for the employee desk: app shell, sidebar, views, dialogs, and theme.

pub mod app;
pub mod modal;
pub mod sidebar;
pub mod theme;
pub mod views;

pub use app::{EmployeeDeskApp, StartupConfig};
