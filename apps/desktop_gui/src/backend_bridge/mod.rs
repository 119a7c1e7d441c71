//! Bridge between the egui thread and the async employee API worker.

pub mod commands;
pub mod runtime;
