//! Command implementations

pub mod walk;
