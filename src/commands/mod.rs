//! Command implementations

pub mod view;
