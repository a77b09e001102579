//! Core types and utilities for treeignore
//!
//! This module contains the error handling shared by the rule engine,
//! the configuration layer and the command-line front end.

pub mod error;

// Re-export commonly used items
pub use error::{Result, TreeIgnoreError};
