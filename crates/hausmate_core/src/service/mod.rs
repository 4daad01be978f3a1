//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate the stores into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod dashboard;
pub mod household;
