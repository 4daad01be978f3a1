//! Flutter-facing FFI bindings for the HausMate core.

pub mod api;
