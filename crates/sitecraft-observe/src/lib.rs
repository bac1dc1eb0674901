//! Tracing/logging bootstrap shared by the service binary.

pub mod tracing_setup;
