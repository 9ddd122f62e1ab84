//! Test modules for the work queue
//!
//! Tests are organised by functional area: ordered processing, lifecycle
//! control, concurrent producers and configuration edge cases.

mod support;

mod core_functionality;
