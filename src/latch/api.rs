//! Public API for the lifecycle latch
//!
//! This module provides the complete public API for the latch component.
//! External modules should import from here rather than directly from
//! internal modules. See the module documentation for the state machine
//! contract.

pub use crate::latch::internal::{Latch, LatchState};
pub use crate::latch::signal::Signal;
