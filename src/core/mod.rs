// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod basis;
pub mod state;

// Re-export public types for convenient access via `bellsim::core::TypeName`
pub use error::{BellError, QubitId, Result};
pub use basis::BasisLabel;
pub use state::StateVector;

pub mod constants;
pub use constants::bell_constants::{CLASSICAL_BOUND, MAX_QUBITS, NORM_TOLERANCE, TSIRELSON_BOUND};
