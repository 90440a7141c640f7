// src/operations/mod.rs

//! The fixed gate set of the experiment.
//!
//! A `Gate` is an immutable description of a unitary: which qubits it acts on
//! and, for rotations, the angle. The matrices themselves live in [`library`]
//! and carry no state.

pub mod library;

use crate::core::{BellError, QubitId, Result};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2x2 complex matrix acting on one qubit.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

/// A gate applied to a register.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)] // f64 angle rules out Eq
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum Gate {
    /// Hadamard on a single qubit: `1/√2 [[1, 1], [1, -1]]`.
    Hadamard {
        /// Qubit receiving the gate.
        target: QubitId,
    },

    /// Rotation about the Y axis by `theta` radians.
    /// Any real angle is accepted; the matrix is periodic in `theta`.
    RotationY {
        /// Qubit receiving the gate.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },

    /// Controlled-NOT: flips `target` in the subspace where `control` is 1.
    Cnot {
        /// Qubit whose value conditions the flip.
        control: QubitId,
        /// Qubit that is flipped.
        target: QubitId,
    },
}

impl Gate {
    /// Returns all qubits the gate acts on, control first for CNOT.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Hadamard { target } | Gate::RotationY { target, .. } => vec![*target],
            Gate::Cnot { control, target } => vec![*control, *target],
        }
    }

    /// The 2x2 matrix applied to the target qubit (inside the control-1
    /// subspace for CNOT).
    pub fn matrix(&self) -> Matrix2 {
        match self {
            Gate::Hadamard { .. } => library::hadamard(),
            Gate::RotationY { theta, .. } => library::rotation_y(*theta),
            Gate::Cnot { .. } => library::pauli_x(),
        }
    }

    /// Short symbol used in circuit diagrams.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::Hadamard { .. } => "H",
            Gate::RotationY { .. } => "RY",
            Gate::Cnot { .. } => "X",
        }
    }

    /// Checks the gate against a register of `num_qubits` qubits.
    ///
    /// # Errors
    /// * `BellError::Dimension` if a qubit lies outside the register.
    /// * `BellError::InvalidOperation` if CNOT control and target coincide.
    /// * `BellError::Configuration` if a rotation angle is not finite.
    pub fn validate(&self, num_qubits: usize) -> Result<()> {
        for qubit in self.qubits() {
            if qubit.0 >= num_qubits {
                return Err(BellError::Dimension {
                    qubit,
                    message: format!("gate {} targets a register of {} qubits", self, num_qubits),
                });
            }
        }
        match self {
            Gate::Cnot { control, target } if control == target => Err(BellError::InvalidOperation {
                message: format!("CNOT control and target are both {}", control),
            }),
            Gate::RotationY { theta, .. } if !theta.is_finite() => Err(BellError::configuration(format!(
                "rotation angle must be a finite real, got {}",
                theta
            ))),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Hadamard { target } => write!(f, "H({})", target),
            Gate::RotationY { target, theta } => write!(f, "RY({}, {:.6})", target, theta),
            Gate::Cnot { control, target } => write!(f, "CNOT({} -> {})", control, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qubits_lists_control_first() {
        let gate = Gate::Cnot { control: QubitId(1), target: QubitId(0) };
        assert_eq!(gate.qubits(), vec![QubitId(1), QubitId(0)]);
    }

    #[test]
    fn validate_catches_each_failure() {
        assert!(Gate::Hadamard { target: QubitId(1) }.validate(2).is_ok());
        assert!(matches!(
            Gate::Hadamard { target: QubitId(2) }.validate(2),
            Err(BellError::Dimension { .. })
        ));
        assert!(matches!(
            Gate::Cnot { control: QubitId(0), target: QubitId(0) }.validate(2),
            Err(BellError::InvalidOperation { .. })
        ));
        assert!(matches!(
            Gate::RotationY { target: QubitId(0), theta: f64::INFINITY }.validate(2),
            Err(BellError::Configuration { .. })
        ));
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(Gate::Cnot { control: QubitId(0), target: QubitId(1) }.to_string(), "CNOT(q0 -> q1)");
        assert_eq!(Gate::RotationY { target: QubitId(1), theta: 0.5 }.to_string(), "RY(q1, 0.500000)");
    }
}
