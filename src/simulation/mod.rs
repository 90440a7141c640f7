// src/simulation/mod.rs

//! Runs gate sequences on owned registers and reads out outcome probabilities.
//!
//! Measurement here is analytic: probabilities are computed from the final
//! amplitudes, nothing is sampled and nothing collapses.

mod results;
mod extractor;

pub use results::ProbabilityMap;
pub use extractor::{extract, extract_labels};

use crate::circuits::Circuit;
use crate::core::{BellError, NORM_TOLERANCE, Result, StateVector};
use tracing::trace;

/// Entry point for running trials on a register of fixed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulator {
    num_qubits: usize,
    tolerance: f64,
}

impl Simulator {
    /// Creates a simulator for registers of `num_qubits` qubits.
    ///
    /// # Errors
    /// * `BellError::Configuration` if no register of that size can be built.
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_tolerance(num_qubits, NORM_TOLERANCE)
    }

    /// Same as [`Simulator::new`] with an explicit normalization tolerance.
    pub fn with_tolerance(num_qubits: usize, tolerance: f64) -> Result<Self> {
        // Building a throwaway register runs every construction check up front.
        StateVector::with_tolerance(num_qubits, tolerance)?;
        Ok(Self { num_qubits, tolerance })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// A fresh register in |0...0> sized for this simulator.
    pub fn register(&self) -> Result<StateVector> {
        StateVector::with_tolerance(self.num_qubits, self.tolerance)
    }

    /// Runs one trial on `register`.
    ///
    /// The register is reset to |0...0> (the preparation step) and then every
    /// gate of `circuit` is applied in order. The whole circuit is validated
    /// first, so an invalid gate leaves the register untouched.
    ///
    /// # Errors
    /// * `BellError::Configuration` if `register` does not match this simulator.
    /// * Any gate validation or normalization error, aborting the trial.
    pub fn run_trial(&self, register: &mut StateVector, circuit: &Circuit) -> Result<()> {
        if register.num_qubits() != self.num_qubits {
            return Err(BellError::configuration(format!(
                "simulator is configured for {} qubits but the register holds {}",
                self.num_qubits,
                register.num_qubits()
            )));
        }
        circuit.validate(self.num_qubits)?;

        register.reset();
        for gate in circuit.gates() {
            register.apply(gate)?;
            trace!(%gate, norm_sqr = register.norm_sqr(), "applied gate");
        }
        Ok(())
    }

    /// Runs `circuit` on a fresh register and returns the final state.
    pub fn run(&self, circuit: &Circuit) -> Result<StateVector> {
        let mut register = self.register()?;
        self.run_trial(&mut register, circuit)?;
        Ok(register)
    }
}
