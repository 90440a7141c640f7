// src/core/state.rs

use super::constants::bell_constants::{MAX_QUBITS, NORM_TOLERANCE};
use super::error::{BellError, QubitId, Result};
use crate::operations::{Gate, Matrix2, library};
use crate::validation::check_normalization;
use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// Complex amplitudes of an N-qubit register.
///
/// Index `i` encodes the classical bit pattern of the register: bit `k` of `i`
/// is the value of qubit `k`. Every gate application re-checks that the sum of
/// squared magnitudes stays within `tolerance` of 1.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
    tolerance: f64,
}

impl StateVector {
    /// Creates a register of `num_qubits` qubits in the all-zero basis state.
    ///
    /// # Errors
    /// * `BellError::Configuration` if `num_qubits` is zero or above `MAX_QUBITS`.
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_tolerance(num_qubits, NORM_TOLERANCE)
    }

    /// Same as [`StateVector::new`] with an explicit normalization tolerance.
    pub fn with_tolerance(num_qubits: usize, tolerance: f64) -> Result<Self> {
        if num_qubits == 0 {
            return Err(BellError::configuration("register size must be at least one qubit"));
        }
        if num_qubits > MAX_QUBITS {
            return Err(BellError::configuration(format!(
                "register size {} exceeds the supported maximum of {} qubits",
                num_qubits, MAX_QUBITS
            )));
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(BellError::configuration(format!(
                "normalization tolerance must be a positive finite number, got {}",
                tolerance
            )));
        }

        let mut amplitudes = vec![Complex::zero(); 1 << num_qubits];
        amplitudes[0] = Complex::one();
        Ok(Self { num_qubits, amplitudes, tolerance })
    }

    /// Builds a register from explicit amplitudes.
    ///
    /// # Errors
    /// * `BellError::Configuration` if the length is not `2^num_qubits`.
    /// * `BellError::Normalization` if the amplitudes are not normalized.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        let mut state = Self::new(num_qubits)?;
        if amplitudes.len() != state.dim() {
            return Err(BellError::configuration(format!(
                "expected {} amplitudes for {} qubits, got {}",
                state.dim(),
                num_qubits,
                amplitudes.len()
            )));
        }
        check_normalization(&amplitudes, state.tolerance)?;
        state.amplitudes = amplitudes;
        Ok(state)
    }

    /// Returns the register to |0...0>: amplitude 1 at index 0, 0 elsewhere.
    pub fn reset(&mut self) {
        self.amplitudes.iter_mut().for_each(|amp| *amp = Complex::zero());
        self.amplitudes[0] = Complex::one();
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^N).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Normalization tolerance enforced after each gate.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Amplitude at `index`, or `None` outside the register.
    pub fn amplitude(&self, index: usize) -> Option<Complex<f64>> {
        self.amplitudes.get(index).copied()
    }

    /// |amplitude|² for every basis outcome, in index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).collect()
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).sum()
    }

    /// Applies any gate of the library.
    pub fn apply(&mut self, gate: &Gate) -> Result<()> {
        match gate {
            Gate::Hadamard { target } => self.apply_single_qubit_gate(&library::hadamard(), *target),
            Gate::RotationY { target, theta } => {
                self.apply_single_qubit_gate(&library::rotation_y(*theta), *target)
            }
            Gate::Cnot { control, target } => {
                self.apply_controlled_gate(&library::pauli_x(), *control, *target)
            }
        }
    }

    /// Applies a 2x2 unitary to `qubit`.
    ///
    /// Walks every amplitude pair `(a0, a1)` whose indices differ only in the
    /// qubit's bit and replaces it with `(M00*a0 + M01*a1, M10*a0 + M11*a1)`.
    pub fn apply_single_qubit_gate(&mut self, matrix: &Matrix2, qubit: QubitId) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = qubit.mask();

        for i0 in (0..self.dim()).filter(|i| i & mask == 0) {
            let i1 = i0 | mask;
            let a0 = self.amplitudes[i0];
            let a1 = self.amplitudes[i1];
            self.amplitudes[i0] = matrix[0][0] * a0 + matrix[0][1] * a1;
            self.amplitudes[i1] = matrix[1][0] * a0 + matrix[1][1] * a1;
        }

        check_normalization(&self.amplitudes, self.tolerance)
    }

    /// Applies a 2x2 unitary to `target` inside the subspace where `control` is 1.
    ///
    /// Amplitudes whose control bit is 0 are left untouched. With Pauli-X as the
    /// matrix this is CNOT: the amplitudes of each index pair differing in the
    /// target bit are swapped.
    pub fn apply_controlled_gate(&mut self, matrix: &Matrix2, control: QubitId, target: QubitId) -> Result<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(BellError::InvalidOperation {
                message: format!("control and target of a controlled gate must differ, both are {}", control),
            });
        }
        let control_mask = control.mask();
        let target_mask = target.mask();

        for i0 in (0..self.dim()).filter(|i| i & control_mask != 0 && i & target_mask == 0) {
            let i1 = i0 | target_mask;
            let a0 = self.amplitudes[i0];
            let a1 = self.amplitudes[i1];
            self.amplitudes[i0] = matrix[0][0] * a0 + matrix[0][1] * a1;
            self.amplitudes[i1] = matrix[1][0] * a0 + matrix[1][1] * a1;
        }

        check_normalization(&self.amplitudes, self.tolerance)
    }

    fn check_qubit(&self, qubit: QubitId) -> Result<()> {
        if qubit.0 >= self.num_qubits {
            return Err(BellError::Dimension {
                qubit,
                message: format!("register holds {} qubits", self.num_qubits),
            });
        }
        Ok(())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-12;

    fn assert_amplitudes(actual: &[Complex<f64>], expected: &[Complex<f64>]) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).norm() < TEST_TOLERANCE, "Mismatch at index {}: {} vs {}", i, a, e);
        }
    }

    fn c(re: f64) -> Complex<f64> {
        Complex::new(re, 0.0)
    }

    #[test]
    fn new_register_is_all_zero_state() -> Result<()> {
        let state = StateVector::new(2)?;
        assert_eq!(state.dim(), 4);
        assert_amplitudes(state.amplitudes(), &[c(1.0), c(0.0), c(0.0), c(0.0)]);
        Ok(())
    }

    #[test]
    fn invalid_register_sizes_are_configuration_errors() {
        assert!(matches!(StateVector::new(0), Err(BellError::Configuration { .. })));
        assert!(matches!(StateVector::new(MAX_QUBITS + 1), Err(BellError::Configuration { .. })));
        assert!(matches!(StateVector::with_tolerance(2, 0.0), Err(BellError::Configuration { .. })));
        assert!(matches!(StateVector::with_tolerance(2, f64::NAN), Err(BellError::Configuration { .. })));
    }

    #[test]
    fn hadamard_on_qubit_one_touches_bit_one() -> Result<()> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::Hadamard { target: QubitId(1) })?;
        // |00> -> (|00> + |10>)/√2 with qubit 1 on bit 1, i.e. indices 0 and 2
        assert_amplitudes(state.amplitudes(), &[c(FRAC_1_SQRT_2), c(0.0), c(FRAC_1_SQRT_2), c(0.0)]);
        Ok(())
    }

    #[test]
    fn cnot_swaps_only_where_control_is_set() -> Result<()> {
        let amps = vec![c(0.1), c(0.3), c(0.5), c(0.0)];
        let norm = amps.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
        let amps: Vec<_> = amps.into_iter().map(|a| a / norm).collect();
        let mut state = StateVector::from_amplitudes(2, amps.clone())?;

        state.apply(&Gate::Cnot { control: QubitId(0), target: QubitId(1) })?;
        // Control bit 0 set at indices 1 and 3; those two swap.
        assert_amplitudes(state.amplitudes(), &[amps[0], amps[3], amps[2], amps[1]]);
        Ok(())
    }

    #[test]
    fn out_of_range_qubit_is_dimension_error() -> Result<()> {
        let mut state = StateVector::new(2)?;
        let err = state.apply(&Gate::Hadamard { target: QubitId(2) }).unwrap_err();
        assert!(matches!(err, BellError::Dimension { qubit: QubitId(2), .. }));

        let err = state.apply(&Gate::Cnot { control: QubitId(0), target: QubitId(5) }).unwrap_err();
        assert!(matches!(err, BellError::Dimension { qubit: QubitId(5), .. }));
        Ok(())
    }

    #[test]
    fn controlled_gate_rejects_shared_qubit() -> Result<()> {
        let mut state = StateVector::new(2)?;
        let err = state.apply(&Gate::Cnot { control: QubitId(1), target: QubitId(1) }).unwrap_err();
        assert!(matches!(err, BellError::InvalidOperation { .. }));
        Ok(())
    }

    #[test]
    fn non_unitary_matrix_is_normalization_error() -> Result<()> {
        let mut state = StateVector::new(1)?;
        let doubling = [[c(2.0), c(0.0)], [c(0.0), c(2.0)]];
        let err = state.apply_single_qubit_gate(&doubling, QubitId(0)).unwrap_err();
        assert!(matches!(err, BellError::Normalization { .. }));
        Ok(())
    }

    #[test]
    fn reset_discards_previous_evolution() -> Result<()> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::Hadamard { target: QubitId(0) })?;
        state.apply(&Gate::Cnot { control: QubitId(0), target: QubitId(1) })?;
        state.reset();
        assert_eq!(state, StateVector::new(2)?);
        Ok(())
    }

    #[test]
    fn from_amplitudes_checks_length_and_norm() {
        assert!(matches!(
            StateVector::from_amplitudes(2, vec![c(1.0), c(0.0)]),
            Err(BellError::Configuration { .. })
        ));
        assert!(matches!(
            StateVector::from_amplitudes(1, vec![c(1.0), c(1.0)]),
            Err(BellError::Normalization { .. })
        ));
    }
}
