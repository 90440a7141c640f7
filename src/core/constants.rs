//! Numeric constants shared across the simulation.

/// Constants governing register limits, tolerances and the CHSH bounds.
pub mod bell_constants {
    /// Default allowed deviation of the squared norm from 1.0.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Largest register the dense state vector will allocate (2^16 amplitudes).
    pub const MAX_QUBITS: usize = 16;
    /// Upper bound of |S| for any local-hidden-variable model.
    pub const CLASSICAL_BOUND: f64 = 2.0;
    /// Upper bound of |S| reachable by quantum mechanics (2√2).
    pub const TSIRELSON_BOUND: f64 = 2.0 * std::f64::consts::SQRT_2;
}
