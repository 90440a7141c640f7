//! Error handling logic

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Position of a qubit inside a register.
/// Qubit `k` owns bit `k` of every amplitude index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub usize);

impl QubitId {
    /// Bit mask selecting this qubit inside an amplitude index.
    pub fn mask(&self) -> usize {
        1 << self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Failures raised while building or running the experiment.
///
/// Every failure surfaces synchronously to the immediate caller. The
/// computation is deterministic, so nothing here is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BellError {
    /// A gate references a qubit outside the configured register size.
    #[error("Dimension Error ({qubit}): {message}")]
    Dimension {
        /// Offending qubit
        qubit: QubitId,
        /// Dimension failure message
        message: String,
    },

    /// Amplitude magnitudes drifted away from a unit norm after a gate.
    /// Signals a defect in a gate definition; results downstream are meaningless.
    #[error("Normalization Error: {message}")]
    Normalization {
        /// Normalization failure message
        message: String,
    },

    /// A basis label does not name a valid outcome of the register.
    #[error("Label Error ('{label}'): {message}")]
    Label {
        /// The label as supplied by the caller
        label: String,
        /// Label failure message
        message: String,
    },

    /// Invalid construction parameters (register size, angles, tolerance).
    #[error("Configuration Error: {message}")]
    Configuration {
        /// Configuration failure message
        message: String,
    },

    /// A structurally invalid request, such as a controlled gate whose
    /// control and target coincide.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },
}

impl BellError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        BellError::Configuration { message: message.into() }
    }

    pub(crate) fn label(label: impl Into<String>, message: impl Into<String>) -> Self {
        BellError::Label { label: label.into(), message: message.into() }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BellError>;
