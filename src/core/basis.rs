// src/core/basis.rs

use super::error::{BellError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// Names one classical outcome of a register, e.g. `00` or `11`.
///
/// Labels are written one character per qubit, qubit 0 first. The ket form
/// `|01>` is accepted as well. Character `k` sets bit `k` of the amplitude
/// index, so `01` (qubit 0 = 0, qubit 1 = 1) is index 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasisLabel {
    bits: String,
    index: usize,
}

impl BasisLabel {
    /// Parses `label` for a register of `num_qubits` qubits.
    ///
    /// # Errors
    /// * `BellError::Label` when the label has the wrong length, contains
    ///   characters other than `0`/`1`, or has unbalanced ket delimiters.
    pub fn parse(label: &str, num_qubits: usize) -> Result<Self> {
        let trimmed = label.trim();
        let bits = match (trimmed.strip_prefix('|'), trimmed.ends_with('>')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => trimmed,
            _ => return Err(BellError::label(label, "unbalanced ket delimiters")),
        };

        if bits.chars().count() != num_qubits {
            return Err(BellError::label(
                label,
                format!("expected {} outcome bits, found {}", num_qubits, bits.chars().count()),
            ));
        }

        let mut index = 0usize;
        for (qubit, ch) in bits.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => index |= 1 << qubit,
                other => {
                    return Err(BellError::label(label, format!("unexpected character '{}'", other)));
                }
            }
        }

        Ok(Self { bits: bits.to_string(), index })
    }

    /// Renders amplitude `index` as a label of `num_qubits` characters.
    pub fn from_index(index: usize, num_qubits: usize) -> Result<Self> {
        if num_qubits >= usize::BITS as usize || index >> num_qubits != 0 {
            return Err(BellError::label(
                index.to_string(),
                format!("index outside a register of {} qubits", num_qubits),
            ));
        }
        let bits = (0..num_qubits)
            .map(|qubit| if index & (1 << qubit) != 0 { '1' } else { '0' })
            .collect();
        Ok(Self { bits, index })
    }

    /// The outcome where every qubit reads 0.
    pub fn all_zeros(num_qubits: usize) -> Result<Self> {
        Self::from_index(0, num_qubits)
    }

    /// The outcome where every qubit reads 1.
    pub fn all_ones(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 || num_qubits >= usize::BITS as usize {
            return Err(BellError::label("", format!("no all-ones outcome for {} qubits", num_qubits)));
        }
        Self::from_index((1 << num_qubits) - 1, num_qubits)
    }

    /// Amplitude index this label selects.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of qubits the label describes.
    pub fn num_qubits(&self) -> usize {
        self.bits.len()
    }

    /// Bit string without ket delimiters.
    pub fn as_str(&self) -> &str {
        &self.bits
    }
}

impl fmt::Display for BasisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}>", self.bits)
    }
}

impl Serialize for BasisLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bits)
    }
}
