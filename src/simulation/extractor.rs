// src/simulation/extractor.rs

use super::results::ProbabilityMap;
use crate::core::{BasisLabel, BellError, Result, StateVector};

/// Projects a finished register onto the requested outcomes.
///
/// Each label contributes `|amplitude[label.index()]|²`. The register is only
/// read, so repeated calls with the same labels return identical maps.
///
/// # Errors
/// * `BellError::Label` if a label was parsed for a different register size.
pub fn extract(state: &StateVector, labels: &[BasisLabel]) -> Result<ProbabilityMap> {
    let mut map = ProbabilityMap::new();
    for label in labels {
        if label.num_qubits() != state.num_qubits() {
            return Err(BellError::label(
                label.to_string(),
                format!("label names {} qubits but the register holds {}", label.num_qubits(), state.num_qubits()),
            ));
        }
        let amplitude = state.amplitude(label.index()).ok_or_else(|| {
            BellError::label(label.to_string(), format!("index {} outside a register of dimension {}", label.index(), state.dim()))
        })?;
        map.insert(label.clone(), amplitude.norm_sqr())?;
    }
    Ok(map)
}

/// Parses `labels` for the register and extracts them in one step.
pub fn extract_labels<S: AsRef<str>>(state: &StateVector, labels: &[S]) -> Result<ProbabilityMap> {
    let parsed = labels
        .iter()
        .map(|label| BasisLabel::parse(label.as_ref(), state.num_qubits()))
        .collect::<Result<Vec<_>>>()?;
    extract(state, &parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QubitId;
    use crate::operations::Gate;

    fn bell_pair() -> Result<StateVector> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::Hadamard { target: QubitId(0) })?;
        state.apply(&Gate::Cnot { control: QubitId(0), target: QubitId(1) })?;
        Ok(state)
    }

    #[test]
    fn bell_pair_splits_between_agreeing_outcomes() -> Result<()> {
        let state = bell_pair()?;
        let map = extract_labels(&state, &["00", "01", "10", "11"])?;
        assert!((map.require(&BasisLabel::parse("00", 2)?)? - 0.5).abs() < 1e-12);
        assert!((map.require(&BasisLabel::parse("11", 2)?)? - 0.5).abs() < 1e-12);
        assert!(map.require(&BasisLabel::parse("01", 2)?)?.abs() < 1e-12);
        assert!(map.require(&BasisLabel::parse("10", 2)?)?.abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn subset_query_holds_only_requested_labels() -> Result<()> {
        let map = extract_labels(&bell_pair()?, &["|11>"])?;
        assert_eq!(map.len(), 1);
        Ok(())
    }

    #[test]
    fn label_for_other_register_size_is_rejected() -> Result<()> {
        let state = bell_pair()?;
        let wide = BasisLabel::parse("000", 3)?;
        assert!(matches!(extract(&state, &[wide]), Err(BellError::Label { .. })));
        assert!(matches!(extract_labels(&state, &["0"]), Err(BellError::Label { .. })));
        Ok(())
    }

    #[test]
    fn extraction_is_idempotent() -> Result<()> {
        let state = bell_pair()?;
        let labels = [BasisLabel::all_zeros(2)?, BasisLabel::all_ones(2)?];
        let first = extract(&state, &labels)?;
        let second = extract(&state, &labels)?;
        assert_eq!(first, second);
        assert_eq!(state, bell_pair()?);
        Ok(())
    }
}
