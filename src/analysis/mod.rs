// src/analysis/mod.rs

//! Correlation and CHSH statistics.
//!
//! A correlation `E` for one pair of analyzer settings is
//! `2 * P(agree) - 1`, where the agreeing outcomes are the all-zeros and
//! all-ones readings. Four correlations combine into
//! `S = E1 - E2 + E3 + E4`.

use crate::core::{BasisLabel, BellError, CLASSICAL_BOUND, Result, TSIRELSON_BOUND};
use crate::simulation::ProbabilityMap;
use serde::Serialize;

/// Turns probability maps into correlation values for one register size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationEngine {
    agree: [BasisLabel; 2],
}

impl CorrelationEngine {
    /// Engine whose agreeing outcomes are all-zeros and all-ones of an
    /// `num_qubits` register (`00` and `11` for a pair).
    pub fn for_register(num_qubits: usize) -> Result<Self> {
        Ok(Self {
            agree: [BasisLabel::all_zeros(num_qubits)?, BasisLabel::all_ones(num_qubits)?],
        })
    }

    /// The outcomes that count as agreement. Extract these before correlating.
    pub fn agree_labels(&self) -> &[BasisLabel] {
        &self.agree
    }

    /// `2 * (P(all zeros) + P(all ones)) - 1`.
    ///
    /// Other entries of the map are ignored. Given non-negative probabilities
    /// summing to at most one over the two labels, the result lies in [-1, 1].
    ///
    /// # Errors
    /// * `BellError::Label` if either agreeing outcome is absent from the map;
    ///   a missing outcome is never treated as zero probability.
    pub fn correlation(&self, probabilities: &ProbabilityMap) -> Result<f64> {
        let agree = self
            .agree
            .iter()
            .map(|label| probabilities.require(label))
            .sum::<Result<f64>>()?;
        Ok(2.0 * agree - 1.0)
    }
}

/// `S = e_ab - e_ab_prime + e_a_prime_b + e_a_prime_b_prime`.
///
/// Inputs are matched by role, in the order the four settings are measured:
/// (a, b), (a, b'), (a', b), (a', b').
///
/// # Errors
/// * `BellError::InvalidOperation` if any input is not finite.
pub fn chsh(e_ab: f64, e_ab_prime: f64, e_a_prime_b: f64, e_a_prime_b_prime: f64) -> Result<f64> {
    let inputs = [e_ab, e_ab_prime, e_a_prime_b, e_a_prime_b_prime];
    if let Some(bad) = inputs.iter().find(|e| !e.is_finite()) {
        return Err(BellError::InvalidOperation {
            message: format!("CHSH inputs must be finite reals, got {}", bad),
        });
    }
    Ok(e_ab - e_ab_prime + e_a_prime_b + e_a_prime_b_prime)
}

/// The CHSH value together with its interpretation against the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChshStatistic {
    pub s: f64,
    /// |S| > 2: no local-hidden-variable model reproduces the correlations.
    pub violates_classical_bound: bool,
    /// |S| <= 2√2 within `tolerance`.
    pub within_tsirelson_bound: bool,
}

impl ChshStatistic {
    /// Computes S from the four correlations and classifies it.
    pub fn from_correlations(correlations: [f64; 4], tolerance: f64) -> Result<Self> {
        let [e_ab, e_ab_prime, e_a_prime_b, e_a_prime_b_prime] = correlations;
        let s = chsh(e_ab, e_ab_prime, e_a_prime_b, e_a_prime_b_prime)?;
        Ok(Self {
            s,
            violates_classical_bound: s.abs() > CLASSICAL_BOUND + tolerance,
            within_tsirelson_bound: s.abs() <= TSIRELSON_BOUND + tolerance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(p00: f64, p11: f64) -> Result<ProbabilityMap> {
        let mut map = ProbabilityMap::new();
        map.insert(BasisLabel::parse("00", 2)?, p00)?;
        map.insert(BasisLabel::parse("11", 2)?, p11)?;
        Ok(map)
    }

    #[test]
    fn perfect_agreement_and_disagreement() -> Result<()> {
        let engine = CorrelationEngine::for_register(2)?;
        assert_eq!(engine.correlation(&map(0.5, 0.5)?)?, 1.0);
        assert_eq!(engine.correlation(&map(0.0, 0.0)?)?, -1.0);
        assert_eq!(engine.correlation(&map(0.25, 0.25)?)?, 0.0);
        Ok(())
    }

    #[test]
    fn extra_outcomes_are_ignored() -> Result<()> {
        let engine = CorrelationEngine::for_register(2)?;
        let mut probabilities = map(0.3, 0.2)?;
        probabilities.insert(BasisLabel::parse("01", 2)?, 0.5)?;
        assert!((engine.correlation(&probabilities)? - 0.0).abs() < 1e-15);
        Ok(())
    }

    #[test]
    fn missing_agree_label_is_an_error() -> Result<()> {
        let engine = CorrelationEngine::for_register(2)?;
        let mut probabilities = ProbabilityMap::new();
        probabilities.insert(BasisLabel::parse("00", 2)?, 0.5)?;
        assert!(matches!(engine.correlation(&probabilities), Err(BellError::Label { .. })));
        Ok(())
    }

    #[test]
    fn agree_labels_generalize_to_wider_registers() -> Result<()> {
        let engine = CorrelationEngine::for_register(3)?;
        let labels: Vec<&str> = engine.agree_labels().iter().map(|l| l.as_str()).collect();
        assert_eq!(labels, vec!["000", "111"]);
        Ok(())
    }

    #[test]
    fn chsh_combines_by_role() -> Result<()> {
        assert_eq!(chsh(1.0, 0.0, 0.0, 0.0)?, 1.0);
        assert_eq!(chsh(0.0, 1.0, 0.0, 0.0)?, -1.0);
        assert_eq!(chsh(0.0, 0.0, 1.0, 0.0)?, 1.0);
        assert_eq!(chsh(0.0, 0.0, 0.0, 1.0)?, 1.0);
        Ok(())
    }

    #[test]
    fn chsh_rejects_non_finite_input() {
        assert!(matches!(chsh(f64::NAN, 0.0, 0.0, 0.0), Err(BellError::InvalidOperation { .. })));
        assert!(chsh(0.0, 0.0, f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn statistic_classifies_bounds() -> Result<()> {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let quantum = ChshStatistic::from_correlations([h, -h, h, h], 1e-9)?;
        assert!(quantum.violates_classical_bound && quantum.within_tsirelson_bound);

        let classical = ChshStatistic::from_correlations([1.0, 1.0, 1.0, 1.0], 1e-9)?;
        assert_eq!(classical.s, 2.0);
        assert!(!classical.violates_classical_bound);

        let impossible = ChshStatistic::from_correlations([1.0, -1.0, 1.0, 1.0], 1e-9)?;
        assert!(!impossible.within_tsirelson_bound);
        Ok(())
    }
}
