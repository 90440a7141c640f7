// src/simulation/results.rs
use crate::core::{BasisLabel, BellError, Result};
use crate::validation::check_probability;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Slack allowed on either side of [0, 1] for rounding in |amplitude|².
const PROBABILITY_TOLERANCE: f64 = 1e-12;

/// Probability mass on a set of named outcomes, produced fresh per trial.
///
/// The map may hold only the outcomes of interest, so its values need not
/// sum to one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProbabilityMap {
    probabilities: BTreeMap<BasisLabel, f64>,
}

impl ProbabilityMap {
    /// Creates a new, empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `probability` for `label`, replacing any previous value.
    ///
    /// # Errors
    /// * `BellError::Normalization` if the value is not a probability.
    pub fn insert(&mut self, label: BasisLabel, probability: f64) -> Result<()> {
        check_probability(probability, PROBABILITY_TOLERANCE)?;
        self.probabilities.insert(label, probability);
        Ok(())
    }

    /// Gets the probability recorded for `label`.
    pub fn get(&self, label: &BasisLabel) -> Option<f64> {
        self.probabilities.get(label).copied()
    }

    /// Like [`ProbabilityMap::get`], but a missing label is a `LabelError`.
    pub fn require(&self, label: &BasisLabel) -> Result<f64> {
        self.get(label).ok_or_else(|| {
            BellError::label(label.to_string(), "outcome was not extracted into this probability map")
        })
    }

    /// Sum of all recorded probabilities.
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Entries ordered by label.
    pub fn iter(&self) -> impl Iterator<Item = (&BasisLabel, f64)> {
        self.probabilities.iter().map(|(label, p)| (label, *p))
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

impl fmt::Display for ProbabilityMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Printing probability map of size {}", self.len())?;
        for (label, probability) in self.iter() {
            writeln!(f, "{} : {:.6}", label, probability)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> BasisLabel {
        BasisLabel::parse(s, 2).unwrap()
    }

    #[test]
    fn insert_replaces_and_totals() -> Result<()> {
        let mut map = ProbabilityMap::new();
        map.insert(label("00"), 0.25)?;
        map.insert(label("11"), 0.5)?;
        map.insert(label("00"), 0.125)?;
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&label("00")), Some(0.125));
        assert!((map.total() - 0.625).abs() < 1e-15);
        Ok(())
    }

    #[test]
    fn rejects_values_outside_unit_interval() {
        let mut map = ProbabilityMap::new();
        assert!(map.insert(label("00"), -0.5).is_err());
        assert!(map.insert(label("00"), 1.5).is_err());
        assert!(map.insert(label("00"), f64::NAN).is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn require_reports_missing_label() {
        let map = ProbabilityMap::new();
        assert!(matches!(map.require(&label("01")), Err(BellError::Label { .. })));
    }

    #[test]
    fn display_lists_labels_in_order() -> Result<()> {
        let mut map = ProbabilityMap::new();
        map.insert(label("11"), 0.5)?;
        map.insert(label("00"), 0.5)?;
        let text = map.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Printing probability map of size 2", "|00> : 0.500000", "|11> : 0.500000"]);
        Ok(())
    }

    #[test]
    fn serializes_as_label_keyed_object() -> Result<()> {
        let mut map = ProbabilityMap::new();
        map.insert(label("00"), 0.25)?;
        let json = serde_json::to_string(&map).map_err(|e| BellError::configuration(e.to_string()))?;
        assert_eq!(json, r#"{"00":0.25}"#);
        Ok(())
    }
}
