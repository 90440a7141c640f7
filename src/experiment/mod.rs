// src/experiment/mod.rs

//! The four-setting CHSH experiment.
//!
//! Each setting is one independent trial: reset, entangle, rotate, extract the
//! agreeing outcomes, correlate. Trials run in parallel on owned registers and
//! are recombined by role, never by completion order.

use crate::analysis::{ChshStatistic, CorrelationEngine};
use crate::circuits::Circuit;
use crate::core::{BellError, NORM_TOLERANCE, Result};
use crate::simulation::{ProbabilityMap, Simulator, extract};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// The experiment always runs on one entangled pair.
pub const REGISTER_QUBITS: usize = 2;

/// How an analyzer angle becomes a Y-rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AngleConvention {
    /// The angle is a polarizer orientation and drives `RY(2θ)`.
    /// Correlations follow `cos(2(θa - θb))`.
    #[default]
    Polarizer,
    /// The angle is passed to `RY(θ)` unchanged.
    /// Correlations follow `cos(θa - θb)`.
    Rotation,
}

impl AngleConvention {
    /// Rotation angle applied for analyzer angle `angle`.
    pub fn rotation_angle(self, angle: f64) -> f64 {
        match self {
            AngleConvention::Polarizer => 2.0 * angle,
            AngleConvention::Rotation => angle,
        }
    }
}

/// Named angle tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// a=0, a'=π/4, b=π/8, b'=3π/8.
    #[default]
    Standard,
    /// a=3π/4, a'=π/4, b=π/2, b'=0.
    Alternate,
}

/// One measurement setting: which angles Alice and Bob use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Setting {
    AB,
    ABPrime,
    APrimeB,
    APrimeBPrime,
}

impl Setting {
    /// The four settings in measurement order.
    pub const ALL: [Setting; 4] = [Setting::AB, Setting::ABPrime, Setting::APrimeB, Setting::APrimeBPrime];

    pub fn label(self) -> &'static str {
        match self {
            Setting::AB => "E(a,b)",
            Setting::ABPrime => "E(a,b')",
            Setting::APrimeB => "E(a',b)",
            Setting::APrimeBPrime => "E(a',b')",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Angles and numeric settings of one experiment run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Alice's first analyzer angle (radians).
    pub a: f64,
    /// Alice's second analyzer angle (radians).
    pub a_prime: f64,
    /// Bob's first analyzer angle (radians).
    pub b: f64,
    /// Bob's second analyzer angle (radians).
    pub b_prime: f64,
    pub convention: AngleConvention,
    /// Allowed drift of the squared norm after each gate.
    pub tolerance: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self::preset(Preset::Standard)
    }
}

impl ExperimentConfig {
    pub fn preset(preset: Preset) -> Self {
        let (a, a_prime, b, b_prime) = match preset {
            Preset::Standard => (0.0, PI / 4.0, PI / 8.0, 3.0 * PI / 8.0),
            Preset::Alternate => (3.0 * PI / 4.0, PI / 4.0, PI / 2.0, 0.0),
        };
        Self {
            a,
            a_prime,
            b,
            b_prime,
            convention: AngleConvention::default(),
            tolerance: NORM_TOLERANCE,
        }
    }

    /// Reads a JSON config. Missing fields fall back to the standard preset.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BellError::configuration(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| BellError::configuration(format!("invalid experiment config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects non-finite angles and unusable tolerances.
    pub fn validate(&self) -> Result<()> {
        let angles = [("a", self.a), ("a'", self.a_prime), ("b", self.b), ("b'", self.b_prime)];
        for (name, angle) in angles {
            if !angle.is_finite() {
                return Err(BellError::configuration(format!(
                    "angle {} must be a finite real, got {}",
                    name, angle
                )));
            }
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(BellError::configuration(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Analyzer angles (Alice, Bob) of `setting`.
    pub fn angles(&self, setting: Setting) -> (f64, f64) {
        match setting {
            Setting::AB => (self.a, self.b),
            Setting::ABPrime => (self.a, self.b_prime),
            Setting::APrimeB => (self.a_prime, self.b),
            Setting::APrimeBPrime => (self.a_prime, self.b_prime),
        }
    }

    /// The gate sequence measured for `setting`.
    pub fn circuit(&self, setting: Setting) -> Circuit {
        let (alice, bob) = self.angles(setting);
        Circuit::bell_rotation(
            self.convention.rotation_angle(alice),
            self.convention.rotation_angle(bob),
        )
    }
}

/// Outcome of one setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialResult {
    pub setting: Setting,
    pub alice_angle: f64,
    pub bob_angle: f64,
    pub probabilities: ProbabilityMap,
    pub correlation: f64,
}

/// Results of all four settings plus the CHSH statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChshReport {
    pub config: ExperimentConfig,
    pub trials: Vec<TrialResult>,
    pub statistic: ChshStatistic,
}

impl ChshReport {
    /// Correlation of `setting`.
    pub fn correlation(&self, setting: Setting) -> Option<f64> {
        self.trials
            .iter()
            .find(|trial| trial.setting == setting)
            .map(|trial| trial.correlation)
    }

    pub fn s(&self) -> f64 {
        self.statistic.s
    }

    /// The correlation line, the formula and the value of S.
    pub fn summary(&self) -> String {
        let correlations: Vec<String> = self
            .trials
            .iter()
            .map(|trial| format!("{}={:.6}", trial.setting, trial.correlation))
            .collect();
        format!(
            "{}\nS=E(a,b)-E(a,b')+E(a',b)+E(a',b')\nIf |S|>2, QM predicts violation of Bell's Inequality:\nS={:.6}\n",
            correlations.join(", "),
            self.statistic.s
        )
    }
}

impl fmt::Display for ChshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trial in &self.trials {
            write!(f, "{}", trial.probabilities)?;
        }
        write!(f, "{}", self.summary())
    }
}

/// Runs the four-setting experiment.
///
/// # Errors
/// * `BellError::Configuration` for an invalid config.
/// * The first error raised by any trial; the experiment is aborted.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ChshReport> {
    config.validate()?;
    let simulator = Simulator::with_tolerance(REGISTER_QUBITS, config.tolerance)?;
    let engine = CorrelationEngine::for_register(REGISTER_QUBITS)?;
    info!(?config, "starting CHSH experiment");

    let trials = Setting::ALL[..]
        .par_iter()
        .map(|&setting| run_setting(&simulator, &engine, config, setting))
        .collect::<Result<Vec<_>>>()?;

    let correlations = [
        trials[0].correlation,
        trials[1].correlation,
        trials[2].correlation,
        trials[3].correlation,
    ];
    let statistic = ChshStatistic::from_correlations(correlations, config.tolerance)?;
    info!(s = statistic.s, "finished CHSH experiment");
    if !statistic.violates_classical_bound {
        warn!(s = statistic.s, "these settings do not exceed the classical bound |S| <= 2");
    }

    Ok(ChshReport { config: *config, trials, statistic })
}

fn run_setting(
    simulator: &Simulator,
    engine: &CorrelationEngine,
    config: &ExperimentConfig,
    setting: Setting,
) -> Result<TrialResult> {
    let (alice_angle, bob_angle) = config.angles(setting);
    let mut register = simulator.register()?;
    simulator.run_trial(&mut register, &config.circuit(setting))?;
    let probabilities = extract(&register, engine.agree_labels())?;
    let correlation = engine.correlation(&probabilities)?;
    debug!(%setting, alice_angle, bob_angle, correlation, "trial complete");

    Ok(TrialResult { setting, alice_angle, bob_angle, probabilities, correlation })
}
