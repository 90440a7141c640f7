// src/lib.rs

//! `bellsim` - state-vector simulation of the CHSH Bell experiment
//!
//! A two-qubit register is entangled, each qubit is rotated by an analyzer
//! angle, and the probabilities of the agreeing outcomes `|00>` and `|11>`
//! are read out analytically. Four settings give four correlations, and the
//! correlations give the CHSH statistic `S`.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod analysis;
pub mod experiment;

// Re-export the most common types for easier top-level use
pub use core::{BasisLabel, BellError, QubitId, Result, StateVector};
pub use operations::Gate;
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{ProbabilityMap, Simulator, extract, extract_labels};
pub use analysis::{ChshStatistic, CorrelationEngine, chsh};
pub use experiment::{AngleConvention, ChshReport, ExperimentConfig, Preset, Setting, run_experiment};
pub use validation::check_normalization;

// Example 1: One trial by hand
// Builds the entangle-and-rotate sequence, runs it on a fresh register and
// correlates the agreeing outcomes.
/// ```
/// use bellsim::{BellError, Circuit, CorrelationEngine, Simulator, extract};
/// use std::f64::consts::PI;
///
/// let simulator = Simulator::new(2)?;
/// let engine = CorrelationEngine::for_register(2)?;
///
/// // Rotation angles 0 and π/4 on a Bell pair.
/// let state = simulator.run(&Circuit::bell_rotation(0.0, PI / 4.0))?;
/// let probabilities = extract(&state, engine.agree_labels())?;
/// println!("{}", probabilities);
///
/// // E = cos(θa - θb) for RY angles θa, θb.
/// let correlation = engine.correlation(&probabilities)?;
/// assert!((correlation - (PI / 4.0).cos()).abs() < 1e-9);
/// # Ok::<(), BellError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: The full experiment
// Runs the four settings of the standard angle table and checks that the
// CHSH statistic reaches the Tsirelson bound.
/// ```
/// use bellsim::{BellError, ExperimentConfig, Preset, run_experiment};
///
/// let report = run_experiment(&ExperimentConfig::preset(Preset::Standard))?;
/// print!("{}", report.summary());
///
/// assert!(report.statistic.violates_classical_bound);
/// assert!((report.s() - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
/// # Ok::<(), BellError>(())
/// ```
#[doc(hidden)]
const _: () = ();
