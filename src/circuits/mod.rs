// src/circuits/mod.rs

//! Ordered gate sequences and a builder for them.
//!
//! A `Circuit` is the configuration object the `Simulator` consumes: swapping
//! the gate list defines a different experiment without touching the engine.

use crate::core::{QubitId, Result};
use crate::operations::Gate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of gates. Order is significant.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    gates: Vec<Gate>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// The entangle-and-rotate sequence of the Bell experiment:
    /// `H(q0) -> CNOT(q0 -> q1) -> RY(q0, theta_a) -> RY(q1, theta_b)`.
    pub fn bell_rotation(theta_a: f64, theta_b: f64) -> Self {
        CircuitBuilder::new()
            .hadamard(QubitId(0))
            .cnot(QubitId(0), QubitId(1))
            .rotation_y(QubitId(0), theta_a)
            .rotation_y(QubitId(1), theta_b)
            .build()
    }

    /// Appends a gate to the end of the sequence.
    pub fn add_gate(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Appends every gate yielded by `gates`.
    pub fn add_gates<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        self.gates.extend(gates);
    }

    /// The gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the circuit contains no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Smallest register size able to hold every referenced qubit.
    pub fn required_qubits(&self) -> usize {
        self.gates
            .iter()
            .flat_map(|gate| gate.qubits())
            .map(|qubit| qubit.0 + 1)
            .max()
            .unwrap_or(0)
    }

    /// Validates every gate against a register of `num_qubits` qubits, so a
    /// bad sequence fails before any amplitude is touched.
    pub fn validate(&self, num_qubits: usize) -> Result<()> {
        self.gates.iter().try_for_each(|gate| gate.validate(num_qubits))
    }
}

/// Chainable construction of a `Circuit`.
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single gate.
    pub fn add_gate(mut self, gate: Gate) -> Self {
        self.circuit.add_gate(gate);
        self
    }

    /// Adds several gates in order.
    pub fn add_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.circuit.add_gates(gates);
        self
    }

    pub fn hadamard(self, target: QubitId) -> Self {
        self.add_gate(Gate::Hadamard { target })
    }

    pub fn rotation_y(self, target: QubitId, theta: f64) -> Self {
        self.add_gate(Gate::RotationY { target, theta })
    }

    pub fn cnot(self, control: QubitId, target: QubitId) -> Self {
        self.add_gate(Gate::Cnot { control, target })
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

const GATE_WIDTH: usize = 7;
const H_WIRE: char = '─';
const V_WIRE: char = '│';

fn format_gate(symbol: &str) -> String {
    let len = symbol.chars().count();
    if len >= GATE_WIDTH {
        return symbol.chars().take(GATE_WIDTH).collect();
    }
    let pad = GATE_WIDTH - len;
    let pre = pad / 2;
    format!(
        "{}{}{}",
        H_WIRE.to_string().repeat(pre),
        symbol,
        H_WIRE.to_string().repeat(pad - pre)
    )
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.required_qubits();
        writeln!(f, "Circuit[{} gates on {} qubits]", self.len(), rows)?;
        if rows == 0 {
            return Ok(());
        }

        let wire = H_WIRE.to_string().repeat(GATE_WIDTH);
        let mut grid = vec![vec![wire; self.len()]; rows];
        // connectors[r][t] is drawn between row r and row r + 1
        let mut connectors = vec![vec![' '; self.len()]; rows];

        for (t, gate) in self.gates.iter().enumerate() {
            match gate {
                Gate::Hadamard { target } | Gate::RotationY { target, .. } => {
                    grid[target.0][t] = format_gate(gate.symbol());
                }
                Gate::Cnot { control, target } => {
                    grid[control.0][t] = format_gate("@");
                    grid[target.0][t] = format_gate(gate.symbol());
                    let (lo, hi) = (control.0.min(target.0), control.0.max(target.0));
                    for row in connectors.iter_mut().take(hi).skip(lo) {
                        row[t] = V_WIRE;
                    }
                }
            }
        }

        let label_width = format!("{}", QubitId(rows - 1)).len() + 2;
        for r in 0..rows {
            let label = format!("{}: ", QubitId(r));
            writeln!(f, "{:<width$}{}", label, grid[r].join(""), width = label_width)?;
            if r + 1 < rows {
                write!(f, "{}", " ".repeat(label_width))?;
                for connector in &connectors[r] {
                    let pre = (GATE_WIDTH - 1) / 2;
                    write!(f, "{}{}{}", " ".repeat(pre), connector, " ".repeat(GATE_WIDTH - 1 - pre))?;
                }
                writeln!(f)?;
            }
        }

        let angles: Vec<String> = self
            .gates
            .iter()
            .filter_map(|gate| match gate {
                Gate::RotationY { target, theta } => Some(format!("RY({})={:.6}", target, theta)),
                _ => None,
            })
            .collect();
        if !angles.is_empty() {
            writeln!(f, "{}", angles.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
