use anyhow::Context;
use bellsim::experiment::{AngleConvention, ExperimentConfig, Preset, Setting, run_experiment};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Simulates the CHSH Bell-inequality experiment on an entangled qubit pair
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Angle table to start from.
    #[arg(long, value_enum, default_value_t = Preset::Standard)]
    preset: Preset,

    /// JSON experiment config. Replaces the preset; flags below still override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Alice's first analyzer angle (radians).
    #[arg(long, allow_hyphen_values = true)]
    a: Option<f64>,

    /// Alice's second analyzer angle (radians).
    #[arg(long, allow_hyphen_values = true)]
    a_prime: Option<f64>,

    /// Bob's first analyzer angle (radians).
    #[arg(long, allow_hyphen_values = true)]
    b: Option<f64>,

    /// Bob's second analyzer angle (radians).
    #[arg(long, allow_hyphen_values = true)]
    b_prime: Option<f64>,

    /// How analyzer angles map onto Y rotations.
    #[arg(long, value_enum)]
    convention: Option<AngleConvention>,

    /// Allowed drift of the squared norm after each gate.
    #[arg(long)]
    tolerance: Option<f64>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Skip the per-trial probability tables.
    #[arg(short, long)]
    quiet: bool,

    /// Print the gate diagram of each setting.
    #[arg(long)]
    circuit: bool,

    /// Log trial details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn experiment_config(&self) -> anyhow::Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_json_file(path)
                .with_context(|| format!("loading experiment config from {}", path.display()))?,
            None => ExperimentConfig::preset(self.preset),
        };
        if let Some(a) = self.a {
            config.a = a;
        }
        if let Some(a_prime) = self.a_prime {
            config.a_prime = a_prime;
        }
        if let Some(b) = self.b {
            config.b = b;
        }
        if let Some(b_prime) = self.b_prime {
            config.b_prime = b_prime;
        }
        if let Some(convention) = self.convention {
            config.convention = convention;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.experiment_config()?;

    if cli.circuit {
        for setting in Setting::ALL {
            println!("{}:\n{}", setting, config.circuit(setting));
        }
    }

    let report = run_experiment(&config).context("CHSH experiment aborted")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if cli.quiet {
        print!("{}", report.summary());
    } else {
        print!("{}", report);
    }

    Ok(())
}
