use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use two_layer_gradcheck::config::{load_config, SanityConfig};
use two_layer_gradcheck::gradcheck::GradientReport;
use two_layer_gradcheck::sanity::{fixture_check, sanity_check};
use two_layer_gradcheck::{NetworkError, Result};

// Gradient check of the two-layer sigmoid/softmax network on fake data.
#[derive(Parser, Debug)]
#[command(author, version, about = "Gradient check a two-layer sigmoid/softmax network")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed for the synthetic data and parameters
    #[arg(long)]
    seed: Option<u64>,

    /// Number of synthetic examples
    #[arg(long)]
    examples: Option<usize>,

    /// Layer sizes as Dx,H,Dy
    #[arg(long, value_delimiter = ',')]
    dims: Option<Vec<usize>>,

    /// Finite-difference step
    #[arg(long)]
    epsilon: Option<f64>,

    /// Relative error tolerance
    #[arg(long)]
    tolerance: Option<f64>,

    /// Exit with a failure code when a gradient check fails
    #[arg(long)]
    strict: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

// File config (or defaults) with command line overrides applied.
fn build_config(args: &Args) -> Result<SanityConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SanityConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(examples) = args.examples {
        config.num_examples = examples;
    }
    if let Some(dims) = &args.dims {
        config.dimensions = <[usize; 3]>::try_from(dims.as_slice()).map_err(|_| {
            NetworkError::Config(format!("--dims takes exactly 3 sizes, got {}", dims.len()))
        })?;
    }
    if let Some(epsilon) = args.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }

    config.validate()?;
    Ok(config)
}

fn print_report(report: &GradientReport) {
    match report.first_failure() {
        None => println!("Gradient check passed!"),
        Some(first) => {
            println!("Gradient check failed.");
            println!("First gradient error found at index {}", first.index);
            println!(
                "Your gradient: {:.10} \t Numerical gradient: {:.10}",
                first.analytic, first.numeric
            );
            println!(
                "{} of {} coordinates outside tolerance",
                report.failures().len(),
                report.checked
            );
        }
    }
}

// Returns true when every check passed.
fn run(args: &Args) -> Result<bool> {
    let config = build_config(args)?;

    println!("Running sanity check...");
    let report = sanity_check(&config)?;
    print_report(&report);

    println!("Running fixed 2-2-2 check...");
    let fixture = fixture_check(&config.gradient_check()?)?;
    println!(
        "P(class 0) for identity weights on [1, 0]: {:.10}",
        fixture.probability
    );
    print_report(&fixture.report);

    Ok(report.passed() && fixture.report.passed())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(passed) if passed || !args.strict => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
