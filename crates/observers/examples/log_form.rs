//! Runs FORM on a correlated three-variable problem and logs every event.
//!
//! Run with:
//!
//! ```sh
//! cargo run -p relia-observers --example log_form
//! ```

use log::{Level, LevelFilter, Log, Metadata, Record};

use relia_observers::LogObserver;
use relia_probability::{Correlation, JointDistribution, Marginal, Nataf};
use relia_reliability::{
    RunModel,
    form::{Config, Form, Seed},
};

/// Writes every record to stderr.
struct Stderr;

impl Log for Stderr {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: Stderr = Stderr;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    log::set_logger(&LOGGER).map_err(|e| e.to_string())?;
    log::set_max_level(LevelFilter::Debug);

    // Yield stress, plastic modulus, and applied moment.
    let joint = JointDistribution::new([
        Marginal::lognormal(0.1, 0.0, 250.0)?,
        Marginal::normal(0.004, 0.0002)?,
        Marginal::truncated_normal(-3.0, 4.0, 0.6, 0.15)?,
    ]);
    let corr_x = Correlation::new([[1.0, 0.3, 0.0], [0.3, 1.0, 0.0], [0.0, 0.0, 1.0]])?;
    let nataf = Nataf::with_corr_x(joint, &corr_x)?;

    let mut evaluator = RunModel::from_fn(|x: &[f64; 3]| x[0] * x[1] - x[2]);
    let mut form = Form::new(nataf, Config::default());

    for seed in [Seed::Origin, Seed::X([200.0, 0.0038, 0.8])] {
        form.run_observed(&mut evaluator, &seed, LogObserver::new(Level::Info))?;
    }

    for (beta, pf) in form.results().beta_form().iter().zip(form.results().failure_probability()) {
        println!("beta = {beta:.4}, pf = {pf:.3e}");
    }

    Ok(())
}
