//! Logging observer for tracing solver progress.
//!
//! See [`LogObserver`] and [`Loggable`] for usage.

use std::fmt::Write;

use log::Level;

use relia_core::Observer;
use relia_reliability::form;
use relia_solvers::equation::bisection;

/// Extracts a log line from a solver event.
///
/// The line is rendered as `label key=value key=value ...`.
pub trait Loggable {
    /// A short label identifying the event kind.
    fn label(&self) -> &'static str;

    /// Named numeric fields to include in the line.
    fn fields(&self) -> Vec<(&'static str, f64)>;
}

/// An observer that writes one `log` record per solver event.
///
/// Records go to the given [`Level`] under the target `"relia"`, or a
/// custom target set with [`LogObserver::target`]. The observer never
/// requests an action.
///
/// # Example
///
/// ```
/// use relia_observers::LogObserver;
/// use relia_probability::{JointDistribution, Marginal, Nataf};
/// use relia_reliability::{RunModel, form::{Config, Form, Seed}};
///
/// let joint = JointDistribution::new([Marginal::normal(3.0, 1.0).unwrap()]);
/// let mut evaluator = RunModel::from_fn(|x: &[f64; 1]| x[0]);
/// let mut form = Form::new(Nataf::independent(joint), Config::default());
///
/// let mut obs = LogObserver::new(log::Level::Info);
/// form.run_observed(&mut evaluator, &Seed::Origin, &mut obs).unwrap();
/// assert_eq!(obs.count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct LogObserver {
    level: Level,
    target: String,
    count: usize,
}

impl LogObserver {
    /// Creates an observer that logs at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            target: "relia".to_owned(),
            count: 0,
        }
    }

    /// Sets the log target.
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Returns the number of events recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Logs a single line built from a label and fields.
    pub fn record(&mut self, label: &str, fields: &[(&str, f64)]) {
        self.count += 1;
        if log::log_enabled!(target: &self.target, self.level) {
            log::log!(target: &self.target, self.level, "{}", format_line(label, fields));
        }
    }
}

impl<E, A> Observer<E, A> for LogObserver
where
    E: Loggable,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.label(), &event.fields());
        None
    }
}

/// Allows `&mut LogObserver` to be passed to solvers that take an observer
/// by value, so the count can be read after the solve completes.
impl<E, A> Observer<E, A> for &mut LogObserver
where
    E: Loggable,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

fn format_line(label: &str, fields: &[(&str, f64)]) -> String {
    let mut line = label.to_owned();
    for (key, value) in fields {
        // Writing to a String cannot fail.
        let _ = write!(line, " {key}={value:.6e}");
    }
    line
}

impl<I, O> Loggable for bisection::Event<'_, I, O> {
    fn label(&self) -> &'static str {
        "bisection"
    }

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("iter", self.iter as f64),
            ("x", self.x()),
            ("residual", self.residual()),
            ("left", self.bracket[0]),
            ("right", self.bracket[1]),
        ]
    }
}

impl<const N: usize> Loggable for form::Event<'_, N> {
    fn label(&self) -> &'static str {
        match self {
            form::Event::Iteration { .. } => "form.iteration",
            form::Event::EvaluationFailed { .. } => "form.evaluation_failed",
            form::Event::NotConverged { .. } => "form.not_converged",
        }
    }

    fn fields(&self) -> Vec<(&'static str, f64)> {
        match self {
            form::Event::Iteration { state, errors } => vec![
                ("k", state.k as f64),
                ("g", state.g),
                ("beta", state.beta),
                ("step", errors.step),
                ("dbeta", errors.beta),
                ("dgrad", errors.gradient),
            ],
            form::Event::EvaluationFailed { k, .. } => vec![("k", *k as f64)],
            form::Event::NotConverged { iters, best } => vec![
                ("iters", *iters as f64),
                ("best_k", best.k as f64),
                ("g", best.g),
                ("beta", best.beta),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Event {
        residual: f64,
    }

    impl Loggable for Event {
        fn label(&self) -> &'static str {
            "test"
        }

        fn fields(&self) -> Vec<(&'static str, f64)> {
            vec![("residual", self.residual)]
        }
    }

    #[test]
    fn formats_key_value_pairs() {
        let line = format_line("form.iteration", &[("k", 2.0), ("beta", 1.5)]);
        assert_eq!(line, "form.iteration k=2.000000e0 beta=1.500000e0");
    }

    #[test]
    fn counts_events_and_never_acts() {
        let mut obs = LogObserver::new(Level::Debug).target("tests");
        let action: Option<()> = obs.observe(&Event { residual: 0.5 });
        let _: Option<()> = obs.observe(&Event { residual: 0.25 });

        assert!(action.is_none());
        assert_eq!(obs.count(), 2);
    }

    #[test]
    fn record_direct_call_counts() {
        let mut obs = LogObserver::new(Level::Trace);
        obs.record("custom", &[]);
        assert_eq!(obs.count(), 1);
    }
}
