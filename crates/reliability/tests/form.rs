//! End-to-end FORM analyses with known reliability indices.

use std::convert::Infallible;

use approx::assert_relative_eq;

use relia_core::{LimitStateProblem, Model};
use relia_probability::{Correlation, JointDistribution, Marginal, Nataf, std_normal};
use relia_reliability::{
    RunModel,
    form::{Config, ConvergenceCriteria, FiniteDifferenceStep, Form, Seed, Status},
};

fn tight() -> Config<1> {
    let criteria = ConvergenceCriteria::from_tolerances(Some(1e-10), None, None).unwrap();
    Config::new(50, FiniteDifferenceStep::Uniform(0.01), criteria).unwrap()
}

#[test]
fn correlated_normal_margin() {
    let joint = JointDistribution::new([
        Marginal::normal(10.0, 2.0).unwrap(),
        Marginal::normal(5.0, 1.5).unwrap(),
    ]);
    let corr_x = Correlation::new([[1.0, 0.5], [0.5, 1.0]]).unwrap();
    let nataf = Nataf::with_corr_x(joint, &corr_x).unwrap();
    let mut evaluator = RunModel::from_fn(|x: &[f64; 2]| x[0] - x[1]);
    let mut form = Form::new(nataf, Config::default());

    let result = form.run(&mut evaluator, &Seed::Origin).unwrap();

    // Var(R - S) = 4 + 2.25 - 2 · 0.5 · 2 · 1.5 = 3.25.
    assert_eq!(result.status, Status::Converged);
    assert_relative_eq!(result.beta, 5.0 / 3.25f64.sqrt(), epsilon = 1e-6);
}

#[test]
fn lognormal_log_ratio_is_linear_in_u() {
    let joint = JointDistribution::new([
        Marginal::lognormal(0.2, 0.0, 20.0).unwrap(),
        Marginal::lognormal(0.15, 0.0, 10.0).unwrap(),
    ]);
    let mut evaluator = RunModel::from_fn(|x: &[f64; 2]| x[0].ln() - x[1].ln());
    let mut form = Form::new(Nataf::independent(joint), Config::default());

    let from_origin = form.run(&mut evaluator, &Seed::Origin).unwrap().beta;
    let from_x = form.run(&mut evaluator, &Seed::X([18.0, 12.0])).unwrap().beta;

    let expected = 2f64.ln() / 0.25;
    assert_relative_eq!(from_origin, expected, epsilon = 1e-6);
    assert_relative_eq!(from_x, expected, epsilon = 1e-6);
    assert_eq!(form.results().len(), 2);
}

#[test]
fn heavy_tailed_exceedance_is_exact_in_one_dimension() {
    // P(X > 10) for X ~ Lévy(0, 1) is erf(sqrt(1 / 20)).
    let levy = Marginal::levy(0.0, 1.0).unwrap();
    let pf = 1.0 - levy.cdf(10.0);
    let mut evaluator = RunModel::from_fn(|x: &[f64; 1]| 10.0 - x[0]);
    let mut form = Form::new(Nataf::independent(JointDistribution::new([levy])), tight());

    let result = form.run(&mut evaluator, &Seed::Origin).unwrap();

    assert_eq!(result.status, Status::Converged);
    assert_relative_eq!(result.failure_probability, pf, epsilon = 1e-8);
    assert_relative_eq!(result.beta, -std_normal::icdf(pf), epsilon = 1e-8);
}

/// Plastic moment capacity of a beam section under a random load.
///
/// Inputs are yield stress `fy`, section modulus `z`, and moment `m`; the
/// model returns the capacity `fy · z`.
struct Section;

#[derive(Debug, Clone, Copy)]
struct SectionInput {
    fy: f64,
    z: f64,
}

impl Model for Section {
    type Input = SectionInput;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &SectionInput) -> Result<f64, Self::Error> {
        Ok(input.fy * input.z)
    }
}

struct MomentMargin {
    moment: f64,
}

impl LimitStateProblem<2> for MomentMargin {
    type Input = SectionInput;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 2]) -> Result<SectionInput, Self::Error> {
        Ok(SectionInput { fy: x[0], z: x[1] })
    }

    fn performance(&self, _input: &SectionInput, capacity: &f64) -> Result<f64, Self::Error> {
        Ok(capacity - self.moment)
    }
}

#[test]
fn model_and_problem_split() {
    let joint = JointDistribution::new([
        Marginal::lognormal(0.1, 0.0, 40.0).unwrap(),
        Marginal::lognormal(0.05, 0.0, 50.0).unwrap(),
    ]);
    let mut evaluator = RunModel::new(Section, MomentMargin { moment: 1600.0 });
    let mut form = Form::new(Nataf::independent(joint), Config::default());

    let result = form.run(&mut evaluator, &Seed::Origin).unwrap();

    // ln(fy · z) ~ N(ln 2000, sqrt(0.1² + 0.05²)), and failure is fy · z < 1600.
    let expected = 1.25f64.ln() / (0.01f64 + 0.0025).sqrt();
    assert_eq!(result.status, Status::Converged);
    assert_relative_eq!(result.beta, expected, epsilon = 5e-3);
    assert_eq!(evaluator.samples().len(), 5);
}
