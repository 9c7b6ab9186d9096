use std::{convert::Infallible, marker::PhantomData};

use relia_core::{LimitStateProblem, Model};

use crate::RunModel;

/// A model backed by a plain function of the physical-space point.
///
/// The function returns the performance value directly; pair it with
/// [`Direct`] to use it as a limit state.
pub struct FnModel<F, const N: usize> {
    f: F,
}

impl<F, const N: usize> FnModel<F, N>
where
    F: Fn(&[f64; N]) -> f64,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, const N: usize> Model for FnModel<F, N>
where
    F: Fn(&[f64; N]) -> f64,
{
    type Input = [f64; N];
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &[f64; N]) -> Result<f64, Self::Error> {
        Ok((self.f)(input))
    }
}

/// A limit state whose model input is the point itself and whose model
/// output is the performance value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct<const N: usize> {
    _marker: PhantomData<[f64; N]>,
}

impl<const N: usize> Direct<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<const N: usize> LimitStateProblem<N> for Direct<N> {
    type Input = [f64; N];
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; N]) -> Result<[f64; N], Self::Error> {
        Ok(*x)
    }

    fn performance(&self, _input: &[f64; N], output: &f64) -> Result<f64, Self::Error> {
        Ok(*output)
    }
}

impl<F, const N: usize> RunModel<FnModel<F, N>, Direct<N>, N>
where
    F: Fn(&[f64; N]) -> f64,
{
    /// Creates an evaluator from a function returning the performance value.
    pub fn from_fn(f: F) -> Self {
        Self::new(FnModel::new(f), Direct::new())
    }
}
