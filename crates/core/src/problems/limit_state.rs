/// Defines a limit-state (performance function) problem.
///
/// A limit-state problem maps a point in physical space `x` to a model input,
/// then extracts a scalar performance value `g` from the model input and
/// output. By convention `g > 0` is the safe region, `g < 0` is failure, and
/// the limit-state surface is `g = 0`.
///
/// The const generic `N` is the number of random variables.
pub trait LimitStateProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps a physical-space point (`x`) into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Computes the performance value from model input/output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the performance value cannot be computed.
    fn performance(&self, input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error>;
}
