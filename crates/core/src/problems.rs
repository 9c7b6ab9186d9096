pub mod equation;
pub mod limit_state;

pub use equation::EquationProblem;
pub use limit_state::LimitStateProblem;
