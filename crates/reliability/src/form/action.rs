/// Control actions supported by the FORM solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop after the current iteration and report it.
    StopEarly,
}
