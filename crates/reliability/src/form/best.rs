use super::IterationState;

/// Tracks the iterate closest to the limit-state surface.
pub(super) struct Best<const N: usize> {
    state: Option<IterationState<N>>,
}

impl<const N: usize> Best<N> {
    pub(super) fn new() -> Self {
        Self { state: None }
    }

    /// Replaces the tracked state if `state` has a smaller `|g|`.
    pub(super) fn update(&mut self, state: &IterationState<N>) {
        if self.state.is_none_or(|best| state.g.abs() < best.g.abs()) {
            self.state = Some(*state);
        }
    }

    pub(super) fn into_state(self) -> Option<IterationState<N>> {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::{SMatrix, SVector};

    fn state(k: usize, g: f64) -> IterationState<1> {
        IterationState {
            k,
            u: SVector::zeros(),
            x: SVector::zeros(),
            g,
            gradient: SVector::repeat(1.0),
            alpha: SVector::repeat(1.0),
            beta: 0.0,
            jacobian_xu: SMatrix::identity(),
        }
    }

    #[test]
    fn keeps_smallest_abs_g() {
        let mut best = Best::new();
        best.update(&state(0, 3.0));
        best.update(&state(1, -0.5));
        best.update(&state(2, 0.7));

        assert_eq!(best.into_state().map(|s| s.k), Some(1));
    }

    #[test]
    fn empty_until_updated() {
        assert!(Best::<1>::new().into_state().is_none());
    }
}
