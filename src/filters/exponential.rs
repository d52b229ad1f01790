/// Exponential easing of a position toward a target.
///
/// Each step closes a fixed fraction of the remaining distance:
/// `position += (target - position) * factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    factor: f64,
}

impl Easing {
    /// Create an easing with the given per-step factor
    ///
    /// # Panics
    ///
    /// Panics if factor is not in the range (0, 1]
    #[must_use]
    pub fn new(factor: f64) -> Self {
        assert!(factor > 0.0 && factor <= 1.0, "Easing factor must be in (0, 1]");
        Self { factor }
    }

    /// The per-step factor
    #[must_use]
    pub const fn factor(&self) -> f64 {
        self.factor
    }

    /// Advance `position` one step toward `target`
    #[must_use]
    pub fn step(&self, position: f64, target: f64) -> f64 {
        self.factor.mul_add(target - position, position)
    }
}
