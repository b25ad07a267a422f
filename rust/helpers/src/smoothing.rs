//! One-pole value smoothing.

use crate::Float;

/// A value that converges toward a target each time it is processed.
///
/// Each call to [`SmoothValue::process`] moves the smoothed value a fraction
/// `alpha` of the remaining distance toward the target:
///
/// `smoothed = alpha * target + (1 - alpha) * smoothed`
///
/// # Examples
///
/// ```
/// # use vstutil_helpers::smoothing::SmoothValue;
/// let mut value = SmoothValue::with_alpha(0.0f64, 0.5);
/// value.set(1.0);
/// assert_eq!(value.process(), 0.5);
/// assert_eq!(value.process(), 0.75);
/// value.flush();
/// assert_eq!(value.smoothed(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothValue<F> {
    alpha: F,
    target: F,
    smoothed: F,
}

impl<F: Float> SmoothValue<F> {
    /// Create a smoother resting at `initial`, with an alpha of 0.1.
    #[must_use]
    pub fn new(initial: F) -> Self {
        Self::with_alpha(initial, F::from_f64(0.1))
    }

    /// Create a smoother resting at `initial`, with the given `alpha`.
    ///
    /// See [`Self::set_alpha`] for the meaning of `alpha`.
    #[must_use]
    pub fn with_alpha(initial: F, alpha: F) -> Self {
        let mut value = Self {
            alpha: F::ONE,
            target: initial,
            smoothed: initial,
        };
        value.set_alpha(alpha);
        value
    }

    /// Advance the smoothing by one step and return the smoothed value.
    #[inline]
    pub fn process(&mut self) -> F {
        self.smoothed = self.alpha * self.target + (F::ONE - self.alpha) * self.smoothed;
        self.smoothed
    }

    /// Set the value to converge toward.
    #[inline]
    pub fn set(&mut self, target: F) {
        self.target = target;
    }

    /// The value being converged toward.
    #[inline]
    #[must_use]
    pub fn get(&self) -> F {
        self.target
    }

    /// The current smoothed value.
    #[inline]
    #[must_use]
    pub fn smoothed(&self) -> F {
        self.smoothed
    }

    /// Set how quickly the smoothed value approaches the target.
    ///
    /// `alpha` must be in `0..=1`; higher values converge faster. 0 freezes
    /// the smoothed value and 1 jumps straight to the target.
    pub fn set_alpha(&mut self, alpha: F) {
        debug_assert!(
            alpha >= F::ZERO && alpha <= F::ONE,
            "alpha must be in 0..=1, got {alpha:?}"
        );
        self.alpha = alpha;
    }

    /// Jump the smoothed value to the target.
    pub fn flush(&mut self) {
        self.smoothed = self.target;
    }

    /// Set both the target and the smoothed value.
    pub fn set_flushed(&mut self, value: F) {
        self.target = value;
        self.smoothed = value;
    }
}

impl<F: Float> Default for SmoothValue<F> {
    fn default() -> Self {
        Self::new(F::ZERO)
    }
}
