//! Conversions between normalized parameter values (`0..=1`) and the values
//! they represent.

use crate::Float;

/// Map `normalized` linearly onto `min..=max`.
///
/// # Examples
///
/// ```
/// # use vstutil_helpers::conversion::normalized_to_plain;
/// assert_eq!(normalized_to_plain(-200.0f64, 200.0, 0.25), -100.0);
/// ```
#[must_use]
pub fn normalized_to_plain<F: Float>(min: F, max: F, normalized: F) -> F {
    normalized * (max - min) + min
}

/// Map `plain` from `min..=max` linearly onto `0..=1`.
///
/// Values outside the range map outside `0..=1`.
#[must_use]
pub fn plain_to_normalized<F: Float>(min: F, max: F, plain: F) -> F {
    (plain - min) / (max - min)
}

/// Map `normalized` onto `num_steps + 1` evenly sized steps, numbered from
/// `start`.
///
/// # Examples
///
/// ```
/// # use vstutil_helpers::conversion::normalized_to_steps;
/// assert_eq!(normalized_to_steps(4, 0, 0.25f64), 1);
/// assert_eq!(normalized_to_steps(4, 10, 1.0f64), 14);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn normalized_to_steps<F: Float>(num_steps: i32, start: i32, normalized: F) -> i32 {
    let step = (normalized.to_f64() * f64::from(num_steps + 1)) as i32;
    step.min(num_steps) + start
}

/// Inverse of [`normalized_to_steps`].
#[must_use]
pub fn steps_to_normalized<F: Float>(num_steps: i32, start: i32, step: i32) -> F {
    F::from_f64(f64::from(step - start) / f64::from(num_steps))
}

/// Map `normalized` exponentially onto `min..=max`.
///
/// Useful for frequencies, where each octave should take up the same share of
/// the normalized range. A `min` of zero is allowed.
#[must_use]
pub fn normalized_to_exp<F: Float>(min: F, max: F, normalized: F) -> F {
    if min == F::ZERO {
        let shifted = F::EPSILON * (normalized * (max / F::EPSILON).ln()).exp();
        return (shifted - F::EPSILON).clamp_to(F::ZERO, max);
    }
    (min * (normalized * (max / min).ln()).exp()).clamp_to(min, max)
}

/// Inverse of [`normalized_to_exp`], clamped to `0..=1`.
#[must_use]
pub fn exp_to_normalized<F: Float>(min: F, max: F, plain: F) -> F {
    let min = if min == F::ZERO { F::EPSILON } else { min };
    ((plain / min).ln() / (max / min).ln()).clamp_to(F::ZERO, F::ONE)
}

/// Convert a linear gain factor to decibels.
#[must_use]
pub fn gain_to_db<F: Float>(gain: F) -> F {
    F::from_f64(20.0) * gain.log10()
}

/// Convert decibels to a linear gain factor.
#[must_use]
pub fn db_to_gain<F: Float>(db: F) -> F {
    F::from_f64(10.0).powf(db / F::from_f64(20.0))
}
