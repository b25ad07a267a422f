#![doc = include_str!("../README.md")]

use std::ops::{Add, Div, Mul, Sub};

pub mod buffer;
pub mod conversion;
pub mod enum_array;
pub mod parameters;
pub mod smoothing;
pub mod strings;

mod sealed {
    pub trait Sealed {}
}

/// Floating point types the helpers work with (`f32` and `f64`).
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait Float:
    sealed::Sealed
    + Copy
    + Default
    + std::fmt::Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// 0.0
    const ZERO: Self;

    /// 1.0
    const ONE: Self;

    /// Difference between 1.0 and the next larger representable value.
    const EPSILON: Self;

    /// Convert from `f64`, rounding if needed.
    fn from_f64(value: f64) -> Self;

    /// Convert to `f64`.
    fn to_f64(self) -> f64;

    /// `e^self`
    fn exp(self) -> Self;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Base 10 logarithm.
    fn log10(self) -> Self;

    /// `self` raised to `exponent`.
    fn powf(self, exponent: Self) -> Self;

    /// Limit `self` to `min..=max`.
    ///
    /// Unlike the inherent `clamp`, this never panics; if `min > max` the
    /// result is `max`.
    #[must_use]
    fn clamp_to(self, min: Self, max: Self) -> Self {
        let lower = if self < min { min } else { self };
        if lower > max { max } else { lower }
    }
}

macro_rules! impl_float {
    ($($t:ident),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Float for $t {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                const EPSILON: Self = $t::EPSILON;

                #[inline]
                #[allow(clippy::cast_possible_truncation)]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }

                #[inline]
                fn exp(self) -> Self {
                    $t::exp(self)
                }

                #[inline]
                fn ln(self) -> Self {
                    $t::ln(self)
                }

                #[inline]
                fn log10(self) -> Self {
                    $t::log10(self)
                }

                #[inline]
                fn powf(self, exponent: Self) -> Self {
                    $t::powf(self, exponent)
                }
            }
        )*
    };
}

impl_float!(f32, f64);
