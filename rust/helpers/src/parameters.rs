//! Static descriptions of plug-in parameters.
//!
//! A [`Description`] names a parameter, gives its default as a normalized
//! value, says whether it is continuous ([`Range`]) or discrete
//! ([`StepCount`]), and optionally carries a [`Conversion`] between its
//! normalized and plain values.
//!
//! # Examples
//!
//! ```
//! # use vstutil_helpers::parameters::{linear_functions, range_description, Kind};
//! let gain = range_description("Gain", 0.0, linear_functions(-60.0, 12.0), 1, Some("dB"));
//! assert_eq!(gain.name, "Gain");
//! assert!((gain.default_normalized - 60.0 / 72.0).abs() < 1e-12);
//! let Kind::Range(range) = gain.kind else { panic!("expected a range") };
//! assert_eq!((range.min, range.max), (-60.0, 12.0));
//! ```

use crate::conversion::{
    db_to_gain, exp_to_normalized, gain_to_db, normalized_to_exp, normalized_to_plain,
    normalized_to_steps, plain_to_normalized,
};

/// Strings for a two-state parameter.
pub const STRINGS_ON_OFF: [&str; 2] = ["off", "on"];

/// A continuous parameter between two plain values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<'a> {
    /// Plain value at normalized 0.
    pub min: f64,

    /// Plain value at normalized 1.
    pub max: f64,

    /// Number of digits to show after the decimal point.
    pub precision: u32,

    /// Unit shown next to the value, e.g. "dB".
    pub unit: Option<&'a str>,
}

impl Default for Range<'_> {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            precision: 1,
            unit: None,
        }
    }
}

/// A discrete parameter with `num_steps + 1` possible values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepCount<'a> {
    /// Number of steps. A parameter with `n` states has `n - 1` steps.
    pub num_steps: u32,

    /// Plain value of the first state.
    pub start_value: i32,

    /// Unit shown next to the value.
    pub unit: Option<&'a str>,

    /// One display string per state, if the states are named.
    pub strings: Option<&'a [&'a str]>,
}

impl<'a> StepCount<'a> {
    /// A step count with one state per entry of `strings`.
    ///
    /// An empty list yields zero steps.
    #[must_use]
    pub fn from_strings(strings: &'a [&'a str], start_value: i32, unit: Option<&'a str>) -> Self {
        Self {
            num_steps: u32::try_from(strings.len().saturating_sub(1)).unwrap_or(u32::MAX),
            start_value,
            unit,
            strings: Some(strings),
        }
    }

    /// The display string for `state`, counted from zero.
    #[must_use]
    pub fn string(&self, state: u32) -> Option<&'a str> {
        self.strings?.get(usize::try_from(state).ok()?).copied()
    }
}

/// Whether a parameter is continuous or discrete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind<'a> {
    /// A continuous parameter.
    Range(Range<'a>),

    /// A discrete parameter.
    Steps(StepCount<'a>),
}

impl Default for Kind<'_> {
    fn default() -> Self {
        Self::Range(Range::default())
    }
}

/// A pair of mappings between normalized and plain values.
#[derive(Debug, Clone, Copy)]
pub enum Conversion {
    /// Linear between `min` and `max`.
    Linear {
        /// Plain value at normalized 0.
        min: f64,
        /// Plain value at normalized 1.
        max: f64,
    },

    /// Exponential between `min` and `max`. See
    /// [`normalized_to_exp`](crate::conversion::normalized_to_exp).
    Exponential {
        /// Plain value at normalized 0.
        min: f64,
        /// Plain value at normalized 1.
        max: f64,
    },

    /// Whole steps, numbered from `start`.
    Steps {
        /// Number of steps.
        num_steps: i32,
        /// Plain value of the first step.
        start: i32,
    },

    /// The normalized value is a linear gain and the plain value is in dB.
    Decibels,

    /// Arbitrary mapping functions.
    Custom {
        /// Normalized to plain.
        to_plain: fn(f64) -> f64,
        /// Plain to normalized.
        to_normalized: fn(f64) -> f64,
    },
}

impl Conversion {
    /// Map a normalized value to its plain value.
    #[must_use]
    pub fn to_plain(&self, normalized: f64) -> f64 {
        match *self {
            Self::Linear { min, max } => normalized_to_plain(min, max, normalized),
            Self::Exponential { min, max } => normalized_to_exp(min, max, normalized),
            Self::Steps { num_steps, start } => {
                f64::from(normalized_to_steps(num_steps, start, normalized))
            }
            Self::Decibels => gain_to_db(normalized),
            Self::Custom { to_plain, .. } => to_plain(normalized),
        }
    }

    /// Map a plain value to its normalized value.
    #[must_use]
    pub fn to_normalized(&self, plain: f64) -> f64 {
        match *self {
            Self::Linear { min, max } => plain_to_normalized(min, max, plain),
            Self::Exponential { min, max } => exp_to_normalized(min, max, plain),
            Self::Steps { num_steps, start } => {
                plain_to_normalized(f64::from(start), f64::from(start + num_steps), plain)
            }
            Self::Decibels => db_to_gain(plain),
            Self::Custom { to_normalized, .. } => to_normalized(plain),
        }
    }
}

/// Linear mapping onto `min..=max`.
#[must_use]
pub const fn linear_functions(min: f64, max: f64) -> Conversion {
    Conversion::Linear { min, max }
}

/// Exponential mapping onto `min..=max`.
#[must_use]
pub const fn exponent_functions(min: f64, max: f64) -> Conversion {
    Conversion::Exponential { min, max }
}

/// Mapping onto `num_steps + 1` whole steps starting at `start`.
#[must_use]
pub const fn steps_functions(num_steps: i32, start: i32) -> Conversion {
    Conversion::Steps { num_steps, start }
}

/// Mapping between a linear gain and decibels.
#[must_use]
pub const fn db_functions() -> Conversion {
    Conversion::Decibels
}

/// Everything needed to register a parameter with a host.
#[derive(Debug, Clone, Copy, Default)]
pub struct Description<'a> {
    /// Display name.
    pub name: &'a str,

    /// Default value, normalized.
    pub default_normalized: f64,

    /// Continuous or discrete.
    pub kind: Kind<'a>,

    /// Mapping between normalized and plain values, if the parameter has one.
    pub convert: Option<Conversion>,
}

impl Description<'_> {
    /// Map a normalized value to its plain value.
    ///
    /// Without a conversion, ranges map linearly and step counts map onto
    /// their steps.
    #[must_use]
    pub fn to_plain(&self, normalized: f64) -> f64 {
        self.conversion().to_plain(normalized)
    }

    /// Map a plain value to its normalized value.
    #[must_use]
    pub fn to_normalized(&self, plain: f64) -> f64 {
        self.conversion().to_normalized(plain)
    }

    fn conversion(&self) -> Conversion {
        self.convert.unwrap_or(match self.kind {
            Kind::Range(range) => linear_functions(range.min, range.max),
            Kind::Steps(steps) => steps_functions(
                i32::try_from(steps.num_steps).unwrap_or(i32::MAX),
                steps.start_value,
            ),
        })
    }
}

/// A parameter choosing one entry of `strings`.
///
/// # Examples
///
/// ```
/// # use vstutil_helpers::parameters::{list_description, STRINGS_ON_OFF};
/// let bypass = list_description("Bypass", 1, &STRINGS_ON_OFF);
/// assert_eq!(bypass.default_normalized, 1.0);
/// assert_eq!(bypass.to_plain(0.2), 0.0);
/// ```
#[must_use]
pub fn list_description<'a>(
    name: &'a str,
    default_index: u32,
    strings: &'a [&'a str],
) -> Description<'a> {
    let steps = StepCount::from_strings(strings, 0, None);
    let num_steps = i32::try_from(steps.num_steps).unwrap_or(i32::MAX);
    Description {
        name,
        default_normalized: if num_steps == 0 {
            0.0
        } else {
            f64::from(default_index) / f64::from(num_steps)
        },
        kind: Kind::Steps(steps),
        convert: Some(steps_functions(num_steps, 0)),
    }
}

/// A continuous parameter whose range is taken from `convert`.
#[must_use]
pub fn range_description<'a>(
    name: &'a str,
    default_plain: f64,
    convert: Conversion,
    precision: u32,
    unit: Option<&'a str>,
) -> Description<'a> {
    Description {
        name,
        default_normalized: convert.to_normalized(default_plain),
        kind: Kind::Range(Range {
            min: convert.to_plain(0.0),
            max: convert.to_plain(1.0),
            precision,
            unit,
        }),
        convert: Some(convert),
    }
}

/// A discrete parameter whose steps are taken from `convert`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn steps_description<'a>(
    name: &'a str,
    default_plain: f64,
    convert: Conversion,
    unit: Option<&'a str>,
) -> Description<'a> {
    let first = convert.to_plain(0.0);
    let last = convert.to_plain(1.0);
    Description {
        name,
        default_normalized: convert.to_normalized(default_plain),
        kind: Kind::Steps(StepCount {
            num_steps: (last - first).round().max(0.0) as u32,
            start_value: first.round() as i32,
            unit,
            strings: None,
        }),
        convert: Some(convert),
    }
}
