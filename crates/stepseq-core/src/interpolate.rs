//! Linear interpolation with rounding policies

use std::fmt;

use crate::cell::Cell;
use crate::options::{Choice, OptionValue};

/// How synthesized values are rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Keep the raw, possibly fractional value
    #[default]
    None,
    /// Round half up
    Auto,
    /// Ceiling
    Up,
    /// Floor
    Down,
}

impl Rounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::None => value,
            Self::Auto => (value + 0.5).floor(),
            Self::Up => value.ceil(),
            Self::Down => value.floor(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Auto => "auto",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Choice for Rounding {
    fn parse(value: &OptionValue) -> Option<Self> {
        match value.as_text()? {
            "none" => Some(Self::None),
            "auto" => Some(Self::Auto),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    fn to_value(self) -> OptionValue {
        OptionValue::from(self.name())
    }
}

/// `count` evenly spaced values strictly between `a` and `b`
///
/// # Example
/// ```
/// use stepseq_core::{interpolate, Rounding};
/// assert_eq!(interpolate(2.0, 5.0, 2, Rounding::None), vec![3.0, 4.0]);
/// ```
pub fn interpolate(a: f64, b: f64, count: usize, rounding: Rounding) -> Vec<f64> {
    if a == b {
        return vec![a; count];
    }

    let step = (b - a) / (count + 1) as f64;
    (1..=count)
        .map(|i| rounding.apply(a + step * i as f64))
        .collect()
}

/// [`interpolate`] over step payloads
pub fn interpolate_cells<T: Cell>(a: T, b: T, count: usize, rounding: Rounding) -> Vec<T> {
    interpolate(a.to_f64(), b.to_f64(), count, rounding)
        .into_iter()
        .map(T::from_f64)
        .collect()
}
