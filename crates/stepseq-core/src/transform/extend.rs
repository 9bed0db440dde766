//! Tail-only expand/contract

use crate::cell::Cell;
use crate::interpolate::{interpolate_cells, Rounding};
use crate::options::{Choice, OptionValue};

/// How new tail steps are filled when expanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendFill {
    /// Constant fill
    Value(i64),
    /// Hold the last value
    Repeat,
    /// Cycle through a trailing window, the whole sequence when `None`
    Loop(Option<usize>),
    /// Interpolate from the last value back toward the first
    Interpolate,
}

impl Default for ExtendFill {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl ExtendFill {
    /// Window length carried by a `loop-N` token
    pub fn loop_window(&self) -> Option<usize> {
        match self {
            Self::Loop(window) => *window,
            _ => None,
        }
    }
}

impl Choice for ExtendFill {
    fn parse(value: &OptionValue) -> Option<Self> {
        match value.as_text() {
            Some("repeat") => Some(Self::Repeat),
            Some("interpolate") => Some(Self::Interpolate),
            Some("loop") => Some(Self::Loop(None)),
            Some(text) => match text.strip_prefix("loop-") {
                Some(window) => window.parse().ok().map(|n| Self::Loop(Some(n))),
                None => value.as_int().map(Self::Value),
            },
            None => value.as_int().map(Self::Value),
        }
    }

    fn to_value(self) -> OptionValue {
        match self {
            Self::Value(n) => n.into(),
            Self::Repeat => "repeat".into(),
            Self::Loop(None) => "loop".into(),
            Self::Loop(Some(n)) => format!("loop-{n}").into(),
            Self::Interpolate => "interpolate".into(),
        }
    }
}

/// Grow or truncate `values` at the tail to exactly `target` steps
///
/// `window` overrides the window carried by [`ExtendFill::Loop`]. Windows of
/// 0 or longer than the input loop the whole input.
///
/// # Example
/// ```
/// use stepseq_core::{extend, ExtendFill, Rounding};
/// let looped = extend(&[1, 2, 3], 8, ExtendFill::Loop(Some(2)), None, Rounding::None);
/// assert_eq!(looped, vec![1, 2, 3, 2, 3, 2, 3, 2]);
/// ```
pub fn extend<T: Cell>(
    values: &[T],
    target: usize,
    fill: ExtendFill,
    window: Option<usize>,
    rounding: Rounding,
) -> Vec<T> {
    let len = values.len();
    if target <= len {
        return values[..target].to_vec();
    }

    let missing = target - len;
    let mut out = Vec::with_capacity(target);
    out.extend_from_slice(values);

    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        let seed = match fill {
            ExtendFill::Value(n) => T::from_f64(n as f64),
            _ => T::default(),
        };
        out.resize(target, seed);
        return out;
    };

    match fill {
        ExtendFill::Value(n) => out.resize(target, T::from_f64(n as f64)),
        ExtendFill::Repeat => out.resize(target, last),
        ExtendFill::Loop(token) => {
            let window = window
                .or(token)
                .filter(|w| (1..=len).contains(w))
                .unwrap_or(len);
            out.extend(values[len - window..].iter().cycle().take(missing));
        }
        ExtendFill::Interpolate => out.extend(interpolate_cells(last, first, missing, rounding)),
    }

    out
}
