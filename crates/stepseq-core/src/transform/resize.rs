//! Euclidean stretch/shrink

use crate::cell::Cell;
use crate::euclid::distribute;
use crate::interpolate::{interpolate_cells, Rounding};
use crate::options::{Choice, OptionValue};

/// How new slots are filled when stretching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StretchFill {
    /// Constant fill
    Value(i64),
    /// Copy the nearest preceding original value
    Repeat,
    /// Interpolate between neighbouring original values
    Interpolate,
}

impl Default for StretchFill {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl Choice for StretchFill {
    fn parse(value: &OptionValue) -> Option<Self> {
        match value.as_text() {
            Some("repeat") => Some(Self::Repeat),
            Some("interpolate") => Some(Self::Interpolate),
            _ => value.as_int().map(Self::Value),
        }
    }

    fn to_value(self) -> OptionValue {
        match self {
            Self::Value(n) => n.into(),
            Self::Repeat => "repeat".into(),
            Self::Interpolate => "interpolate".into(),
        }
    }
}

/// What an interpolating stretch puts after the last original value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailStyle {
    /// Interpolate back toward the first value
    #[default]
    Loop,
    /// Hold the last value
    Repeat,
}

impl Choice for TailStyle {
    fn parse(value: &OptionValue) -> Option<Self> {
        match value.as_text()? {
            "loop" => Some(Self::Loop),
            "repeat" => Some(Self::Repeat),
            _ => None,
        }
    }

    fn to_value(self) -> OptionValue {
        match self {
            Self::Loop => "loop".into(),
            Self::Repeat => "repeat".into(),
        }
    }
}

/// Resize `values` to exactly `target` steps
///
/// Growing keeps every original value and spreads them euclidean-evenly,
/// filling the new slots per `fill`. Shrinking keeps the values picked by
/// `distribute(len, target)`. A `target` of 0 or the current length returns
/// the input unchanged.
///
/// # Example
/// ```
/// use stepseq_core::{resize, Rounding, StretchFill, TailStyle};
/// let grown = resize(&[1, 2, 3, 4], 7, StretchFill::Value(0), TailStyle::Loop, Rounding::None);
/// assert_eq!(grown, vec![1, 0, 2, 0, 3, 0, 4]);
/// ```
pub fn resize<T: Cell>(
    values: &[T],
    target: usize,
    fill: StretchFill,
    tail: TailStyle,
    rounding: Rounding,
) -> Vec<T> {
    let len = values.len();
    if target == 0 || target == len {
        return values.to_vec();
    }

    if len == 0 {
        let seed = match fill {
            StretchFill::Value(n) => T::from_f64(n as f64),
            _ => T::default(),
        };
        return vec![seed; target];
    }

    if target < len {
        return distribute(len, target, 0)
            .into_iter()
            .zip(values)
            .filter_map(|(keep, &value)| keep.then_some(value))
            .collect();
    }

    fill_slots(spread(values, target), fill, tail, rounding)
}

/// Lay out originals across `target` slots, `None` marking new slots.
/// Requires `0 < values.len() < target`.
fn spread<T: Cell>(values: &[T], target: usize) -> Vec<Option<T>> {
    let len = values.len();
    let quotient = target / len;
    let remainder = target % len;

    // Each original owns itself plus quotient - 1 trailing slots, which is
    // nothing at all until the target reaches twice the length.
    let mut groups = values.iter().map(|&value| {
        let mut group = Vec::with_capacity(quotient);
        group.push(Some(value));
        group.resize(quotient, None);
        group
    });

    if remainder == 0 {
        return groups.flatten().collect();
    }

    // The leftover slots go between groups, spaced by another distribution.
    distribute(len + remainder, len, 0)
        .into_iter()
        .flat_map(|is_group| {
            if is_group {
                groups.next().unwrap_or_default()
            } else {
                vec![None]
            }
        })
        .collect()
}

fn fill_slots<T: Cell>(
    slots: Vec<Option<T>>,
    fill: StretchFill,
    tail: TailStyle,
    rounding: Rounding,
) -> Vec<T> {
    match fill {
        StretchFill::Value(n) => {
            let constant = T::from_f64(n as f64);
            slots.into_iter().map(|slot| slot.unwrap_or(constant)).collect()
        }
        StretchFill::Repeat => {
            let mut last = T::default();
            slots
                .into_iter()
                .map(|slot| {
                    if let Some(value) = slot {
                        last = value;
                    }
                    last
                })
                .collect()
        }
        StretchFill::Interpolate => interpolate_slots(&slots, tail, rounding),
    }
}

fn interpolate_slots<T: Cell>(slots: &[Option<T>], tail: TailStyle, rounding: Rounding) -> Vec<T> {
    let anchors: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.is_some().then_some(i))
        .collect();
    let mut out: Vec<T> = slots.iter().map(|slot| slot.unwrap_or_default()).collect();

    for pair in anchors.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let gap = to - from - 1;
        if gap > 0 {
            let between = interpolate_cells(out[from], out[to], gap, rounding);
            out[from + 1..to].copy_from_slice(&between);
        }
    }

    if let Some(&last) = anchors.last() {
        let gap = out.len() - last - 1;
        if gap > 0 {
            let trailing = match tail {
                TailStyle::Loop => interpolate_cells(out[last], out[0], gap, rounding),
                TailStyle::Repeat => vec![out[last]; gap],
            };
            out[last + 1..].copy_from_slice(&trailing);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeros(values: &[i32], target: usize) -> Vec<i32> {
        resize(values, target, StretchFill::Value(0), TailStyle::Loop, Rounding::None)
    }

    #[test]
    fn test_stretch_with_constant() {
        assert_eq!(zeros(&[1, 2, 3, 4], 8), vec![1, 0, 2, 0, 3, 0, 4, 0]);
        assert_eq!(zeros(&[1, 2, 3, 4], 7), vec![1, 0, 2, 0, 3, 0, 4]);
        assert_eq!(zeros(&[1, 2, 3], 8), vec![1, 0, 0, 2, 0, 0, 3, 0]);
        assert_eq!(
            resize(&[1, 2, 3, 4], 8, StretchFill::Value(9), TailStyle::Loop, Rounding::None),
            vec![1, 9, 2, 9, 3, 9, 4, 9]
        );
    }

    #[test]
    fn test_stretch_below_double_adds_no_group_padding() {
        assert_eq!(zeros(&[1, 2, 3, 4], 5), vec![1, 2, 3, 4, 0]);
        assert_eq!(zeros(&[1, 2, 3, 4], 6), vec![1, 0, 2, 3, 0, 4]);
    }

    #[test]
    fn test_stretch_with_repeat() {
        let out = resize(&[1, 2, 3, 4], 8, StretchFill::Repeat, TailStyle::Loop, Rounding::None);
        assert_eq!(out, vec![1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn test_stretch_with_interpolate() {
        let interp = |values: &[f64], target, tail| {
            resize(values, target, StretchFill::Interpolate, tail, Rounding::None)
        };

        assert_eq!(
            interp(&[1.0, 2.0, 4.0, 8.0], 8, TailStyle::Loop),
            vec![1.0, 1.5, 2.0, 3.0, 4.0, 6.0, 8.0, 4.5]
        );
        assert_eq!(
            interp(&[1.0, 2.0, 4.0, 8.0], 8, TailStyle::Repeat),
            vec![1.0, 1.5, 2.0, 3.0, 4.0, 6.0, 8.0, 8.0]
        );
        assert_eq!(
            interp(&[1.0, 2.0, 4.0, 8.0, 10.0], 8, TailStyle::Loop),
            vec![1.0, 1.5, 2.0, 4.0, 6.0, 8.0, 10.0, 5.5]
        );
        assert_eq!(
            interp(&[1.0, 2.0, 4.0, 8.0, 10.0], 7, TailStyle::Loop),
            vec![1.0, 1.5, 2.0, 4.0, 6.0, 8.0, 10.0]
        );
    }

    #[test]
    fn test_interpolate_rounding_on_integers() {
        let out = resize(&[1, 2, 4, 8], 8, StretchFill::Interpolate, TailStyle::Loop, Rounding::Auto);
        assert_eq!(out, vec![1, 2, 2, 3, 4, 6, 8, 5]);
    }

    #[test]
    fn test_shrink() {
        assert_eq!(zeros(&[1, 2, 3, 4], 2), vec![1, 3]);
        assert_eq!(zeros(&[1, 2, 3, 4, 5, 6, 7, 8], 3), vec![1, 4, 7]);
    }

    #[test]
    fn test_noop_sizes() {
        assert_eq!(zeros(&[1, 2, 3], 3), vec![1, 2, 3]);
        assert_eq!(zeros(&[1, 2, 3], 0), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(zeros(&[], 3), vec![0, 0, 0]);
        let out: Vec<i32> = resize(&[], 2, StretchFill::Value(5), TailStyle::Loop, Rounding::None);
        assert_eq!(out, vec![5, 5]);
    }

    #[test]
    fn test_growth_keeps_every_original_in_order() {
        let values: Vec<i32> = (1..=5).collect();
        for target in 6..30 {
            let out = zeros(&values, target);
            assert_eq!(out.len(), target);
            let kept: Vec<i32> = out.into_iter().filter(|&v| v != 0).collect();
            assert_eq!(kept, values, "target {target}");
        }
    }
}
