//! The step sequence container
//!
//! Steps are addressed with 1-based indices throughout the public API. Every
//! mutation computes a new array first, registers the command that reverses
//! it, then commits. Calls that would leave the sequence unchanged record
//! nothing.

use std::fmt;

use tracing::{debug, trace};

use crate::cell::Cell;
use crate::error::{Result, StepSeqError};
use crate::euclid::{DEFAULT_STEPS, rotate};
use crate::history::{Command, History, Stack};
use crate::interpolate::Rounding;
use crate::options::{DeleteStyle, OptionValue, ReplaceStyle, SequenceOptions, ShiftStyle};
use crate::transform::{ExtendFill, StretchFill, TailStyle, extend, resize};

/// A cyclic array of step values with an undo log
#[derive(Debug)]
pub struct Sequence<T = f64> {
    values: Vec<T>,
    hits: usize,
    offset: usize,
    options: SequenceOptions,
    history: History<T>,
}

impl<T: Cell> Default for Sequence<T> {
    fn default() -> Self {
        Self::with_steps(DEFAULT_STEPS)
    }
}

impl<T: Cell> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        Self::with_options(values, SequenceOptions::default())
    }
}

impl<T: Cell> Sequence<T> {
    /// Sixteen empty steps
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_steps(steps: usize) -> Self {
        Self::from(vec![T::default(); steps])
    }

    pub fn with_options(values: Vec<T>, options: SequenceOptions) -> Self {
        let mut sequence = Self {
            values: Vec::new(),
            hits: 0,
            offset: 0,
            options,
            history: History::new(),
        };
        sequence.set(values);
        sequence
    }

    /// Independent copy with the same values and options and an empty history
    pub fn copy(&self) -> Self {
        Self::with_options(self.values.clone(), self.options.clone())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of steps holding a value above zero
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Accumulated rotation, always below `len()` (0 when empty)
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn as_list(&self) -> Vec<T> {
        self.values.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn get(&self, step: usize) -> Result<T> {
        Ok(self.values[self.index(step)?])
    }

    // ========================================================================
    // Options
    // ========================================================================

    pub fn options(&self) -> &SequenceOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut SequenceOptions {
        &mut self.options
    }

    pub fn set_option(&mut self, key: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.options.set(key, value);
        self
    }

    pub fn get_option(&self, key: &str) -> Option<OptionValue> {
        self.options.get(key)
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Undo up to `depth` edits, all of them when `depth` is 0.
    /// Returns how many were undone.
    pub fn undo(&mut self, depth: usize) -> Result<usize> {
        self.replay(Stack::Undo, depth)
    }

    /// Redo up to `depth` undone edits, all of them when `depth` is 0
    pub fn redo(&mut self, depth: usize) -> Result<usize> {
        self.replay(Stack::Redo, depth)
    }

    /// Undo everything back to the last `set`
    pub fn reset(&mut self) -> Result<&mut Self> {
        self.undo(0)?;
        Ok(self)
    }

    pub fn history_size(&self, stack: Stack) -> usize {
        self.history.size(stack)
    }

    pub fn history(&self) -> &History<T> {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn replay(&mut self, from: Stack, depth: usize) -> Result<usize> {
        let mut applied = 0;

        while depth == 0 || applied < depth {
            let Some(command) = self.history.pop(from) else {
                break;
            };

            if let Err(err) = self.check(&command) {
                self.history.push(from, command);
                return Err(err);
            }

            trace!(op = command.name(), ?from, "replaying command");
            let inverse = self.execute(command);
            self.history.push(from.opposite(), inverse);
            applied += 1;
        }

        Ok(applied)
    }

    fn check(&self, command: &Command<T>) -> Result<()> {
        match command {
            Command::SetStep { step, .. } => self.index(*step).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Apply a command that already passed `check`, returning its inverse
    fn execute(&mut self, command: Command<T>) -> Command<T> {
        match command {
            Command::Restore { values, offset } => {
                let inverse = Command::Restore {
                    values: std::mem::replace(&mut self.values, values),
                    offset: self.offset,
                };
                self.settle(offset);
                inverse
            }
            Command::Shift { amount } => {
                let amount = amount.rem_euclid(self.values.len().max(1) as i64);
                self.rotate_by(amount);
                Command::Shift { amount: -amount }
            }
            Command::Reverse => {
                self.values.reverse();
                Command::Reverse
            }
            Command::SetStep { step, value } => {
                let index = step - 1;
                let previous = std::mem::replace(&mut self.values[index], value);
                self.recount();
                Command::SetStep { step, value: previous }
            }
        }
    }

    // ========================================================================
    // Commit helpers
    // ========================================================================

    fn index(&self, step: usize) -> Result<usize> {
        if step == 0 || step > self.values.len() {
            return Err(StepSeqError::IndexOutOfRange {
                step,
                len: self.values.len(),
            });
        }
        Ok(step - 1)
    }

    fn recount(&mut self) {
        self.hits = self.values.iter().filter(|v| v.is_hit()).count();
    }

    /// Recount hits and wrap `offset` into the current length
    fn settle(&mut self, offset: usize) {
        self.recount();
        self.offset = match self.values.len() {
            0 => 0,
            len => offset % len,
        };
    }

    /// Swap in a new array, recording a restore of the old one
    fn commit(&mut self, op: &'static str, values: Vec<T>, offset: usize) {
        let old_len = self.values.len();
        let previous = std::mem::replace(&mut self.values, values);
        self.history.register(Command::Restore {
            values: previous,
            offset: self.offset,
        });
        self.settle(offset);
        debug!(op, old_len, new_len = self.values.len(), hits = self.hits, "sequence updated");
    }

    fn rotate_by(&mut self, amount: i64) {
        rotate(&mut self.values, amount);
        let len = self.values.len() as i64;
        self.offset = match len {
            0 => 0,
            _ => (self.offset as i64 + amount.rem_euclid(len)).rem_euclid(len) as usize,
        };
    }

    /// Offset carried across a resize from `old_len` to `new_len` steps
    fn scaled_offset(&self, old_len: usize, new_len: usize) -> usize {
        if old_len == 0 {
            return 0;
        }
        let scaled = self.offset as f64 * new_len as f64 / old_len as f64;
        self.options.global_rounding.apply(scaled).max(0.0) as usize
    }

    fn scaled_size(&self, factor: f64) -> usize {
        self.options
            .global_rounding
            .apply(self.values.len() as f64 * factor)
            .max(0.0) as usize
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Replace the whole sequence. This becomes the new baseline: the offset
    /// returns to 0 and the undo log is cleared.
    pub fn set(&mut self, values: Vec<T>) -> &mut Self {
        self.values = values;
        self.history.clear();
        self.settle(0);
        self
    }

    /// Replace the sequence with `steps` empty steps
    pub fn set_steps(&mut self, steps: usize) -> &mut Self {
        self.set(vec![T::default(); steps])
    }

    /// Insert `values` before `step`; `len() + 1` appends
    pub fn insert(&mut self, values: &[T], step: usize) -> Result<&mut Self> {
        if step == 0 || step > self.values.len() + 1 {
            return Err(StepSeqError::IndexOutOfRange {
                step,
                len: self.values.len(),
            });
        }
        if values.is_empty() {
            return Ok(self);
        }

        let at = step - 1;
        let mut next = Vec::with_capacity(self.values.len() + values.len());
        next.extend_from_slice(&self.values[..at]);
        next.extend_from_slice(values);
        next.extend_from_slice(&self.values[at..]);
        self.commit("insert", next, self.offset);
        Ok(self)
    }

    pub fn append(&mut self, values: &[T]) -> &mut Self {
        if !values.is_empty() {
            let next = [self.values.as_slice(), values].concat();
            self.commit("append", next, self.offset);
        }
        self
    }

    pub fn prepend(&mut self, values: &[T]) -> &mut Self {
        if !values.is_empty() {
            let next = [values, self.values.as_slice()].concat();
            self.commit("prepend", next, self.offset);
        }
        self
    }

    /// Remove `count` steps starting at `start`, stopping at the end
    pub fn remove(&mut self, start: usize, count: usize) -> Result<&mut Self> {
        let at = self.index(start)?;
        let end = at.saturating_add(count).min(self.values.len());
        if at == end {
            return Ok(self);
        }

        let next = [&self.values[..at], &self.values[end..]].concat();
        self.commit("remove", next, self.offset);
        Ok(self)
    }

    /// Remove up to `count` steps from the start
    pub fn remove_head(&mut self, count: usize) -> &mut Self {
        let count = count.min(self.values.len());
        if count > 0 {
            let next = self.values[count..].to_vec();
            self.commit("remove", next, self.offset);
        }
        self
    }

    /// Remove up to `count` steps from the end
    pub fn remove_tail(&mut self, count: usize) -> &mut Self {
        let keep = self.values.len().saturating_sub(count);
        if keep < self.values.len() {
            let next = self.values[..keep].to_vec();
            self.commit("remove", next, self.offset);
        }
        self
    }

    /// Overwrite steps from `step` onward with the configured replace style
    pub fn replace(&mut self, values: &[T], step: usize) -> Result<&mut Self> {
        let style = self.options.replace_style;
        self.replace_with(values, step, style)
    }

    /// Overwrite steps from `step` onward. Values past the last step are
    /// dropped (`Trim`) or grow the sequence (`Expand`).
    pub fn replace_with(&mut self, values: &[T], step: usize, style: ReplaceStyle) -> Result<&mut Self> {
        let at = self.index(step)?;
        let len = self.values.len();
        let end = at + values.len();
        let next = if end <= len {
            [&self.values[..at], values, &self.values[end..]].concat()
        } else {
            match style {
                ReplaceStyle::Trim => [&self.values[..at], &values[..len - at]].concat(),
                ReplaceStyle::Expand => [&self.values[..at], values].concat(),
            }
        };

        if next != self.values {
            self.commit("replace", next, self.offset);
        }
        Ok(self)
    }

    // ========================================================================
    // Step edits
    // ========================================================================

    pub fn replace_step(&mut self, step: usize, value: T) -> Result<&mut Self> {
        let index = self.index(step)?;
        let previous = self.values[index];
        if previous != value {
            self.history.register(Command::SetStep { step, value: previous });
            self.values[index] = value;
            self.recount();
            debug!(op = "replace-step", step, "sequence updated");
        }
        Ok(self)
    }

    /// Alias for [`Sequence::replace_step`]
    pub fn set_step(&mut self, step: usize, value: T) -> Result<&mut Self> {
        self.replace_step(step, value)
    }

    /// Clear a step with the configured delete style
    pub fn remove_step(&mut self, step: usize) -> Result<&mut Self> {
        let style = self.options.delete_style;
        self.remove_step_with(step, style)
    }

    pub fn remove_step_with(&mut self, step: usize, style: DeleteStyle) -> Result<&mut Self> {
        match style {
            DeleteStyle::Value(n) => self.replace_step(step, T::from_f64(n as f64)),
            DeleteStyle::Cut => self.remove(step, 1),
        }
    }

    /// Replace up to `limit` occurrences of `old` (every one when `limit` is 0)
    pub fn replace_value(&mut self, old: T, new: T, limit: usize) -> &mut Self {
        let mut next = self.values.clone();
        let mut replaced = 0;

        for value in next.iter_mut().filter(|v| **v == old) {
            if limit != 0 && replaced == limit {
                break;
            }
            *value = new;
            replaced += 1;
        }

        if replaced > 0 && next != self.values {
            self.commit("replace-value", next, self.offset);
        }
        self
    }

    // ========================================================================
    // Rotation and ordering
    // ========================================================================

    /// Shift with the configured shift style
    pub fn shift(&mut self, amount: i64) -> &mut Self {
        let style = self.options.shift_style;
        self.shift_with(amount, style)
    }

    /// Rotate the sequence. Positive amounts move values toward the end.
    ///
    /// `Relative` adds `amount` to the running offset, `Absolute` rotates
    /// until the offset equals `amount`.
    pub fn shift_with(&mut self, amount: i64, style: ShiftStyle) -> &mut Self {
        let len = self.values.len() as i64;
        if len == 0 {
            return self;
        }

        // Reduced into 0..len so extreme amounts cannot overflow
        let reduced = amount.rem_euclid(len);
        let delta = match style {
            ShiftStyle::Relative => reduced,
            ShiftStyle::Absolute => (reduced - self.offset as i64).rem_euclid(len),
        };

        if delta != 0 {
            self.history.register(Command::Shift { amount: len - delta });
            self.rotate_by(delta);
            debug!(op = "shift", delta, offset = self.offset, "sequence updated");
        }
        self
    }

    pub fn reverse(&mut self) -> &mut Self {
        if self.values.len() > 1 {
            self.history.register(Command::Reverse);
            self.values.reverse();
            debug!(op = "reverse", "sequence updated");
        }
        self
    }

    /// Repeat the sequence `|n|` times, reversed first when `n` is negative
    pub fn loop_n(&mut self, n: i64) -> &mut Self {
        if n == 0 || n == 1 || self.values.is_empty() {
            return self;
        }

        let mut unit = self.values.clone();
        if n < 0 {
            unit.reverse();
        }
        let next = unit.repeat(n.unsigned_abs() as usize);
        self.commit("loop", next, self.offset);
        self
    }

    // ========================================================================
    // Stretch / shrink
    // ========================================================================

    /// Resize to `size`, spreading the existing steps evenly
    pub fn stretch_to(&mut self, size: usize) -> &mut Self {
        let options = &self.options;
        let (fill, tail, rounding) = (
            options.stretch_with,
            options.interpolate_style,
            options.interpolate_rounding,
        );
        self.stretch_to_with(size, fill, tail, rounding)
    }

    pub fn stretch_to_with(
        &mut self,
        size: usize,
        fill: StretchFill,
        tail: TailStyle,
        rounding: Rounding,
    ) -> &mut Self {
        let old_len = self.values.len();
        if size == 0 || size == old_len {
            return self;
        }

        let next = resize(&self.values, size, fill, tail, rounding);
        let offset = self.scaled_offset(old_len, size);
        self.commit("stretch", next, offset);
        self
    }

    /// Alias for [`Sequence::stretch_to`]
    pub fn shrink_to(&mut self, size: usize) -> &mut Self {
        self.stretch_to(size)
    }

    /// Stretch to `len() * mult`, rounded with the global rounding
    pub fn stretch_by(&mut self, mult: f64) -> Result<&mut Self> {
        let size = self.scaled_size(checked_factor("multiplier", mult)?);
        Ok(self.stretch_to(size))
    }

    /// Stretch to `len() / div`, rounded with the global rounding
    pub fn shrink_by(&mut self, div: f64) -> Result<&mut Self> {
        let size = self.scaled_size(checked_divisor(div)?);
        Ok(self.stretch_to(size))
    }

    // ========================================================================
    // Expand / contract
    // ========================================================================

    /// Grow or truncate at the tail to `size`
    pub fn expand_to(&mut self, size: usize) -> &mut Self {
        let (fill, rounding) = (self.options.expand_with, self.options.interpolate_rounding);
        self.expand_to_with(size, fill, None, rounding)
    }

    /// `loop_length` overrides a `loop-N` fill, which overrides the
    /// `loop-length` option
    pub fn expand_to_with(
        &mut self,
        size: usize,
        fill: ExtendFill,
        loop_length: Option<usize>,
        rounding: Rounding,
    ) -> &mut Self {
        if size == self.values.len() {
            return self;
        }

        let default_window = Some(self.options.loop_length).filter(|&n| n > 0);
        let window = loop_length.or(fill.loop_window()).or(default_window);
        let next = extend(&self.values, size, fill, window, rounding);
        self.commit("expand", next, self.offset);
        self
    }

    /// Alias for [`Sequence::expand_to`]
    pub fn contract_to(&mut self, size: usize) -> &mut Self {
        self.expand_to(size)
    }

    /// Expand to `len() * mult`, rounded with the global rounding
    pub fn expand_by(&mut self, mult: f64) -> Result<&mut Self> {
        let size = self.scaled_size(checked_factor("multiplier", mult)?);
        Ok(self.expand_to(size))
    }

    /// Expand to `len() / div`, rounded with the global rounding
    pub fn contract_by(&mut self, div: f64) -> Result<&mut Self> {
        let size = self.scaled_size(checked_divisor(div)?);
        Ok(self.expand_to(size))
    }
}

fn checked_factor(name: &str, factor: f64) -> Result<f64> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(StepSeqError::InvalidArgument(format!(
            "{name} must be a finite, non-negative number, got {factor}"
        )));
    }
    Ok(factor)
}

fn checked_divisor(div: f64) -> Result<f64> {
    if checked_factor("divisor", div)? == 0.0 {
        return Err(StepSeqError::InvalidArgument("divisor must not be zero".into()));
    }
    Ok(1.0 / div)
}

impl<T: Cell> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {:?}", self.len(), self.hits, self.values)
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[i32]) -> Sequence<i32> {
        Sequence::from(values.to_vec())
    }

    #[test]
    fn test_new_is_sixteen_empty_steps() {
        let s: Sequence = Sequence::new();
        assert_eq!(s.len(), 16);
        assert_eq!(s.hits(), 0);
        assert!(s.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_set_counts_hits() {
        let mut s = seq(&[]);
        s.set(vec![1, 1, 0, 0]);
        assert_eq!(s.len(), 4);
        assert_eq!(s.hits(), 2);
        assert_eq!(s.as_list(), vec![1, 1, 0, 0]);

        s.set_steps(4);
        assert_eq!(s.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(s.hits(), 0);
    }

    #[test]
    fn test_set_resets_offset_and_history() {
        let mut s = seq(&[0, 1, 2, 3]);
        s.shift(1);
        assert_eq!(s.offset(), 1);
        s.set(vec![5, 6]);
        assert_eq!(s.offset(), 0);
        assert_eq!(s.history_size(Stack::Undo), 0);
    }

    #[test]
    fn test_get_is_one_indexed() {
        let s = seq(&[4, 5, 6]);
        assert_eq!(s.get(1), Ok(4));
        assert_eq!(s.get(3), Ok(6));
        assert_eq!(s.get(0), Err(StepSeqError::IndexOutOfRange { step: 0, len: 3 }));
        assert_eq!(s.get(4), Err(StepSeqError::IndexOutOfRange { step: 4, len: 3 }));
    }

    #[test]
    fn test_copy_is_independent() {
        let mut s = seq(&[1, 2, 3]);
        s.set_option("replace-style", "trim").reverse();

        let mut c = s.copy();
        assert_eq!(c.as_slice(), s.as_slice());
        assert_eq!(c.options(), s.options());
        assert_eq!(c.history_size(Stack::Undo), 0);

        c.append(&[9]).set_option("replace-style", "expand");
        assert_eq!(s.as_slice(), &[3, 2, 1]);
        assert_eq!(s.options().replace_style, ReplaceStyle::Trim);
    }

    #[test]
    fn test_insert() {
        let mut s = seq(&[1, 2, 3, 4, 5]);
        s.insert(&[11, 21, 31], 2).unwrap();
        assert_eq!(s.as_slice(), &[1, 11, 21, 31, 2, 3, 4, 5]);

        s.insert(&[9], 9).unwrap();
        assert_eq!(s.get(9), Ok(9));
        assert_eq!(s.insert(&[1], 11).unwrap_err(), StepSeqError::IndexOutOfRange { step: 11, len: 9 });
    }

    #[test]
    fn test_remove() {
        let mut s = seq(&[1, 2, 3, 4, 5]);
        s.remove_head(2);
        assert_eq!(s.as_slice(), &[3, 4, 5]);
        s.remove_tail(2);
        assert_eq!(s.as_slice(), &[3]);

        let mut s = seq(&[1, 2, 3, 4, 5]);
        s.remove(2, 3).unwrap();
        assert_eq!(s.as_slice(), &[1, 5]);
        s.remove(2, 10).unwrap();
        assert_eq!(s.as_slice(), &[1]);
        assert_eq!(s.remove(3, 1).unwrap_err(), StepSeqError::IndexOutOfRange { step: 3, len: 1 });
    }

    #[test]
    fn test_append_prepend() {
        let mut s = seq(&[1, 2]);
        s.append(&[3, 4]);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);

        let mut s = seq(&[3, 4]);
        s.prepend(&[1, 2]);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_replace() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.replace(&[5, 6], 2).unwrap();
        assert_eq!(s.as_slice(), &[1, 5, 6, 4]);
        s.replace(&[2, 3, 4], 1).unwrap();
        assert_eq!(s.as_slice(), &[2, 3, 4, 4]);

        let mut s = seq(&[1, 2, 3, 4]);
        s.replace_with(&[5, 6, 7], 3, ReplaceStyle::Trim).unwrap();
        assert_eq!(s.as_slice(), &[1, 2, 5, 6]);

        let mut s = seq(&[1, 2, 3, 4]);
        s.replace_with(&[5, 6, 7], 3, ReplaceStyle::Expand).unwrap();
        assert_eq!(s.as_slice(), &[1, 2, 5, 6, 7]);

        let mut s = seq(&[1, 2]);
        s.replace(&[7, 8, 9], 2).unwrap();
        assert_eq!(s.as_slice(), &[1, 7, 8, 9]);
    }

    #[test]
    fn test_replace_longer_than_sequence() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.replace_with(&[9; 5], 3, ReplaceStyle::Trim).unwrap();
        assert_eq!(s.as_slice(), &[1, 2, 9, 9]);

        let mut s = seq(&[1, 2]);
        s.replace_with(&[7, 8, 9], 1, ReplaceStyle::Trim).unwrap();
        assert_eq!(s.as_slice(), &[7, 8]);

        let mut s = seq(&[1, 2]);
        assert_eq!(
            s.replace(&[7, 8, 9], 99).unwrap_err(),
            StepSeqError::IndexOutOfRange { step: 99, len: 2 }
        );
        assert_eq!(s.as_slice(), &[1, 2]);
        assert_eq!(s.history_size(Stack::Undo), 0);
    }

    #[test]
    fn test_replace_out_of_range() {
        let mut s = seq(&[1, 2, 3]);
        assert_eq!(
            s.replace(&[1], 4).unwrap_err(),
            StepSeqError::IndexOutOfRange { step: 4, len: 3 }
        );
        assert_eq!(s.history_size(Stack::Undo), 0);
    }

    #[test]
    fn test_step_edits() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.replace_step(2, 4).unwrap();
        assert_eq!(s.as_slice(), &[1, 4, 3, 4]);

        s.remove_step(1).unwrap();
        assert_eq!(s.as_slice(), &[0, 4, 3, 4]);
        assert_eq!(s.hits(), 3);

        s.remove_step_with(1, DeleteStyle::Cut).unwrap();
        assert_eq!(s.as_slice(), &[4, 3, 4]);

        assert!(s.replace_step(5, 1).is_err());
        assert!(s.remove_step(0).is_err());
    }

    #[test]
    fn test_replace_value() {
        let mut s = seq(&[1, 2, 3, 4, 3, 2, 1]);
        s.replace_value(2, 5, 0);
        assert_eq!(s.as_slice(), &[1, 5, 3, 4, 3, 5, 1]);

        s.replace_value(1, 0, 1);
        assert_eq!(s.as_slice(), &[0, 5, 3, 4, 3, 5, 1]);
        assert_eq!(s.hits(), 6);
    }

    #[test]
    fn test_relative_shift() {
        let mut s = seq(&[0, 1, 2, 3]);

        s.shift(1);
        assert_eq!(s.as_slice(), &[3, 0, 1, 2]);
        assert_eq!(s.offset(), 1);

        s.shift(2);
        assert_eq!(s.as_slice(), &[1, 2, 3, 0]);
        s.shift(-1);
        assert_eq!(s.as_slice(), &[2, 3, 0, 1]);
        s.shift(-2);
        assert_eq!(s.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(s.offset(), 0);
        s.shift(5);
        assert_eq!(s.as_slice(), &[3, 0, 1, 2]);
        s.shift(-6);
        assert_eq!(s.as_slice(), &[1, 2, 3, 0]);
        assert_eq!(s.offset(), 3);
    }

    #[test]
    fn test_absolute_shift() {
        let mut s = seq(&[0, 1, 2, 3]);
        s.set_option("shift-style", "absolute");

        s.shift(1);
        assert_eq!(s.as_slice(), &[3, 0, 1, 2]);
        s.shift(-1);
        assert_eq!(s.as_slice(), &[1, 2, 3, 0]);
        assert_eq!(s.offset(), 3);
        s.shift(0);
        assert_eq!(s.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_shift_by_extreme_amounts() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.shift(1);
        s.shift(i64::MAX);
        // i64::MAX is 3 mod 4
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(s.offset(), 0);

        s.shift(i64::MIN);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);
        s.shift(i64::MIN + 1);
        assert_eq!(s.as_slice(), &[4, 1, 2, 3]);
        assert_eq!(s.offset(), 1);

        s.shift_with(i64::MIN, ShiftStyle::Absolute);
        assert_eq!(s.offset(), 0);
        s.shift_with(i64::MAX, ShiftStyle::Absolute);
        assert_eq!(s.offset(), 3);
        assert_eq!(s.as_slice(), &[2, 3, 4, 1]);

        assert_eq!(s.undo(0).unwrap(), 5);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn test_reverse_and_loop() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.reverse();
        assert_eq!(s.as_slice(), &[4, 3, 2, 1]);

        let mut s = seq(&[1, 2, 3]);
        s.loop_n(3);
        assert_eq!(s.as_slice(), &[1, 2, 3, 1, 2, 3, 1, 2, 3]);

        let mut s = seq(&[1, 2, 3]);
        s.loop_n(-3);
        assert_eq!(s.as_slice(), &[3, 2, 1, 3, 2, 1, 3, 2, 1]);
    }

    #[test]
    fn test_stretch_rescales_offset() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.shift(1);
        s.stretch_to(8);
        assert_eq!(s.offset(), 2);
        s.stretch_to(3);
        assert_eq!(s.offset(), 1);
    }

    #[test]
    fn test_expand_keeps_offset() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.shift(3);
        s.expand_to(8);
        assert_eq!(s.offset(), 3);
        s.contract_to(2);
        assert_eq!(s.offset(), 1);
    }

    #[test]
    fn test_by_multipliers() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.stretch_by(2.0).unwrap();
        assert_eq!(s.as_slice(), &[1, 0, 2, 0, 3, 0, 4, 0]);

        let mut s = seq(&[1, 2, 3, 4]);
        s.shrink_by(2.0).unwrap();
        assert_eq!(s.as_slice(), &[1, 3]);

        let mut s = seq(&[1, 2, 3]);
        s.set_option("expand-with", "loop-2").expand_by(3.0).unwrap();
        assert_eq!(s.as_slice(), &[1, 2, 3, 2, 3, 2, 3, 2, 3]);

        let mut s = seq(&[1, 2, 3, 4]);
        s.expand_by(0.5).unwrap();
        assert_eq!(s.as_slice(), &[1, 2]);

        let mut s = seq(&[1, 2]);
        s.set_option("expand-with", 4).contract_by(0.5).unwrap();
        assert_eq!(s.as_slice(), &[1, 2, 4, 4]);
    }

    #[test]
    fn test_by_rejects_bad_factors() {
        let mut s = seq(&[1, 2, 3, 4]);
        assert!(matches!(s.shrink_by(0.0), Err(StepSeqError::InvalidArgument(_))));
        assert!(matches!(s.stretch_by(-1.0), Err(StepSeqError::InvalidArgument(_))));
        assert!(matches!(s.expand_by(f64::NAN), Err(StepSeqError::InvalidArgument(_))));
        assert!(matches!(s.contract_by(f64::INFINITY), Err(StepSeqError::InvalidArgument(_))));
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_loop_length_option_and_override() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.set_option("expand-with", "loop").set_option("loop-length", 2);
        s.expand_to(7);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4, 3, 4, 3]);

        let mut s = seq(&[1, 2, 3, 4]);
        s.expand_to_with(8, ExtendFill::Loop(Some(2)), Some(3), Rounding::None);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4, 2, 3, 4, 2]);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.stretch_to(8).shift(1).reverse();
        s.replace_step(1, 9).unwrap();
        let edited = s.as_list();
        let offset = s.offset();
        assert_eq!(s.history_size(Stack::Undo), 4);

        assert_eq!(s.undo(2).unwrap(), 2);
        assert_eq!(s.history_size(Stack::Redo), 2);
        assert_eq!(s.undo(0).unwrap(), 2);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(s.offset(), 0);

        assert_eq!(s.redo(0).unwrap(), 4);
        assert_eq!(s.as_list(), edited);
        assert_eq!(s.offset(), offset);
        assert_eq!(s.history_size(Stack::Redo), 0);
    }

    #[test]
    fn test_replay_reduces_stored_shift() {
        let mut s = seq(&[1, 2, 3, 4]);
        s.history.register(Command::Shift { amount: i64::MIN + 1 });
        assert_eq!(s.undo(1).unwrap(), 1);
        assert_eq!(s.as_slice(), &[4, 1, 2, 3]);
        assert_eq!(s.offset(), 1);

        assert_eq!(s.redo(1).unwrap(), 1);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut s = seq(&[1, 2, 3]);
        s.reverse();
        s.undo(1).unwrap();
        assert_eq!(s.history_size(Stack::Redo), 1);
        s.append(&[4]);
        assert_eq!(s.history_size(Stack::Redo), 0);
        assert_eq!(s.redo(1).unwrap(), 0);
    }

    #[test]
    fn test_noops_record_nothing() {
        let mut s = seq(&[1, 2, 3]);
        s.stretch_to(3).expand_to(3).shift(3).loop_n(1);
        s.replace_step(1, 1).unwrap();
        s.replace_value(7, 8, 0);
        assert_eq!(s.history_size(Stack::Undo), 0);
    }

    #[test]
    fn test_display() {
        let s = seq(&[1, 0, 2]);
        assert_eq!(s.to_string(), "3:2 [1, 0, 2]");
    }
}
