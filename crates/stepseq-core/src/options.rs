//! Per-sequence configuration
//!
//! Every option is a closed enum validated when it is set. Values arriving as
//! loose strings or integers (config files, the string-keyed setter) that do
//! not name a valid choice fall back to that option's default and log a
//! warning instead of failing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interpolate::Rounding;
use crate::transform::{ExtendFill, StretchFill, TailStyle};

/// Every key understood by [`SequenceOptions::set`] and [`SequenceOptions::get`]
pub const OPTION_KEYS: [&str; 9] = [
    "shift-style",
    "stretch-with",
    "expand-with",
    "replace-style",
    "interpolate-style",
    "interpolate-rounding",
    "global-rounding",
    "loop-length",
    "delete-style",
];

// ============================================================================
// Loose option values
// ============================================================================

/// An unvalidated option value as it appears in config files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Int(i64),
    Text(String),
}

impl OptionValue {
    /// Integer reading, accepting numeric strings
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.trim()),
            Self::Int(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        Self::Int(n as i64)
    }
}

impl From<usize> for OptionValue {
    fn from(n: usize) -> Self {
        Self::Int(n as i64)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A closed set of choices for one option
pub(crate) trait Choice: Sized + Copy {
    fn parse(value: &OptionValue) -> Option<Self>;
    fn to_value(self) -> OptionValue;
}

fn choose<C: Choice>(key: &str, value: &OptionValue, fallback: C) -> C {
    C::parse(value).unwrap_or_else(|| {
        warn!(key, %value, fallback = %fallback.to_value(), "invalid option value, using default");
        fallback
    })
}

impl Choice for usize {
    fn parse(value: &OptionValue) -> Option<Self> {
        value.as_int().and_then(|n| usize::try_from(n).ok())
    }

    fn to_value(self) -> OptionValue {
        OptionValue::from(self)
    }
}

// ============================================================================
// Sequence-level choices
// ============================================================================

/// How `shift` interprets its amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftStyle {
    /// Add to the running offset
    #[default]
    Relative,
    /// Rotate to an offset measured from the unshifted sequence
    Absolute,
}

impl Choice for ShiftStyle {
    fn parse(value: &OptionValue) -> Option<Self> {
        match value.as_text()? {
            "relative" => Some(Self::Relative),
            "absolute" => Some(Self::Absolute),
            _ => None,
        }
    }

    fn to_value(self) -> OptionValue {
        match self {
            Self::Relative => "relative".into(),
            Self::Absolute => "absolute".into(),
        }
    }
}

/// What `replace` does with values that run past the last step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceStyle {
    /// Drop them
    Trim,
    /// Grow the sequence to fit them
    #[default]
    Expand,
}

impl Choice for ReplaceStyle {
    fn parse(value: &OptionValue) -> Option<Self> {
        match value.as_text()? {
            "trim" => Some(Self::Trim),
            "expand" => Some(Self::Expand),
            _ => None,
        }
    }

    fn to_value(self) -> OptionValue {
        match self {
            Self::Trim => "trim".into(),
            Self::Expand => "expand".into(),
        }
    }
}

/// How `remove_step` clears a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStyle {
    /// Overwrite the step with a constant
    Value(i64),
    /// Remove the step, shortening the sequence
    Cut,
}

impl Default for DeleteStyle {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl Choice for DeleteStyle {
    fn parse(value: &OptionValue) -> Option<Self> {
        if value.as_text() == Some("cut") {
            return Some(Self::Cut);
        }
        value.as_int().map(Self::Value)
    }

    fn to_value(self) -> OptionValue {
        match self {
            Self::Value(n) => n.into(),
            Self::Cut => "cut".into(),
        }
    }
}

// ============================================================================
// Option set
// ============================================================================

/// Configuration snapshot owned by a single sequence
///
/// Serializes as a flat map keyed by [`OPTION_KEYS`]. Unknown keys are
/// ignored and invalid values fall back to defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, OptionValue>",
    into = "BTreeMap<String, OptionValue>"
)]
pub struct SequenceOptions {
    pub shift_style: ShiftStyle,
    pub stretch_with: StretchFill,
    pub expand_with: ExtendFill,
    pub replace_style: ReplaceStyle,
    /// Tail policy for interpolating stretches
    pub interpolate_style: TailStyle,
    pub interpolate_rounding: Rounding,
    /// Rounding for computed sizes and rescaled offsets
    pub global_rounding: Rounding,
    /// Default window for looping expansion, 0 = whole sequence
    pub loop_length: usize,
    pub delete_style: DeleteStyle,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            shift_style: ShiftStyle::Relative,
            stretch_with: StretchFill::Value(0),
            expand_with: ExtendFill::Value(0),
            replace_style: ReplaceStyle::Expand,
            interpolate_style: TailStyle::Loop,
            interpolate_rounding: Rounding::None,
            global_rounding: Rounding::Auto,
            loop_length: 0,
            delete_style: DeleteStyle::Value(0),
        }
    }
}

impl SequenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option by key
    ///
    /// # Example
    /// ```
    /// use stepseq_core::{SequenceOptions, StretchFill};
    /// let mut options = SequenceOptions::new();
    /// options.set("stretch-with", 9).set("replace-style", "trim");
    /// assert_eq!(options.stretch_with, StretchFill::Value(9));
    /// ```
    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) -> &mut Self {
        let value = value.into();
        let defaults = Self::default();

        match key {
            "shift-style" => self.shift_style = choose(key, &value, defaults.shift_style),
            "stretch-with" => self.stretch_with = choose(key, &value, defaults.stretch_with),
            "expand-with" => self.expand_with = choose(key, &value, defaults.expand_with),
            "replace-style" => self.replace_style = choose(key, &value, defaults.replace_style),
            "interpolate-style" => {
                self.interpolate_style = choose(key, &value, defaults.interpolate_style)
            }
            "interpolate-rounding" => {
                self.interpolate_rounding = choose(key, &value, defaults.interpolate_rounding)
            }
            "global-rounding" => {
                self.global_rounding = choose(key, &value, defaults.global_rounding)
            }
            "loop-length" => self.loop_length = choose(key, &value, defaults.loop_length),
            "delete-style" => self.delete_style = choose(key, &value, defaults.delete_style),
            _ => warn!(key, "ignoring unknown sequence option"),
        }

        self
    }

    /// Get an option by key, `None` for unknown keys
    pub fn get(&self, key: &str) -> Option<OptionValue> {
        let value = match key {
            "shift-style" => self.shift_style.to_value(),
            "stretch-with" => self.stretch_with.to_value(),
            "expand-with" => self.expand_with.to_value(),
            "replace-style" => self.replace_style.to_value(),
            "interpolate-style" => self.interpolate_style.to_value(),
            "interpolate-rounding" => self.interpolate_rounding.to_value(),
            "global-rounding" => self.global_rounding.to_value(),
            "loop-length" => self.loop_length.to_value(),
            "delete-style" => self.delete_style.to_value(),
            _ => return None,
        };
        Some(value)
    }

    /// Apply every entry of `entries`, in order
    pub fn extend<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        for (key, value) in entries {
            self.set(key.as_ref(), value);
        }
        self
    }
}

impl From<BTreeMap<String, OptionValue>> for SequenceOptions {
    fn from(map: BTreeMap<String, OptionValue>) -> Self {
        let mut options = Self::default();
        options.extend(map);
        options
    }
}

impl From<SequenceOptions> for BTreeMap<String, OptionValue> {
    fn from(options: SequenceOptions) -> Self {
        OPTION_KEYS
            .iter()
            .filter_map(|&key| options.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}
