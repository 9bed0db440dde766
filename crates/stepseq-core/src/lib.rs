//! stepseq-core: Step sequences with euclidean resizing and undo history

mod cell;
mod error;
pub mod euclid;
pub mod history;
pub mod interpolate;
pub mod options;
mod sequence;
pub mod transform;

pub use cell::Cell;
pub use error::{Result, StepSeqError};
pub use euclid::{distribute, modulo, rotate, shift_seq, DEFAULT_HITS, DEFAULT_STEPS};
pub use history::{Command, History, Stack};
pub use interpolate::{interpolate, interpolate_cells, Rounding};
pub use options::{DeleteStyle, OptionValue, ReplaceStyle, SequenceOptions, ShiftStyle, OPTION_KEYS};
pub use sequence::Sequence;
pub use transform::{extend, resize, ExtendFill, StretchFill, TailStyle};
