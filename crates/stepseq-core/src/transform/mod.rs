//! Length-changing transforms
//!
//! `resize` redistributes existing steps across the new length (stretch and
//! shrink). `extend` only touches the tail (expand and contract).

mod extend;
mod resize;

pub use extend::{extend, ExtendFill};
pub use resize::{resize, StretchFill, TailStyle};
