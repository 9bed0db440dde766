//! Step payloads

use std::fmt::Debug;

/// A value that can live in a sequence step.
///
/// Hits are counted by comparing against zero, and synthesized values
/// (interpolation, constant fills) pass through `f64`.
pub trait Cell: Copy + PartialEq + Debug + Default {
    fn to_f64(self) -> f64;

    /// Integer cells truncate toward zero.
    fn from_f64(value: f64) -> Self;

    fn is_hit(&self) -> bool {
        self.to_f64() > 0.0
    }
}

macro_rules! impl_cell {
    ($($t:ty),*) => {
        $(
            impl Cell for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_cell!(i32, i64, f32, f64);
