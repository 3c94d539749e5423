//! Solution sets over the real line and its discrete subsets

mod algebra;
mod delimiter;
mod generic;
mod set;

pub use delimiter::{Bound, Delimiter, DelimiterKind};
pub use generic::{DoublePointInterval, GenericInterval, SinglePointInterval};
pub use set::{intersect, union, IntervalSet};
