//! Plain text and typeset renderings of the expression tree
mod base;
pub mod latex;
pub mod plain;

pub use base::{dump_base, FormatContext, Style};
pub use latex::*;
pub use plain::*;
