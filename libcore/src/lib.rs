//! Symbolic algebra on exact numbers
//!
//! Expressions are simplified by an ordered set of rewrite rules and
//! equations in one variable are solved into interval sets.
//!
//! # Example
//!
//! ```text
//! x^2 + 5x + 6 > 0
//! ```
//!
//! is solved to
//!
//! ```text
//! x < -3 , x > -2
//! ```

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate maplit;

#[macro_use]
pub mod error;
pub mod component;
pub mod context;
pub mod derivative;
pub mod domain;
pub mod dumper;
pub mod interval;
pub mod number;
pub mod parser;
pub mod polynomial;
pub mod relation;
pub mod resolver;
pub mod restriction;
pub mod rules;
pub mod simplifier;
pub mod trace;

pub use component::Component;
pub use context::{Context, NumericMode};
pub use derivative::derivative;
pub use domain::Domain;
pub use dumper::LaTeX;
pub use error::{ErrorKind, MathError};
pub use interval::{GenericInterval, IntervalSet};
pub use number::{Constant, NamedConstant};
pub use parser::{parse_equation, parse_expression, Equation};
pub use polynomial::Polynomial;
pub use relation::RelationalOperator;
pub use resolver::{evaluate, resolve, solve, DEFAULT_VARIABLE};
pub use restriction::domain_of;
pub use simplifier::{simplify, simplify_with_trace, try_simplify};
pub use trace::SimplifyTrace;
