use thiserror::Error;

/// Coarse classification used by callers to decide how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was malformed or asks for something the engine refuses.
    UserInput,
    /// Valid mathematics the engine cannot handle ("not supported yet").
    Unsupported,
    /// A defect in the rewrite rules or the polynomial extractor.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("decimal numbers are not allowed in fractional mode")]
    DecimalInFractionalMode,

    #[error("equation contains more than one variable: {0}")]
    MultipleVariables(String),

    #[error("variables mismatch: {0} and {1}")]
    VariablesMismatch(String, String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("expression is undefined: {0}")]
    Undefined(String),

    #[error("component is not a scalar: {0}")]
    NotScalar(String),

    #[error("expression is not a polynomial in {0}")]
    NotPolynomial(char),

    #[error("not supported yet: {0}")]
    Unsupported(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl MathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MathError::Parse(_)
            | MathError::DecimalInFractionalMode
            | MathError::MultipleVariables(_)
            | MathError::VariablesMismatch(..)
            | MathError::DivisionByZero
            | MathError::Undefined(_)
            | MathError::NotScalar(_)
            | MathError::Config(_) => ErrorKind::UserInput,
            MathError::NotPolynomial(_) | MathError::Unsupported(_) => ErrorKind::Unsupported,
            MathError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Returns an [`MathError::Internal`] from the enclosing function when the
/// condition does not hold.
#[macro_export]
macro_rules! ensure_invariant {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::MathError::Internal(format!($($arg)+)));
        }
    };
}
