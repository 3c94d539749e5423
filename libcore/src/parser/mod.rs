//! Text to component trees
//!
//! ```text
//! 3x^2 - 2(x+1) >= √2
//! ```

use crate::component::Component;
use crate::context::Context;
use crate::error::MathError;
use crate::relation::RelationalOperator;
use std::fmt;

mod astifier;
mod lexer;
pub mod token;

pub use astifier::Precedence;
pub use lexer::FUNCTIONS;
use token::Token;

/// Two sides related by an operator
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub left: Component,
    pub operator: RelationalOperator,
    pub right: Component,
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

pub fn parse_expression(text: &str, context: &Context) -> Result<Component, MathError> {
    let tokens = lexer::lex_tokens(text)?;
    astifier::parse(context, &tokens)
}

/// Splits the input at its relational operator.
///
/// Returns `Ok(None)` if there is no relational operator, callers then fall
/// back to treat the input as a plain expression.
pub fn parse_equation(text: &str, context: &Context) -> Result<Option<Equation>, MathError> {
    let tokens = lexer::lex_tokens(text)?;
    let positions = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is_relational())
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    let position = match positions[..] {
        [] => return Ok(None),
        [position] => position,
        _ => {
            return Err(MathError::Parse(
                "Chained relational operators are not supported".to_owned(),
            ))
        }
    };
    let operator = RelationalOperator::from_token(&tokens[position])
        .ok_or_else(|| MathError::Internal("relational token expected".to_owned()))?;
    let mut left = tokens[..position].to_vec();
    left.push(Token::EOF);
    let right = &tokens[position + 1..];
    Ok(Some(Equation {
        left: astifier::parse(context, &left)?,
        operator,
        right: astifier::parse(context, right)?,
    }))
}
