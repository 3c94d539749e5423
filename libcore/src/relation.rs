use crate::parser::token::Token;
use std::cmp::Ordering;
use std::fmt;

/// The relation between the two sides of an equation or inequality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationalOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEquals,
    LessThan,
    LessThanOrEquals,
}

pub const OPERATORS: [RelationalOperator; 6] = [
    RelationalOperator::Equals,
    RelationalOperator::NotEquals,
    RelationalOperator::GreaterThan,
    RelationalOperator::GreaterThanOrEquals,
    RelationalOperator::LessThan,
    RelationalOperator::LessThanOrEquals,
];

impl RelationalOperator {
    pub fn from_token(token: &Token) -> Option<RelationalOperator> {
        match token {
            Token::Equal => Some(RelationalOperator::Equals),
            Token::NotEqual => Some(RelationalOperator::NotEquals),
            Token::GreaterThan => Some(RelationalOperator::GreaterThan),
            Token::GreaterThanEqual => Some(RelationalOperator::GreaterThanOrEquals),
            Token::LessThan => Some(RelationalOperator::LessThan),
            Token::LessThanEqual => Some(RelationalOperator::LessThanOrEquals),
            _ => None,
        }
    }

    /// The operator after multiplying both sides with a negative number
    pub fn reversed(self) -> RelationalOperator {
        match self {
            RelationalOperator::GreaterThan => RelationalOperator::LessThan,
            RelationalOperator::GreaterThanOrEquals => RelationalOperator::LessThanOrEquals,
            RelationalOperator::LessThan => RelationalOperator::GreaterThan,
            RelationalOperator::LessThanOrEquals => RelationalOperator::GreaterThanOrEquals,
            other => other,
        }
    }

    /// Does `left (op) right` hold given the ordering of left and right?
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            RelationalOperator::Equals => ordering == Ordering::Equal,
            RelationalOperator::NotEquals => ordering != Ordering::Equal,
            RelationalOperator::GreaterThan => ordering == Ordering::Greater,
            RelationalOperator::GreaterThanOrEquals => ordering != Ordering::Less,
            RelationalOperator::LessThan => ordering == Ordering::Less,
            RelationalOperator::LessThanOrEquals => ordering != Ordering::Greater,
        }
    }

    /// Plain text symbol, also the lookup key of the typeset symbol table
    pub fn symbol(self) -> &'static str {
        match self {
            RelationalOperator::Equals => "=",
            RelationalOperator::NotEquals => "≠",
            RelationalOperator::GreaterThan => ">",
            RelationalOperator::GreaterThanOrEquals => "≥",
            RelationalOperator::LessThan => "<",
            RelationalOperator::LessThanOrEquals => "≤",
        }
    }
}

impl fmt::Display for RelationalOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    #[test]
    fn reversing_twice_is_identity() {
        for operator in OPERATORS.iter() {
            assert_eq!(operator.reversed().reversed(), *operator);
        }
    }

    #[test]
    fn reversing_flips_direction_only() {
        assert_eq!(
            RelationalOperator::GreaterThan.reversed(),
            RelationalOperator::LessThan
        );
        assert_eq!(
            RelationalOperator::LessThanOrEquals.reversed(),
            RelationalOperator::GreaterThanOrEquals
        );
        assert_eq!(
            RelationalOperator::NotEquals.reversed(),
            RelationalOperator::NotEquals
        );
    }

    #[test]
    fn holds() {
        assert!(RelationalOperator::GreaterThanOrEquals.holds(Ordering::Equal));
        assert!(!RelationalOperator::GreaterThan.holds(Ordering::Equal));
        assert!(RelationalOperator::NotEquals.holds(Ordering::Less));
        assert!(!RelationalOperator::LessThan.holds(Ordering::Greater));
    }
}
