use crate::number::NamedConstant;

#[derive(PartialEq, Debug, Clone)]
pub enum Token {
    EOF,
    //
    Ident(String),
    Function(String),
    Number(String),
    Constant(NamedConstant),
    // operators
    Plus,
    Minus,
    Divide,
    Multiply,
    Power,
    Root(u32),
    Equal,
    NotEqual,
    GreaterThanEqual,
    LessThanEqual,
    GreaterThan,
    LessThan,
    Factorial,
    // grouping
    Comma,
    BracketL,
    BracketR,
    Pipe,
}

impl Token {
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Token::Equal
                | Token::NotEqual
                | Token::GreaterThanEqual
                | Token::LessThanEqual
                | Token::GreaterThan
                | Token::LessThan
        )
    }
}
