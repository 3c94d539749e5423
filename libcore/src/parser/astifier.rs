//! Composing tokens to a component tree
//! Following https://de.wikipedia.org/wiki/Shunting-yard-Algorithmus

use crate::component::{Component, Expression, ExpressionOperator, LogBase, Term, TermOperator};
use crate::context::Context;
use crate::error::MathError;
use crate::number::{Constant, NamedConstant};
use crate::parser::token::*;
use std::slice::Iter;

#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
pub enum Precedence {
    PLowest,
    PSeparator,
    PCall,
    POpening,
    PSum,
    PProduct,
    /// Prefix minus and radicals, binding weaker than powers: -x^2 = -(x^2)
    PUnary,
    PPower,
    PHighest,
}

#[derive(Debug, PartialEq)]
enum BracketDirection {
    Closing,
    Opening,
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum BracketType {
    Round,
    Pipe,
}

#[derive(Debug, PartialEq)]
struct Bracket {
    pub direction: BracketDirection,
    pub r#type: BracketType,
}

#[derive(Debug, PartialEq)]
enum Classification {
    Infix(Operation),
    Prefix(Operation),
    Bracket(Bracket),
    Separator,
    Postfix,
    Ident(char),
    Named(NamedConstant),
    Literal(String),
    EOF,
}

#[derive(Debug, PartialEq)]
enum OperationType {
    Infix,
    Prefix,
    Function,
    Dummy,
}

#[derive(Debug, PartialEq)]
struct Operation {
    precedence: Precedence,
    ident: String,
    r#type: OperationType,
}

impl Operation {
    fn right_associative(&self) -> bool {
        self.ident == "^"
    }
}

type Classified = Option<Result<Classification, MathError>>;

fn create_infix(ident: &str, precedence: Precedence) -> Classified {
    Some(Ok(Classification::Infix(Operation {
        ident: String::from(ident),
        precedence,
        r#type: OperationType::Infix,
    })))
}

fn create_prefix(ident: &str, precedence: Precedence) -> Classified {
    Some(Ok(Classification::Prefix(Operation {
        ident: String::from(ident),
        precedence,
        r#type: OperationType::Prefix,
    })))
}

fn create_function(ident: &str) -> Classified {
    Some(Ok(Classification::Prefix(Operation {
        ident: String::from(ident),
        precedence: Precedence::PCall,
        r#type: OperationType::Function,
    })))
}

fn create_bracket(direction: BracketDirection, r#type: BracketType) -> Classified {
    Some(Ok(Classification::Bracket(Bracket { direction, r#type })))
}

mod token_type {
    pub const PREFIX: u32 = 1;
    pub const INFIX: u32 = 1 << 1;
    pub const IDENT: u32 = 1 << 2;
    pub const LITERAL: u32 = 1 << 3;
    pub const CLOSING_BRACKET: u32 = 1 << 4;
    pub const OPENING_BRACKET: u32 = 1 << 5;
    pub const SEPARATOR: u32 = 1 << 6;
    pub const PIPE: u32 = 1 << 7;
    pub const FUNCTION: u32 = 1 << 8;
    pub const RELATIONAL: u32 = 1 << 9;
    pub const EOF: u32 = 1 << 10;
    pub const POSTFIX: u32 = 1 << 11;
}

fn token_info(token: &Token) -> (u32, &'static str, Precedence) {
    use token_type::*;
    match token {
        Token::Number(_) => (LITERAL, "", Precedence::PLowest),
        Token::Ident(_) | Token::Constant(_) => (IDENT, "", Precedence::PLowest),
        Token::Function(_) => (FUNCTION, "", Precedence::PCall),
        Token::Plus => (INFIX | PREFIX, "+", Precedence::PSum),
        Token::Minus => (INFIX | PREFIX, "-", Precedence::PSum),
        Token::Multiply => (INFIX, "*", Precedence::PProduct),
        Token::Divide => (INFIX, "/", Precedence::PProduct),
        Token::Power => (INFIX, "^", Precedence::PPower),
        Token::Factorial => (POSTFIX, "!", Precedence::PHighest),
        Token::Root(2) => (PREFIX, "√", Precedence::PUnary),
        Token::Root(3) => (PREFIX, "∛", Precedence::PUnary),
        Token::Root(_) => (PREFIX, "∜", Precedence::PUnary),
        Token::Equal
        | Token::NotEqual
        | Token::GreaterThan
        | Token::LessThan
        | Token::GreaterThanEqual
        | Token::LessThanEqual => (RELATIONAL, "", Precedence::PLowest),
        Token::BracketL => (OPENING_BRACKET, "(", Precedence::POpening),
        Token::BracketR => (CLOSING_BRACKET, ")", Precedence::POpening),
        Token::Pipe => (PIPE, "|", Precedence::POpening),
        Token::Comma => (SEPARATOR, ",", Precedence::PLowest),
        Token::EOF => (EOF, "", Precedence::PLowest),
    }
}

/// Purpose
/// State-full iteration over tokens
/// * Distinguishes if operator is prefix or infix
/// * Distinguishes opening and closing pipes
/// * Fill default operator for instance 3x => 3*x
struct Classifier<'a> {
    tokens: Iter<'a, Token>,
    expect_operator: bool,
    open_pipes: usize,
    next: Option<&'a Token>,
}

impl<'a> Classifier<'a> {
    fn new(tokens: &'a [Token]) -> Classifier<'a> {
        Classifier {
            tokens: tokens.iter(),
            expect_operator: false,
            open_pipes: 0,
            next: None,
        }
    }

    fn implicit_multiplication(&mut self, token: &'a Token) -> Classified {
        self.expect_operator = false;
        self.next = Some(token);
        create_infix("*", Precedence::PProduct)
    }
}

impl<'a> Iterator for Classifier<'a> {
    type Item = Result<Classification, MathError>;

    fn next(&mut self) -> Classified {
        let next = self.next.or_else(|| self.tokens.next());
        self.next = None;

        let token = next?;
        let (flags, ident, precedence) = token_info(token);
        if flags & token_type::RELATIONAL != 0 {
            return Some(Err(MathError::Parse(format!(
                "Unexpected relational operator {:?}",
                token
            ))));
        }
        if self.expect_operator {
            if flags & token_type::INFIX != 0 {
                self.expect_operator = false;
                create_infix(ident, precedence)
            } else if flags & token_type::POSTFIX != 0 {
                Some(Ok(Classification::Postfix))
            } else if flags & token_type::EOF != 0 {
                Some(Ok(Classification::EOF))
            } else if flags & token_type::CLOSING_BRACKET != 0 {
                create_bracket(BracketDirection::Closing, BracketType::Round)
            } else if flags & token_type::PIPE != 0 && self.open_pipes > 0 {
                self.open_pipes -= 1;
                create_bracket(BracketDirection::Closing, BracketType::Pipe)
            } else if flags & token_type::SEPARATOR != 0 {
                self.expect_operator = false;
                Some(Ok(Classification::Separator))
            } else if flags
                & (token_type::IDENT
                    | token_type::LITERAL
                    | token_type::FUNCTION
                    | token_type::PREFIX
                    | token_type::OPENING_BRACKET
                    | token_type::PIPE)
                != 0
            {
                self.implicit_multiplication(token)
            } else {
                Some(Err(MathError::Parse(format!(
                    "Expected operator, found {:?}",
                    token
                ))))
            }
        } else {
            match token {
                Token::Ident(name) => {
                    self.expect_operator = true;
                    match name.chars().next() {
                        Some(name) => Some(Ok(Classification::Ident(name))),
                        None => Some(Err(MathError::Parse("Empty identifier".to_owned()))),
                    }
                }
                Token::Constant(constant) => {
                    self.expect_operator = true;
                    Some(Ok(Classification::Named(*constant)))
                }
                Token::Number(literal) => {
                    self.expect_operator = true;
                    Some(Ok(Classification::Literal(literal.clone())))
                }
                Token::Function(name) => create_function(name),
                Token::Minus => create_prefix(ident, Precedence::PUnary),
                // A leading plus does not change anything
                Token::Plus => self.next(),
                Token::Root(_) => create_prefix(ident, precedence),
                Token::BracketL => create_bracket(BracketDirection::Opening, BracketType::Round),
                Token::Pipe => {
                    self.open_pipes += 1;
                    create_bracket(BracketDirection::Opening, BracketType::Pipe)
                }
                Token::EOF => Some(Ok(Classification::EOF)),
                _ => Some(Err(MathError::Parse(format!(
                    "Expected literal or ident, found {:?}",
                    token
                )))),
            }
        }
    }
}

struct ParseStack {
    pub symbol: Vec<Component>,
    pub infix: Vec<Operation>,
}

impl ParseStack {
    pub fn pop_as_symbol(&mut self) -> Result<Component, MathError> {
        self.symbol
            .pop()
            .ok_or_else(|| MathError::Parse("Missing operand".to_owned()))
    }
}

fn chain_sum(a: Component, operator: ExpressionOperator, b: Component) -> Result<Component, MathError> {
    match a {
        Component::Expression(mut expression) => {
            expression.push(operator, b);
            Ok(Component::Expression(expression))
        }
        a => Ok(Component::Expression(Expression::new(vec![
            (ExpressionOperator::Sum, a),
            (operator, b),
        ])?)),
    }
}

fn chain_product(a: Component, operator: TermOperator, b: Component) -> Result<Component, MathError> {
    match a {
        Component::Term(mut term) => {
            term.push(operator, b);
            Ok(Component::Term(term))
        }
        a => Ok(Component::Term(Term::new(vec![
            (TermOperator::Multiply, a),
            (operator, b),
        ])?)),
    }
}

fn build_infix(ident: &str, a: Component, b: Component) -> Result<Component, MathError> {
    match ident {
        "+" => chain_sum(a, ExpressionOperator::Sum, b),
        "-" => chain_sum(a, ExpressionOperator::Subtract, b),
        "*" => chain_product(a, TermOperator::Multiply, b),
        "/" => chain_product(a, TermOperator::Divide, b),
        "^" => Ok(Component::exponential(a, b)),
        _ => Err(MathError::Parse(format!("Unknown operator {}", ident))),
    }
}

fn build_prefix(ident: &str, child: Component) -> Result<Component, MathError> {
    match ident {
        "-" => Ok(child.negate()),
        "√" => Ok(Component::root(2, child)),
        "∛" => Ok(Component::root(3, child)),
        "∜" => Ok(Component::root(4, child)),
        _ => Err(MathError::Parse(format!("Unknown prefix operator {}", ident))),
    }
}

fn build_function(ident: &str, mut childs: Vec<Component>) -> Result<Component, MathError> {
    let count = childs.len();
    let arity_error = || {
        MathError::Parse(format!(
            "Function {} does not take {} arguments",
            ident, count
        ))
    };
    let expected = if ident == "root" { 2 } else { 1 };
    if count != expected {
        return Err(arity_error());
    }
    let argument = childs.pop().ok_or_else(arity_error)?;
    match ident {
        "log" => Ok(Component::logarithm(LogBase::Ten, argument)),
        "ln" => Ok(Component::logarithm(LogBase::Natural, argument)),
        "sqrt" => Ok(Component::root(2, argument)),
        "abs" => Ok(Component::abs(argument)),
        "root" => match childs.pop().as_ref().and_then(Component::as_constant) {
            Some(index) => match index.to_u32() {
                Some(index) if index >= 2 => Ok(Component::root(index, argument)),
                _ => Err(MathError::Parse(format!(
                    "Root index must be an integer greater than 1, found {}",
                    index.to_plain()
                ))),
            },
            None => Err(MathError::Parse(
                "Root index must be a constant".to_owned(),
            )),
        },
        _ => Err(MathError::Parse(format!("Unknown function {}", ident))),
    }
}

fn astify(stack: &mut ParseStack, till: Precedence) -> Result<(), MathError> {
    while !stack.infix.is_empty() && stack.infix[stack.infix.len() - 1].precedence > till {
        let Operation { ident, r#type, .. } = match stack.infix.pop() {
            Some(operation) => operation,
            None => break,
        };
        let symbol = match r#type {
            OperationType::Infix => {
                let b = stack.pop_as_symbol()?;
                let a = stack.pop_as_symbol()?;
                build_infix(&ident, a, b)?
            }
            OperationType::Prefix => build_prefix(&ident, stack.pop_as_symbol()?)?,
            _ => {
                return Err(MathError::Parse(format!(
                    "Unbalanced brackets at {}",
                    ident
                )))
            }
        };
        stack.symbol.push(symbol);
    }
    Ok(())
}

fn apply_function(stack: &mut ParseStack) -> Result<(), MathError> {
    let mut childs = vec![stack.pop_as_symbol()?];
    loop {
        match stack.infix.pop() {
            Some(Operation { ident, .. }) if ident == "," => childs.push(stack.pop_as_symbol()?),
            Some(Operation { ident, .. }) if ident == "(" => break,
            _ => return Err(MathError::Parse("Unbalanced brackets".to_owned())),
        }
    }
    childs.reverse();

    // Was this a function call?
    let is_call = matches!(
        stack.infix.last(),
        Some(Operation { r#type: OperationType::Function, .. })
    );
    if is_call {
        match stack.infix.pop() {
            Some(function) => stack.symbol.push(build_function(&function.ident, childs)?),
            None => return Err(MathError::Parse("Missing function".to_owned())),
        }
    } else {
        match childs.pop() {
            Some(child) if childs.is_empty() => stack.symbol.push(Component::parenthesized(child)),
            _ => {
                return Err(MathError::Parse(
                    "Expecting group containing one item. Vectors not supported".to_owned(),
                ))
            }
        }
    }
    Ok(())
}

fn apply_abs(stack: &mut ParseStack) -> Result<(), MathError> {
    match stack.infix.pop() {
        Some(Operation { ident, .. }) if ident == "|" => {
            let child = stack.pop_as_symbol()?;
            stack.symbol.push(Component::abs(child));
            Ok(())
        }
        _ => Err(MathError::Parse("Unbalanced absolute value".to_owned())),
    }
}

fn push_dummy(stack: &mut ParseStack, ident: &str) {
    stack.infix.push(Operation {
        precedence: Precedence::POpening,
        ident: String::from(ident),
        r#type: OperationType::Dummy,
    });
}

pub fn parse(context: &Context, tokens: &[Token]) -> Result<Component, MathError> {
    let mut stack = ParseStack {
        infix: Vec::new(),
        symbol: Vec::new(),
    };

    for token in Classifier::new(tokens) {
        match token? {
            Classification::Infix(operation) => {
                // Left associative operators also reduce their equals
                let till = if operation.right_associative() {
                    operation.precedence
                } else {
                    lower(operation.precedence)
                };
                astify(&mut stack, till)?;
                stack.infix.push(operation);
            }
            Classification::Prefix(operation) => stack.infix.push(operation),
            // Binds to the operand right before it
            Classification::Postfix => {
                let argument = stack.pop_as_symbol()?;
                stack.symbol.push(Component::factorial(argument));
            }
            Classification::Ident(name) => stack.symbol.push(Component::Variable(name)),
            Classification::Named(constant) => stack.symbol.push(Component::Named(constant)),
            Classification::Literal(literal) => stack
                .symbol
                .push(Component::Constant(Constant::parse(&literal, context)?)),
            Classification::EOF => break,
            Classification::Bracket(bracket) => match (bracket.direction, bracket.r#type) {
                (BracketDirection::Closing, BracketType::Round) => {
                    astify(&mut stack, Precedence::POpening)?;
                    apply_function(&mut stack)?;
                }
                (BracketDirection::Closing, BracketType::Pipe) => {
                    astify(&mut stack, Precedence::POpening)?;
                    apply_abs(&mut stack)?;
                }
                (BracketDirection::Opening, BracketType::Round) => push_dummy(&mut stack, "("),
                (BracketDirection::Opening, BracketType::Pipe) => push_dummy(&mut stack, "|"),
            },
            Classification::Separator => {
                astify(&mut stack, Precedence::POpening)?;
                push_dummy(&mut stack, ",");
            }
        };
    }

    astify(&mut stack, Precedence::PLowest)?;
    if !stack.infix.is_empty() {
        return Err(MathError::Parse("Unbalanced brackets".to_owned()));
    }
    let symbol = stack.pop_as_symbol()?;
    if !stack.symbol.is_empty() {
        return Err(MathError::Parse("Missing operator".to_owned()));
    }
    Ok(symbol)
}

/// The next weaker precedence
fn lower(precedence: Precedence) -> Precedence {
    use Precedence::*;
    match precedence {
        PLowest | PSeparator => PLowest,
        PCall => PSeparator,
        POpening => PCall,
        PSum => POpening,
        PProduct => PSum,
        PUnary => PProduct,
        PPower => PUnary,
        PHighest => PPower,
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::parser::lexer::lex_tokens;

    fn parse_text(text: &str) -> Result<Component, MathError> {
        parse(&Context::default(), &lex_tokens(text).unwrap())
    }

    fn variable(name: char) -> Component {
        Component::Variable(name)
    }

    fn term(items: Vec<(TermOperator, Component)>) -> Component {
        Component::Term(Term::new(items).unwrap())
    }

    fn expression(items: Vec<(ExpressionOperator, Component)>) -> Component {
        Component::Expression(Expression::new(items).unwrap())
    }

    #[test]
    fn subtraction_is_left_associative() {
        use ExpressionOperator::*;
        let actual = parse_text("a-b-c").unwrap();
        let expected = expression(vec![
            (Sum, variable('a')),
            (Subtract, variable('b')),
            (Subtract, variable('c')),
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn division_is_left_associative() {
        use TermOperator::*;
        let actual = parse_text("a/b/c").unwrap();
        let expected = term(vec![
            (Multiply, variable('a')),
            (Divide, variable('b')),
            (Divide, variable('c')),
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn power_is_right_associative() {
        let actual = parse_text("a^b^c").unwrap();
        let expected = Component::exponential(
            variable('a'),
            Component::exponential(variable('b'), variable('c')),
        );
        assert_eq!(actual, expected);
    }

    #[test]
    fn precedence_product_over_sum() {
        use ExpressionOperator::*;
        use TermOperator::*;
        let actual = parse_text("a+b*c").unwrap();
        let expected = expression(vec![
            (Sum, variable('a')),
            (Sum, term(vec![(Multiply, variable('b')), (Multiply, variable('c'))])),
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn implicit_multiplication() {
        use TermOperator::*;
        let actual = parse_text("3xy").unwrap();
        let expected = term(vec![
            (Multiply, Component::constant(3)),
            (Multiply, variable('x')),
            (Multiply, variable('y')),
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn implicit_multiplication_with_bracket() {
        use TermOperator::*;
        let actual = parse_text("2(x+1)").unwrap();
        assert_eq!(
            actual,
            term(vec![
                (Multiply, Component::constant(2)),
                (
                    Multiply,
                    Component::parenthesized(parse_text("x+1").unwrap())
                ),
            ])
        );
    }

    #[test]
    fn unary_minus_binds_weaker_than_power() {
        let actual = parse_text("-x^2").unwrap();
        let expected = Component::exponential(variable('x'), Component::constant(2)).negate();
        assert_eq!(actual, expected);
    }

    #[test]
    fn negative_literal() {
        assert_eq!(parse_text("-3").unwrap(), Component::constant(-3));
        assert_eq!(parse_text("+3").unwrap(), Component::constant(3));
    }

    #[test]
    fn functions() {
        assert_eq!(
            parse_text("sqrt(x)").unwrap(),
            Component::root(2, variable('x'))
        );
        assert_eq!(
            parse_text("root(3, x)").unwrap(),
            Component::root(3, variable('x'))
        );
        assert_eq!(
            parse_text("ln(x)").unwrap(),
            Component::logarithm(LogBase::Natural, variable('x'))
        );
    }

    #[test]
    fn radical_symbol() {
        use TermOperator::*;
        let actual = parse_text("√2x").unwrap();
        let expected = term(vec![
            (Multiply, Component::root(2, Component::constant(2))),
            (Multiply, variable('x')),
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn absolute_values() {
        use TermOperator::*;
        assert_eq!(parse_text("|x|").unwrap(), Component::abs(variable('x')));
        let actual = parse_text("2|x|").unwrap();
        let expected = term(vec![
            (Multiply, Component::constant(2)),
            (Multiply, Component::abs(variable('x'))),
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn factorials() {
        use TermOperator::*;
        let three = || Component::constant(3);
        assert_eq!(parse_text("3!").unwrap(), Component::factorial(three()));
        assert_eq!(
            parse_text("2^3!").unwrap(),
            Component::exponential(Component::constant(2), Component::factorial(three()))
        );
        assert_eq!(
            parse_text("-3!").unwrap(),
            Component::factorial(three()).negate()
        );
        let actual = parse_text("2n!").unwrap();
        let expected = term(vec![
            (Multiply, Component::constant(2)),
            (Multiply, Component::factorial(variable('n'))),
        ]);
        assert_eq!(actual, expected);
        assert!(parse_text("!3").is_err());
    }

    #[test]
    fn named_constants() {
        use TermOperator::*;
        let actual = parse_text("2π").unwrap();
        let expected = term(vec![
            (Multiply, Component::constant(2)),
            (Multiply, Component::Named(NamedConstant::Pi)),
        ]);
        assert_eq!(actual, expected);
        assert_eq!(
            parse_text("ln(e)").unwrap(),
            Component::logarithm(LogBase::Natural, Component::Named(NamedConstant::Euler))
        );
    }

    #[test]
    fn unbalanced_brackets() {
        assert!(parse_text("(x+1").is_err());
        assert!(parse_text("x+1)").is_err());
        assert!(parse_text("|x").is_err());
    }

    #[test]
    fn missing_operand() {
        assert!(parse_text("x+").is_err());
        assert!(parse_text("").is_err());
        assert!(parse_text("*x").is_err());
    }

    #[test]
    fn wrong_arity() {
        assert!(parse_text("log(x, y)").is_err());
        assert!(parse_text("root(x)").is_err());
        assert!(parse_text("root(y, x)").is_err());
    }

    #[test]
    fn decimal_in_fractional_mode() {
        assert_eq!(parse_text("2.5x"), Err(MathError::DecimalInFractionalMode));
    }

    #[test]
    fn decimal_in_decimal_mode() {
        let tokens = lex_tokens("2.5").unwrap();
        let actual = parse(&Context::decimal(), &tokens).unwrap();
        assert_eq!(actual.to_string(), "2.5");
    }
}
