use super::token::Token;
use crate::error::MathError;
use crate::number::NamedConstant;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, digit1, multispace0};
use nom::combinator::{map, opt, recognize, value};
use nom::multi::many0;
use nom::sequence::{delimited, pair};
use nom::IResult;

/// Identifiers which are not a product of single letter variables
pub const FUNCTIONS: &[&str] = &["log", "ln", "sqrt", "root", "abs"];

// operators
fn lex_relational(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::NotEqual, alt((tag("!="), tag("≠")))),
        value(Token::GreaterThanEqual, alt((tag(">="), tag("≥")))),
        value(Token::LessThanEqual, alt((tag("<="), tag("≤")))),
        value(Token::Equal, tag("=")),
        value(Token::GreaterThan, tag(">")),
        value(Token::LessThan, tag("<")),
    ))(input)
}

fn lex_operator(input: &str) -> IResult<&str, Token> {
    alt((
        lex_relational,
        value(Token::Factorial, tag("!")),
        value(Token::Plus, tag("+")),
        value(Token::Minus, alt((tag("-"), tag("−")))),
        value(Token::Multiply, alt((tag("*"), tag("⋅"), tag("·")))),
        value(Token::Divide, tag("/")),
        value(Token::Power, tag("^")),
        value(Token::Root(2), tag("√")),
        value(Token::Root(3), tag("∛")),
        value(Token::Root(4), tag("∜")),
    ))(input)
}

// Literals
fn lex_number(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(digit1, opt(pair(tag("."), digit1)))),
        |literal: &str| Token::Number(literal.to_owned()),
    )(input)
}

fn lex_constant(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Constant(NamedConstant::Pi), tag("π")),
        value(Token::Constant(NamedConstant::Euler), tag("ⅇ")),
    ))(input)
}

fn lex_ident(input: &str) -> IResult<&str, Token> {
    map(alpha1, |ident: &str| Token::Ident(ident.to_owned()))(input)
}

// punctuation
fn lex_punctuation(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Comma, tag(",")),
        value(Token::BracketL, tag("(")),
        value(Token::BracketR, tag(")")),
        value(Token::Pipe, tag("|")),
    ))(input)
}

fn lex_token(input: &str) -> IResult<&str, Token> {
    alt((lex_operator, lex_punctuation, lex_number, lex_constant, lex_ident))(input)
}

fn letter(c: char) -> Token {
    match c {
        'e' => Token::Constant(NamedConstant::Euler),
        c => Token::Ident(c.to_string()),
    }
}

/// Known function names stay one token, `pi` and `e` are constants and any
/// other run of letters is a product of single letter variables.
fn split_idents(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .flat_map(|token| match token {
            Token::Ident(ident) if FUNCTIONS.contains(&&ident[..]) => vec![Token::Function(ident)],
            Token::Ident(ident) if ident == "pi" => vec![Token::Constant(NamedConstant::Pi)],
            Token::Ident(ident) => ident.chars().map(letter).collect(),
            token => vec![token],
        })
        .collect()
}

pub fn lex_tokens(input: &str) -> Result<Vec<Token>, MathError> {
    let result: IResult<&str, Vec<Token>> =
        many0(delimited(multispace0, lex_token, multispace0))(input);
    let (rest, tokens) = result.map_err(|msg| MathError::Parse(msg.to_string()))?;
    if !rest.trim().is_empty() {
        return Err(MathError::Parse(format!("Unexpected input \"{}\"", rest)));
    }
    let mut tokens = split_idents(tokens);
    tokens.push(Token::EOF);
    Ok(tokens)
}
