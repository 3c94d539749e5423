use crate::component::{Component, Expression, LogBase, Term, TermOperator};
use crate::number::{Constant, Notation};
use num_bigint::BigInt;
use num_traits::One;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    LaTeX,
}

pub struct FormatContext {
    pub style: Style,
    pub symbols: HashMap<&'static str, &'static str>,
}

impl FormatContext {
    pub fn get<'b>(&self, key: &'b str) -> &'b str {
        self.symbols.get(key).unwrap_or(&key)
    }

    fn constant(&self, constant: &Constant) -> String {
        match self.style {
            Style::Plain => constant.to_plain(),
            Style::LaTeX => constant.to_latex(),
        }
    }
}

fn dump_atomic(context: &FormatContext, component: &Component, bracket: bool, string: &mut String) {
    if bracket {
        string.push_str(context.get("("));
        dump_base(context, component, string);
        string.push_str(context.get(")"));
    } else {
        dump_base(context, component, string);
    }
}

fn is_non_negative_integer(component: &Component) -> bool {
    match component {
        Component::Constant(constant) => constant.is_integer() && !constant.is_negative(),
        _ => false,
    }
}

/// Needs the base of a power brackets?
fn bracket_base(component: &Component) -> bool {
    !matches!(
        component,
        Component::Variable(_)
            | Component::Named(_)
            | Component::Parenthesized(_)
            | Component::Abs(_)
            | Component::Logarithm(..)
    ) && !is_non_negative_integer(component)
}

fn bracket_exponent(component: &Component) -> bool {
    !matches!(component, Component::Variable(_) | Component::Parenthesized(_))
        && !is_non_negative_integer(component)
}

/// Needs a factor brackets when it is not the leading one of a product?
fn bracket_factor(component: &Component) -> bool {
    match component {
        Component::Expression(_) | Component::Term(_) => true,
        Component::Constant(constant) => constant.is_negative() || !constant.is_integer(),
        _ => false,
    }
}

/// Whether two adjacent factors need an explicit multiplication sign
fn needs_operator(after_coefficient: bool, factor: &Component, rendered: &str) -> bool {
    match factor {
        Component::Constant(_) => true,
        Component::Logarithm(..) | Component::Abs(_) => !after_coefficient,
        Component::Named(_) => false,
        _ => !matches!(
            rendered.chars().next(),
            Some(c) if c.is_alphabetic() || c == '(' || c == '√' || c == '∛' || c == '∜' || c == '\\'
        ),
    }
}

fn dump_expression(context: &FormatContext, expression: &Expression, string: &mut String) {
    use crate::component::ExpressionOperator::*;
    for (i, (operator, item)) in expression.items().iter().enumerate() {
        let mut rendered = String::new();
        dump_atomic(
            context,
            item,
            matches!(item, Component::Expression(_)),
            &mut rendered,
        );
        let negative = rendered.starts_with('-');
        match operator {
            Sum => {
                if i > 0 && !negative {
                    string.push('+');
                }
                string.push_str(&rendered);
            }
            Subtract => {
                string.push('-');
                if negative {
                    string.push_str(context.get("("));
                    string.push_str(&rendered);
                    string.push_str(context.get(")"));
                } else {
                    string.push_str(&rendered);
                }
            }
        }
    }
}

/// Renders `coefficient` followed by the factors as one product.
///
/// A lonely sum is only bracketed when the product is not `standalone`.
/// Returns the number of rendered pieces.
fn dump_product(
    context: &FormatContext,
    coefficient: Option<String>,
    factors: &[&Component],
    standalone: bool,
    string: &mut String,
) -> usize {
    let mut pieces = 0;
    let mut negated = false;
    let mut after_coefficient = false;
    match coefficient {
        Some(ref coefficient) if coefficient == "1" && !factors.is_empty() => {}
        Some(ref coefficient) if coefficient == "-1" && !factors.is_empty() => {
            string.push('-');
            negated = true;
        }
        Some(coefficient) => {
            string.push_str(&coefficient);
            pieces += 1;
            after_coefficient = true;
        }
        None if factors.is_empty() => {
            string.push('1');
            pieces += 1;
        }
        None => {}
    }
    let alone = standalone && factors.len() == 1 && pieces == 0 && !negated;
    for factor in factors.iter() {
        let bracket = match factor {
            Component::Expression(_) | Component::Term(_) => !alone,
            _ => pieces > 0 && bracket_factor(factor),
        };
        let mut rendered = String::new();
        dump_atomic(context, factor, bracket, &mut rendered);
        if pieces > 0 && needs_operator(after_coefficient, factor, &rendered) {
            string.push_str(context.get("*"));
        }
        string.push_str(&rendered);
        pieces += 1;
        after_coefficient = false;
    }
    pieces
}

fn dump_term(context: &FormatContext, term: &Term, string: &mut String) {
    let items = term.items();
    let (coefficient, rest) = match items.first() {
        Some((TermOperator::Multiply, Component::Constant(constant))) => {
            (Some(constant), &items[1..])
        }
        _ => (None, items),
    };
    let numerator_factors = rest
        .iter()
        .filter(|(operator, _)| *operator == TermOperator::Multiply)
        .map(|(_, factor)| factor)
        .collect::<Vec<_>>();
    let denominator_factors = rest
        .iter()
        .filter(|(operator, _)| *operator == TermOperator::Divide)
        .map(|(_, factor)| factor)
        .collect::<Vec<_>>();

    // A fraction coefficient is split so that 2/3*x reads 2x/3
    let (numerator_coefficient, denominator_coefficient): (Option<String>, Option<BigInt>) =
        match coefficient {
            Some(constant)
                if constant.notation() == Notation::Fraction && !constant.is_integer() =>
            {
                let value = constant.value();
                (
                    Some(value.numer().to_string()),
                    Some(value.denom().clone()),
                )
            }
            Some(constant) => (Some(context.constant(constant)), None),
            None => (None, None),
        };

    if denominator_factors.is_empty() && denominator_coefficient.is_none() {
        dump_product(
            context,
            numerator_coefficient,
            &numerator_factors,
            true,
            string,
        );
        return;
    }

    let mut numerator = String::new();
    dump_product(
        context,
        numerator_coefficient,
        &numerator_factors,
        context.style == Style::LaTeX,
        &mut numerator,
    );
    let mut denominator = String::new();
    let denominator_pieces = dump_product(
        context,
        denominator_coefficient
            .filter(|value| !value.is_one())
            .map(|value| value.to_string()),
        &denominator_factors,
        context.style == Style::LaTeX,
        &mut denominator,
    );

    match context.style {
        Style::Plain => {
            string.push_str(&numerator);
            string.push('/');
            let single = denominator_pieces == 1 && !denominator.starts_with('-');
            if single {
                string.push_str(&denominator);
            } else {
                string.push('(');
                string.push_str(&denominator);
                string.push(')');
            }
        }
        Style::LaTeX => {
            if let Some(positive) = numerator.strip_prefix('-') {
                string.push('-');
                numerator = positive.to_owned();
            }
            if numerator.is_empty() {
                numerator.push('1');
            }
            string.push_str("\\frac{");
            string.push_str(&numerator);
            string.push_str("}{");
            string.push_str(&denominator);
            string.push('}');
        }
    }
}

fn root_symbol(index: u32) -> Option<&'static str> {
    match index {
        2 => Some("√"),
        3 => Some("∛"),
        4 => Some("∜"),
        _ => None,
    }
}

fn dump_root(context: &FormatContext, index: u32, radicand: &Component, string: &mut String) {
    match context.style {
        Style::Plain => match root_symbol(index) {
            Some(symbol) => {
                string.push_str(symbol);
                let bracket = !matches!(
                    radicand,
                    Component::Variable(_) | Component::Parenthesized(_)
                ) && !is_non_negative_integer(radicand);
                dump_atomic(context, radicand, bracket, string);
            }
            None => {
                string.push_str(&format!("root({}, ", index));
                dump_base(context, radicand, string);
                string.push(')');
            }
        },
        Style::LaTeX => {
            if index == 2 {
                string.push_str("\\sqrt{");
            } else {
                string.push_str(&format!("\\sqrt[{}]{{", index));
            }
            dump_base(context, radicand, string);
            string.push('}');
        }
    }
}

pub fn dump_base(context: &FormatContext, component: &Component, string: &mut String) {
    match component {
        Component::Constant(constant) => string.push_str(&context.constant(constant)),
        Component::Named(named) => string.push_str(context.get(named.symbol())),
        Component::Variable(name) => string.push(*name),
        Component::Expression(expression) => dump_expression(context, expression, string),
        Component::Term(term) => dump_term(context, term, string),
        Component::Exponential(base, exponent) => {
            dump_atomic(context, base, bracket_base(base), string);
            match context.style {
                Style::Plain => {
                    string.push('^');
                    dump_atomic(context, exponent, bracket_exponent(exponent), string);
                }
                Style::LaTeX => {
                    string.push_str("^{");
                    match exponent.as_ref() {
                        Component::Parenthesized(inner) => dump_base(context, inner, string),
                        exponent => dump_base(context, exponent, string),
                    }
                    string.push('}');
                }
            }
        }
        Component::Root(index, radicand) => dump_root(context, *index, radicand, string),
        Component::Logarithm(base, argument) => {
            string.push_str(match base {
                LogBase::Ten => context.get("log"),
                LogBase::Natural => context.get("ln"),
            });
            dump_atomic(context, argument, true, string);
        }
        Component::Abs(argument) => {
            string.push_str(context.get("|<"));
            dump_base(context, argument, string);
            string.push_str(context.get(">|"));
        }
        Component::Factorial(argument) => {
            let bracket = !matches!(
                argument.as_ref(),
                Component::Variable(_) | Component::Named(_) | Component::Parenthesized(_)
            ) && !is_non_negative_integer(argument);
            dump_atomic(context, argument, bracket, string);
            string.push('!');
        }
        Component::Parenthesized(inner) => dump_atomic(context, inner, true, string),
    }
}
