//! Coefficient and literal part of products

use crate::component::{Component, ExpressionOperator, TermOperator};
use crate::context::Context;
use crate::number::Constant;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

pub type Literal = Vec<(TermOperator, Component)>;

/// Splits a summand into its numeric coefficient and its literal factors.
///
/// Nested products are merged into the outer one. A division by a zero
/// constant is kept in the literal part.
pub fn split_monomial(component: Component) -> (BigRational, Literal) {
    match component {
        Component::Constant(constant) => (constant.into_value(), vec![]),
        Component::Term(term) => {
            let mut coefficient = BigRational::one();
            let mut literal = vec![];
            for (operator, factor) in term.into_items() {
                match (operator, factor) {
                    (TermOperator::Multiply, Component::Constant(constant)) => {
                        coefficient *= constant.into_value()
                    }
                    (TermOperator::Divide, Component::Constant(ref constant))
                        if !constant.is_zero() =>
                    {
                        coefficient /= constant.value()
                    }
                    (TermOperator::Multiply, inner @ Component::Term(_)) => {
                        let (inner_coefficient, inner_literal) = split_monomial(inner);
                        coefficient *= inner_coefficient;
                        literal.extend(inner_literal);
                    }
                    (TermOperator::Divide, Component::Term(inner)) => {
                        let (inner_coefficient, inner_literal) =
                            split_monomial(Component::Term(inner.clone()));
                        if inner_coefficient.is_zero() {
                            literal.push((TermOperator::Divide, Component::Term(inner)));
                        } else {
                            coefficient /= inner_coefficient;
                            literal.extend(
                                inner_literal
                                    .into_iter()
                                    .map(|(operator, factor)| (operator.flip(), factor)),
                            );
                        }
                    }
                    other => literal.push(other),
                }
            }
            (coefficient, literal)
        }
        other => (BigRational::one(), vec![(TermOperator::Multiply, other)]),
    }
}

/// Key identifying monomials which only differ in their coefficient
pub fn literal_key(literal: &[(TermOperator, Component)]) -> String {
    if literal.is_empty() {
        String::new()
    } else {
        Component::product(literal.to_vec()).to_string()
    }
}

pub fn build_monomial(coefficient: BigRational, literal: Literal, context: &Context) -> Component {
    if coefficient.is_zero() {
        return Component::zero();
    }
    let coefficient = Component::Constant(Constant::with_context(coefficient, context));
    if literal.is_empty() {
        return coefficient;
    }
    if coefficient.is_constant_value(1) {
        return Component::product(literal);
    }
    let mut items = Vec::with_capacity(literal.len() + 1);
    items.push((TermOperator::Multiply, coefficient));
    items.extend(literal);
    Component::product(items)
}

/// Sorting rank of a factor: variables first, then functions, then groups
fn category(factor: &Component) -> u8 {
    match factor {
        Component::Variable(_) => 0,
        Component::Exponential(base, _) if matches!(**base, Component::Variable(_)) => 0,
        Component::Root(..)
        | Component::Logarithm(..)
        | Component::Abs(_)
        | Component::Named(_)
        | Component::Factorial(_)
        | Component::Exponential(..) => 1,
        _ => 2,
    }
}

fn sort_key(operator: TermOperator, factor: &Component) -> (u8, u8, String) {
    let rank = match operator {
        TermOperator::Multiply => 0,
        TermOperator::Divide => 1,
    };
    let name = match factor {
        Component::Exponential(base, _) => base.to_string(),
        other => other.to_string(),
    };
    (rank, category(factor), name)
}

/// Merges factors of a common base and brings them into canonical order.
/// Powers of one sum found on both sides of the fraction bar.
struct SumPowers {
    base: Component,
    multiplied: BigRational,
    divided: BigRational,
    items: Literal,
}

/// Cancels sums between numerator and denominator.
///
/// Sums on one side only are kept as they are, merging them into a power
/// would be undone by the expansion of integer powers.
fn cancel_sums(sums: Vec<SumPowers>) -> Literal {
    let mut result = vec![];
    for sum in sums {
        if sum.multiplied.is_zero() || sum.divided.is_zero() {
            result.extend(sum.items);
            continue;
        }
        let exponent = sum.multiplied - sum.divided;
        if exponent.is_zero() {
            continue;
        }
        let operator = if exponent.is_negative() {
            TermOperator::Divide
        } else {
            TermOperator::Multiply
        };
        let exponent = exponent.abs();
        if exponent.is_one() {
            result.push((operator, sum.base));
        } else {
            result.push((
                operator,
                Component::exponential(sum.base, Component::rational(exponent)),
            ));
        }
    }
    result
}

fn push_sum(sums: &mut Vec<SumPowers>, operator: TermOperator, item: Component) {
    let (base, exponent) = match item {
        Component::Exponential(ref base, ref exponent) => match exponent.as_constant() {
            Some(exponent) => (*base.clone(), exponent.value().clone()),
            None => (item.clone(), BigRational::one()),
        },
        ref other => (other.clone(), BigRational::one()),
    };
    let index = match sums.iter().position(|known| known.base == base) {
        Some(index) => index,
        None => {
            sums.push(SumPowers {
                base: base.clone(),
                multiplied: BigRational::zero(),
                divided: BigRational::zero(),
                items: vec![],
            });
            sums.len() - 1
        }
    };
    let sum = &mut sums[index];
    match operator {
        TermOperator::Multiply => sum.multiplied += exponent,
        TermOperator::Divide => sum.divided += exponent,
    }
    sum.items.push((operator, item));
}

fn normalize_literal(literal: Literal) -> Literal {
    let mut powers: Vec<(Component, BigRational)> = vec![];
    let mut sums: Vec<SumPowers> = vec![];
    let mut others = vec![];
    for (operator, factor) in literal {
        let (base, exponent) = match factor {
            Component::Expression(_) => {
                push_sum(&mut sums, operator, factor);
                continue;
            }
            Component::Exponential(base, exponent) => match (*base, *exponent) {
                (base @ Component::Expression(_), Component::Constant(exponent))
                    if exponent.value().is_positive() =>
                {
                    let item = Component::exponential(base, Component::Constant(exponent));
                    push_sum(&mut sums, operator, item);
                    continue;
                }
                (base @ Component::Expression(_), exponent) => {
                    others.push((operator, Component::exponential(base, exponent)));
                    continue;
                }
                (base, Component::Constant(exponent)) => (base, exponent.into_value()),
                (base, exponent) => {
                    others.push((operator, Component::exponential(base, exponent)));
                    continue;
                }
            },
            other => (other, BigRational::one()),
        };
        let exponent = match operator {
            TermOperator::Multiply => exponent,
            TermOperator::Divide => -exponent,
        };
        match powers.iter_mut().find(|(known, _)| *known == base) {
            Some((_, sum)) => *sum += exponent,
            None => powers.push((base, exponent)),
        }
    }
    let mut result = powers
        .into_iter()
        .filter(|(_, exponent)| !exponent.is_zero())
        .map(|(base, exponent)| {
            let operator = if exponent.is_negative() {
                TermOperator::Divide
            } else {
                TermOperator::Multiply
            };
            let exponent = exponent.abs();
            if exponent.is_one() {
                (operator, base)
            } else {
                (
                    operator,
                    Component::exponential(base, Component::rational(exponent)),
                )
            }
        })
        .collect::<Literal>();
    result.extend(cancel_sums(sums));
    result.extend(others);
    result.sort_by_cached_key(|(operator, factor)| sort_key(*operator, factor));
    result
}

pub fn simplify_term_applies(component: &Component) -> bool {
    match component {
        Component::Term(term) => !term.items().iter().any(|(operator, factor)| {
            *operator == TermOperator::Divide && factor.is_constant_value(0)
        }),
        _ => false,
    }
}

pub fn simplify_term(component: Component, context: &Context) -> Component {
    let (coefficient, literal) = split_monomial(component);
    build_monomial(coefficient, normalize_literal(literal), context)
}

pub fn sum_similar_applies(component: &Component) -> bool {
    matches!(component, Component::Expression(_))
}

pub fn sum_similar(component: Component, context: &Context) -> Component {
    let expression = match component {
        Component::Expression(expression) => expression,
        other => return other,
    };
    let mut groups: Vec<(String, BigRational, Literal)> = vec![];
    for (operator, item) in expression.into_items() {
        let (coefficient, literal) = split_monomial(item);
        let coefficient = match operator {
            ExpressionOperator::Sum => coefficient,
            ExpressionOperator::Subtract => -coefficient,
        };
        let key = literal_key(&literal);
        match groups.iter_mut().find(|(known, _, _)| *known == key) {
            Some((_, sum, _)) => *sum += coefficient,
            None => groups.push((key, coefficient, literal)),
        }
    }
    Component::sum(
        groups
            .into_iter()
            .filter(|(_, coefficient, _)| !coefficient.is_zero())
            .map(|(_, coefficient, literal)| {
                (
                    ExpressionOperator::Sum,
                    build_monomial(coefficient, literal, context),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::parser::parse_expression;
    use crate::rules::Rule;

    fn apply(rule: Rule, text: &str) -> String {
        let context = Context::default();
        let component = parse_expression(text, &context).unwrap();
        rule.apply_to(component, &context).to_string()
    }

    #[test]
    fn collect_coefficients() {
        assert_eq!(apply(Rule::TermSimplifier, "2*x*3"), "6x");
        assert_eq!(apply(Rule::TermSimplifier, "x*0*y"), "0");
        assert_eq!(apply(Rule::TermSimplifier, "1*x"), "x");
    }

    #[test]
    fn merge_common_bases() {
        assert_eq!(apply(Rule::TermSimplifier, "x*y*x"), "x^2y");
        assert_eq!(apply(Rule::TermSimplifier, "x^2/x"), "x");
        assert_eq!(apply(Rule::TermSimplifier, "x/x^3"), "1/x^2");
    }

    #[test]
    fn factors_are_ordered() {
        assert_eq!(apply(Rule::TermSimplifier, "y*3*x"), "3xy");
        assert_eq!(apply(Rule::TermSimplifier, "√2*x"), "x√2");
    }

    #[test]
    fn sums_are_not_merged_into_powers() {
        let context = Context::default();
        let sum = parse_expression("x+1", &context).unwrap();
        let product = Component::product(vec![
            (TermOperator::Multiply, sum.clone()),
            (TermOperator::Multiply, sum),
        ]);
        let actual = Rule::TermSimplifier.apply_to(product, &context);
        assert_eq!(actual.to_string(), "(x+1)(x+1)");
    }

    #[test]
    fn sums_cancel_across_the_fraction_bar() {
        use TermOperator::*;
        let context = Context::default();
        let sum = || parse_expression("x+1", &context).unwrap();
        let simplified = |items| {
            Rule::TermSimplifier
                .apply_to(Component::product(items), &context)
                .to_string()
        };
        assert_eq!(simplified(vec![(Multiply, sum()), (Divide, sum())]), "1");
        assert_eq!(
            simplified(vec![(Multiply, sum()), (Multiply, sum()), (Divide, sum())]),
            "x+1"
        );
        let square = Component::exponential(sum(), Component::constant(2));
        assert_eq!(simplified(vec![(Multiply, sum()), (Divide, square)]), "1/(x+1)");
        let other = parse_expression("x-1", &context).unwrap();
        assert_eq!(
            simplified(vec![(Multiply, other), (Divide, sum())]),
            "(x-1)/(x+1)"
        );
    }

    #[test]
    fn division_by_zero_is_kept() {
        assert_eq!(apply(Rule::TermSimplifier, "x/0"), "x/0");
    }

    #[test]
    fn sum_similar() {
        assert_eq!(apply(Rule::SumSimilarMonomials, "2x+3+x"), "3x+3");
        assert_eq!(apply(Rule::SumSimilarMonomials, "x-x"), "0");
        assert_eq!(apply(Rule::SumSimilarMonomials, "1-2+x"), "-1+x");
    }

    #[test]
    fn similar_monomials_keep_first_position() {
        assert_eq!(apply(Rule::SumSimilarMonomials, "x^2+2x+3x+6"), "x^2+5x+6");
    }

    #[test]
    fn split_coefficient() {
        let context = Context::default();
        let component = parse_expression("-2x/3", &context).unwrap();
        let (coefficient, literal) = split_monomial(component);
        assert_eq!(coefficient, BigRational::new((-2).into(), 3.into()));
        assert_eq!(literal_key(&literal), "x");
    }
}
