use crate::component::{Component, ExpressionOperator, Term, TermOperator};
use crate::number::Constant;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

/// Sums raised to at most this power are expanded into a product.
const MAX_EXPANDED_POWER: u32 = 8;

fn integer_exponent(exponent: &Component) -> Option<BigInt> {
    exponent.as_constant().and_then(Constant::to_integer)
}

fn power_of(base: Component, power: u32) -> Component {
    if power == 1 {
        base
    } else {
        Component::exponential(base, Component::constant(i64::from(power)))
    }
}

pub fn simplify_exponential(component: Component) -> Component {
    let (base, exponent) = match component {
        Component::Exponential(base, exponent) => (*base, *exponent),
        other => return other,
    };
    if exponent.is_constant_value(0) && !base.is_constant_value(0) {
        return Component::one();
    }
    if exponent.is_constant_value(1) {
        return base;
    }
    if base.is_constant_value(1) {
        return Component::one();
    }
    let power = integer_exponent(&exponent);
    let positive = exponent
        .as_constant()
        .map_or(false, |e| !e.is_negative() && !e.is_zero());
    if base.is_constant_value(0) && positive {
        return Component::zero();
    }
    let power = match power {
        Some(power) => power,
        None => return Component::exponential(base, exponent),
    };
    if power.is_negative() {
        return Component::product(vec![
            (TermOperator::Multiply, Component::one()),
            (
                TermOperator::Divide,
                Component::exponential(base, Component::rational(power.abs().into())),
            ),
        ]);
    }
    match base {
        // (b^c)^n = b^(c*n) holds for any integer n
        Component::Exponential(inner_base, inner_exponent) => match inner_exponent.as_constant() {
            Some(inner) => {
                let product = inner.value() * BigRational::from_integer(power);
                Component::exponential(*inner_base, Component::rational(product))
            }
            None => Component::exponential(
                Component::Exponential(inner_base, inner_exponent),
                exponent,
            ),
        },
        Component::Term(term) => Component::product(
            term.into_items()
                .into_iter()
                .map(|(operator, factor)| {
                    (operator, Component::exponential(factor, exponent.clone()))
                })
                .collect(),
        ),
        Component::Root(index, radicand) => match power.to_u32() {
            Some(power) if power % index == 0 => power_of(*radicand, power / index),
            _ => Component::exponential(Component::Root(index, radicand), exponent),
        },
        Component::Abs(argument) if (&power % 2u32) == BigInt::from(0) => {
            Component::exponential(*argument, exponent)
        }
        Component::Expression(expression) => match power.to_u32() {
            Some(power) if power >= 2 && power <= MAX_EXPANDED_POWER => Component::product(
                (0..power)
                    .map(|_| {
                        (
                            TermOperator::Multiply,
                            Component::Expression(expression.clone()),
                        )
                    })
                    .collect(),
            ),
            _ => Component::exponential(Component::Expression(expression), exponent),
        },
        other => Component::exponential(other, exponent),
    }
}

pub fn simplify_logarithm(component: Component) -> Component {
    let (log_base, argument) = match component {
        Component::Logarithm(log_base, argument) => (log_base, *argument),
        other => return other,
    };
    let log = |argument: Component| Component::logarithm(log_base, argument);
    match argument {
        Component::Exponential(base, exponent) => Component::product(vec![
            (TermOperator::Multiply, *exponent),
            (TermOperator::Multiply, log(*base)),
        ]),
        Component::Root(index, radicand) => Component::product(vec![
            (TermOperator::Multiply, log(*radicand)),
            (TermOperator::Divide, Component::constant(i64::from(index))),
        ]),
        Component::Term(term) if !has_zero_factor(&term) => Component::sum(
            term.into_items()
                .into_iter()
                .filter(|(_, factor)| !factor.is_constant_value(1))
                .map(|(operator, factor)| match operator {
                    TermOperator::Multiply => (ExpressionOperator::Sum, log(factor)),
                    TermOperator::Divide => (ExpressionOperator::Subtract, log(factor)),
                })
                .collect(),
        ),
        other => log(other),
    }
}

fn has_zero_factor(term: &Term) -> bool {
    term.items()
        .iter()
        .any(|(_, factor)| factor.is_constant_value(0))
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::parser::parse_expression;
    use crate::rules::Rule;
    use crate::Context;

    fn apply(rule: Rule, text: &str) -> String {
        let context = Context::default();
        let component = parse_expression(text, &context).unwrap();
        rule.apply_to(component, &context).to_string()
    }

    #[test]
    fn trivial_exponents() {
        assert_eq!(apply(Rule::ExponentialSimplifier, "x^0"), "1");
        assert_eq!(apply(Rule::ExponentialSimplifier, "x^1"), "x");
        assert_eq!(apply(Rule::ExponentialSimplifier, "1^x"), "1");
        assert_eq!(apply(Rule::ExponentialSimplifier, "0^3"), "0");
    }

    #[test]
    fn zero_to_the_zero_is_kept() {
        assert_eq!(apply(Rule::ExponentialSimplifier, "0^0"), "0^0");
    }

    #[test]
    fn nested_powers_multiply() {
        let context = Context::default();
        let inner = Component::exponential(Component::Variable('x'), Component::constant(2));
        let actual = Rule::ExponentialSimplifier
            .apply_to(Component::exponential(inner, Component::constant(3)), &context);
        assert_eq!(actual.to_string(), "x^6");
    }

    #[test]
    fn negative_exponent_becomes_fraction() {
        assert_eq!(apply(Rule::ExponentialSimplifier, "x^-2"), "1/x^2");
    }

    #[test]
    fn small_powers_of_sums_are_expanded() {
        let context = Context::default();
        let sum = parse_expression("x+1", &context).unwrap();
        let actual = Rule::ExponentialSimplifier
            .apply_to(Component::exponential(sum, Component::constant(2)), &context);
        assert_eq!(actual.to_string(), "(x+1)(x+1)");
    }

    #[test]
    fn power_of_product() {
        let context = Context::default();
        let product = parse_expression("2x", &context).unwrap();
        let actual = Rule::ExponentialSimplifier
            .apply_to(Component::exponential(product, Component::constant(2)), &context);
        assert_eq!(actual.to_string(), "2^2x^2");
    }

    #[test]
    fn power_of_root() {
        let context = Context::default();
        let root = Component::root(2, Component::Variable('x'));
        let square = Rule::ExponentialSimplifier
            .apply_to(Component::exponential(root.clone(), Component::constant(2)), &context);
        assert_eq!(square.to_string(), "x");
        let quartic = Rule::ExponentialSimplifier
            .apply_to(Component::exponential(root, Component::constant(4)), &context);
        assert_eq!(quartic.to_string(), "x^2");
    }

    #[test]
    fn logarithm_of_power() {
        assert_eq!(apply(Rule::LogarithmSimplifier, "log(x^2)"), "2log(x)");
    }

    #[test]
    fn logarithm_of_quotient() {
        assert_eq!(apply(Rule::LogarithmSimplifier, "ln(x/y)"), "ln(x)-ln(y)");
    }

    #[test]
    fn logarithm_of_root() {
        assert_eq!(apply(Rule::LogarithmSimplifier, "log(√x)"), "log(x)/2");
    }
}
