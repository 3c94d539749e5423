use crate::component::{Component, Term, TermOperator};
use crate::context::Context;
use crate::number::Constant;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

/// Radicands are scanned for perfect powers of factors up to this bound.
const MAX_EXTRACTED_FACTOR: u32 = 1000;

fn scalar_value(component: &Component, context: &Context) -> Option<BigRational> {
    match component.exact_value() {
        Ok(Some(value)) => Some(value),
        Ok(None) if !context.is_fractional() => component.value().ok(),
        _ => None,
    }
}

pub fn evaluate_applies(component: &Component, context: &Context) -> bool {
    !matches!(component, Component::Constant(_))
        && component.is_scalar()
        && scalar_value(component, context).is_some()
}

pub fn evaluate(component: Component, context: &Context) -> Component {
    match scalar_value(&component, context) {
        Some(value) => Component::Constant(Constant::with_context(value, context)),
        None => component,
    }
}

/// Splits `value` into `outer^index * inner` with the largest extractable `outer`.
fn extract_power(value: &BigInt, index: u32) -> (BigInt, BigInt) {
    let mut outer = BigInt::one();
    let mut inner = value.clone();
    let mut factor = 2u32;
    while factor <= MAX_EXTRACTED_FACTOR {
        let power = Pow::pow(BigInt::from(factor), index);
        if power > inner {
            break;
        }
        if (&inner % &power).is_zero() {
            inner /= &power;
            outer *= factor;
        } else {
            factor += 1;
        }
    }
    (outer, inner)
}

pub fn simplify_root(component: Component, context: &Context) -> Component {
    let (index, radicand) = match component {
        Component::Root(index, radicand) => (index, *radicand),
        other => return other,
    };
    match radicand {
        Component::Constant(constant) if !constant.is_integer() && !constant.is_negative() => {
            // √(p/q) = √(p*q^(n-1))/q
            let value = constant.value();
            let denominator = value.denom().clone();
            let numerator = value.numer() * Pow::pow(&denominator, index - 1);
            Component::product(vec![
                (
                    TermOperator::Multiply,
                    Component::root(
                        index,
                        Component::Constant(Constant::with_context(
                            BigRational::from_integer(numerator),
                            context,
                        )),
                    ),
                ),
                (
                    TermOperator::Divide,
                    Component::Constant(Constant::with_context(
                        BigRational::from_integer(denominator),
                        context,
                    )),
                ),
            ])
        }
        Component::Constant(constant)
            if constant.is_integer() && !constant.is_negative() && !constant.is_zero() =>
        {
            let (outer, inner) = extract_power(&constant.value().to_integer(), index);
            if outer.is_one() {
                return Component::root(index, Component::Constant(constant));
            }
            Component::product(vec![
                (
                    TermOperator::Multiply,
                    Component::Constant(Constant::with_context(
                        BigRational::from_integer(outer),
                        context,
                    )),
                ),
                (
                    TermOperator::Multiply,
                    Component::root(
                        index,
                        Component::Constant(Constant::with_context(
                            BigRational::from_integer(inner),
                            context,
                        )),
                    ),
                ),
            ])
        }
        Component::Exponential(base, exponent) => {
            let power = exponent.as_constant().and_then(|e| e.to_integer());
            match power.and_then(|p| p.to_u32()) {
                Some(power) if power > 0 && power % index == 0 => {
                    let base = if index % 2 == 0 {
                        Component::abs(*base)
                    } else {
                        *base
                    };
                    Component::exponential(base, Component::constant(i64::from(power / index)))
                }
                _ => Component::root(index, Component::Exponential(base, exponent)),
            }
        }
        // root(n, root(m, y)) = root(n*m, y)
        Component::Root(inner_index, inner) => match index.checked_mul(inner_index) {
            Some(product) => Component::root(product, *inner),
            None => Component::root(index, Component::Root(inner_index, inner)),
        },
        Component::Term(term) => match nested_constant_root(&term) {
            Some((inner_index, value)) => match index.checked_mul(inner_index) {
                Some(product) => Component::root(
                    product,
                    Component::Constant(Constant::with_context(value, context)),
                ),
                None => Component::root(index, Component::Term(term)),
            },
            None => Component::root(index, Component::Term(term)),
        },
        other => Component::root(index, other),
    }
}

/// `k*root(m, r)` with non negative constants as `(m, k^m*r)`
fn nested_constant_root(term: &Term) -> Option<(u32, BigRational)> {
    match term.items() {
        [(TermOperator::Multiply, Component::Constant(k)), (TermOperator::Multiply, Component::Root(index, radicand))] =>
        {
            let radicand = radicand.as_constant()?;
            if k.is_negative() || radicand.is_negative() {
                return None;
            }
            let power = num_traits::pow(k.value().clone(), *index as usize);
            Some((*index, power * radicand.value()))
        }
        _ => None,
    }
}

pub fn simplify_abs(component: Component) -> Component {
    let argument = match component {
        Component::Abs(argument) => *argument,
        other => return other,
    };
    match argument {
        Component::Abs(inner) => Component::Abs(inner),
        Component::Exponential(base, exponent) => {
            let even = exponent
                .as_constant()
                .and_then(|e| e.to_integer())
                .map(|e| (e % 2u32).is_zero())
                .unwrap_or(false);
            if even {
                Component::Exponential(base, exponent)
            } else {
                Component::abs(Component::Exponential(base, exponent))
            }
        }
        Component::Term(term) => {
            let mut items = term.into_items();
            match items.first() {
                Some((TermOperator::Multiply, Component::Constant(coefficient)))
                    if !coefficient.is_one() =>
                {
                    let coefficient = coefficient.abs();
                    items.remove(0);
                    let rest = Component::abs(Component::product(items));
                    if coefficient.is_one() {
                        rest
                    } else {
                        Component::product(vec![
                            (TermOperator::Multiply, Component::Constant(coefficient)),
                            (TermOperator::Multiply, rest),
                        ])
                    }
                }
                _ => Component::abs(Component::product(items)),
            }
        }
        other if other.is_scalar() => match other.value() {
            Ok(value) if value.is_negative() => other.negate(),
            Ok(_) => other,
            Err(_) => Component::abs(other),
        },
        other => Component::abs(other),
    }
}
