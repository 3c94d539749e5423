use crate::component::{Component, ExpressionOperator, TermOperator};
use crate::context::Context;
use crate::error::MathError;
use crate::interval::{union, Delimiter, GenericInterval, IntervalSet};
use crate::polynomial::Polynomial;
use crate::relation::RelationalOperator;
use crate::simplifier::simplify;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::cmp::Ordering;

/// Sign of the discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaClass {
    Negative,
    Zero,
    Positive,
}

impl From<Ordering> for DeltaClass {
    fn from(ordering: Ordering) -> DeltaClass {
        match ordering {
            Ordering::Less => DeltaClass::Negative,
            Ordering::Equal => DeltaClass::Zero,
            Ordering::Greater => DeltaClass::Positive,
        }
    }
}

fn scalar_coefficient(polynomial: &Polynomial, degree: u32) -> Result<Component, MathError> {
    let coefficient = polynomial.coefficient(degree);
    if coefficient.is_scalar() {
        Ok(coefficient)
    } else {
        Err(MathError::Unsupported(format!(
            "multiple variable equations like {} = 0",
            polynomial
        )))
    }
}

fn times(factors: Vec<Component>) -> Component {
    Component::product(
        factors
            .into_iter()
            .map(|factor| (TermOperator::Multiply, factor))
            .collect(),
    )
}

/// `(-b ± √Δ) / 2a`, without a discriminant the repeated root `-b/2a`
fn root(
    a: &Component,
    b: &Component,
    delta: Option<(ExpressionOperator, &Component)>,
    context: &Context,
) -> Component {
    let mut numerator = vec![(ExpressionOperator::Sum, b.clone().negate())];
    if let Some((operator, delta)) = delta {
        numerator.push((operator, Component::root(2, delta.clone())));
    }
    simplify(
        &Component::product(vec![
            (TermOperator::Multiply, Component::sum(numerator)),
            (
                TermOperator::Divide,
                times(vec![Component::constant(2), a.clone()]),
            ),
        ]),
        context,
    )
}

/// Solves `a*x^2 + b*x + c (op) 0` for scalar coefficients.
pub fn resolve_quadratic(
    polynomial: &Polynomial,
    operator: RelationalOperator,
    context: &Context,
) -> Result<IntervalSet, MathError> {
    use RelationalOperator::*;
    let variable = polynomial.variable();
    ensure_invariant!(
        polynomial.degree() == 2,
        "quadratic resolver called with {} of degree {}",
        polynomial,
        polynomial.degree()
    );
    let mut a = scalar_coefficient(polynomial, 2)?;
    let mut b = scalar_coefficient(polynomial, 1)?;
    let mut c = scalar_coefficient(polynomial, 0)?;
    let mut operator = operator;
    if a.value()?.is_negative() {
        a = simplify(&a.negate(), context);
        b = simplify(&b.negate(), context);
        c = simplify(&c.negate(), context);
        operator = operator.reversed();
    }

    let delta = simplify(
        &Component::sum(vec![
            (
                ExpressionOperator::Sum,
                Component::exponential(b.clone(), Component::constant(2)),
            ),
            (
                ExpressionOperator::Subtract,
                times(vec![Component::constant(4), a.clone(), c]),
            ),
        ]),
        context,
    );
    let class = DeltaClass::from(delta.value()?.cmp(&BigRational::zero()));
    tracing::debug!(
        target: "resolve",
        delta = %delta,
        class = ?class,
        operator = %operator,
        "quadratic"
    );

    match (class, operator) {
        (DeltaClass::Negative, Equals)
        | (DeltaClass::Negative, LessThan)
        | (DeltaClass::Negative, LessThanOrEquals) => Ok(IntervalSet::void(variable)),
        (DeltaClass::Negative, NotEquals)
        | (DeltaClass::Negative, GreaterThan)
        | (DeltaClass::Negative, GreaterThanOrEquals) => Ok(IntervalSet::whole_line(variable)),
        (DeltaClass::Zero, Equals) | (DeltaClass::Zero, LessThanOrEquals) => {
            let point = root(&a, &b, None, context);
            Ok(IntervalSet::from(GenericInterval::single(variable, Equals, point)))
        }
        (DeltaClass::Zero, NotEquals) | (DeltaClass::Zero, GreaterThan) => {
            let point = root(&a, &b, None, context);
            Ok(IntervalSet::from(GenericInterval::single(variable, NotEquals, point)))
        }
        (DeltaClass::Zero, GreaterThanOrEquals) => Ok(IntervalSet::whole_line(variable)),
        (DeltaClass::Zero, LessThan) => Ok(IntervalSet::void(variable)),
        (DeltaClass::Positive, operator) => {
            let lower = root(&a, &b, Some((ExpressionOperator::Subtract, &delta)), context);
            let upper = root(&a, &b, Some((ExpressionOperator::Sum, &delta)), context);
            let (first, second) = if lower.value()? > upper.value()? {
                (upper, lower)
            } else {
                (lower, upper)
            };
            let single = |kind: RelationalOperator, point: &Component| {
                GenericInterval::single(variable, kind, point.clone())
            };
            let between =
                |left: Delimiter, right: Delimiter| GenericInterval::double(variable, left, right);
            match operator {
                Equals => union(&single(Equals, &first), &single(Equals, &second)),
                NotEquals => crate::interval::intersect(
                    &single(NotEquals, &first),
                    &single(NotEquals, &second),
                ),
                GreaterThan => union(&single(LessThan, &first), &single(GreaterThan, &second)),
                GreaterThanOrEquals => union(
                    &single(LessThanOrEquals, &first),
                    &single(GreaterThanOrEquals, &second),
                ),
                LessThan => IntervalSet::from_intervals(
                    variable,
                    vec![between(Delimiter::open(first), Delimiter::open(second))],
                ),
                LessThanOrEquals => IntervalSet::from_intervals(
                    variable,
                    vec![between(Delimiter::closed(first), Delimiter::closed(second))],
                ),
            }
        }
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::dumper::LaTeX;
    use crate::parser::parse_expression;

    fn solved(text: &str, operator: RelationalOperator, context: &Context) -> IntervalSet {
        let component = simplify(&parse_expression(text, context).unwrap(), context);
        let polynomial = Polynomial::from_component(&component, 'x', context).unwrap();
        resolve_quadratic(&polynomial, operator, context).unwrap()
    }

    fn resolve(text: &str, operator: RelationalOperator) -> String {
        solved(text, operator, &Context::default()).to_string()
    }

    use RelationalOperator::*;

    #[test]
    fn negative_delta() {
        assert_eq!(resolve("x^2+x+1", Equals), "for no value of x");
        assert_eq!(resolve("x^2+x+1", LessThanOrEquals), "for no value of x");
        assert_eq!(resolve("x^2+x+1", NotEquals), "∀ x ∈ ℝ");
        assert_eq!(resolve("x^2+x+1", GreaterThan), "∀ x ∈ ℝ");
        assert_eq!(resolve("x^2+x+1", GreaterThanOrEquals), "∀ x ∈ ℝ");
        assert_eq!(resolve("x^2+x+1", LessThan), "for no value of x");
        // Opening downwards
        assert_eq!(resolve("-x^2-1", LessThan), "∀ x ∈ ℝ");
        assert_eq!(resolve("-x^2-1", GreaterThanOrEquals), "for no value of x");
    }

    #[test]
    fn nested_radicals_are_denested() {
        // Δ = 4√2
        assert_eq!(resolve("x^2-√2", Equals), "x = -∜2 , x = ∜2");
    }

    #[test]
    fn zero_delta() {
        // (x+1)^2
        assert_eq!(resolve("x^2+2x+1", Equals), "x = -1");
        assert_eq!(resolve("x^2+2x+1", LessThanOrEquals), "x = -1");
        assert_eq!(resolve("x^2+2x+1", NotEquals), "x ≠ -1");
        assert_eq!(resolve("x^2+2x+1", GreaterThan), "x ≠ -1");
        assert_eq!(resolve("x^2+2x+1", GreaterThanOrEquals), "∀ x ∈ ℝ");
        assert_eq!(resolve("x^2+2x+1", LessThan), "for no value of x");
    }

    #[test]
    fn positive_delta() {
        assert_eq!(resolve("x^2+5x+6", Equals), "x = -3 , x = -2");
        assert_eq!(
            resolve("x^2+5x+6", NotEquals),
            "x < -3 , -3 < x < -2 , x > -2"
        );
        assert_eq!(resolve("x^2+5x+6", GreaterThan), "x < -3 , x > -2");
        assert_eq!(resolve("x^2+5x+6", GreaterThanOrEquals), "x ≤ -3 , x ≥ -2");
        assert_eq!(resolve("x^2+5x+6", LessThan), "-3 < x < -2");
        assert_eq!(resolve("x^2+5x+6", LessThanOrEquals), "-3 ≤ x ≤ -2");
    }

    #[test]
    fn negative_leading_coefficient() {
        // -(x+3)(x+2) > 0 holds between the roots
        assert_eq!(resolve("-x^2-5x-6", GreaterThan), "-3 < x < -2");
        assert_eq!(resolve("-x^2-5x-6", LessThanOrEquals), "x ≤ -3 , x ≥ -2");
        // -(x^2+x+1) < 0 everywhere
        assert_eq!(resolve("-x^2-x-1", LessThan), "∀ x ∈ ℝ");
    }

    #[test]
    fn irrational_roots() {
        let actual = solved("x^2-2", Equals, &Context::default());
        assert_eq!(actual.to_string(), "x = -√2 , x = √2");
        assert_eq!(actual.to_latex(), "x = -\\sqrt{2} , x = \\sqrt{2}");
    }

    #[test]
    fn decimal_roots() {
        let actual = solved("x^2-2", LessThan, &Context::decimal());
        assert_eq!(actual.to_string(), "-1.4142135624 < x < 1.4142135624");
    }

    #[test]
    fn symbolic_coefficients() {
        let context = Context::default();
        let component = simplify(&parse_expression("x^2+y", &context).unwrap(), &context);
        let polynomial = Polynomial::from_component(&component, 'x', &context).unwrap();
        assert!(matches!(
            resolve_quadratic(&polynomial, Equals, &context),
            Err(MathError::Unsupported(_))
        ));
    }
}
