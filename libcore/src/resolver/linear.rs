use crate::component::{Component, TermOperator};
use crate::context::Context;
use crate::error::MathError;
use crate::interval::{GenericInterval, IntervalSet};
use crate::polynomial::Polynomial;
use crate::relation::RelationalOperator;
use crate::simplifier::simplify;
use num_traits::Signed;

/// Solves `a*x + b (op) 0`.
///
/// The solution keeps other variables symbolic as long as the relation is an
/// equality. Inequalities need the sign of `a` and therefore a scalar `a`.
pub fn resolve_linear(
    polynomial: &Polynomial,
    operator: RelationalOperator,
    context: &Context,
) -> Result<IntervalSet, MathError> {
    let variable = polynomial.variable();
    ensure_invariant!(
        polynomial.degree() <= 1,
        "linear resolver called with {} of degree {}",
        polynomial,
        polynomial.degree()
    );
    let monomials = polynomial.of_degree(1).collect::<Vec<_>>();
    let monomial = match monomials[..] {
        [monomial] => monomial,
        [] => {
            return Err(MathError::Unsupported(format!(
                "no monomial of degree 1 in {} for {}",
                polynomial, variable
            )))
        }
        _ => {
            return Err(MathError::Unsupported(format!(
                "more than one monomial of degree 1 in {} for {}",
                polynomial, variable
            )))
        }
    };
    let coefficient = monomial.factor(context);
    let kind = match operator {
        RelationalOperator::Equals | RelationalOperator::NotEquals => operator,
        _ if !coefficient.is_scalar() => {
            return Err(MathError::Unsupported(format!(
                "inequalities with the symbolic coefficient {}",
                coefficient
            )))
        }
        _ if coefficient.value()?.is_negative() => operator.reversed(),
        _ => operator,
    };
    let remainder = polynomial.coefficient(0);
    let solution = simplify(
        &Component::product(vec![
            (TermOperator::Multiply, remainder.negate()),
            (TermOperator::Divide, coefficient),
        ]),
        context,
    );
    tracing::debug!(target: "resolve", solution = %solution, kind = %kind, "linear");
    Ok(IntervalSet::from(GenericInterval::single(
        variable, kind, solution,
    )))
}
