//! Values of a variable for which an expression is defined

use crate::component::{Component, TermOperator};
use crate::context::Context;
use crate::domain::Domain;
use crate::error::MathError;
use crate::parser::Equation;
use crate::relation::RelationalOperator;
use crate::resolver::resolve;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::Signed;

fn scalar_exponent(exponent: &Component) -> Option<BigRational> {
    if exponent.is_scalar() {
        exponent.exact_value().ok().flatten()
    } else {
        None
    }
}

/// Every `argument (op) 0` the expression needs to be defined
fn conditions(component: &Component, variable: char, found: &mut Vec<Equation>) {
    let mut require = |argument: &Component, operator| {
        if argument.contains_variable(variable) {
            found.push(Equation {
                left: argument.clone(),
                operator,
                right: Component::zero(),
            });
        }
    };
    match component {
        Component::Term(term) => {
            for (operator, factor) in term.items() {
                if *operator == TermOperator::Divide {
                    require(factor, RelationalOperator::NotEquals);
                }
            }
        }
        Component::Exponential(base, exponent) => {
            if let Some(value) = scalar_exponent(exponent) {
                // An even denominator is an even root of the base
                match (value.is_negative(), value.denom().is_even()) {
                    (true, true) => require(base, RelationalOperator::GreaterThan),
                    (true, false) => require(base, RelationalOperator::NotEquals),
                    (false, true) => require(base, RelationalOperator::GreaterThanOrEquals),
                    (false, false) => {}
                }
            }
        }
        Component::Root(index, radicand) if index % 2 == 0 => {
            require(radicand, RelationalOperator::GreaterThanOrEquals)
        }
        Component::Logarithm(_, argument) => require(argument, RelationalOperator::GreaterThan),
        _ => {}
    }
    for child in component.children() {
        conditions(child, variable, found);
    }
}

/// Intersects the whole line with the solution set of every condition.
pub fn domain_of(
    component: &Component,
    variable: char,
    context: &Context,
) -> Result<Domain, MathError> {
    let mut found = vec![];
    conditions(component, variable, &mut found);
    let mut domain = Domain::whole_line(variable);
    for condition in found.iter() {
        let solution = resolve(condition, variable, context)?;
        tracing::debug!(
            target: "domain",
            condition = %condition,
            solution = %solution,
            "restricted"
        );
        domain.intersect_with_set(&solution)?;
    }
    Ok(domain)
}
