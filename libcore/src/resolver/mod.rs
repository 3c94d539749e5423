//! From an equation to its solution set
//!
//! ```text
//! left (op) right  =>  simplify(left - right) (op) 0  =>  polynomial  =>  intervals
//! ```

use crate::component::{Component, ExpressionOperator};
use crate::context::Context;
use crate::error::MathError;
use crate::interval::IntervalSet;
use crate::number::{Constant, Notation};
use crate::parser::{parse_equation, parse_expression, Equation};
use crate::polynomial::Polynomial;
use crate::relation::RelationalOperator;
use crate::simplifier::simplify;
use num_rational::BigRational;
use num_traits::Zero;
use std::collections::BTreeSet;

mod linear;
mod quadratic;

pub use linear::resolve_linear;
pub use quadratic::{resolve_quadratic, DeltaClass};

/// Variable assumed when an equation contains none
pub const DEFAULT_VARIABLE: char = 'x';

/// `left - right`, simplified
pub fn normal_form(equation: &Equation, context: &Context) -> Component {
    simplify(
        &Component::sum(vec![
            (ExpressionOperator::Sum, equation.left.clone()),
            (ExpressionOperator::Subtract, equation.right.clone()),
        ]),
        context,
    )
}

/// A relation between scalars holds everywhere or nowhere.
fn resolve_constant(
    constant: &Component,
    operator: RelationalOperator,
    variable: char,
) -> Result<IntervalSet, MathError> {
    if !constant.is_scalar() {
        return Err(MathError::Unsupported(format!(
            "multiple variable equations like {} {} 0",
            constant, operator
        )));
    }
    let ordering = constant.value()?.cmp(&BigRational::zero());
    if operator.holds(ordering) {
        Ok(IntervalSet::whole_line(variable))
    } else {
        Ok(IntervalSet::void(variable))
    }
}

/// Solves the equation for `variable`, other variables are kept symbolic
/// where the resolvers allow it.
pub fn resolve(
    equation: &Equation,
    variable: char,
    context: &Context,
) -> Result<IntervalSet, MathError> {
    let normal = normal_form(equation, context);
    let polynomial = Polynomial::from_component(&normal, variable, context)?;
    let operator = equation.operator;
    let solution = match polynomial.degree() {
        0 => resolve_constant(&polynomial.coefficient(0), operator, variable),
        1 => resolve_linear(&polynomial, operator, context),
        2 => resolve_quadratic(&polynomial, operator, context),
        degree => Err(MathError::Unsupported(format!(
            "equations of degree {}",
            degree
        ))),
    }?;
    tracing::info!(
        target: "resolve",
        equation = %equation,
        variable = %variable,
        solution = %solution,
        "resolved"
    );
    Ok(solution)
}

fn variables_of(equation: &Equation) -> BTreeSet<char> {
    let mut variables = equation.left.variables();
    variables.extend(equation.right.variables());
    variables
}

/// The only variable of the equation
pub fn infer_variable(equation: &Equation) -> Result<char, MathError> {
    let variables = variables_of(equation);
    let mut iter = variables.iter();
    match (iter.next(), iter.next()) {
        (None, _) => Ok(DEFAULT_VARIABLE),
        (Some(variable), None) => Ok(*variable),
        _ => Err(MathError::MultipleVariables(
            variables
                .iter()
                .map(|variable| variable.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        )),
    }
}

/// Parses and solves an equation or inequality.
///
/// Without an explicit `variable` the equation must contain at most one.
pub fn solve(
    text: &str,
    variable: Option<char>,
    context: &Context,
) -> Result<IntervalSet, MathError> {
    let equation = parse_equation(text, context)?
        .ok_or_else(|| MathError::Parse(format!("{} contains no relational operator", text)))?;
    let variable = match variable {
        Some(variable) => variable,
        None => infer_variable(&equation)?,
    };
    resolve(&equation, variable, context)
}

/// Parses and evaluates a scalar expression.
///
/// Irrational values are approximated and rendered as decimals.
pub fn evaluate(text: &str, context: &Context) -> Result<Constant, MathError> {
    let component = parse_expression(text, context)?;
    if !component.is_scalar() {
        return Err(MathError::NotScalar(component.to_string()));
    }
    let simplified = simplify(&component, context);
    match simplified.exact_value()? {
        Some(value) => Ok(Constant::with_context(value, context)),
        None => Ok(Constant::with_notation(
            simplified.value()?,
            Notation::Decimal(context.precision),
        )),
    }
}
