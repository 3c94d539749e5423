use crate::component::{Component, ExpressionOperator, LogBase, TermOperator};
use crate::context::Context;
use crate::error::MathError;
use crate::simplifier::simplify;

fn times(items: Vec<(TermOperator, Component)>) -> Component {
    Component::product(items)
}

fn derive(component: &Component, variable: char) -> Result<Component, MathError> {
    use TermOperator::*;
    if !component.contains_variable(variable) {
        return Ok(Component::zero());
    }
    Ok(match component {
        Component::Constant(_) | Component::Named(_) => Component::zero(),
        Component::Variable(_) => Component::one(),
        Component::Parenthesized(inner) => derive(inner, variable)?,
        Component::Expression(expression) => {
            let mut items = vec![];
            for (operator, item) in expression.items() {
                items.push((*operator, derive(item, variable)?));
            }
            Component::sum(items)
        }
        Component::Term(term) => {
            // (f*g/h)' = f'*g/h + f*g'/h + f*g*(-h')/h^2
            let items = term.items();
            let mut summands = vec![];
            for (position, (operator, factor)) in items.iter().enumerate() {
                if !factor.contains_variable(variable) {
                    continue;
                }
                let derived = derive(factor, variable)?;
                let mut product = items.to_vec();
                match operator {
                    Multiply => product[position] = (Multiply, derived),
                    Divide => {
                        product[position] = (Multiply, derived.negate());
                        product.push((
                            Divide,
                            Component::exponential(factor.clone(), Component::constant(2)),
                        ));
                    }
                }
                summands.push((ExpressionOperator::Sum, times(product)));
            }
            Component::sum(summands)
        }
        Component::Exponential(base, exponent) => {
            match (
                base.contains_variable(variable),
                exponent.contains_variable(variable),
            ) {
                // (f^n)' = n*f^(n-1)*f'
                (true, false) => times(vec![
                    (Multiply, *exponent.clone()),
                    (
                        Multiply,
                        Component::exponential(
                            *base.clone(),
                            Component::sum(vec![
                                (ExpressionOperator::Sum, *exponent.clone()),
                                (ExpressionOperator::Subtract, Component::one()),
                            ]),
                        ),
                    ),
                    (Multiply, derive(base, variable)?),
                ]),
                // (a^f)' = a^f*ln(a)*f'
                (false, true) => times(vec![
                    (Multiply, component.clone()),
                    (
                        Multiply,
                        Component::logarithm(LogBase::Natural, *base.clone()),
                    ),
                    (Multiply, derive(exponent, variable)?),
                ]),
                _ => {
                    return Err(MathError::Unsupported(format!(
                        "derivative of {} with the variable in base and exponent",
                        component
                    )))
                }
            }
        }
        // (root(n, f))' = f'/(n*root(n, f)^(n-1))
        Component::Root(index, radicand) => times(vec![
            (Multiply, derive(radicand, variable)?),
            (Divide, Component::constant(i64::from(*index))),
            (
                Divide,
                Component::exponential(
                    component.clone(),
                    Component::constant(i64::from(*index) - 1),
                ),
            ),
        ]),
        Component::Logarithm(base, argument) => {
            let mut items = vec![
                (Multiply, derive(argument, variable)?),
                (Divide, *argument.clone()),
            ];
            if *base == LogBase::Ten {
                items.push((
                    Divide,
                    Component::logarithm(LogBase::Natural, Component::constant(10)),
                ));
            }
            times(items)
        }
        // |f|' = f'*|f|/f
        Component::Abs(argument) => times(vec![
            (Multiply, derive(argument, variable)?),
            (Multiply, component.clone()),
            (Divide, *argument.clone()),
        ]),
        Component::Factorial(_) => {
            return Err(MathError::Unsupported(
                "derivative of a factorial".to_owned(),
            ))
        }
    })
}

/// The simplified derivative of `component` with respect to `variable`
pub fn derivative(
    component: &Component,
    variable: char,
    context: &Context,
) -> Result<Component, MathError> {
    let derived = derive(component, variable)?;
    let result = simplify(&derived, context);
    tracing::debug!(
        target: "derivative",
        component = %component,
        variable = %variable,
        result = %result,
        "derived"
    );
    Ok(result)
}
