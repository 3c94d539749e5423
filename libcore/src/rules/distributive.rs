use crate::component::{Component, Term, TermOperator};

/// Position of the first multiplied sum, if the product may be expanded.
///
/// Products dividing by a non scalar are never expanded as this would spread
/// the denominator over every summand.
fn expandable_position(term: &Term) -> Option<usize> {
    let divides_by_variable = term
        .items()
        .iter()
        .any(|(operator, factor)| *operator == TermOperator::Divide && !factor.is_scalar());
    if divides_by_variable {
        return None;
    }
    term.items().iter().position(|(operator, factor)| {
        *operator == TermOperator::Multiply && matches!(factor, Component::Expression(_))
    })
}

pub fn left_applies(component: &Component) -> bool {
    match component {
        Component::Term(term) => expandable_position(term) == Some(0),
        _ => false,
    }
}

pub fn right_applies(component: &Component) -> bool {
    match component {
        Component::Term(term) => matches!(expandable_position(term), Some(position) if position > 0),
        _ => false,
    }
}

/// (a+b)*c => a*c+b*c, keeping the position of the expanded sum
pub fn distribute(component: Component) -> Component {
    let term = match component {
        Component::Term(term) => term,
        other => return other,
    };
    let position = match expandable_position(&term) {
        Some(position) => position,
        None => return Component::Term(term),
    };
    let mut factors = term.into_items();
    let summands = match factors.remove(position) {
        (_, Component::Expression(expression)) => expression.into_items(),
        (operator, other) => {
            factors.insert(position, (operator, other));
            return Component::product(factors);
        }
    };
    Component::sum(
        summands
            .into_iter()
            .map(|(operator, summand)| {
                let mut product = factors.clone();
                product.insert(position, (TermOperator::Multiply, summand));
                (operator, Component::product(product))
            })
            .collect(),
    )
}
