use crate::component::{Component, ExpressionOperator, TermOperator};

pub fn flatten_expression_applies(component: &Component) -> bool {
    match component {
        Component::Expression(expression) => {
            expression.items().len() == 1
                || expression
                    .items()
                    .iter()
                    .any(|(_, item)| matches!(item, Component::Expression(_)))
        }
        _ => false,
    }
}

pub fn flatten_expression(component: Component) -> Component {
    let expression = match component {
        Component::Expression(expression) => expression,
        other => return other,
    };
    let mut items = vec![];
    for (operator, item) in expression.into_items() {
        match item {
            Component::Expression(inner) => {
                for (inner_operator, inner_item) in inner.into_items() {
                    let operator = match operator {
                        ExpressionOperator::Sum => inner_operator,
                        ExpressionOperator::Subtract => inner_operator.flip(),
                    };
                    items.push((operator, inner_item));
                }
            }
            other => items.push((operator, other)),
        }
    }
    if items.len() == 1 {
        return match items.remove(0) {
            (ExpressionOperator::Sum, item) => item,
            (ExpressionOperator::Subtract, item) => item.negate(),
        };
    }
    Component::sum(items)
}

pub fn flatten_term_applies(component: &Component) -> bool {
    match component {
        Component::Term(term) => {
            term.items().len() == 1
                || term
                    .items()
                    .iter()
                    .any(|(_, item)| matches!(item, Component::Term(_)))
        }
        _ => false,
    }
}

pub fn flatten_term(component: Component) -> Component {
    let term = match component {
        Component::Term(term) => term,
        other => return other,
    };
    let mut items = vec![];
    for (operator, item) in term.into_items() {
        match item {
            Component::Term(inner) => {
                for (inner_operator, inner_item) in inner.into_items() {
                    let operator = match operator {
                        TermOperator::Multiply => inner_operator,
                        TermOperator::Divide => inner_operator.flip(),
                    };
                    items.push((operator, inner_item));
                }
            }
            other => items.push((operator, other)),
        }
    }
    Component::product(items)
}

pub fn apply_minus_sign_applies(component: &Component) -> bool {
    match component {
        Component::Expression(expression) => expression
            .items()
            .iter()
            .any(|(operator, _)| *operator == ExpressionOperator::Subtract),
        _ => false,
    }
}

pub fn apply_minus_sign(component: Component) -> Component {
    match component {
        Component::Expression(expression) => Component::sum(
            expression
                .into_items()
                .into_iter()
                .map(|(operator, item)| match operator {
                    ExpressionOperator::Sum => (ExpressionOperator::Sum, item),
                    ExpressionOperator::Subtract => (ExpressionOperator::Sum, item.negate()),
                })
                .collect(),
        ),
        other => other,
    }
}
