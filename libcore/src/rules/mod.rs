//! Rewrite rules normalizing a component tree
//!
//! Every rule is a pair of a precondition and a transformation. Rules are
//! pure and total: a rule whose precondition does not hold leaves the
//! component untouched.
//!
//! The order of [`RULES`] determines the canonical form and therefore must not
//! be changed without updating every rendering depending on it.

use crate::component::Component;
use crate::context::Context;

mod distributive;
pub mod monomial;
mod powers;
mod scalar;
mod structure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// (a) => a, brackets get recreated by the renderers where needed
    RemoveParentheses,
    /// a+(b-c) => a+b-c
    FlattenExpression,
    /// a*(b/c) => a*b/c
    FlattenTerm,
    /// a-b => a+(-b)
    ApplyMinusSign,
    /// 2+3*4 => 14
    ScalarEvaluator,
    /// x^1 => x, (x^2)^3 => x^6, (x+1)^2 => (x+1)(x+1)
    ExponentialSimplifier,
    /// log(x^2) => 2log(x), log(xy) => log(x)+log(y)
    LogarithmSimplifier,
    /// √8 => 2√2
    RootSimplifier,
    /// |-3x| => 3|x|
    AbsSimplifier,
    /// 2*x*3*x => 6x^2
    TermSimplifier,
    /// (a+b)*c => a*c+b*c
    LeftDistributive,
    /// c*(a+b) => c*a+c*b
    RightDistributive,
    /// 2x+3+x => 3x+3
    SumSimilarMonomials,
}

/// The ordered rule set of one simplification pass
pub const RULES: [Rule; 13] = [
    Rule::RemoveParentheses,
    Rule::FlattenExpression,
    Rule::FlattenTerm,
    Rule::ApplyMinusSign,
    Rule::ScalarEvaluator,
    Rule::ExponentialSimplifier,
    Rule::LogarithmSimplifier,
    Rule::RootSimplifier,
    Rule::AbsSimplifier,
    Rule::TermSimplifier,
    Rule::LeftDistributive,
    Rule::RightDistributive,
    Rule::SumSimilarMonomials,
];

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::RemoveParentheses => "remove-parentheses",
            Rule::FlattenExpression => "flatten-expression",
            Rule::FlattenTerm => "flatten-term",
            Rule::ApplyMinusSign => "apply-minus-sign",
            Rule::ScalarEvaluator => "scalar-evaluator",
            Rule::ExponentialSimplifier => "exponential-simplifier",
            Rule::LogarithmSimplifier => "logarithm-simplifier",
            Rule::RootSimplifier => "root-simplifier",
            Rule::AbsSimplifier => "abs-simplifier",
            Rule::TermSimplifier => "term-simplifier",
            Rule::LeftDistributive => "left-distributive",
            Rule::RightDistributive => "right-distributive",
            Rule::SumSimilarMonomials => "sum-similar-monomials",
        }
    }

    pub fn precondition(&self, component: &Component, context: &Context) -> bool {
        match self {
            Rule::RemoveParentheses => matches!(component, Component::Parenthesized(_)),
            Rule::FlattenExpression => structure::flatten_expression_applies(component),
            Rule::FlattenTerm => structure::flatten_term_applies(component),
            Rule::ApplyMinusSign => structure::apply_minus_sign_applies(component),
            Rule::ScalarEvaluator => scalar::evaluate_applies(component, context),
            Rule::ExponentialSimplifier => matches!(component, Component::Exponential(..)),
            Rule::LogarithmSimplifier => matches!(component, Component::Logarithm(..)),
            Rule::RootSimplifier => matches!(component, Component::Root(..)),
            Rule::AbsSimplifier => matches!(component, Component::Abs(_)),
            Rule::TermSimplifier => monomial::simplify_term_applies(component),
            Rule::LeftDistributive => distributive::left_applies(component),
            Rule::RightDistributive => distributive::right_applies(component),
            Rule::SumSimilarMonomials => monomial::sum_similar_applies(component),
        }
    }

    pub fn transform(&self, component: Component, context: &Context) -> Component {
        match self {
            Rule::RemoveParentheses => match component {
                Component::Parenthesized(inner) => *inner,
                other => other,
            },
            Rule::FlattenExpression => structure::flatten_expression(component),
            Rule::FlattenTerm => structure::flatten_term(component),
            Rule::ApplyMinusSign => structure::apply_minus_sign(component),
            Rule::ScalarEvaluator => scalar::evaluate(component, context),
            Rule::ExponentialSimplifier => powers::simplify_exponential(component),
            Rule::LogarithmSimplifier => powers::simplify_logarithm(component),
            Rule::RootSimplifier => scalar::simplify_root(component, context),
            Rule::AbsSimplifier => scalar::simplify_abs(component),
            Rule::TermSimplifier => monomial::simplify_term(component, context),
            Rule::LeftDistributive | Rule::RightDistributive => {
                distributive::distribute(component)
            }
            Rule::SumSimilarMonomials => monomial::sum_similar(component, context),
        }
    }

    /// Transforms the component if the precondition holds.
    pub fn apply_to(&self, component: Component, context: &Context) -> Component {
        if self.precondition(&component, context) {
            self.transform(component, context)
        } else {
            component
        }
    }
}
