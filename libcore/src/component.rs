use crate::error::MathError;
use crate::number::{self, Constant, NamedConstant, APPROXIMATION_DIGITS};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::collections::BTreeSet;

/// Largest root index evaluated when an exponent is a non integer rational
const MAX_RATIONAL_EXPONENT_DENOMINATOR: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionOperator {
    Sum,
    Subtract,
}

impl ExpressionOperator {
    pub fn flip(self) -> ExpressionOperator {
        match self {
            ExpressionOperator::Sum => ExpressionOperator::Subtract,
            ExpressionOperator::Subtract => ExpressionOperator::Sum,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermOperator {
    Multiply,
    Divide,
}

impl TermOperator {
    pub fn flip(self) -> TermOperator {
        match self {
            TermOperator::Multiply => TermOperator::Divide,
            TermOperator::Divide => TermOperator::Multiply,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogBase {
    /// `ln`
    Natural,
    /// `log`
    Ten,
}

/// A left associative chain of summands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression {
    items: Vec<(ExpressionOperator, Component)>,
}

impl Expression {
    pub fn new(items: Vec<(ExpressionOperator, Component)>) -> Result<Expression, MathError> {
        if items.is_empty() {
            Err(MathError::Internal("empty expression".to_owned()))
        } else {
            Ok(Expression { items })
        }
    }

    pub fn items(&self) -> &[(ExpressionOperator, Component)] {
        &self.items
    }

    pub fn into_items(self) -> Vec<(ExpressionOperator, Component)> {
        self.items
    }

    pub(crate) fn push(&mut self, operator: ExpressionOperator, component: Component) {
        self.items.push((operator, component));
    }
}

/// A left associative chain of factors.
///
/// The first factor is always multiplied, a leading division is expressed as
/// `1/…`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    items: Vec<(TermOperator, Component)>,
}

impl Term {
    pub fn new(mut items: Vec<(TermOperator, Component)>) -> Result<Term, MathError> {
        match items.first() {
            None => Err(MathError::Internal("empty term".to_owned())),
            Some((TermOperator::Divide, _)) => {
                items.insert(0, (TermOperator::Multiply, Component::Constant(Constant::one())));
                Ok(Term { items })
            }
            Some(_) => Ok(Term { items }),
        }
    }

    pub fn items(&self) -> &[(TermOperator, Component)] {
        &self.items
    }

    pub fn into_items(self) -> Vec<(TermOperator, Component)> {
        self.items
    }

    pub(crate) fn push(&mut self, operator: TermOperator, component: Component) {
        self.items.push((operator, component));
    }
}

/// Node of the expression tree
///
/// Each node owns its children exclusively. Transformations consume or clone
/// a tree and build a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Constant(Constant),
    /// `e` or `π`
    Named(NamedConstant),
    Variable(char),
    Expression(Expression),
    Term(Term),
    Exponential(Box<Component>, Box<Component>),
    /// index and radicand
    Root(u32, Box<Component>),
    Logarithm(LogBase, Box<Component>),
    Abs(Box<Component>),
    Factorial(Box<Component>),
    Parenthesized(Box<Component>),
}

pub struct ComponentIter<'a> {
    stack: Vec<&'a Component>,
}

impl<'a> Iterator for ComponentIter<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stack.pop() {
            None => None,
            Some(current) => {
                for child in current.children().into_iter().rev() {
                    self.stack.push(child);
                }
                Some(current)
            }
        }
    }
}

impl From<Constant> for Component {
    fn from(constant: Constant) -> Component {
        Component::Constant(constant)
    }
}

impl Component {
    pub fn constant(value: i64) -> Component {
        Component::Constant(Constant::integer(value))
    }

    pub fn rational(value: BigRational) -> Component {
        Component::Constant(Constant::new(value))
    }

    pub fn zero() -> Component {
        Component::Constant(Constant::zero())
    }

    pub fn one() -> Component {
        Component::Constant(Constant::one())
    }

    pub fn exponential(base: Component, exponent: Component) -> Component {
        Component::Exponential(Box::new(base), Box::new(exponent))
    }

    pub fn root(index: u32, radicand: Component) -> Component {
        Component::Root(index, Box::new(radicand))
    }

    pub fn logarithm(base: LogBase, argument: Component) -> Component {
        Component::Logarithm(base, Box::new(argument))
    }

    pub fn abs(argument: Component) -> Component {
        Component::Abs(Box::new(argument))
    }

    pub fn factorial(argument: Component) -> Component {
        Component::Factorial(Box::new(argument))
    }

    pub fn parenthesized(inner: Component) -> Component {
        Component::Parenthesized(Box::new(inner))
    }

    /// Builds a sum, collapsing trivial chains: no summand is zero, a single
    /// added summand is the summand itself.
    pub fn sum(mut items: Vec<(ExpressionOperator, Component)>) -> Component {
        match items.len() {
            0 => Component::zero(),
            1 if items[0].0 == ExpressionOperator::Sum => items.remove(0).1,
            _ => Component::Expression(Expression { items }),
        }
    }

    /// Builds a product, collapsing trivial chains: no factor is one, a single
    /// multiplied factor is the factor itself.
    pub fn product(mut items: Vec<(TermOperator, Component)>) -> Component {
        match items.len() {
            0 => Component::one(),
            1 if items[0].0 == TermOperator::Multiply => items.remove(0).1,
            _ => {
                if items[0].0 == TermOperator::Divide {
                    items.insert(0, (TermOperator::Multiply, Component::one()));
                }
                Component::Term(Term { items })
            }
        }
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Component::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn is_constant_value(&self, value: i64) -> bool {
        match self {
            Component::Constant(constant) => *constant == Constant::integer(value),
            _ => false,
        }
    }

    /// Additive inverse, pushing the sign into constants and coefficients.
    pub fn negate(self) -> Component {
        match self {
            Component::Constant(constant) => Component::Constant(constant.neg()),
            Component::Term(term) => {
                let mut items = term.into_items();
                match items.first_mut() {
                    Some((TermOperator::Multiply, Component::Constant(constant))) => {
                        *constant = constant.neg();
                    }
                    _ => items.insert(0, (TermOperator::Multiply, Component::constant(-1))),
                }
                Component::Term(Term { items })
            }
            Component::Expression(expression) => Component::Expression(Expression {
                items: expression
                    .into_items()
                    .into_iter()
                    .map(|(operator, item)| (operator.flip(), item))
                    .collect(),
            }),
            other => Component::Term(Term {
                items: vec![
                    (TermOperator::Multiply, Component::constant(-1)),
                    (TermOperator::Multiply, other),
                ],
            }),
        }
    }

    pub fn children(&self) -> Vec<&Component> {
        match self {
            Component::Constant(_) | Component::Named(_) | Component::Variable(_) => vec![],
            Component::Expression(expression) => {
                expression.items().iter().map(|(_, item)| item).collect()
            }
            Component::Term(term) => term.items().iter().map(|(_, item)| item).collect(),
            Component::Exponential(base, exponent) => vec![base, exponent],
            Component::Root(_, inner)
            | Component::Logarithm(_, inner)
            | Component::Abs(inner)
            | Component::Factorial(inner)
            | Component::Parenthesized(inner) => vec![inner],
        }
    }

    /// Rebuilds this node with every direct child replaced by `f(child)`.
    pub fn map_children<F>(self, mut f: F) -> Component
    where
        F: FnMut(Component) -> Component,
    {
        match self {
            Component::Constant(_) | Component::Named(_) | Component::Variable(_) => self,
            Component::Expression(expression) => Component::Expression(Expression {
                items: expression
                    .into_items()
                    .into_iter()
                    .map(|(operator, item)| (operator, f(item)))
                    .collect(),
            }),
            Component::Term(term) => Component::Term(Term {
                items: term
                    .into_items()
                    .into_iter()
                    .map(|(operator, item)| (operator, f(item)))
                    .collect(),
            }),
            Component::Exponential(base, exponent) => {
                Component::exponential(f(*base), f(*exponent))
            }
            Component::Root(index, inner) => Component::root(index, f(*inner)),
            Component::Logarithm(base, inner) => Component::logarithm(base, f(*inner)),
            Component::Abs(inner) => Component::abs(f(*inner)),
            Component::Factorial(inner) => Component::factorial(f(*inner)),
            Component::Parenthesized(inner) => Component::parenthesized(f(*inner)),
        }
    }

    /// Depth first iteration over this node and all its descendants
    pub fn parts(&self) -> ComponentIter {
        ComponentIter { stack: vec![self] }
    }

    pub fn variables(&self) -> BTreeSet<char> {
        self.parts()
            .filter_map(|part| match part {
                Component::Variable(name) => Some(*name),
                _ => None,
            })
            .collect()
    }

    pub fn contains_variable(&self, variable: char) -> bool {
        self.parts()
            .any(|part| matches!(part, Component::Variable(name) if *name == variable))
    }

    pub fn is_scalar(&self) -> bool {
        !self.parts().any(|part| matches!(part, Component::Variable(_)))
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        self.parts().count()
    }

    /// The value of a scalar component.
    ///
    /// Exact where the value is rational, otherwise a rational truncated to
    /// [`APPROXIMATION_DIGITS`] digits.
    pub fn value(&self) -> Result<BigRational, MathError> {
        match self.evaluate(false)? {
            Some(value) => Ok(value),
            None => Err(MathError::Unsupported(format!(
                "can not evaluate {}",
                self
            ))),
        }
    }

    /// The exact rational value, `None` if the value is irrational.
    pub fn exact_value(&self) -> Result<Option<BigRational>, MathError> {
        self.evaluate(true)
    }

    fn evaluate(&self, exact: bool) -> Result<Option<BigRational>, MathError> {
        match self {
            Component::Constant(constant) => Ok(Some(constant.value().clone())),
            Component::Named(_) if exact => Ok(None),
            Component::Named(named) => Ok(Some(named.approximate(APPROXIMATION_DIGITS))),
            Component::Variable(_) => Err(MathError::NotScalar(self.to_string())),
            Component::Expression(expression) => {
                let mut sum = BigRational::zero();
                for (operator, item) in expression.items() {
                    match item.evaluate(exact)? {
                        None => return Ok(None),
                        Some(value) => match operator {
                            ExpressionOperator::Sum => sum += value,
                            ExpressionOperator::Subtract => sum -= value,
                        },
                    }
                }
                Ok(Some(sum))
            }
            Component::Term(term) => {
                let mut product = BigRational::one();
                for (operator, item) in term.items() {
                    match item.evaluate(exact)? {
                        None => return Ok(None),
                        Some(value) => match operator {
                            TermOperator::Multiply => product *= value,
                            TermOperator::Divide => {
                                if value.is_zero() {
                                    return Err(MathError::DivisionByZero);
                                }
                                product /= value
                            }
                        },
                    }
                }
                Ok(Some(product))
            }
            Component::Exponential(base, exponent) => {
                let (base, exponent) = match (base.evaluate(exact)?, exponent.evaluate(exact)?) {
                    (Some(base), Some(exponent)) => (base, exponent),
                    _ => return Ok(None),
                };
                evaluate_power(&base, &exponent, exact)
            }
            Component::Root(index, radicand) => match radicand.evaluate(exact)? {
                None => Ok(None),
                Some(value) => {
                    if value.is_negative() && index % 2 == 0 {
                        return Err(MathError::Undefined(self.to_string()));
                    }
                    if exact {
                        Ok(number::nth_root_exact(&value, *index))
                    } else {
                        Ok(number::nth_root_approx(&value, *index, APPROXIMATION_DIGITS))
                    }
                }
            },
            Component::Logarithm(LogBase::Natural, argument) if is_euler(argument) => {
                Ok(Some(BigRational::one()))
            }
            Component::Logarithm(base, argument) => match argument.evaluate(exact)? {
                None => Ok(None),
                Some(value) => {
                    if !value.is_positive() {
                        return Err(MathError::Undefined(self.to_string()));
                    }
                    let exact_result = exact_logarithm(*base, &value);
                    if exact || exact_result.is_some() {
                        Ok(exact_result)
                    } else {
                        Ok(approximate_logarithm(*base, &value))
                    }
                }
            },
            Component::Abs(inner) => Ok(inner.evaluate(exact)?.map(|value| value.abs())),
            Component::Factorial(inner) => match inner.evaluate(exact)? {
                None => Ok(None),
                Some(value) => match number::factorial(&value) {
                    Some(result) => Ok(Some(result)),
                    None if value.is_integer() && value.is_negative() => {
                        Err(MathError::Undefined(self.to_string()))
                    }
                    None => Err(MathError::Unsupported(format!(
                        "factorial of {}",
                        inner
                    ))),
                },
            },
            Component::Parenthesized(inner) => inner.evaluate(exact),
        }
    }
}

fn is_euler(component: &Component) -> bool {
    match component {
        Component::Named(NamedConstant::Euler) => true,
        Component::Parenthesized(inner) => is_euler(inner),
        _ => false,
    }
}

fn evaluate_power(
    base: &BigRational,
    exponent: &BigRational,
    exact: bool,
) -> Result<Option<BigRational>, MathError> {
    if exponent.is_integer() {
        if base.is_zero() && exponent.is_negative() {
            return Err(MathError::DivisionByZero);
        }
        return Ok(number::pow(base, &exponent.to_integer()));
    }
    let index = match exponent.denom().to_u32() {
        Some(index) if index <= MAX_RATIONAL_EXPONENT_DENOMINATOR => index,
        _ => return Ok(None),
    };
    if base.is_negative() && index % 2 == 0 {
        return Err(MathError::Undefined(format!("({})^({})", base, exponent)));
    }
    let power = match number::pow(base, exponent.numer()) {
        Some(power) => power,
        None if base.is_zero() => return Err(MathError::DivisionByZero),
        None => return Ok(None),
    };
    if exact {
        Ok(number::nth_root_exact(&power, index))
    } else {
        Ok(number::nth_root_approx(&power, index, APPROXIMATION_DIGITS))
    }
}

fn exact_logarithm(base: LogBase, value: &BigRational) -> Option<BigRational> {
    if value.is_one() {
        return Some(BigRational::zero());
    }
    match base {
        LogBase::Natural => None,
        LogBase::Ten => {
            let ten = BigInt::from(10);
            let (mut remainder, sign) = if value.denom().is_one() {
                (value.numer().clone(), 1)
            } else if value.numer().is_one() {
                (value.denom().clone(), -1)
            } else {
                return None;
            };
            let mut exponent = 0i64;
            while remainder > BigInt::one() {
                if !(&remainder % &ten).is_zero() {
                    return None;
                }
                remainder /= &ten;
                exponent += 1;
            }
            Some(BigRational::from_integer(BigInt::from(sign * exponent)))
        }
    }
}

fn approximate_logarithm(base: LogBase, value: &BigRational) -> Option<BigRational> {
    let digits = APPROXIMATION_DIGITS + 5;
    let ln = number::ln_approx(value, digits)?;
    match base {
        LogBase::Natural => Some(number::truncate(&ln, APPROXIMATION_DIGITS)),
        LogBase::Ten => {
            let ln_ten = number::ln_approx(&BigRational::from_integer(BigInt::from(10)), digits)?;
            Some(number::truncate(&(ln / ln_ten), APPROXIMATION_DIGITS))
        }
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::parser::parse_expression;
    use crate::Context;

    fn parse(text: &str) -> Component {
        parse_expression(text, &Context::default()).unwrap()
    }

    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn empty_chains_are_rejected() {
        assert!(Expression::new(vec![]).is_err());
        assert!(Term::new(vec![]).is_err());
    }

    #[test]
    fn leading_division_gets_unit_numerator() {
        let term = Term::new(vec![(TermOperator::Divide, Component::Variable('x'))]).unwrap();
        assert_eq!(term.items()[0].1, Component::one());
        assert_eq!(term.items().len(), 2);
    }

    #[test]
    fn scalar_detection() {
        assert!(parse("3+4*2").is_scalar());
        assert!(!parse("3+4*x").is_scalar());
        assert!(parse("√21").is_scalar());
    }

    #[test]
    fn variables_of_nested_tree() {
        let actual = parse("3*x*y+log(z)-x");
        let expected: BTreeSet<char> = ['x', 'y', 'z'].iter().cloned().collect();
        assert_eq!(actual.variables(), expected);
    }

    #[test]
    fn value_of_non_scalar() {
        let actual = parse("x+1").value();
        assert_eq!(actual, Err(MathError::NotScalar("x".to_owned())));
    }

    #[test]
    fn value_of_rational_expression() {
        assert_eq!(parse("3/4+1/4*2").value(), Ok(ratio(5, 4)));
        assert_eq!(parse("2^-2").value(), Ok(ratio(1, 4)));
        assert_eq!(parse("8^(2/3)").value(), Ok(ratio(4, 1)));
        assert_eq!(parse("|-3|").value(), Ok(ratio(3, 1)));
        assert_eq!(parse("log(1000)").value(), Ok(ratio(3, 1)));
    }

    #[test]
    fn named_constants_and_factorials() {
        assert_eq!(parse("5!").value(), Ok(ratio(120, 1)));
        assert_eq!(parse("(2+1)!").exact_value(), Ok(Some(ratio(6, 1))));
        assert_eq!(parse("ln(e)").exact_value(), Ok(Some(ratio(1, 1))));
        assert_eq!(parse("π").exact_value(), Ok(None));
        assert!(parse("2π").is_scalar());
        let pi = parse("π").value().unwrap();
        assert!(pi > ratio(314_159, 100_000) && pi < ratio(314_160, 100_000));
        assert!(matches!(parse("(-2)!").value(), Err(MathError::Undefined(_))));
        assert!(matches!(parse("(1/2)!").value(), Err(MathError::Unsupported(_))));
    }

    #[test]
    fn value_of_irrational_expression() {
        let actual = parse("√2").value().unwrap();
        assert!(actual > ratio(1_414_213, 1_000_000));
        assert!(actual < ratio(1_414_214, 1_000_000));
        assert_eq!(parse("√2").exact_value(), Ok(None));
    }

    #[test]
    fn value_division_by_zero() {
        assert_eq!(parse("1/(2-2)").value(), Err(MathError::DivisionByZero));
    }

    #[test]
    fn value_of_undefined_root() {
        assert!(matches!(parse("√(-4)").value(), Err(MathError::Undefined(_))));
    }

    #[test]
    fn negate_pushes_sign_into_coefficient() {
        assert_eq!(parse("3*x").negate(), parse("-3*x"));
        assert_eq!(Component::constant(2).negate(), Component::constant(-2));
        assert_eq!(
            Component::Variable('x').negate().to_string(),
            "-x".to_owned()
        );
    }

    #[test]
    fn deep_copy_is_independent() {
        let original = parse("x^2+3*x");
        let mut copy = original.clone();
        if let Component::Expression(expression) = &mut copy {
            expression.push(ExpressionOperator::Sum, Component::constant(1));
        }
        assert_eq!(original.to_string(), "x^2+3x");
        assert_eq!(copy.to_string(), "x^2+3x+1");
    }

    #[test]
    fn parts_are_depth_first() {
        let actual = parse("x+2*y")
            .parts()
            .map(|part| part.to_string())
            .collect::<Vec<_>>();
        assert_eq!(actual, vec!["x+2y", "x", "2y", "2", "y"]);
    }
}
