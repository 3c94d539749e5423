//! Single variable polynomial view of a simplified component

use crate::component::{Component, ExpressionOperator, TermOperator};
use crate::context::Context;
use crate::error::MathError;
use crate::rules::monomial::{build_monomial, literal_key, split_monomial, Literal};
use crate::simplifier::simplify;
use num_rational::BigRational;
use num_traits::Zero;
use std::fmt;

/// `coefficient * literal * variable^degree`
///
/// The literal part holds the factors free of the polynomial's variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Monomial {
    pub coefficient: BigRational,
    pub literal: Literal,
    pub degree: u32,
}

impl Monomial {
    /// The factor in front of `variable^degree`
    pub fn factor(&self, context: &Context) -> Component {
        build_monomial(self.coefficient.clone(), self.literal.clone(), context)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    variable: char,
    /// Ordered by descending degree, no two share degree and literal part
    monomials: Vec<Monomial>,
    context: Context,
}

/// Degree of a factor in `variable`, `None` if the factor is free of it.
fn factor_degree(
    operator: TermOperator,
    factor: &Component,
    variable: char,
) -> Result<Option<u32>, MathError> {
    if !factor.contains_variable(variable) {
        return Ok(None);
    }
    if operator == TermOperator::Divide {
        return Err(MathError::NotPolynomial(variable));
    }
    match factor {
        Component::Variable(_) => Ok(Some(1)),
        Component::Exponential(base, exponent) if **base == Component::Variable(variable) => {
            match exponent.as_constant() {
                Some(exponent) if exponent.is_integer() && !exponent.is_negative() => exponent
                    .to_u32()
                    .map(Some)
                    .ok_or_else(|| MathError::Unsupported(format!("degree {}", exponent.to_plain()))),
                _ => Err(MathError::NotPolynomial(variable)),
            }
        }
        _ => Err(MathError::NotPolynomial(variable)),
    }
}

impl Polynomial {
    /// Extracts the polynomial of an already simplified component.
    pub fn from_component(
        component: &Component,
        variable: char,
        context: &Context,
    ) -> Result<Polynomial, MathError> {
        let summands = match component.clone() {
            Component::Expression(expression) => expression.into_items(),
            other => vec![(ExpressionOperator::Sum, other)],
        };
        let mut monomials: Vec<(String, Monomial)> = vec![];
        for (operator, summand) in summands {
            let (coefficient, factors) = split_monomial(summand);
            let coefficient = match operator {
                ExpressionOperator::Sum => coefficient,
                ExpressionOperator::Subtract => -coefficient,
            };
            let mut degree = 0;
            let mut found = 0;
            let mut literal = vec![];
            for (operator, factor) in factors {
                match factor_degree(operator, &factor, variable)? {
                    Some(d) => {
                        degree = d;
                        found += 1;
                    }
                    None => literal.push((operator, factor)),
                }
            }
            ensure_invariant!(
                found <= 1,
                "monomial with {} factors of {} in {}",
                found,
                variable,
                component
            );
            let key = literal_key(&literal);
            match monomials
                .iter_mut()
                .find(|(known, monomial)| *known == key && monomial.degree == degree)
            {
                Some((_, monomial)) => monomial.coefficient += coefficient,
                None => monomials.push((
                    key,
                    Monomial {
                        coefficient,
                        literal,
                        degree,
                    },
                )),
            }
        }
        let mut monomials = monomials
            .into_iter()
            .map(|(_, monomial)| monomial)
            .filter(|monomial| !monomial.coefficient.is_zero())
            .collect::<Vec<_>>();
        // Stable: monomials of equal degree keep their order of appearance
        monomials.sort_by(|a, b| b.degree.cmp(&a.degree));
        tracing::debug!(
            target: "polynomial",
            variable = %variable,
            monomials = monomials.len(),
            "extracted"
        );
        Ok(Polynomial {
            variable,
            monomials,
            context: context.clone(),
        })
    }

    pub fn variable(&self) -> char {
        self.variable
    }

    pub fn monomials(&self) -> &[Monomial] {
        &self.monomials
    }

    /// Highest degree with a non zero coefficient, zero for the zero polynomial
    pub fn degree(&self) -> u32 {
        self.monomials.first().map_or(0, |monomial| monomial.degree)
    }

    /// The monomials of the given degree
    pub fn of_degree(&self, degree: u32) -> impl Iterator<Item = &Monomial> {
        self.monomials
            .iter()
            .filter(move |monomial| monomial.degree == degree)
    }

    /// Simplified coefficient of `variable^degree`, zero if there is none
    pub fn coefficient(&self, degree: u32) -> Component {
        let sum = Component::sum(
            self.of_degree(degree)
                .map(|monomial| (ExpressionOperator::Sum, monomial.factor(&self.context)))
                .collect(),
        );
        simplify(&sum, &self.context)
    }

    /// Coefficients indexed by degree, missing degrees are zero.
    pub fn coefficients(&self) -> Vec<Component> {
        (0..=self.degree())
            .map(|degree| self.coefficient(degree))
            .collect()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let summands = self
            .monomials
            .iter()
            .map(|monomial| {
                let mut literal = monomial.literal.clone();
                match monomial.degree {
                    0 => {}
                    1 => literal.push((TermOperator::Multiply, Component::Variable(self.variable))),
                    degree => literal.push((
                        TermOperator::Multiply,
                        Component::exponential(
                            Component::Variable(self.variable),
                            Component::constant(i64::from(degree)),
                        ),
                    )),
                }
                (
                    ExpressionOperator::Sum,
                    build_monomial(monomial.coefficient.clone(), literal, &self.context),
                )
            })
            .collect();
        write!(f, "{}", Component::sum(summands))
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::parser::parse_expression;

    fn polynomial(text: &str, variable: char) -> Result<Polynomial, MathError> {
        let context = Context::default();
        let component = simplify(&parse_expression(text, &context).unwrap(), &context);
        Polynomial::from_component(&component, variable, &context)
    }

    fn coefficients(text: &str, variable: char) -> Vec<String> {
        polynomial(text, variable)
            .unwrap()
            .coefficients()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn quadratic_coefficients() {
        assert_eq!(coefficients("x^2+5x+6", 'x'), vec!["6", "5", "1"]);
    }

    #[test]
    fn missing_degrees_are_zero() {
        assert_eq!(coefficients("2x^3-1", 'x'), vec!["-1", "0", "0", "2"]);
    }

    #[test]
    fn other_variables_join_the_coefficient() {
        assert_eq!(coefficients("3*x*y+2", 'x'), vec!["2", "3y"]);
        assert_eq!(coefficients("3*x*y+2", 'y'), vec!["2", "3x"]);
        assert_eq!(coefficients("x*y+x+2y", 'x'), vec!["2y", "y+1"]);
    }

    #[test]
    fn degree() {
        assert_eq!(polynomial("x^2+5x+6", 'x').unwrap().degree(), 2);
        assert_eq!(polynomial("5", 'x').unwrap().degree(), 0);
        assert_eq!(polynomial("x-x", 'x').unwrap().degree(), 0);
    }

    #[test]
    fn not_polynomial() {
        assert_eq!(
            polynomial("1/x+1", 'x'),
            Err(MathError::NotPolynomial('x'))
        );
        assert_eq!(polynomial("√x", 'x'), Err(MathError::NotPolynomial('x')));
        assert_eq!(polynomial("2^x", 'x'), Err(MathError::NotPolynomial('x')));
        assert_eq!(
            polynomial("log(x)+1", 'x'),
            Err(MathError::NotPolynomial('x'))
        );
    }

    #[test]
    fn unmerged_powers_violate_invariant() {
        let context = Context::default();
        let x = Component::Variable('x');
        let unmerged = Component::product(vec![
            (TermOperator::Multiply, x.clone()),
            (
                TermOperator::Multiply,
                Component::exponential(x, Component::constant(2)),
            ),
        ]);
        let actual = Polynomial::from_component(&unmerged, 'x', &context);
        assert!(matches!(actual, Err(MathError::Internal(_))));
    }

    #[test]
    fn display_descending() {
        let actual = polynomial("6+x^2+5x", 'x').unwrap();
        assert_eq!(actual.to_string(), "x^2+5x+6");
    }
}
