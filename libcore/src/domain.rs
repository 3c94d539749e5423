use crate::dumper::{latex_context, plain_context, LaTeX};
use crate::error::MathError;
use crate::interval::{GenericInterval, IntervalSet};
use num_rational::BigRational;
use std::fmt;

/// Accumulates restrictions on one variable.
///
/// An empty domain takes the first interval it is combined with, by union or
/// by intersection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    set: Option<IntervalSet>,
}

impl Domain {
    pub fn new() -> Domain {
        Domain::default()
    }

    pub fn whole_line(variable: char) -> Domain {
        Domain {
            set: Some(IntervalSet::whole_line(variable)),
        }
    }

    /// No interval has been added yet
    pub fn is_empty(&self) -> bool {
        self.set.is_none()
    }

    pub fn variable(&self) -> Option<char> {
        self.set.as_ref().map(IntervalSet::variable)
    }

    pub fn intervals(&self) -> &[GenericInterval] {
        self.set.as_ref().map_or(&[], IntervalSet::intervals)
    }

    pub fn set(&self) -> Option<&IntervalSet> {
        self.set.as_ref()
    }

    pub fn union_with(&mut self, interval: GenericInterval) -> Result<(), MathError> {
        self.union_with_set(&IntervalSet::from(interval))
    }

    pub fn intersect_with(&mut self, interval: GenericInterval) -> Result<(), MathError> {
        self.intersect_with_set(&IntervalSet::from(interval))
    }

    pub fn union_with_set(&mut self, other: &IntervalSet) -> Result<(), MathError> {
        let next = match &self.set {
            None => IntervalSet::from_intervals(other.variable(), other.intervals().to_vec())?,
            Some(set) => set.union(other)?,
        };
        self.set = Some(next);
        Ok(())
    }

    pub fn intersect_with_set(&mut self, other: &IntervalSet) -> Result<(), MathError> {
        let next = match &self.set {
            None => IntervalSet::from_intervals(other.variable(), other.intervals().to_vec())?,
            Some(set) => set.intersect(other)?,
        };
        self.set = Some(next);
        Ok(())
    }

    /// Does the domain admit the value? An empty domain admits nothing.
    pub fn contains(&self, value: &BigRational) -> Result<bool, MathError> {
        match &self.set {
            None => Ok(false),
            Some(set) => set.contains(value),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.set {
            None => Ok(()),
            Some(set) => write!(f, "{}", set.dump(&plain_context())),
        }
    }
}

impl LaTeX for Domain {
    fn to_latex(&self) -> String {
        self.set
            .as_ref()
            .map_or_else(String::new, |set| set.dump(&latex_context()))
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::component::Component;
    use crate::interval::Delimiter;
    use crate::Context;

    fn c(value: i64) -> Component {
        Component::constant(value)
    }

    fn range(left: Delimiter, right: Delimiter) -> GenericInterval {
        GenericInterval::double('x', left, right)
    }

    #[test]
    fn accumulation() {
        let mut domain = Domain::new();
        assert!(domain.is_empty());
        domain
            .union_with(range(Delimiter::minus_infinity(), Delimiter::open(c(0))))
            .unwrap();
        assert_eq!(domain.to_string(), "x < 0");
        domain
            .union_with(range(Delimiter::closed(c(1)), Delimiter::open(c(3))))
            .unwrap();
        assert_eq!(domain.to_string(), "x < 0 , 1 ≤ x < 3");
        domain
            .union_with(range(Delimiter::open(c(5)), Delimiter::plus_infinity()))
            .unwrap();
        assert_eq!(domain.to_string(), "x < 0 , 1 ≤ x < 3 , x > 5");
        domain
            .intersect_with(range(Delimiter::open(c(2)), Delimiter::plus_infinity()))
            .unwrap();
        assert_eq!(domain.to_string(), "2 < x < 3 , x > 5");
        assert_eq!(domain.to_latex(), "2 < x < 3 , x > 5");
    }

    #[test]
    fn union_order_does_not_matter() {
        let pieces = vec![
            range(Delimiter::open(c(5)), Delimiter::plus_infinity()),
            range(Delimiter::minus_infinity(), Delimiter::open(c(0))),
            range(Delimiter::closed(c(1)), Delimiter::open(c(3))),
        ];
        let mut forward = Domain::new();
        for piece in pieces.iter() {
            forward.union_with(piece.clone()).unwrap();
        }
        let mut backward = Domain::new();
        for piece in pieces.iter().rev() {
            backward.union_with(piece.clone()).unwrap();
        }
        assert_eq!(forward, backward);
    }

    #[test]
    fn naturals_restricted() {
        let context = Context::decimal();
        let upper = crate::parser::parse_expression("10.3", &context).unwrap();
        let mut domain = Domain::new();
        domain.union_with(GenericInterval::N('x')).unwrap();
        domain
            .intersect_with(range(Delimiter::closed(c(-100)), Delimiter::closed(upper)))
            .unwrap();
        assert_eq!(domain.to_string(), "0 ≤ x ≤ 10 , x ∈ ℕ");
        assert_eq!(domain.to_latex(), "0 \\leq x \\leq 10 , x \\in \\mathbb{N}");
    }

    #[test]
    fn empty_intersection_is_void() {
        let mut domain = Domain::whole_line('x');
        domain
            .intersect_with(range(Delimiter::open(c(1)), Delimiter::open(c(1))))
            .unwrap();
        assert_eq!(domain.to_string(), "for no value of x");
        assert!(!domain.is_empty());
        assert_eq!(domain.contains(&BigRational::from_integer(1.into())), Ok(false));
    }

    #[test]
    fn mismatched_variables() {
        let mut domain = Domain::whole_line('x');
        let actual = domain.intersect_with(GenericInterval::Void('y'));
        assert!(matches!(actual, Err(MathError::VariablesMismatch(..))));
    }
}
