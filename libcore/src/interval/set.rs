use super::algebra::{self, Piece};
use super::generic::GenericInterval;
use crate::dumper::{latex_context, plain_context, FormatContext, LaTeX};
use crate::error::MathError;
use num_rational::BigRational;
use std::fmt;

/// Union of disjoint intervals of one variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalSet {
    variable: char,
    intervals: Vec<GenericInterval>,
}

fn check_variable(expected: char, interval: &GenericInterval) -> Result<(), MathError> {
    if interval.variable() == expected {
        Ok(())
    } else {
        Err(MathError::VariablesMismatch(
            expected.to_string(),
            interval.variable().to_string(),
        ))
    }
}

impl From<GenericInterval> for IntervalSet {
    /// Wraps a single interval as is, symbolic bounds are kept.
    fn from(interval: GenericInterval) -> IntervalSet {
        IntervalSet {
            variable: interval.variable(),
            intervals: vec![interval],
        }
    }
}

impl IntervalSet {
    /// The canonical union of the given intervals
    pub fn from_intervals(
        variable: char,
        intervals: Vec<GenericInterval>,
    ) -> Result<IntervalSet, MathError> {
        let mut pieces = vec![];
        for interval in intervals.iter() {
            check_variable(variable, interval)?;
            pieces.extend(algebra::lower(interval));
        }
        IntervalSet::from_pieces(variable, algebra::canonicalize(pieces)?)
    }

    fn from_pieces(variable: char, pieces: Vec<Piece>) -> Result<IntervalSet, MathError> {
        Ok(IntervalSet {
            variable,
            intervals: algebra::raise(variable, pieces),
        })
    }

    pub fn void(variable: char) -> IntervalSet {
        IntervalSet::from(GenericInterval::Void(variable))
    }

    pub fn whole_line(variable: char) -> IntervalSet {
        IntervalSet::from(GenericInterval::whole_line(variable))
    }

    pub fn variable(&self) -> char {
        self.variable
    }

    pub fn intervals(&self) -> &[GenericInterval] {
        &self.intervals
    }

    pub fn is_void(&self) -> bool {
        self.intervals.iter().all(GenericInterval::is_void)
    }

    pub fn is_whole_line(&self) -> bool {
        matches!(&self.intervals[..], [interval] if interval.is_whole_line())
    }

    fn pieces(&self) -> Vec<Piece> {
        self.intervals.iter().flat_map(algebra::lower).collect()
    }

    fn check_same_variable(&self, other: &IntervalSet) -> Result<(), MathError> {
        if self.variable == other.variable {
            Ok(())
        } else {
            Err(MathError::VariablesMismatch(
                self.variable.to_string(),
                other.variable.to_string(),
            ))
        }
    }

    pub fn union(&self, other: &IntervalSet) -> Result<IntervalSet, MathError> {
        self.check_same_variable(other)?;
        IntervalSet::from_pieces(
            self.variable,
            algebra::union(&self.pieces(), &other.pieces())?,
        )
    }

    pub fn intersect(&self, other: &IntervalSet) -> Result<IntervalSet, MathError> {
        self.check_same_variable(other)?;
        IntervalSet::from_pieces(
            self.variable,
            algebra::intersect(&self.pieces(), &other.pieces())?,
        )
    }

    /// Is the scalar value a member of the set?
    pub fn contains(&self, value: &BigRational) -> Result<bool, MathError> {
        for piece in self.pieces().iter() {
            if piece.contains(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn dump(&self, context: &FormatContext) -> String {
        self.intervals
            .iter()
            .map(|interval| interval.dump(context))
            .collect::<Vec<_>>()
            .join(" , ")
    }
}

/// Intersection of two intervals of the same variable
pub fn intersect(a: &GenericInterval, b: &GenericInterval) -> Result<IntervalSet, MathError> {
    check_variable(a.variable(), b)?;
    IntervalSet::from_pieces(
        a.variable(),
        algebra::intersect(&algebra::lower(a), &algebra::lower(b))?,
    )
}

/// Union of two intervals of the same variable
pub fn union(a: &GenericInterval, b: &GenericInterval) -> Result<IntervalSet, MathError> {
    check_variable(a.variable(), b)?;
    IntervalSet::from_pieces(
        a.variable(),
        algebra::union(&algebra::lower(a), &algebra::lower(b))?,
    )
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.dump(&plain_context()))
    }
}

impl LaTeX for IntervalSet {
    fn to_latex(&self) -> String {
        self.dump(&latex_context())
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::component::Component;
    use crate::interval::{Delimiter, DoublePointInterval};
    use crate::relation::RelationalOperator::{self, *};
    use crate::Context;

    fn point(kind: RelationalOperator, value: i64) -> GenericInterval {
        GenericInterval::single('x', kind, Component::constant(value))
    }

    fn range(left: Delimiter, right: Delimiter) -> GenericInterval {
        GenericInterval::double('x', left, right)
    }

    fn c(value: i64) -> Component {
        Component::constant(value)
    }

    /// Both argument orders give the same rendering
    fn commutes(a: &GenericInterval, b: &GenericInterval) -> String {
        let forward = intersect(a, b).unwrap();
        let backward = intersect(b, a).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.to_latex(), backward.to_latex());
        forward.to_string()
    }

    #[test]
    fn equal_points() {
        assert_eq!(commutes(&point(Equals, 2), &point(Equals, 2)), "x = 2");
        assert_eq!(
            commutes(&point(Equals, 2), &point(Equals, 3)),
            "for no value of x"
        );
    }

    #[test]
    fn point_and_complement() {
        assert_eq!(commutes(&point(Equals, 2), &point(NotEquals, 3)), "x = 2");
        assert_eq!(
            commutes(&point(Equals, 2), &point(NotEquals, 2)),
            "for no value of x"
        );
    }

    #[test]
    fn two_complements() {
        assert_eq!(
            commutes(&point(NotEquals, 1), &point(NotEquals, 4)),
            "x < 1 , 1 < x < 4 , x > 4"
        );
        assert_eq!(commutes(&point(NotEquals, 1), &point(NotEquals, 1)), "x ≠ 1");
    }

    #[test]
    fn half_lines() {
        assert_eq!(
            commutes(&point(GreaterThan, 1), &point(LessThanOrEquals, 4)),
            "1 < x ≤ 4"
        );
        assert_eq!(
            commutes(&point(GreaterThanOrEquals, 4), &point(LessThanOrEquals, 4)),
            "x = 4"
        );
        assert_eq!(
            commutes(&point(GreaterThan, 4), &point(LessThanOrEquals, 4)),
            "for no value of x"
        );
    }

    #[test]
    fn ranges() {
        let a = range(Delimiter::closed(c(0)), Delimiter::open(c(5)));
        let b = range(Delimiter::open(c(2)), Delimiter::closed(c(7)));
        assert_eq!(commutes(&a, &b), "2 < x < 5");
        let closed = range(Delimiter::closed(c(5)), Delimiter::closed(c(7)));
        let touching = range(Delimiter::closed(c(0)), Delimiter::closed(c(5)));
        assert_eq!(commutes(&closed, &touching), "x = 5");
    }

    #[test]
    fn naturals_and_range() {
        let context = Context::decimal();
        let upper = crate::parser::parse_expression("10.3", &context).unwrap();
        let bounded = range(Delimiter::closed(c(-100)), Delimiter::closed(upper));
        let actual = commutes(&GenericInterval::N('x'), &bounded);
        assert_eq!(actual, "0 ≤ x ≤ 10 , x ∈ ℕ");
    }

    #[test]
    fn integers_and_half_line() {
        assert_eq!(
            commutes(&GenericInterval::Z('x'), &point(LessThan, 3)),
            "x ≤ 2 , x ∈ ℤ"
        );
        assert_eq!(
            commutes(&GenericInterval::Z('x'), &GenericInterval::N('x')),
            "x ∈ ℕ"
        );
    }

    fn naturals_up_to(last: i64) -> GenericInterval {
        GenericInterval::SubSetN(DoublePointInterval::new(
            'x',
            Delimiter::closed(c(0)),
            Delimiter::closed(c(last)),
        ))
    }

    #[test]
    fn discrete_range_and_point() {
        let naturals = naturals_up_to(10);
        assert_eq!(
            commutes(&naturals, &point(NotEquals, 4)),
            "0 ≤ x ≤ 3 , x ∈ ℕ , 5 ≤ x ≤ 10 , x ∈ ℕ"
        );
        assert_eq!(commutes(&naturals, &point(Equals, 4)), "x = 4");
        let half = GenericInterval::single(
            'x',
            Equals,
            Component::rational(BigRational::new(5.into(), 2.into())),
        );
        assert_eq!(commutes(&naturals, &half), "for no value of x");
        let not_half = GenericInterval::single(
            'x',
            NotEquals,
            Component::rational(BigRational::new(5.into(), 2.into())),
        );
        assert_eq!(commutes(&naturals, &not_half), "0 ≤ x ≤ 10 , x ∈ ℕ");
    }

    fn unites(a: &GenericInterval, b: &GenericInterval) -> String {
        let forward = union(a, b).unwrap();
        let backward = union(b, a).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.to_latex(), backward.to_latex());
        forward.to_string()
    }

    #[test]
    fn union_spanning_the_line() {
        let actual = union(&point(LessThan, 3), &point(GreaterThanOrEquals, 1)).unwrap();
        assert!(actual.is_whole_line());
        assert_eq!(actual.to_string(), "∀ x ∈ ℝ");
    }

    #[test]
    fn union_order_is_irrelevant() {
        assert_eq!(
            unites(&point(LessThan, 1), &point(GreaterThan, 4)),
            "x < 1 , x > 4"
        );
        assert_eq!(unites(&point(Equals, 2), &point(Equals, 2)), "x = 2");
        let a = range(Delimiter::closed(c(0)), Delimiter::open(c(5)));
        let b = range(Delimiter::open(c(2)), Delimiter::closed(c(7)));
        assert_eq!(unites(&a, &b), "0 ≤ x ≤ 7");
    }

    #[test]
    fn naturals_are_integers() {
        assert_eq!(
            unites(&GenericInterval::N('x'), &GenericInterval::Z('x')),
            "x ∈ ℤ"
        );
        assert_eq!(
            unites(&GenericInterval::N('x'), &GenericInterval::N('x')),
            "x ∈ ℕ"
        );
    }

    #[test]
    fn negative_integers_complete_naturals() {
        let negative = intersect(&GenericInterval::Z('x'), &point(LessThan, 0)).unwrap();
        let mut set = IntervalSet::from(GenericInterval::N('x'));
        set = set.union(&negative).unwrap();
        assert_eq!(set.to_string(), "x ∈ ℤ");
    }

    #[test]
    fn union_drops_void() {
        let actual = union(&GenericInterval::Void('x'), &point(GreaterThan, 1)).unwrap();
        assert_eq!(actual.to_string(), "x > 1");
    }

    #[test]
    fn discrete_inside_real_is_absorbed() {
        let actual = union(&naturals_up_to(3), &point(GreaterThan, -1)).unwrap();
        assert_eq!(actual.to_string(), "x > -1");
    }

    #[test]
    fn typeset_matches_plain() {
        let set = intersect(&point(NotEquals, 1), &point(NotEquals, 4)).unwrap();
        assert_eq!(set.to_latex(), "x < 1 , 1 < x < 4 , x > 4");
        let set = intersect(&point(GreaterThanOrEquals, 1), &point(LessThan, 4)).unwrap();
        assert_eq!(set.to_string(), "1 ≤ x < 4");
        assert_eq!(set.to_latex(), "1 \\leq x < 4");
    }

    #[test]
    fn different_variables() {
        let other = GenericInterval::single('y', Equals, c(1));
        assert_eq!(
            intersect(&point(Equals, 1), &other),
            Err(MathError::VariablesMismatch("x".to_owned(), "y".to_owned()))
        );
    }

    #[test]
    fn symbolic_bounds_are_unsupported() {
        let symbolic = GenericInterval::single('x', LessThan, Component::Variable('y'));
        assert!(matches!(
            intersect(&point(GreaterThan, 1), &symbolic),
            Err(MathError::Unsupported(_))
        ));
    }

    #[test]
    fn membership() {
        let set = IntervalSet::from_intervals('x', vec![point(LessThan, 0), point(Equals, 2)])
            .unwrap();
        assert_eq!(set.contains(&BigRational::from_integer((-1).into())), Ok(true));
        assert_eq!(set.contains(&BigRational::from_integer(1.into())), Ok(false));
        assert_eq!(set.contains(&BigRational::from_integer(2.into())), Ok(true));
    }
}
