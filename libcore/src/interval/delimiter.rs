use crate::component::Component;
use crate::error::MathError;
use num_rational::BigRational;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelimiterKind {
    Open,
    Closed,
}

/// A finite point or one of the two infinities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    MinusInfinity,
    Finite(Component),
    PlusInfinity,
}

/// The value used to order bounds.
///
/// Bounds containing variables can not be ordered.
pub fn bound_value(component: &Component) -> Result<BigRational, MathError> {
    component.value().map_err(|error| match error {
        MathError::NotScalar(_) => MathError::Unsupported(format!(
            "intervals with the symbolic bound {}",
            component
        )),
        other => other,
    })
}

impl Bound {
    pub fn component(&self) -> Option<&Component> {
        match self {
            Bound::Finite(component) => Some(component),
            _ => None,
        }
    }

    pub fn compare(&self, other: &Bound) -> Result<Ordering, MathError> {
        use Bound::*;
        Ok(match (self, other) {
            (MinusInfinity, MinusInfinity) | (PlusInfinity, PlusInfinity) => Ordering::Equal,
            (MinusInfinity, _) | (_, PlusInfinity) => Ordering::Less,
            (PlusInfinity, _) | (_, MinusInfinity) => Ordering::Greater,
            (Finite(a), Finite(b)) => {
                if a == b {
                    Ordering::Equal
                } else {
                    bound_value(a)?.cmp(&bound_value(b)?)
                }
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delimiter {
    pub kind: DelimiterKind,
    pub bound: Bound,
}

impl Delimiter {
    pub fn open(component: Component) -> Delimiter {
        Delimiter {
            kind: DelimiterKind::Open,
            bound: Bound::Finite(component),
        }
    }

    pub fn closed(component: Component) -> Delimiter {
        Delimiter {
            kind: DelimiterKind::Closed,
            bound: Bound::Finite(component),
        }
    }

    pub fn minus_infinity() -> Delimiter {
        Delimiter {
            kind: DelimiterKind::Open,
            bound: Bound::MinusInfinity,
        }
    }

    pub fn plus_infinity() -> Delimiter {
        Delimiter {
            kind: DelimiterKind::Open,
            bound: Bound::PlusInfinity,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.kind == DelimiterKind::Closed
    }

    /// Orders two lower bounds, a closed bound starts before an open one at
    /// the same value.
    pub fn compare_as_lower(&self, other: &Delimiter) -> Result<Ordering, MathError> {
        Ok(self.bound.compare(&other.bound)?.then_with(|| {
            match (self.kind, other.kind) {
                (DelimiterKind::Closed, DelimiterKind::Open) => Ordering::Less,
                (DelimiterKind::Open, DelimiterKind::Closed) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        }))
    }

    /// Orders two upper bounds, an open bound ends before a closed one at the
    /// same value.
    pub fn compare_as_upper(&self, other: &Delimiter) -> Result<Ordering, MathError> {
        Ok(self.bound.compare(&other.bound)?.then_with(|| {
            match (self.kind, other.kind) {
                (DelimiterKind::Open, DelimiterKind::Closed) => Ordering::Less,
                (DelimiterKind::Closed, DelimiterKind::Open) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        }))
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    #[test]
    fn infinities_enclose_everything() {
        let one = Bound::Finite(Component::constant(1));
        assert_eq!(
            Bound::MinusInfinity.compare(&one),
            Ok(Ordering::Less)
        );
        assert_eq!(
            Bound::PlusInfinity.compare(&one),
            Ok(Ordering::Greater)
        );
        assert_eq!(
            Bound::PlusInfinity.compare(&Bound::PlusInfinity),
            Ok(Ordering::Equal)
        );
    }

    #[test]
    fn closed_is_more_inclusive() {
        let open = Delimiter::open(Component::constant(2));
        let closed = Delimiter::closed(Component::constant(2));
        assert_eq!(closed.compare_as_lower(&open), Ok(Ordering::Less));
        assert_eq!(closed.compare_as_upper(&open), Ok(Ordering::Greater));
    }

    #[test]
    fn irrational_bounds_are_ordered_by_value() {
        let root = Bound::Finite(Component::root(2, Component::constant(2)));
        let rational = Bound::Finite(Component::rational(BigRational::new(
            3.into(),
            2.into(),
        )));
        assert_eq!(root.compare(&rational), Ok(Ordering::Less));
    }

    #[test]
    fn symbolic_bounds_are_unsupported() {
        let symbolic = Bound::Finite(Component::Variable('y'));
        let one = Bound::Finite(Component::constant(1));
        assert!(matches!(
            symbolic.compare(&one),
            Err(MathError::Unsupported(_))
        ));
    }
}
