use super::delimiter::{Bound, Delimiter, DelimiterKind};
use crate::component::Component;
use crate::dumper::{dump_base, latex_context, plain_context, FormatContext, LaTeX};
use crate::relation::RelationalOperator;
use std::fmt;

/// `variable (kind) point`, a point, its complement or a half line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SinglePointInterval {
    pub variable: char,
    pub kind: RelationalOperator,
    pub point: Component,
}

/// A continuous range, either bound may be infinite
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoublePointInterval {
    pub variable: char,
    pub left: Delimiter,
    pub right: Delimiter,
}

impl DoublePointInterval {
    pub fn new(variable: char, left: Delimiter, right: Delimiter) -> DoublePointInterval {
        DoublePointInterval {
            variable,
            left,
            right,
        }
    }

    pub fn whole(variable: char) -> DoublePointInterval {
        DoublePointInterval::new(
            variable,
            Delimiter::minus_infinity(),
            Delimiter::plus_infinity(),
        )
    }

    pub fn is_whole(&self) -> bool {
        self.left.bound == Bound::MinusInfinity && self.right.bound == Bound::PlusInfinity
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenericInterval {
    /// The empty set
    Void(char),
    SinglePoint(SinglePointInterval),
    DoublePoint(DoublePointInterval),
    /// The naturals inside the range
    SubSetN(DoublePointInterval),
    /// The integers inside the range
    SubSetZ(DoublePointInterval),
    N(char),
    Z(char),
}

impl GenericInterval {
    pub fn single(variable: char, kind: RelationalOperator, point: Component) -> GenericInterval {
        GenericInterval::SinglePoint(SinglePointInterval {
            variable,
            kind,
            point,
        })
    }

    pub fn double(variable: char, left: Delimiter, right: Delimiter) -> GenericInterval {
        GenericInterval::DoublePoint(DoublePointInterval::new(variable, left, right))
    }

    pub fn whole_line(variable: char) -> GenericInterval {
        GenericInterval::DoublePoint(DoublePointInterval::whole(variable))
    }

    pub fn variable(&self) -> char {
        match self {
            GenericInterval::Void(variable)
            | GenericInterval::N(variable)
            | GenericInterval::Z(variable) => *variable,
            GenericInterval::SinglePoint(interval) => interval.variable,
            GenericInterval::DoublePoint(interval)
            | GenericInterval::SubSetN(interval)
            | GenericInterval::SubSetZ(interval) => interval.variable,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, GenericInterval::Void(_))
    }

    pub fn is_whole_line(&self) -> bool {
        matches!(self, GenericInterval::DoublePoint(interval) if interval.is_whole())
    }

    pub fn dump(&self, context: &FormatContext) -> String {
        match self {
            GenericInterval::Void(variable) => format!("{} {}", context.get("void"), variable),
            GenericInterval::SinglePoint(interval) => format!(
                "{} {} {}",
                interval.variable,
                context.get(interval.kind.symbol()),
                dump_component(context, &interval.point)
            ),
            GenericInterval::DoublePoint(interval) => dump_range(context, interval),
            GenericInterval::SubSetN(interval) => {
                dump_restricted(context, dump_range(context, interval), interval.variable, "ℕ")
            }
            GenericInterval::SubSetZ(interval) => {
                dump_restricted(context, dump_range(context, interval), interval.variable, "ℤ")
            }
            GenericInterval::N(variable) => dump_membership(context, *variable, "ℕ"),
            GenericInterval::Z(variable) => dump_membership(context, *variable, "ℤ"),
        }
    }
}

fn dump_component(context: &FormatContext, component: &Component) -> String {
    let mut string = String::new();
    dump_base(context, component, &mut string);
    string
}

fn dump_membership(context: &FormatContext, variable: char, set: &str) -> String {
    format!("{} {} {}", variable, context.get("∈"), context.get(set))
}

fn dump_restricted(context: &FormatContext, range: String, variable: char, set: &str) -> String {
    format!("{} , {}", range, dump_membership(context, variable, set))
}

/// Comparison symbol between a bound and the variable, read left to right
fn less_symbol(context: &FormatContext, kind: DelimiterKind) -> &'static str {
    match kind {
        DelimiterKind::Open => "<",
        DelimiterKind::Closed => context.get("≤"),
    }
}

fn greater_symbol(context: &FormatContext, kind: DelimiterKind) -> &'static str {
    match kind {
        DelimiterKind::Open => ">",
        DelimiterKind::Closed => context.get("≥"),
    }
}

fn dump_range(context: &FormatContext, interval: &DoublePointInterval) -> String {
    let variable = interval.variable;
    match (&interval.left.bound, &interval.right.bound) {
        (Bound::MinusInfinity, Bound::PlusInfinity) => format!(
            "{} {} {} {}",
            context.get("∀"),
            variable,
            context.get("∈"),
            context.get("ℝ")
        ),
        (Bound::MinusInfinity, Bound::Finite(right)) => format!(
            "{} {} {}",
            variable,
            less_symbol(context, interval.right.kind),
            dump_component(context, right)
        ),
        (Bound::Finite(left), Bound::PlusInfinity) => format!(
            "{} {} {}",
            variable,
            greater_symbol(context, interval.left.kind),
            dump_component(context, left)
        ),
        (Bound::Finite(left), Bound::Finite(right)) => format!(
            "{} {} {} {} {}",
            dump_component(context, left),
            less_symbol(context, interval.left.kind),
            variable,
            less_symbol(context, interval.right.kind),
            dump_component(context, right)
        ),
        // A range starting at +∞ or ending at -∞ holds no value
        _ => format!("{} {}", context.get("void"), variable),
    }
}

impl fmt::Display for GenericInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.dump(&plain_context()))
    }
}

impl LaTeX for GenericInterval {
    fn to_latex(&self) -> String {
        self.dump(&latex_context())
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    fn constant(value: i64) -> Component {
        Component::constant(value)
    }

    #[test]
    fn single_point() {
        let interval = GenericInterval::single('x', RelationalOperator::LessThanOrEquals, constant(3));
        assert_eq!(interval.to_string(), "x ≤ 3");
        assert_eq!(interval.to_latex(), "x \\leq 3");
    }

    #[test]
    fn ranges() {
        let interval = GenericInterval::double(
            'x',
            Delimiter::closed(constant(1)),
            Delimiter::open(constant(3)),
        );
        assert_eq!(interval.to_string(), "1 ≤ x < 3");
        assert_eq!(interval.to_latex(), "1 \\leq x < 3");
        let half = GenericInterval::double('x', Delimiter::open(constant(5)), Delimiter::plus_infinity());
        assert_eq!(half.to_string(), "x > 5");
    }

    #[test]
    fn whole_line_and_void() {
        assert_eq!(GenericInterval::whole_line('x').to_string(), "∀ x ∈ ℝ");
        assert_eq!(
            GenericInterval::whole_line('x').to_latex(),
            "\\forall x \\in \\mathbb{R}"
        );
        assert_eq!(GenericInterval::Void('x').to_string(), "for no value of x");
        assert_eq!(GenericInterval::Void('x').to_latex(), "\\nexists x");
    }

    #[test]
    fn discrete() {
        assert_eq!(GenericInterval::N('x').to_string(), "x ∈ ℕ");
        assert_eq!(GenericInterval::Z('y').to_latex(), "y \\in \\mathbb{Z}");
        let subset = GenericInterval::SubSetN(DoublePointInterval::new(
            'x',
            Delimiter::closed(constant(0)),
            Delimiter::closed(constant(10)),
        ));
        assert_eq!(subset.to_string(), "0 ≤ x ≤ 10 , x ∈ ℕ");
        assert_eq!(subset.to_latex(), "0 \\leq x \\leq 10 , x \\in \\mathbb{N}");
    }

    #[test]
    fn typeset_fractions() {
        let point = Component::product(vec![
            (crate::component::TermOperator::Multiply, constant(2)),
            (crate::component::TermOperator::Divide, constant(3)),
        ]);
        let interval = GenericInterval::single('x', RelationalOperator::Equals, point);
        assert_eq!(interval.to_latex(), "x = \\frac{2}{3}");
    }
}
