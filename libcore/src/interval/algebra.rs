//! Set operations on intervals
//!
//! Every interval is lowered into pieces, ranges over the reals, the integers
//! or the naturals. The operations work on pieces and the result is raised back
//! into the smallest list of intervals describing the same set.

use super::delimiter::{bound_value, Bound, Delimiter};
use super::generic::{DoublePointInterval, GenericInterval};
use crate::component::Component;
use crate::error::MathError;
use crate::relation::RelationalOperator;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;

/// Ordered from the least to the most restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Numbers {
    Real,
    Integer,
    Natural,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub left: Delimiter,
    pub right: Delimiter,
    pub numbers: Numbers,
}

impl Piece {
    fn new(left: Delimiter, right: Delimiter, numbers: Numbers) -> Piece {
        Piece {
            left,
            right,
            numbers,
        }
    }

    fn real(left: Delimiter, right: Delimiter) -> Piece {
        Piece::new(left, right, Numbers::Real)
    }

    fn is_discrete(&self) -> bool {
        self.numbers != Numbers::Real
    }

    pub fn contains(&self, value: &BigRational) -> Result<bool, MathError> {
        if self.is_discrete() && !value.is_integer() {
            return Ok(false);
        }
        let point = Bound::Finite(Component::rational(value.clone()));
        let above = match self.left.bound.compare(&point)? {
            Ordering::Less => true,
            Ordering::Equal => self.left.is_closed(),
            Ordering::Greater => false,
        };
        let below = match point.compare(&self.right.bound)? {
            Ordering::Less => true,
            Ordering::Equal => self.right.is_closed(),
            Ordering::Greater => false,
        };
        Ok(above && below)
    }
}

pub fn lower(interval: &GenericInterval) -> Vec<Piece> {
    use RelationalOperator::*;
    match interval {
        GenericInterval::Void(_) => vec![],
        GenericInterval::SinglePoint(interval) => {
            let point = || interval.point.clone();
            match interval.kind {
                Equals => vec![Piece::real(
                    Delimiter::closed(point()),
                    Delimiter::closed(point()),
                )],
                NotEquals => vec![
                    Piece::real(Delimiter::minus_infinity(), Delimiter::open(point())),
                    Piece::real(Delimiter::open(point()), Delimiter::plus_infinity()),
                ],
                LessThan => vec![Piece::real(
                    Delimiter::minus_infinity(),
                    Delimiter::open(point()),
                )],
                LessThanOrEquals => vec![Piece::real(
                    Delimiter::minus_infinity(),
                    Delimiter::closed(point()),
                )],
                GreaterThan => vec![Piece::real(
                    Delimiter::open(point()),
                    Delimiter::plus_infinity(),
                )],
                GreaterThanOrEquals => vec![Piece::real(
                    Delimiter::closed(point()),
                    Delimiter::plus_infinity(),
                )],
            }
        }
        GenericInterval::DoublePoint(range) => {
            vec![Piece::real(range.left.clone(), range.right.clone())]
        }
        GenericInterval::SubSetN(range) => vec![Piece::new(
            range.left.clone(),
            range.right.clone(),
            Numbers::Natural,
        )],
        GenericInterval::SubSetZ(range) => vec![Piece::new(
            range.left.clone(),
            range.right.clone(),
            Numbers::Integer,
        )],
        GenericInterval::N(_) => vec![Piece::new(
            Delimiter::closed(Component::zero()),
            Delimiter::plus_infinity(),
            Numbers::Natural,
        )],
        GenericInterval::Z(_) => vec![Piece::new(
            Delimiter::minus_infinity(),
            Delimiter::plus_infinity(),
            Numbers::Integer,
        )],
    }
}

fn integer_delimiter(value: BigRational) -> Delimiter {
    Delimiter::closed(Component::rational(value))
}

/// Moves the bounds of a discrete piece onto the closest members inside it.
fn round(piece: Piece) -> Result<Piece, MathError> {
    let natural = piece.numbers == Numbers::Natural;
    let left = match &piece.left.bound {
        Bound::Finite(component) => {
            let value = bound_value(component)?;
            let mut first = if !value.is_integer() {
                value.ceil()
            } else if piece.left.is_closed() {
                value
            } else {
                value + BigRational::one()
            };
            if natural && first.is_negative() {
                first = BigRational::zero();
            }
            integer_delimiter(first)
        }
        Bound::MinusInfinity if natural => integer_delimiter(BigRational::zero()),
        _ => piece.left.clone(),
    };
    let right = match &piece.right.bound {
        Bound::Finite(component) => {
            let value = bound_value(component)?;
            let last = if !value.is_integer() {
                value.floor()
            } else if piece.right.is_closed() {
                value
            } else {
                value - BigRational::one()
            };
            integer_delimiter(last)
        }
        _ => piece.right.clone(),
    };
    Ok(Piece::new(left, right, piece.numbers))
}

fn is_empty(piece: &Piece) -> Result<bool, MathError> {
    Ok(match piece.left.bound.compare(&piece.right.bound)? {
        Ordering::Less => false,
        Ordering::Equal => !(piece.left.is_closed() && piece.right.is_closed()),
        Ordering::Greater => true,
    })
}

/// Rounds discrete pieces and drops empty ones.
fn normalize(piece: Piece) -> Result<Option<Piece>, MathError> {
    let piece = if piece.is_discrete() {
        round(piece)?
    } else {
        piece
    };
    if is_empty(&piece)? {
        Ok(None)
    } else {
        Ok(Some(piece))
    }
}

/// Equal bounds written differently are told apart by their rendering so the
/// choice does not depend on the argument order.
fn tie_break(a: &Delimiter, b: &Delimiter) -> Delimiter {
    let key = |delimiter: &Delimiter| {
        delimiter
            .bound
            .component()
            .map(|component| component.to_string())
    };
    if key(a) <= key(b) {
        a.clone()
    } else {
        b.clone()
    }
}

fn later_lower(a: &Delimiter, b: &Delimiter) -> Result<Delimiter, MathError> {
    Ok(match a.compare_as_lower(b)? {
        Ordering::Greater => a.clone(),
        Ordering::Less => b.clone(),
        Ordering::Equal => tie_break(a, b),
    })
}

fn earlier_upper(a: &Delimiter, b: &Delimiter) -> Result<Delimiter, MathError> {
    Ok(match a.compare_as_upper(b)? {
        Ordering::Less => a.clone(),
        Ordering::Greater => b.clone(),
        Ordering::Equal => tie_break(a, b),
    })
}

fn later_upper(a: &Delimiter, b: &Delimiter) -> Result<Delimiter, MathError> {
    Ok(match a.compare_as_upper(b)? {
        Ordering::Greater => a.clone(),
        Ordering::Less => b.clone(),
        Ordering::Equal => tie_break(a, b),
    })
}

fn intersect_pieces(a: &Piece, b: &Piece) -> Result<Option<Piece>, MathError> {
    normalize(Piece::new(
        later_lower(&a.left, &b.left)?,
        earlier_upper(&a.right, &b.right)?,
        a.numbers.max(b.numbers),
    ))
}

type SortKey = (u8, BigRational, bool, Numbers);

fn sort_key(piece: &Piece) -> Result<SortKey, MathError> {
    let (rank, value) = match &piece.left.bound {
        Bound::MinusInfinity => (0, BigRational::zero()),
        Bound::Finite(component) => (1, bound_value(component)?),
        Bound::PlusInfinity => (2, BigRational::zero()),
    };
    Ok((rank, value, !piece.left.is_closed(), piece.numbers))
}

fn sorted(pieces: Vec<Piece>) -> Result<Vec<Piece>, MathError> {
    let mut keyed = pieces
        .into_iter()
        .map(|piece| sort_key(&piece).map(|key| (key, piece)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(keyed.into_iter().map(|(_, piece)| piece).collect())
}

/// Does `next`, starting no earlier than `last`, overlap or touch it?
fn touches(last: &Piece, next: &Piece) -> Result<bool, MathError> {
    if last.is_discrete() {
        return Ok(match (&last.right.bound, &next.left.bound) {
            (Bound::PlusInfinity, _) | (_, Bound::MinusInfinity) => true,
            (Bound::Finite(end), Bound::Finite(start)) => {
                bound_value(start)? <= bound_value(end)? + BigRational::one()
            }
            _ => false,
        });
    }
    Ok(match next.left.bound.compare(&last.right.bound)? {
        Ordering::Less => true,
        Ordering::Equal => last.right.is_closed() || next.left.is_closed(),
        Ordering::Greater => false,
    })
}

/// Merges overlapping pieces of the same kind of numbers.
fn merge(pieces: Vec<Piece>) -> Result<Vec<Piece>, MathError> {
    let mut merged: Vec<Piece> = vec![];
    for piece in sorted(pieces)? {
        if let Some(last) = merged.last_mut() {
            if touches(last, &piece)? {
                last.right = later_upper(&last.right, &piece.right)?;
                continue;
            }
        }
        merged.push(piece);
    }
    Ok(merged)
}

fn covered(piece: &Piece, by: &[Piece]) -> Result<bool, MathError> {
    for real in by.iter() {
        if real.left.compare_as_lower(&piece.left)? != Ordering::Greater
            && real.right.compare_as_upper(&piece.right)? != Ordering::Less
        {
            return Ok(true);
        }
    }
    Ok(false)
}

fn meets(a: &Piece, b: &Piece) -> Result<bool, MathError> {
    let ordered = sorted(vec![a.clone(), b.clone()])?;
    touches(&ordered[0], &ordered[1])
}

/// Naturals meeting an integer piece become part of it.
fn absorb_naturals(
    integers: Vec<Piece>,
    naturals: Vec<Piece>,
) -> Result<(Vec<Piece>, Vec<Piece>), MathError> {
    let mut integers = merge(integers)?;
    let mut kept = vec![];
    for natural in merge(naturals)?.into_iter() {
        let mut joins = false;
        for integer in integers.iter() {
            if meets(integer, &natural)? {
                joins = true;
                break;
            }
        }
        if joins {
            integers.push(Piece::new(natural.left, natural.right, Numbers::Integer));
            integers = merge(integers)?;
        } else {
            kept.push(natural);
        }
    }
    Ok((integers, kept))
}

/// The minimal set of disjoint pieces covering the same values
pub fn canonicalize(pieces: Vec<Piece>) -> Result<Vec<Piece>, MathError> {
    let mut reals = vec![];
    let mut integers = vec![];
    let mut naturals = vec![];
    for piece in pieces.into_iter() {
        if let Some(piece) = normalize(piece)? {
            match piece.numbers {
                Numbers::Real => reals.push(piece),
                Numbers::Integer => integers.push(piece),
                Numbers::Natural => naturals.push(piece),
            }
        }
    }
    let reals = merge(reals)?;
    let mut result = reals.clone();
    let (integers, naturals) = absorb_naturals(integers, naturals)?;
    for discrete in vec![integers, naturals].into_iter() {
        for piece in discrete.into_iter() {
            if !covered(&piece, &reals)? {
                result.push(piece);
            }
        }
    }
    sorted(result)
}

pub fn intersect(a: &[Piece], b: &[Piece]) -> Result<Vec<Piece>, MathError> {
    let mut pieces = vec![];
    for left in a.iter() {
        for right in b.iter() {
            if let Some(piece) = intersect_pieces(left, right)? {
                pieces.push(piece);
            }
        }
    }
    canonicalize(pieces)
}

pub fn union(a: &[Piece], b: &[Piece]) -> Result<Vec<Piece>, MathError> {
    canonicalize(a.iter().chain(b.iter()).cloned().collect())
}

/// The single value of a degenerate piece
fn point_of(piece: &Piece) -> Option<Component> {
    if piece.left.is_closed() && piece.right.is_closed() && piece.left.bound == piece.right.bound
    {
        piece.left.bound.component().cloned()
    } else {
        None
    }
}

fn raise_real(variable: char, piece: Piece) -> GenericInterval {
    use RelationalOperator::*;
    if let Some(point) = point_of(&piece) {
        return GenericInterval::single(variable, Equals, point);
    }
    let left_closed = piece.left.is_closed();
    let right_closed = piece.right.is_closed();
    match (&piece.left.bound, &piece.right.bound) {
        (Bound::MinusInfinity, Bound::Finite(point)) => {
            let kind = if right_closed { LessThanOrEquals } else { LessThan };
            GenericInterval::single(variable, kind, point.clone())
        }
        (Bound::Finite(point), Bound::PlusInfinity) => {
            let kind = if left_closed {
                GreaterThanOrEquals
            } else {
                GreaterThan
            };
            GenericInterval::single(variable, kind, point.clone())
        }
        _ => GenericInterval::double(variable, piece.left, piece.right),
    }
}

fn raise_discrete(variable: char, piece: Piece) -> GenericInterval {
    if let Some(point) = point_of(&piece) {
        return GenericInterval::single(variable, RelationalOperator::Equals, point);
    }
    let natural = piece.numbers == Numbers::Natural;
    let starts_at_zero = piece
        .left
        .bound
        .component()
        .map_or(false, |component| component.is_constant_value(0));
    let unbounded = piece.right.bound == Bound::PlusInfinity;
    if natural && starts_at_zero && unbounded {
        return GenericInterval::N(variable);
    }
    if !natural && unbounded && piece.left.bound == Bound::MinusInfinity {
        return GenericInterval::Z(variable);
    }
    let range = DoublePointInterval::new(variable, piece.left, piece.right);
    if natural {
        GenericInterval::SubSetN(range)
    } else {
        GenericInterval::SubSetZ(range)
    }
}

/// `x < p` next to `x > p` is written as `x ≠ p`
fn punctured_line(pieces: &[Piece]) -> Option<Component> {
    match pieces {
        [first, second] if !first.is_discrete() && !second.is_discrete() => {
            match (
                &first.left.bound,
                &first.right,
                &second.left,
                &second.right.bound,
            ) {
                (Bound::MinusInfinity, end, start, Bound::PlusInfinity)
                    if !end.is_closed() && !start.is_closed() && end.bound == start.bound =>
                {
                    end.bound.component().cloned()
                }
                _ => None,
            }
        }
        _ => None,
    }
}

/// Canonical pieces back to intervals
pub fn raise(variable: char, pieces: Vec<Piece>) -> Vec<GenericInterval> {
    if pieces.is_empty() {
        return vec![GenericInterval::Void(variable)];
    }
    let reals = pieces
        .iter()
        .filter(|piece| !piece.is_discrete())
        .cloned()
        .collect::<Vec<_>>();
    let mut intervals = vec![];
    let mut rest = pieces;
    if let Some(point) = punctured_line(&reals) {
        intervals.push(GenericInterval::single(
            variable,
            RelationalOperator::NotEquals,
            point,
        ));
        rest.retain(|piece| piece.is_discrete());
    }
    for piece in rest.into_iter() {
        intervals.push(if piece.is_discrete() {
            raise_discrete(variable, piece)
        } else {
            raise_real(variable, piece)
        });
    }
    intervals
}
