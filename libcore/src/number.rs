//! Exact numbers of the expression tree
//!
//! All arithmetic happens on arbitrary precision rationals. Irrational values
//! (non perfect roots, logarithms, `e` and `π`) are only ever approximated by truncated
//! rationals, never by floating point numbers.

use crate::context::{Context, NumericMode};
use crate::error::MathError;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Digits used when an irrational value has to be compared or sorted.
pub const APPROXIMATION_DIGITS: u32 = 40;

/// Exponents beyond this magnitude are not evaluated exactly.
const MAX_EXACT_EXPONENT: u32 = 4096;

/// Arguments of `n!` beyond this are not evaluated.
pub const MAX_FACTORIAL: u32 = 1000;

/// Irrational constants, kept symbolic unless a decimal value is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedConstant {
    /// Euler's number `e`
    Euler,
    Pi,
}

impl NamedConstant {
    pub fn symbol(self) -> &'static str {
        match self {
            NamedConstant::Euler => "e",
            NamedConstant::Pi => "π",
        }
    }

    /// The value truncated to `digits` fractional digits
    pub fn approximate(self, digits: u32) -> BigRational {
        match self {
            NamedConstant::Euler => euler_approx(digits),
            NamedConstant::Pi => pi_approx(digits),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notation {
    Fraction,
    /// Decimal rendering with the given number of fractional digits
    Decimal(u32),
}

impl Notation {
    pub fn from_context(context: &Context) -> Notation {
        match context.mode {
            NumericMode::Fractional => Notation::Fraction,
            NumericMode::Decimal => Notation::Decimal(context.precision),
        }
    }
}

/// A signed exact rational value.
///
/// The notation is a rendering hint only, it takes no part in equality,
/// hashing or ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constant {
    value: BigRational,
    notation: Notation,
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Constant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Constant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Constant {
    pub fn new(value: BigRational) -> Constant {
        Constant {
            value,
            notation: Notation::Fraction,
        }
    }

    pub fn with_context(value: BigRational, context: &Context) -> Constant {
        Constant {
            value,
            notation: Notation::from_context(context),
        }
    }

    pub fn with_notation(value: BigRational, notation: Notation) -> Constant {
        Constant { value, notation }
    }

    pub fn integer(value: i64) -> Constant {
        Constant::new(BigRational::from_integer(BigInt::from(value)))
    }

    pub fn zero() -> Constant {
        Constant::new(BigRational::zero())
    }

    pub fn one() -> Constant {
        Constant::new(BigRational::one())
    }

    /// Parses a literal like `12` or `10.25`.
    pub fn parse(literal: &str, context: &Context) -> Result<Constant, MathError> {
        let mut parts = literal.splitn(2, '.');
        let integral = parts.next().unwrap_or("");
        let fractional = parts.next();
        if fractional.is_some() && context.is_fractional() {
            return Err(MathError::DecimalInFractionalMode);
        }
        let digits = |text: &str| -> Result<BigInt, MathError> {
            if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
                return Err(MathError::Parse(format!("Invalid number literal {}", literal)));
            }
            text.parse::<BigInt>()
                .map_err(|_| MathError::Parse(format!("Invalid number literal {}", literal)))
        };
        let mut value = BigRational::from_integer(digits(integral)?);
        if let Some(fractional) = fractional {
            let scale = BigInt::from(10u32).pow(fractional.len() as u32);
            value += BigRational::new(digits(fractional)?, scale);
        }
        Ok(Constant::with_context(value, context))
    }

    pub fn value(&self) -> &BigRational {
        &self.value
    }

    pub fn into_value(self) -> BigRational {
        self.value
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.value.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.value.is_integer()
    }

    pub fn to_integer(&self) -> Option<BigInt> {
        if self.value.is_integer() {
            Some(self.value.to_integer())
        } else {
            None
        }
    }

    pub fn to_u32(&self) -> Option<u32> {
        self.to_integer().and_then(|i| i.to_u32())
    }

    pub fn neg(&self) -> Constant {
        Constant {
            value: -self.value.clone(),
            notation: self.notation,
        }
    }

    pub fn abs(&self) -> Constant {
        Constant {
            value: self.value.abs(),
            notation: self.notation,
        }
    }

    /// Plain text rendering, `-2/3` or `-0.6666666667` depending on the notation
    pub fn to_plain(&self) -> String {
        match self.notation {
            Notation::Fraction => {
                if self.value.is_integer() {
                    self.value.numer().to_string()
                } else {
                    format!("{}/{}", self.value.numer(), self.value.denom())
                }
            }
            Notation::Decimal(digits) => decimal_string(&self.value, digits),
        }
    }

    pub fn to_latex(&self) -> String {
        match self.notation {
            Notation::Fraction if !self.value.is_integer() => {
                let sign = if self.value.is_negative() { "-" } else { "" };
                format!(
                    "{}\\frac{{{}}}{{{}}}",
                    sign,
                    self.value.numer().abs(),
                    self.value.denom()
                )
            }
            _ => self.to_plain(),
        }
    }
}

fn ten_to(digits: u32) -> BigInt {
    BigInt::from(10u32).pow(digits)
}

/// Rounds half away from zero to the given number of fractional digits and
/// strips trailing zeros.
pub fn decimal_string(value: &BigRational, digits: u32) -> String {
    let scale = ten_to(digits);
    let half = BigRational::new(BigInt::one(), BigInt::from(2));
    let scaled = (value.abs() * BigRational::from_integer(scale.clone()) + half)
        .floor()
        .to_integer();
    let (integral, fractional) = scaled.div_rem(&scale);
    let mut fractional = format!("{:0>width$}", fractional, width = digits as usize);
    while fractional.ends_with('0') {
        fractional.pop();
    }
    let sign = if value.is_negative() && !scaled.is_zero() {
        "-"
    } else {
        ""
    };
    if fractional.is_empty() {
        format!("{}{}", sign, integral)
    } else {
        format!("{}{}.{}", sign, integral, fractional)
    }
}

/// Cuts off all digits after the given position (towards negative infinity).
pub fn truncate(value: &BigRational, digits: u32) -> BigRational {
    let scale = BigRational::from_integer(ten_to(digits));
    (value * &scale).floor() / scale
}

/// Integer power, `None` for `0^-n` or exponents too large to evaluate.
pub fn pow(base: &BigRational, exponent: &BigInt) -> Option<BigRational> {
    let magnitude = exponent.abs().to_u32()?;
    if magnitude > MAX_EXACT_EXPONENT {
        return None;
    }
    if exponent.is_negative() {
        if base.is_zero() {
            return None;
        }
        Some(Pow::pow(base.recip(), magnitude))
    } else {
        Some(Pow::pow(base.clone(), magnitude))
    }
}

fn exact_integer_root(value: &BigInt, index: u32) -> Option<BigInt> {
    let root = value.nth_root(index);
    if Pow::pow(&root, index) == *value {
        Some(root)
    } else {
        None
    }
}

/// The exact `index`-th root if numerator and denominator are perfect powers.
pub fn nth_root_exact(value: &BigRational, index: u32) -> Option<BigRational> {
    if index == 0 || (value.is_negative() && index.is_even()) {
        return None;
    }
    let numer = exact_integer_root(&value.numer().abs(), index)?;
    let denom = exact_integer_root(value.denom(), index)?;
    let root = BigRational::new(numer, denom);
    Some(if value.is_negative() { -root } else { root })
}

/// The `index`-th root truncated to `digits` fractional digits.
pub fn nth_root_approx(value: &BigRational, index: u32, digits: u32) -> Option<BigRational> {
    if let Some(exact) = nth_root_exact(value, index) {
        return Some(exact);
    }
    if index == 0 || (value.is_negative() && index.is_even()) {
        return None;
    }
    let scale = ten_to(digits);
    let scaled = (value.abs() * BigRational::from_integer(Pow::pow(&scale, index)))
        .floor()
        .to_integer();
    let root = BigRational::new(scaled.nth_root(index), scale);
    Some(if value.is_negative() { -root } else { root })
}

fn atanh_series(y: &BigRational, digits: u32) -> BigRational {
    let epsilon = BigRational::new(BigInt::one(), ten_to(digits));
    let square = truncate(&(y * y), digits);
    let mut power = y.clone();
    let mut sum = BigRational::zero();
    let mut n = 0u32;
    loop {
        let summand = &power / BigRational::from_integer(BigInt::from(2 * n + 1));
        sum += &summand;
        if summand.abs() < epsilon {
            break;
        }
        power = truncate(&(&power * &square), digits);
        n += 1;
    }
    sum
}

/// `n!` for integers `0 ≤ n ≤ MAX_FACTORIAL`
pub fn factorial(value: &BigRational) -> Option<BigRational> {
    if !value.is_integer() || value.is_negative() {
        return None;
    }
    let n = value.to_integer().to_u32()?;
    if n > MAX_FACTORIAL {
        return None;
    }
    let product = (2..=n).fold(BigInt::one(), |product, k| product * k);
    Some(BigRational::from_integer(product))
}

/// Sum of `1/k!`
fn euler_approx(digits: u32) -> BigRational {
    let working = digits + 10;
    let epsilon = BigRational::new(BigInt::one(), ten_to(working));
    let mut summand = BigRational::one();
    let mut sum = BigRational::zero();
    let mut k = 0u32;
    while summand >= epsilon {
        sum += &summand;
        k += 1;
        summand = truncate(&(summand / BigRational::from_integer(BigInt::from(k))), working);
    }
    truncate(&sum, digits)
}

/// `arctan(1/n)` by its alternating power series
fn arccot_series(n: u32, digits: u32) -> BigRational {
    let epsilon = BigRational::new(BigInt::one(), ten_to(digits));
    let square = BigRational::from_integer(BigInt::from(n) * n);
    let mut power = BigRational::new(BigInt::one(), BigInt::from(n));
    let mut sum = BigRational::zero();
    let mut k = 0u32;
    loop {
        let summand = &power / BigRational::from_integer(BigInt::from(2 * k + 1));
        if k.is_even() {
            sum += &summand;
        } else {
            sum -= &summand;
        }
        if summand < epsilon {
            break;
        }
        power = truncate(&(&power / &square), digits);
        k += 1;
    }
    sum
}

/// Machin's formula `π = 16 arctan(1/5) - 4 arctan(1/239)`
fn pi_approx(digits: u32) -> BigRational {
    let working = digits + 10;
    let pi = arccot_series(5, working) * BigRational::from_integer(BigInt::from(16))
        - arccot_series(239, working) * BigRational::from_integer(BigInt::from(4));
    truncate(&pi, digits)
}

/// Natural logarithm truncated to `digits` fractional digits.
pub fn ln_approx(value: &BigRational, digits: u32) -> Option<BigRational> {
    if !value.is_positive() {
        return None;
    }
    let working = digits + 10;
    let one = BigRational::one();
    let two = BigRational::from_integer(BigInt::from(2));
    let mut mantissa = value.clone();
    let mut exponent: i64 = 0;
    while mantissa >= two {
        mantissa /= &two;
        exponent += 1;
    }
    while mantissa < one {
        mantissa *= &two;
        exponent -= 1;
    }
    let ln_mantissa = atanh_series(&((&mantissa - &one) / (&mantissa + &one)), working) * &two;
    let ln_two = atanh_series(&BigRational::new(BigInt::one(), BigInt::from(3)), working) * &two;
    let result = ln_mantissa + ln_two * BigRational::from_integer(BigInt::from(exponent));
    Some(truncate(&result, digits))
}

#[cfg(test)]
mod specs {
    use super::*;

    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn parse_integer() {
        let actual = Constant::parse("42", &Context::default()).unwrap();
        assert_eq!(actual, Constant::integer(42));
    }

    #[test]
    fn parse_decimal_in_decimal_mode() {
        let actual = Constant::parse("10.25", &Context::decimal()).unwrap();
        assert_eq!(actual.value(), &ratio(41, 4));
        assert_eq!(actual.to_plain(), "10.25");
    }

    #[test]
    fn parse_decimal_in_fractional_mode() {
        let actual = Constant::parse("10.3", &Context::default());
        assert_eq!(actual, Err(MathError::DecimalInFractionalMode));
    }

    #[test]
    fn fraction_rendering() {
        let value = Constant::new(ratio(-2, 3));
        assert_eq!(value.to_plain(), "-2/3");
        assert_eq!(value.to_latex(), "-\\frac{2}{3}");
        assert_eq!(Constant::integer(-7).to_latex(), "-7");
    }

    #[test]
    fn decimal_rendering() {
        assert_eq!(decimal_string(&ratio(2, 3), 4), "0.6667");
        assert_eq!(decimal_string(&ratio(-1, 8), 10), "-0.125");
        assert_eq!(decimal_string(&ratio(5, 1), 3), "5");
        assert_eq!(decimal_string(&ratio(-1, 100000), 2), "0");
    }

    #[test]
    fn equality_ignores_notation() {
        let decimal = Constant::with_context(ratio(1, 2), &Context::decimal());
        assert_eq!(decimal, Constant::new(ratio(1, 2)));
        assert_eq!(decimal.to_plain(), "0.5");
    }

    #[test]
    fn exact_roots() {
        assert_eq!(nth_root_exact(&ratio(9, 4), 2), Some(ratio(3, 2)));
        assert_eq!(nth_root_exact(&ratio(-27, 1), 3), Some(ratio(-3, 1)));
        assert_eq!(nth_root_exact(&ratio(21, 1), 2), None);
        assert_eq!(nth_root_exact(&ratio(-4, 1), 2), None);
    }

    #[test]
    fn approximated_roots() {
        let root = nth_root_approx(&ratio(2, 1), 2, 6).unwrap();
        assert_eq!(root, ratio(1_414_213, 1_000_000));
    }

    #[test]
    fn powers() {
        assert_eq!(pow(&ratio(2, 3), &BigInt::from(2)), Some(ratio(4, 9)));
        assert_eq!(pow(&ratio(2, 1), &BigInt::from(-3)), Some(ratio(1, 8)));
        assert_eq!(pow(&ratio(0, 1), &BigInt::from(-1)), None);
    }

    #[test]
    fn factorials() {
        assert_eq!(factorial(&ratio(0, 1)), Some(ratio(1, 1)));
        assert_eq!(factorial(&ratio(5, 1)), Some(ratio(120, 1)));
        assert_eq!(factorial(&ratio(-1, 1)), None);
        assert_eq!(factorial(&ratio(1, 2)), None);
        assert_eq!(factorial(&ratio(1001, 1)), None);
    }

    #[test]
    fn named_constants() {
        assert_eq!(
            NamedConstant::Pi.approximate(8),
            ratio(314_159_265, 100_000_000)
        );
        assert_eq!(
            NamedConstant::Euler.approximate(8),
            ratio(271_828_182, 100_000_000)
        );
        let pi = decimal_string(&NamedConstant::Pi.approximate(APPROXIMATION_DIGITS), 20);
        assert_eq!(pi, "3.14159265358979323846");
    }

    #[test]
    fn natural_logarithm() {
        let ln_ten = ln_approx(&ratio(10, 1), 8).unwrap();
        assert_eq!(ln_ten, ratio(230_258_509, 100_000_000));
        assert_eq!(ln_approx(&ratio(1, 1), 8), Some(ratio(0, 1)));
        assert_eq!(ln_approx(&ratio(-1, 1), 8), None);
    }
}
