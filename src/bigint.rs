//! The arbitrary-precision signed integer type.

use crate::lib::{cmp, ops, Vec};
use crate::math::{large, small, Digit, DigitVec};
use crate::sign::Sign;

/// An arbitrary-precision signed integer.
///
/// A `BigInt` is a [`Sign`] and a little-endian magnitude of base-`2^30`
/// digits, kept in canonical form: the zero value is the empty magnitude
/// with [`Sign::Zero`], and a non-zero value never stores a
/// most-significant zero digit. Values are immutable once constructed;
/// every arithmetic operation allocates its result, so operands are never
/// written through, and sharing values across threads needs no
/// synchronization.
///
/// Arithmetic is provided through the standard operator traits, for any
/// mix of owned and borrowed operands:
///
/// ```
/// use bigint::{BigInt, Sign};
///
/// let x = BigInt::from(-7);
/// let y = BigInt::from(6);
/// let product = &x * &y;
/// assert_eq!(product, BigInt::from(-42));
/// assert_eq!(product.sign(), Sign::Negative);
/// assert_eq!(&x + &y, BigInt::from(-1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigInt {
    sign: Sign,
    magnitude: DigitVec,
}

impl BigInt {
    /// The integer zero.
    pub const ZERO: BigInt = BigInt {
        sign: Sign::Zero,
        magnitude: Vec::new(),
    };

    /// Convert a native signed 64-bit integer.
    ///
    /// ```
    /// use bigint::BigInt;
    ///
    /// assert_eq!(BigInt::from_i64(0), BigInt::ZERO);
    /// assert_eq!(BigInt::from_i64(-5).digits(), &[5][..]);
    /// ```
    pub fn from_i64(value: i64) -> BigInt {
        let sign = if value < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        BigInt::from_parts(sign, small::from_u64(value.unsigned_abs()))
    }

    /// Convert a native unsigned 64-bit integer.
    pub fn from_u64(value: u64) -> BigInt {
        BigInt::from_parts(Sign::Positive, small::from_u64(value))
    }

    /// The sign of the value.
    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The magnitude as canonical little-endian base-`2^30` digits.
    ///
    /// Index 0 is the least significant digit, every digit is below
    /// [`BASE`](crate::BASE), the most-significant digit of a non-zero
    /// value is non-zero, and zero is the empty slice.
    #[inline]
    pub fn digits(&self) -> &[Digit] {
        &self.magnitude
    }

    /// Whether the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    /// Assemble a value, restoring the `Zero` sign for an empty
    /// magnitude. The magnitude must already be canonical.
    pub(crate) fn from_parts(sign: Sign, magnitude: DigitVec) -> BigInt {
        debug_assert!(small::is_canonical(&magnitude));
        if magnitude.is_empty() {
            BigInt::ZERO
        } else {
            debug_assert!(sign != Sign::Zero);
            BigInt { sign, magnitude }
        }
    }

    /// The value as a native `i64` when the magnitude fits in a single
    /// digit. `|value| < 2^30`, so sums and products of two such values
    /// stay far inside the `i64` range.
    #[inline]
    fn small_value(&self) -> Option<i64> {
        match self.magnitude.as_slice() {
            [] => Some(0),
            &[d] => {
                if self.sign == Sign::Negative {
                    Some(-(d as i64))
                } else {
                    Some(d as i64)
                }
            }
            _ => None,
        }
    }
}

impl Default for BigInt {
    /// The zero value.
    #[inline]
    fn default() -> BigInt {
        BigInt::ZERO
    }
}

// CONVERSION
// ----------

macro_rules! from_signed_impl {
    ($($t:ty)*) => {$(
        impl From<$t> for BigInt {
            #[inline]
            fn from(value: $t) -> BigInt {
                BigInt::from_i64(value as i64)
            }
        }
    )*};
}

from_signed_impl! { i8 i16 i32 i64 }

macro_rules! from_unsigned_impl {
    ($($t:ty)*) => {$(
        impl From<$t> for BigInt {
            #[inline]
            fn from(value: $t) -> BigInt {
                BigInt::from_u64(value as u64)
            }
        }
    )*};
}

from_unsigned_impl! { u8 u16 u32 u64 }

// COMPARISON
// ----------

impl Ord for BigInt {
    fn cmp(&self, other: &BigInt) -> cmp::Ordering {
        match self.sign.cmp(&other.sign) {
            cmp::Ordering::Equal => {
                let magnitudes = large::compare(&self.magnitude, &other.magnitude);
                if self.sign == Sign::Negative {
                    magnitudes.reverse()
                } else {
                    magnitudes
                }
            }
            ordering => ordering,
        }
    }
}

impl PartialOrd for BigInt {
    #[inline]
    fn partial_cmp(&self, other: &BigInt) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ARITHMETIC
// ----------

/// Signed addition over (sign, magnitude) pairs.
///
/// Subtraction routes through here with the right-hand sign negated. The
/// four sign combinations reduce to magnitude addition for like signs,
/// and for unlike signs to magnitude subtraction of the smaller from the
/// larger, carrying the larger operand's sign. Equal magnitudes of
/// unlike sign cancel to exact zero without running the subtraction
/// loop.
fn signed_sum(xs: Sign, xm: &[Digit], ys: Sign, ym: &[Digit]) -> BigInt {
    if xs == Sign::Zero {
        return BigInt::from_parts(ys, ym.to_vec());
    }
    if ys == Sign::Zero {
        return BigInt::from_parts(xs, xm.to_vec());
    }
    if xs == ys {
        return BigInt::from_parts(xs, large::add(xm, ym));
    }
    match large::compare(xm, ym) {
        cmp::Ordering::Equal => BigInt::ZERO,
        cmp::Ordering::Greater => BigInt::from_parts(xs, large::sub(xm, ym)),
        cmp::Ordering::Less => BigInt::from_parts(ys, large::sub(ym, xm)),
    }
}

fn add_impl(x: &BigInt, y: &BigInt) -> BigInt {
    if let (Some(a), Some(b)) = (x.small_value(), y.small_value()) {
        return BigInt::from_i64(a + b);
    }
    signed_sum(x.sign, &x.magnitude, y.sign, &y.magnitude)
}

fn sub_impl(x: &BigInt, y: &BigInt) -> BigInt {
    if let (Some(a), Some(b)) = (x.small_value(), y.small_value()) {
        return BigInt::from_i64(a - b);
    }
    signed_sum(x.sign, &x.magnitude, y.sign.negated(), &y.magnitude)
}

fn mul_impl(x: &BigInt, y: &BigInt) -> BigInt {
    if x.is_zero() || y.is_zero() {
        return BigInt::ZERO;
    }
    if let (Some(a), Some(b)) = (x.small_value(), y.small_value()) {
        return BigInt::from_i64(a * b);
    }
    BigInt::from_parts(
        x.sign.product(y.sign),
        large::mul(&x.magnitude, &y.magnitude),
    )
}

// Operator impls over every owned/borrowed operand combination. The
// by-reference form is primary; owned operands are borrowed and dropped.
macro_rules! binop_impl {
    ($imp:ident, $method:ident, $function:ident) => {
        impl ops::$imp<&BigInt> for &BigInt {
            type Output = BigInt;
            #[inline]
            fn $method(self, rhs: &BigInt) -> BigInt {
                $function(self, rhs)
            }
        }

        impl ops::$imp<BigInt> for &BigInt {
            type Output = BigInt;
            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                $function(self, &rhs)
            }
        }

        impl ops::$imp<&BigInt> for BigInt {
            type Output = BigInt;
            #[inline]
            fn $method(self, rhs: &BigInt) -> BigInt {
                $function(&self, rhs)
            }
        }

        impl ops::$imp<BigInt> for BigInt {
            type Output = BigInt;
            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                $function(&self, &rhs)
            }
        }
    };
}

binop_impl!(Add, add, add_impl);
binop_impl!(Sub, sub, sub_impl);
binop_impl!(Mul, mul, mul_impl);

impl ops::Neg for BigInt {
    type Output = BigInt;

    /// Negation flips the sign in place; the magnitude buffer is reused
    /// since the value is owned.
    #[inline]
    fn neg(mut self) -> BigInt {
        self.sign = self.sign.negated();
        self
    }
}

impl ops::Neg for &BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(self) -> BigInt {
        -self.clone()
    }
}

// TESTS
// -----
