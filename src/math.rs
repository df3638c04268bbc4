//! Building-blocks for arbitrary-precision integer arithmetic.
//!
//! These algorithms assume little-endian order for the digit buffers,
//! so for a `vec![0, 1, 2, 3]`, `3` is the most significant digit,
//! and `0` is the least significant digit.

use crate::lib::{cmp, Vec};

// DIGITS
// ------

//  A digit is a 30-bit value stored in a `u32`.
//
//  The base is chosen so that a full multiply-accumulate step fits the
//  64-bit accumulator without a wider integer type:
//
//      (B-1)^2 + 2*(B-1) == B^2 - 1 < 2^64
//
//  and so that carry and borrow extraction are plain shifts and masks on
//  the accumulator, with no reliance on wrapping semantics. The borrow
//  side uses a signed accumulator and an explicit flag for the same
//  reason.

/// Type for a single digit of the big integer.
pub type Digit = u32;

//  Accumulator for digit arithmetic, at least twice the digit width.
type Wide = u64;

//  Signed accumulator for borrow-propagating subtraction.
type SignedWide = i64;

/// Number of value bits in a digit.
pub const DIGIT_BITS: u32 = 30;

/// The radix of the digit representation: `2^30`.
pub const BASE: Digit = 1 << DIGIT_BITS;

//  Mask extracting the low digit from a wide accumulator.
const DIGIT_MASK: Wide = BASE as Wide - 1;

//  Vector type for digit storage.
pub(crate) type DigitVec = Vec<Digit>;

pub use self::large::KARATSUBA_CUTOFF;

// SCALAR
// ------

// Digit-to-digit operations, building-blocks for the arbitrary-precision
// operations below.

pub(crate) mod scalar {
    use super::*;

    // ADDITION

    /// Add two digits and an incoming carry, splitting the accumulator
    /// into an output digit and an outgoing carry.
    ///
    /// The incoming carry may be as large as a full digit (the
    /// multiplication row carry is rippled through here); the outgoing
    /// carry is at most 1 whenever the incoming one is.
    #[inline]
    pub fn add(x: Digit, y: Digit, carry: Digit) -> (Digit, Digit) {
        debug_assert!(x < BASE && y < BASE && carry < BASE);
        let acc = x as Wide + y as Wide + carry as Wide;
        ((acc & DIGIT_MASK) as Digit, (acc >> DIGIT_BITS) as Digit)
    }

    // SUBTRACTION

    /// Subtract a digit and an incoming borrow, yielding the output
    /// digit and the outgoing borrow.
    #[inline]
    pub fn sub(x: Digit, y: Digit, borrow: Digit) -> (Digit, Digit) {
        debug_assert!(x < BASE && y < BASE && borrow <= 1);
        let acc = x as SignedWide - y as SignedWide - borrow as SignedWide;
        if acc < 0 {
            ((acc + BASE as SignedWide) as Digit, 1)
        } else {
            (acc as Digit, 0)
        }
    }

    // MULTIPLICATION

    /// Multiply two digits into a running row: `x * y + acc + carry`,
    /// split into an output digit and an outgoing carry.
    ///
    /// Cannot overflow, and the outgoing carry stays below `BASE`, so
    /// chained row steps never feed an out-of-range carry back in.
    #[inline]
    pub fn mul_add(x: Digit, y: Digit, acc: Digit, carry: Digit) -> (Digit, Digit) {
        debug_assert!(x < BASE && y < BASE && acc < BASE && carry < BASE);
        let wide = x as Wide * y as Wide + acc as Wide + carry as Wide;
        ((wide & DIGIT_MASK) as Digit, (wide >> DIGIT_BITS) as Digit)
    }
}

// SMALL
// -----

// Operations between a digit vector and a native scalar.

pub(crate) mod small {
    use super::*;

    // CONVERSION

    /// Split a `u64` into digits, in little-endian order.
    pub fn from_u64(x: u64) -> DigitVec {
        let mut v = DigitVec::new();
        let mut x = x;
        while x != 0 {
            v.push((x & DIGIT_MASK) as Digit);
            x >>= DIGIT_BITS;
        }
        v
    }

    // MULTIPLICATION

    /// Multiply a digit vector by a single digit.
    pub fn mul(x: &[Digit], y: Digit) -> DigitVec {
        let mut z = DigitVec::with_capacity(x.len() + 1);
        let mut carry = 0;
        for &xi in x {
            let (d, c) = scalar::mul_add(xi, y, 0, carry);
            z.push(d);
            carry = c;
        }
        if carry != 0 {
            z.push(carry);
        }
        normalize(&mut z);
        z
    }

    // NORMALIZE

    /// Normalize the buffer by popping any most-significant zero digits.
    ///
    /// This is the single place canonical form is established: every
    /// operation sizes its output pessimistically and trims here before
    /// the result escapes.
    #[inline]
    pub fn normalize(x: &mut DigitVec) {
        while x.last() == Some(&0) {
            x.pop();
        }
    }

    /// Check canonical form: every digit in range, no most-significant
    /// zero digit, zero as the empty buffer.
    pub fn is_canonical(x: &[Digit]) -> bool {
        x.iter().all(|&d| d < BASE) && x.last() != Some(&0)
    }
}

// LARGE
// -----

// Operations between digit vectors.

pub(crate) mod large {
    use super::*;

    // RELATIVE OPERATORS

    /// Compare `x` to `y`, in little-endian order.
    ///
    /// Operands must be free of most-significant zero digits, so a
    /// longer operand is strictly greater; equal lengths are decided by
    /// the first differing digit scanning down from the most significant
    /// end.
    pub fn compare(x: &[Digit], y: &[Digit]) -> cmp::Ordering {
        if x.len() != y.len() {
            return x.len().cmp(&y.len());
        }
        for (&xi, &yi) in x.iter().rev().zip(y.iter().rev()) {
            if xi != yi {
                return xi.cmp(&yi);
            }
        }
        cmp::Ordering::Equal
    }

    // ADDITION

    /// Add two digit sequences.
    ///
    /// The operands may carry most-significant zero digits (the
    /// Karatsuba split feeds raw halves through here); the sum is
    /// normalized on the way out. The output is at most one digit
    /// longer than the longer operand.
    pub fn add(x: &[Digit], y: &[Digit]) -> DigitVec {
        let (long, short) = if x.len() >= y.len() { (x, y) } else { (y, x) };
        let mut z = DigitVec::with_capacity(long.len() + 1);
        let mut carry = 0;
        for (&li, &si) in long.iter().zip(short.iter()) {
            let (d, c) = scalar::add(li, si, carry);
            z.push(d);
            carry = c;
        }
        for &li in &long[short.len()..] {
            let (d, c) = scalar::add(li, 0, carry);
            z.push(d);
            carry = c;
        }
        if carry != 0 {
            z.push(carry);
        }
        small::normalize(&mut z);
        z
    }

    /// Add `y` into `x` with `y` shifted left by `shift` whole digits.
    ///
    /// This is the combine step of Karatsuba: each term is accumulated
    /// at its digit offset without materializing a shifted copy.
    pub fn iadd_offset(x: &mut DigitVec, y: &[Digit], shift: usize) {
        if x.len() < shift + y.len() {
            x.resize(shift + y.len(), 0);
        }
        let mut carry = 0;
        for (xi, &yi) in x[shift..].iter_mut().zip(y.iter()) {
            let (d, c) = scalar::add(*xi, yi, carry);
            *xi = d;
            carry = c;
        }
        let mut i = shift + y.len();
        while carry != 0 {
            if i == x.len() {
                x.push(carry);
                break;
            }
            let (d, c) = scalar::add(x[i], 0, carry);
            x[i] = d;
            carry = c;
            i += 1;
        }
    }

    // SUBTRACTION

    /// SubAssign a digit sequence from a greater-or-equal one.
    pub fn isub(x: &mut DigitVec, y: &[Digit]) {
        debug_assert!(compare(x, y) != cmp::Ordering::Less);
        let mut borrow = 0;
        for (i, xi) in x.iter_mut().enumerate() {
            if i >= y.len() && borrow == 0 {
                break;
            }
            let yi = if i < y.len() { y[i] } else { 0 };
            let (d, b) = scalar::sub(*xi, yi, borrow);
            *xi = d;
            borrow = b;
        }
        // A borrow surviving the most significant digit would mean the
        // magnitude precondition was violated.
        debug_assert_eq!(borrow, 0);
        small::normalize(x);
    }

    /// Subtract two digit sequences. Requires `x >= y`.
    pub fn sub(x: &[Digit], y: &[Digit]) -> DigitVec {
        let mut z = DigitVec::new();
        z.extend_from_slice(x);
        isub(&mut z, y);
        z
    }

    // MULTIPLICATION

    /// Number of digits at which multiplication bottoms out to the
    /// schoolbook algorithm.
    ///
    /// Below this size the bookkeeping of the recursive split costs more
    /// than it saves; at 30 bits per digit the crossover lands around
    /// two thousand bits on current 64-bit targets. 70 digits is the
    /// middle of that band. Retune with `benches/multiply.rs`, which
    /// sweeps operand sizes on both sides of the current value.
    pub const KARATSUBA_CUTOFF: usize = 70;

    /// Grade-school multiplication algorithm.
    ///
    /// Each partial product `x[i] * y[j]` is accumulated straight into
    /// the shared output buffer at position `i + j`, with the row carry
    /// rippled toward the most significant end, so no per-row partial
    /// product vectors are materialized and no separate summation pass
    /// is needed. Runs in `O(n * m)` time.
    pub fn long_mul(x: &[Digit], y: &[Digit]) -> DigitVec {
        let mut z = DigitVec::new();
        z.resize(x.len() + y.len(), 0);
        for (i, &xi) in x.iter().enumerate() {
            if xi == 0 {
                continue;
            }
            let mut carry = 0;
            for (j, &yj) in y.iter().enumerate() {
                let (d, c) = scalar::mul_add(xi, yj, z[i + j], carry);
                z[i + j] = d;
                carry = c;
            }
            // The ripple cannot run past the end of the buffer: the full
            // product stays below `BASE^(n+m)`.
            let mut k = i + y.len();
            while carry != 0 {
                let (d, c) = scalar::add(z[k], 0, carry);
                z[k] = d;
                carry = c;
                k += 1;
            }
        }
        small::normalize(&mut z);
        z
    }

    /// Split a buffer at `k` digits, into (low, high) halves.
    ///
    /// A buffer shorter than `k` has an empty high half, which the
    /// callers treat as zero.
    #[inline]
    fn split(x: &[Digit], k: usize) -> (&[Digit], &[Digit]) {
        if x.len() <= k {
            (x, &[])
        } else {
            x.split_at(k)
        }
    }

    /// Karatsuba multiplication algorithm.
    ///
    /// Reduces the four half-width sub-multiplications of the naive
    /// divide-and-conquer split to three, for `O(n^1.585)` overall:
    ///
    /// ```text
    /// x*y == z0 + (z1 - z0 - z2)*B^k + z2*B^2k
    ///   z0 == xl*yl
    ///   z1 == (xl + xh)*(yl + yh)
    ///   z2 == xh*yh
    /// ```
    ///
    /// Both operands split at the same index `k`, derived from the
    /// longer one, so the recursive subcalls stay well-formed even for
    /// unequal lengths. Operands below the cutoff (including empty
    /// ones) fall through to `long_mul`, which also terminates the
    /// recursion.
    pub fn karatsuba_mul(x: &[Digit], y: &[Digit]) -> DigitVec {
        if x.len() < KARATSUBA_CUTOFF || y.len() < KARATSUBA_CUTOFF {
            return long_mul(x, y);
        }

        let k = (x.len().max(y.len()) + 1) / 2;
        let (xl, xh) = split(x, k);
        let (yl, yh) = split(y, k);

        let z0 = karatsuba_mul(xl, yl);
        let z2 = karatsuba_mul(xh, yh);
        let sum_x = add(xl, xh);
        let sum_y = add(yl, yh);
        let mut z1 = karatsuba_mul(&sum_x, &sum_y);
        // z1 >= z0 + z2 always holds for non-negative halves, so the
        // cross term needs no sign handling.
        isub(&mut z1, &z0);
        isub(&mut z1, &z2);

        let mut z = DigitVec::with_capacity(x.len() + y.len() + 1);
        z.extend_from_slice(&z0);
        iadd_offset(&mut z, &z1, k);
        iadd_offset(&mut z, &z2, 2 * k);
        small::normalize(&mut z);
        z
    }

    /// Multiply two digit sequences.
    ///
    /// Single-digit operands take a one-pass scalar multiply; everything
    /// else goes through the Karatsuba entry point, which bottoms out to
    /// `long_mul` below the cutoff.
    pub fn mul(x: &[Digit], y: &[Digit]) -> DigitVec {
        if y.len() == 1 {
            small::mul(x, y[0])
        } else if x.len() == 1 {
            small::mul(y, x[0])
        } else {
            karatsuba_mul(x, y)
        }
    }
}

// TESTS
// -----

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn digits(x: &[Digit]) -> DigitVec {
        x.to_vec()
    }

    fn from_u128(x: u128) -> DigitVec {
        let mut v = DigitVec::new();
        let mut x = x;
        while x != 0 {
            v.push((x & DIGIT_MASK as u128) as Digit);
            x >>= DIGIT_BITS;
        }
        v
    }

    fn reference(x: &[Digit]) -> BigUint {
        let mut acc = BigUint::from(0u32);
        for &d in x.iter().rev() {
            acc = (acc << DIGIT_BITS) + d;
        }
        acc
    }

    fn random_digits(rng: &mut StdRng, len: usize) -> DigitVec {
        let mut v: DigitVec = (0..len).map(|_| rng.random_range(0..BASE)).collect();
        if let Some(last) = v.last_mut() {
            // Pin the length by keeping the top digit non-zero.
            *last = rng.random_range(1..BASE);
        }
        v
    }

    #[test]
    fn normalize_test() {
        let mut x = digits(&[1, 2, 0, 0]);
        small::normalize(&mut x);
        assert_eq!(x, digits(&[1, 2]));

        let mut x = digits(&[0, 0, 0]);
        small::normalize(&mut x);
        assert!(x.is_empty());

        let mut x = digits(&[0, 7]);
        small::normalize(&mut x);
        assert_eq!(x, digits(&[0, 7]));

        let mut x = DigitVec::new();
        small::normalize(&mut x);
        assert!(x.is_empty());
    }

    #[test]
    fn is_canonical_test() {
        assert!(small::is_canonical(&[]));
        assert!(small::is_canonical(&[1]));
        assert!(small::is_canonical(&[0, 1]));
        assert!(!small::is_canonical(&[0]));
        assert!(!small::is_canonical(&[1, 0]));
        assert!(!small::is_canonical(&[BASE]));
    }

    #[test]
    fn from_u64_test() {
        assert!(small::from_u64(0).is_empty());
        assert_eq!(small::from_u64(1), digits(&[1]));
        assert_eq!(small::from_u64(BASE as u64 - 1), digits(&[BASE - 1]));
        assert_eq!(small::from_u64(BASE as u64), digits(&[0, 1]));
        assert_eq!(small::from_u64(u64::MAX), digits(&[BASE - 1, BASE - 1, 15]));
    }

    #[test]
    fn compare_test() {
        use cmp::Ordering;
        assert_eq!(large::compare(&[], &[]), Ordering::Equal);
        assert_eq!(large::compare(&[1], &[]), Ordering::Greater);
        assert_eq!(large::compare(&[1], &[2]), Ordering::Less);
        assert_eq!(large::compare(&[5, 1], &[2]), Ordering::Greater);
        assert_eq!(large::compare(&[5, 1, 9], &[6, 2, 8]), Ordering::Greater);
        // Decided by the most significant differing digit, not the first.
        assert_eq!(large::compare(&[0, 1, 9], &[BASE - 1, 0, 9]), Ordering::Greater);
        assert_eq!(large::compare(&[3, 7], &[3, 7]), Ordering::Equal);
    }

    #[test]
    fn add_test() {
        assert!(large::add(&[], &[]).is_empty());
        assert_eq!(large::add(&[1], &[]), digits(&[1]));
        assert_eq!(large::add(&[1], &[2]), digits(&[3]));
        // Carry out of the top digit grows the result.
        assert_eq!(large::add(&[BASE - 1], &[1]), digits(&[0, 1]));
        assert_eq!(
            large::add(&[BASE - 1, BASE - 1], &[1]),
            digits(&[0, 0, 1])
        );
        // Mixed lengths, carry crossing the short operand's end.
        assert_eq!(
            large::add(&[BASE - 1, 2, 7], &[1]),
            digits(&[0, 3, 7])
        );
        // Non-canonical halves are tolerated and the result is trimmed.
        assert_eq!(large::add(&[1, 0], &[2, 0]), digits(&[3]));
    }

    #[test]
    fn iadd_offset_test() {
        let mut x = digits(&[1, 2, 3]);
        large::iadd_offset(&mut x, &[5], 1);
        assert_eq!(x, digits(&[1, 7, 3]));

        // Growing past the end.
        let mut x = digits(&[1]);
        large::iadd_offset(&mut x, &[4, 5], 2);
        assert_eq!(x, digits(&[1, 0, 4, 5]));

        // Carry rippling beyond the added span.
        let mut x = digits(&[0, BASE - 1, BASE - 1, 8]);
        large::iadd_offset(&mut x, &[1], 1);
        assert_eq!(x, digits(&[0, 0, 0, 9]));

        // Carry off the current end of the buffer.
        let mut x = digits(&[0, BASE - 1]);
        large::iadd_offset(&mut x, &[1], 1);
        assert_eq!(x, digits(&[0, 0, 1]));
    }

    #[test]
    fn sub_test() {
        assert!(large::sub(&[], &[]).is_empty());
        assert!(large::sub(&[4, 2], &[4, 2]).is_empty());
        assert_eq!(large::sub(&[5], &[3]), digits(&[2]));
        // Borrow chain across several digits.
        assert_eq!(
            large::sub(&[0, 0, 1], &[1]),
            digits(&[BASE - 1, BASE - 1])
        );
        assert_eq!(large::sub(&[0, 3], &[1, 1]), digits(&[BASE - 1, 1]));
    }

    #[test]
    fn small_mul_test() {
        assert!(small::mul(&[], 5).is_empty());
        assert!(small::mul(&[3, 2], 0).is_empty());
        assert_eq!(small::mul(&[3, 2], 1), digits(&[3, 2]));
        assert_eq!(
            small::mul(&[BASE - 1], BASE - 1),
            from_u128((BASE as u128 - 1) * (BASE as u128 - 1))
        );
    }

    #[test]
    fn long_mul_test() {
        assert!(large::long_mul(&[], &[2]).is_empty());
        assert!(large::long_mul(&[2], &[]).is_empty());
        assert_eq!(large::long_mul(&[2], &[3]), digits(&[6]));
        // One digit shy of the base squared.
        assert_eq!(
            large::long_mul(&[BASE - 1], &[BASE - 1]),
            digits(&[1, BASE - 2])
        );
        // Shifted operands multiply to a shifted product.
        assert_eq!(large::long_mul(&[0, 1], &[0, 1]), digits(&[0, 0, 1]));
        // Cross-checked against native 128-bit arithmetic.
        let x = 0x1234_5678_9abc_def0_u64;
        let y = 0xfedc_ba98_7654_3210_u64;
        assert_eq!(
            large::long_mul(&small::from_u64(x), &small::from_u64(y)),
            from_u128(x as u128 * y as u128)
        );
    }

    #[test]
    fn long_mul_squares_test() {
        // Aliased operands square correctly.
        let x = small::from_u64(0xdead_beef_cafe_f00d);
        assert_eq!(
            large::long_mul(&x, &x),
            from_u128(0xdead_beef_cafe_f00d_u128 * 0xdead_beef_cafe_f00d_u128)
        );
    }

    #[test]
    fn karatsuba_matches_long_mul_test() {
        let mut rng = StdRng::seed_from_u64(0x6b61_7261);
        for _ in 0..32 {
            let n = rng.random_range(1..3 * large::KARATSUBA_CUTOFF);
            let m = rng.random_range(1..3 * large::KARATSUBA_CUTOFF);
            let x = random_digits(&mut rng, n);
            let y = random_digits(&mut rng, m);
            let fast = large::karatsuba_mul(&x, &y);
            let slow = large::long_mul(&x, &y);
            assert_eq!(fast, slow);
            assert!(small::is_canonical(&fast));
        }
    }

    #[test]
    fn karatsuba_uneven_lengths_test() {
        let mut rng = StdRng::seed_from_u64(0x756e_6576);
        // Thin-against-wide splits leave one empty high half.
        let x = random_digits(&mut rng, large::KARATSUBA_CUTOFF);
        let y = random_digits(&mut rng, 8 * large::KARATSUBA_CUTOFF);
        assert_eq!(
            large::karatsuba_mul(&x, &y),
            large::long_mul(&x, &y)
        );
    }

    #[test]
    fn mul_dispatch_test() {
        // The single-digit path and the general path agree.
        let mut rng = StdRng::seed_from_u64(0x6469_7370);
        let x = random_digits(&mut rng, 50);
        let d = rng.random_range(1..BASE);
        assert_eq!(large::mul(&x, &[d]), large::long_mul(&x, &[d]));
        assert_eq!(large::mul(&[d], &x), large::long_mul(&[d], &x));
    }

    #[test]
    fn reference_mul_test() {
        // 200-digit operands, cross-checked against num-bigint.
        let mut rng = StdRng::seed_from_u64(0x7265_6665);
        for _ in 0..4 {
            let x = random_digits(&mut rng, 200);
            let y = random_digits(&mut rng, 200);
            let z = large::mul(&x, &y);
            assert!(small::is_canonical(&z));
            assert_eq!(reference(&z), reference(&x) * reference(&y));
        }
    }

    #[test]
    fn reference_add_sub_test() {
        let mut rng = StdRng::seed_from_u64(0x6164_6473);
        for _ in 0..16 {
            let n = rng.random_range(1..256);
            let m = rng.random_range(1..256);
            let x = random_digits(&mut rng, n);
            let y = random_digits(&mut rng, m);
            let sum = large::add(&x, &y);
            assert!(small::is_canonical(&sum));
            assert_eq!(reference(&sum), reference(&x) + reference(&y));

            let diff = large::sub(&sum, &y);
            assert!(small::is_canonical(&diff));
            assert_eq!(diff, x);
        }
    }
}
