//! Arbitrary-precision signed integer arithmetic.
//!
//! This crate provides [`BigInt`], an immutable sign-magnitude integer of
//! unbounded size, with addition, subtraction and multiplication that cannot
//! overflow.
//!
//! # Representation
//!
//! A value is a [`Sign`] and a little-endian magnitude of base-`2^30` digits
//! ([`BASE`]). The base is picked so that the product of two digits, plus the
//! running carries, fits a 64-bit accumulator, which keeps the
//! multiply-with-carry kernels in plain native arithmetic with shift/mask
//! carry extraction. Every value handed out by this crate is in canonical
//! form: no most-significant zero digit, and the zero value is the empty
//! magnitude paired with [`Sign::Zero`].
//!
//! Values are never mutated after construction, so arbitrarily many threads
//! may read the same `BigInt` without synchronization.
//!
//! # Algorithms
//!
//! Addition and subtraction walk the digits once with explicit carry and
//! borrow propagation. Multiplication uses the schoolbook product-accumulate
//! method for small operands and switches to Karatsuba's divide-and-conquer
//! recursion once both operands reach [`KARATSUBA_CUTOFF`] digits, for
//! `O(n^1.585)` asymptotics.
//!
//! ```
//! use bigint::BigInt;
//!
//! // 21! does not fit in any native integer type.
//! let mut factorial = BigInt::from(1);
//! for k in 2..=21 {
//!     factorial = &factorial * &BigInt::from(k);
//! }
//! assert_eq!(factorial.digits(), &[952369152, 337507546, 44][..]);
//! ```
//!
//! # Features
//!
//! - `std` (default): use the Rust standard library.
//! - `alloc`: heap allocation without the rest of the standard library.
//! - `serde`: `Serialize` and `Deserialize` impls for [`BigInt`] and
//!   [`Sign`], exchanging the sign and the canonical digit sequence.
//!   Deserialization rejects non-canonical input.

#![doc(html_root_url = "https://docs.rs/bigint/0.1.0")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![allow(clippy::comparison_chain, clippy::manual_range_contains)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(feature = "serde")]
extern crate serde_core as serde;

mod features_check;

mod lib {
    mod core {
        #[cfg(not(feature = "std"))]
        pub use core::*;
        #[cfg(feature = "std")]
        pub use std::*;
    }

    pub use self::core::{cmp, fmt, ops};

    #[cfg(all(feature = "alloc", not(feature = "std")))]
    pub use alloc::vec::Vec;
    #[cfg(feature = "std")]
    pub use std::vec::Vec;
}

mod bigint;
mod math;
mod sign;

#[cfg(feature = "serde")]
mod de;
#[cfg(feature = "serde")]
mod ser;

pub use crate::bigint::BigInt;
pub use crate::math::{Digit, BASE, DIGIT_BITS, KARATSUBA_CUTOFF};
pub use crate::sign::Sign;
