//! Serialize a `BigInt` into its sign and digit sequence.

use crate::bigint::BigInt;
use crate::sign::Sign;
use serde::ser::{Serialize, SerializeStruct, Serializer};

impl Serialize for Sign {
    /// Serialized as the integer `-1`, `0` or `1`.
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i8(match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        })
    }
}

impl Serialize for BigInt {
    /// Serialized as a struct of the sign and the canonical
    /// little-endian digit sequence, e.g. `{"sign":-1,"digits":[5]}`
    /// in JSON. The digit sequence is the value's observable
    /// representation, so nothing is recomputed on the way out.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BigInt", 2)?;
        state.serialize_field("sign", &self.sign())?;
        state.serialize_field("digits", self.digits())?;
        state.end()
    }
}
