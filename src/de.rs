//! Deserialize a `BigInt` from its sign and digit sequence.
//!
//! This is the one boundary where canonical form is checked rather than
//! established: the input is untrusted, so a digit outside the base, a
//! most-significant zero digit, or a sign inconsistent with the
//! magnitude is a data error, not a programming error.

use crate::bigint::BigInt;
use crate::lib::fmt;
use crate::math::{small, DigitVec, BASE};
use crate::sign::Sign;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

impl<'de> Deserialize<'de> for Sign {
    /// Deserialized from the integer `-1`, `0` or `1`.
    fn deserialize<D>(deserializer: D) -> Result<Sign, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SignVisitor;

        impl<'de> Visitor<'de> for SignVisitor {
            type Value = Sign;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sign encoded as -1, 0 or 1")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Sign, E>
            where
                E: de::Error,
            {
                match value {
                    -1 => Ok(Sign::Negative),
                    0 => Ok(Sign::Zero),
                    1 => Ok(Sign::Positive),
                    _ => Err(de::Error::invalid_value(
                        de::Unexpected::Signed(value),
                        &self,
                    )),
                }
            }

            fn visit_u64<E>(self, value: u64) -> Result<Sign, E>
            where
                E: de::Error,
            {
                match value {
                    0 => Ok(Sign::Zero),
                    1 => Ok(Sign::Positive),
                    _ => Err(de::Error::invalid_value(
                        de::Unexpected::Unsigned(value),
                        &self,
                    )),
                }
            }
        }

        deserializer.deserialize_i8(SignVisitor)
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D>(deserializer: D) -> Result<BigInt, D::Error>
    where
        D: Deserializer<'de>,
    {
        enum Field {
            Sign,
            Digits,
        }

        impl<'de> Deserialize<'de> for Field {
            fn deserialize<D>(deserializer: D) -> Result<Field, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct FieldVisitor;

                impl<'de> Visitor<'de> for FieldVisitor {
                    type Value = Field;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str("`sign` or `digits`")
                    }

                    fn visit_str<E>(self, value: &str) -> Result<Field, E>
                    where
                        E: de::Error,
                    {
                        match value {
                            "sign" => Ok(Field::Sign),
                            "digits" => Ok(Field::Digits),
                            _ => Err(de::Error::unknown_field(value, FIELDS)),
                        }
                    }
                }

                deserializer.deserialize_identifier(FieldVisitor)
            }
        }

        struct BigIntVisitor;

        impl<'de> Visitor<'de> for BigIntVisitor {
            type Value = BigInt;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a big integer as a sign and digit sequence")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<BigInt, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let sign = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let digits = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                checked_parts(sign, digits)
            }

            fn visit_map<V>(self, mut map: V) -> Result<BigInt, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut sign: Option<Sign> = None;
                let mut digits: Option<DigitVec> = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Sign => {
                            if sign.is_some() {
                                return Err(de::Error::duplicate_field("sign"));
                            }
                            sign = Some(map.next_value()?);
                        }
                        Field::Digits => {
                            if digits.is_some() {
                                return Err(de::Error::duplicate_field("digits"));
                            }
                            digits = Some(map.next_value()?);
                        }
                    }
                }
                let sign = sign.ok_or_else(|| de::Error::missing_field("sign"))?;
                let digits = digits.ok_or_else(|| de::Error::missing_field("digits"))?;
                checked_parts(sign, digits)
            }
        }

        const FIELDS: &[&str] = &["sign", "digits"];
        deserializer.deserialize_struct("BigInt", FIELDS, BigIntVisitor)
    }
}

/// Validate canonical form before letting an untrusted (sign, digits)
/// pair become a `BigInt`.
fn checked_parts<E>(sign: Sign, digits: DigitVec) -> Result<BigInt, E>
where
    E: de::Error,
{
    if digits.iter().any(|&d| d >= BASE) {
        return Err(de::Error::custom("digit out of range for base 2^30"));
    }
    if !small::is_canonical(&digits) {
        return Err(de::Error::custom(
            "magnitude has a most-significant zero digit",
        ));
    }
    match (sign, digits.is_empty()) {
        (Sign::Zero, false) => Err(de::Error::custom("zero sign with non-empty magnitude")),
        (Sign::Negative | Sign::Positive, true) => {
            Err(de::Error::custom("non-zero sign with empty magnitude"))
        }
        _ => Ok(BigInt::from_parts(sign, digits)),
    }
}
