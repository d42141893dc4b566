//! Permissive numeric coercion for loosely-typed upstream counts.
//!
//! Record files come from a remote, loosely-typed source; cells may arrive
//! as numbers, numeric strings, or garbage. Every arithmetic entry point in
//! the crate funnels raw cell values through [`safe_count`] so malformed
//! data degrades to zero instead of poisoning a computation.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Coerce a raw cell value to a safe, finite count.
///
/// Non-finite values (NaN, infinities) coerce to `0.0`. Finite values pass
/// through unchanged, including negative and fractional ones — those are
/// the realism validator's business, not a parse failure.
pub fn safe_count(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// A count deserialized leniently: numbers pass through, numeric strings
/// are parsed, anything else becomes NaN (and later coerces to 0 via
/// [`safe_count`]).
#[derive(Debug, Clone, Copy)]
pub struct LenientCount(pub f64);

impl<'de> serde::Deserialize<'de> for LenientCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientCountVisitor)
    }
}

struct LenientCountVisitor;

impl<'de> Visitor<'de> for LenientCountVisitor {
    type Value = LenientCount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a count value")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(LenientCount(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(LenientCount(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(LenientCount(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(LenientCount(v.trim().parse().unwrap_or(f64::NAN)))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(LenientCount(f64::NAN))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(LenientCount(f64::NAN))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(LenientCount(f64::NAN))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientCountVisitor)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        // Drain the unexpected nested object so the outer parse can continue.
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(LenientCount(f64::NAN))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(LenientCount(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(safe_count(12.0), 12.0);
        assert_eq!(safe_count(-3.5), -3.5);
        assert_eq!(safe_count(0.0), 0.0);
    }

    #[test]
    fn non_finite_values_coerce_to_zero() {
        assert_eq!(safe_count(f64::NAN), 0.0);
        assert_eq!(safe_count(f64::INFINITY), 0.0);
        assert_eq!(safe_count(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn lenient_count_parses_numbers_and_strings() {
        let n: LenientCount = serde_json::from_str("42").unwrap();
        assert_eq!(n.0, 42.0);

        let n: LenientCount = serde_json::from_str("-7.25").unwrap();
        assert_eq!(n.0, -7.25);

        let n: LenientCount = serde_json::from_str("\" 15 \"").unwrap();
        assert_eq!(n.0, 15.0);
    }

    #[test]
    fn lenient_count_maps_garbage_to_nan() {
        for raw in ["\"abc\"", "true", "null", "{\"x\": 1}", "[1, 2]"] {
            let n: LenientCount = serde_json::from_str(raw).unwrap();
            assert!(n.0.is_nan(), "expected NaN for {raw}");
            assert_eq!(safe_count(n.0), 0.0);
        }
    }
}
