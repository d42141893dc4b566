//! Ordered category × status count blocks.
//!
//! A [`MetricsBlock`] maps screening categories ("Overview", "Diabetes", …)
//! to per-category [`CategoryCounts`] keyed by status ("normal", "risk",
//! "sick"). Both levels are open key sets: unknown categories and statuses
//! are preserved, in the order they were first inserted, which is what makes
//! diffing reproducible. JSON object order survives a round trip.

use crate::core::numeric::{safe_count, LenientCount};
use im::Vector;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-category counts keyed by status.
///
/// Values are stored raw: negative, fractional, or NaN cells are legal in
/// memory and only flagged by the realism validator. Reads go through
/// [`CategoryCounts::count`], which applies the shared safe coercion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryCounts {
    entries: Vector<(String, f64)>,
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value for a status, if present.
    pub fn get(&self, status: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == status)
            .map(|(_, value)| *value)
    }

    /// Coerced count for a status: missing reads as 0, non-finite as 0.
    pub fn count(&self, status: &str) -> f64 {
        safe_count(self.get(status).unwrap_or(0.0))
    }

    /// Insert or replace a status count, preserving first-insertion order.
    pub fn set(&mut self, status: impl Into<String>, value: f64) {
        let status = status.into();
        match self.entries.iter().position(|(key, _)| *key == status) {
            Some(idx) => {
                if let Some(slot) = self.entries.get_mut(idx) {
                    slot.1 = value;
                }
            }
            None => self.entries.push_back((status, value)),
        }
    }

    /// Builder-style [`set`](Self::set), convenient in tests and literals.
    pub fn with(mut self, status: impl Into<String>, value: f64) -> Self {
        self.set(status, value);
        self
    }

    pub fn statuses(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f64)> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (status, value) in iter {
            counts.set(status, value);
        }
        counts
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (status, value) in self.entries.iter() {
            map.serialize_entry(status, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CategoryCountsVisitor)
    }
}

struct CategoryCountsVisitor;

impl<'de> Visitor<'de> for CategoryCountsVisitor {
    type Value = CategoryCounts;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of status counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut counts = CategoryCounts::new();
        while let Some((status, value)) = map.next_entry::<String, LenientCount>()? {
            counts.set(status, value.0);
        }
        Ok(counts)
    }

    // A category whose value is not an object reads as "no counts recorded".

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CategoryCounts::new())
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(CategoryCounts::new())
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(CategoryCounts::new())
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(CategoryCounts::new())
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(CategoryCounts::new())
    }

    fn visit_str<E: de::Error>(self, _v: &str) -> Result<Self::Value, E> {
        Ok(CategoryCounts::new())
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(CategoryCounts::new())
    }
}

/// An ordered mapping from category key to [`CategoryCounts`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsBlock {
    entries: Vector<(String, CategoryCounts)>,
}

impl MetricsBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str) -> Option<&CategoryCounts> {
        self.entries
            .iter()
            .find(|(key, _)| key == category)
            .map(|(_, counts)| counts)
    }

    /// Coerced count for a category/status cell; missing category reads as 0.
    pub fn count(&self, category: &str, status: &str) -> f64 {
        self.get(category)
            .map(|counts| counts.count(status))
            .unwrap_or(0.0)
    }

    /// Insert or replace a category, preserving first-insertion order.
    pub fn insert(&mut self, category: impl Into<String>, counts: CategoryCounts) {
        let category = category.into();
        match self.entries.iter().position(|(key, _)| *key == category) {
            Some(idx) => {
                if let Some(slot) = self.entries.get_mut(idx) {
                    slot.1 = counts;
                }
            }
            None => self.entries.push_back((category, counts)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, category: impl Into<String>, counts: CategoryCounts) -> Self {
        self.insert(category, counts);
        self
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryCounts)> {
        self.entries
            .iter()
            .map(|(key, counts)| (key.as_str(), counts))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CategoryCounts)> for MetricsBlock {
    fn from_iter<I: IntoIterator<Item = (String, CategoryCounts)>>(iter: I) -> Self {
        let mut block = Self::new();
        for (category, counts) in iter {
            block.insert(category, counts);
        }
        block
    }
}

impl Serialize for MetricsBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, counts) in self.entries.iter() {
            map.serialize_entry(category, counts)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MetricsBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BlockVisitor;

        impl<'de> Visitor<'de> for BlockVisitor {
            type Value = MetricsBlock;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut block = MetricsBlock::new();
                while let Some((category, counts)) =
                    map.next_entry::<String, CategoryCounts>()?
                {
                    block.insert(category, counts);
                }
                Ok(block)
            }
        }

        deserializer.deserialize_map(BlockVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn overview_counts() -> CategoryCounts {
        CategoryCounts::new()
            .with("normal", 20.0)
            .with("risk", 10.0)
            .with("sick", 5.0)
    }

    #[test]
    fn missing_status_reads_as_zero() {
        let counts = CategoryCounts::new().with("normal", 3.0);
        assert_eq!(counts.count("normal"), 3.0);
        assert_eq!(counts.count("sick"), 0.0);
        assert_eq!(counts.get("sick"), None);
    }

    #[test]
    fn set_replaces_without_reordering() {
        let mut counts = overview_counts();
        counts.set("normal", 99.0);
        let order: Vec<&str> = counts.statuses().collect();
        assert_eq!(order, vec!["normal", "risk", "sick"]);
        assert_eq!(counts.count("normal"), 99.0);
    }

    #[test]
    fn block_preserves_insertion_order() {
        let block = MetricsBlock::new()
            .with("Smoking", CategoryCounts::new())
            .with("Overview", overview_counts())
            .with("Smoking", CategoryCounts::new().with("risk", 1.0));
        let order: Vec<&str> = block.categories().collect();
        assert_eq!(order, vec!["Smoking", "Overview"]);
        assert_eq!(block.count("Smoking", "risk"), 1.0);
    }

    #[test]
    fn json_object_order_round_trips() {
        let json = r#"{"Mental":{"sick":2,"normal":7},"Overview":{"normal":20,"risk":10,"sick":5}}"#;
        let block: MetricsBlock = serde_json::from_str(json).unwrap();
        let order: Vec<&str> = block.categories().collect();
        assert_eq!(order, vec!["Mental", "Overview"]);
        let statuses: Vec<&str> = block.get("Mental").unwrap().statuses().collect();
        assert_eq!(statuses, vec!["sick", "normal"]);
        let expected =
            r#"{"Mental":{"sick":2.0,"normal":7.0},"Overview":{"normal":20.0,"risk":10.0,"sick":5.0}}"#;
        assert_eq!(serde_json::to_string(&block).unwrap(), expected);
    }

    #[test]
    fn loose_cells_deserialize_without_failing() {
        let json = r#"{"Overview":{"normal":"12","risk":true,"sick":null},"Alcohol":7}"#;
        let block: MetricsBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.count("Overview", "normal"), 12.0);
        // garbage coerces to 0 on read
        assert_eq!(block.count("Overview", "risk"), 0.0);
        assert_eq!(block.count("Overview", "sick"), 0.0);
        // a non-object category reads as empty counts
        assert!(block.get("Alcohol").unwrap().is_empty());
    }
}
