//! Structured directory entry produced from one raw span.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::{FIELD_COUNT, FIELDS, Field, LABELED_FIELDS, SENTINEL};

/// Separator used when a field holds several cleaned values.
pub const VALUE_SEPARATOR: &str = ", ";

/// One extracted directory entry.
///
/// Every schema field always has a value: either the cleaned text or
/// [`SENTINEL`]. Multi-valued fields (phone, email, website) hold their
/// deduplicated values joined by [`VALUE_SEPARATOR`]; the order of those
/// values is not part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: [String; FIELD_COUNT],
}

impl Record {
    /// Create a record with every field set to the sentinel.
    pub fn new() -> Self {
        Self {
            values: std::array::from_fn(|_| SENTINEL.to_string()),
        }
    }

    /// Value of a field (the sentinel when not available).
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Store a value. Values that are empty after trimming leave the field
    /// untouched.
    pub fn set(&mut self, field: Field, value: impl AsRef<str>) {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.values[field.index()] = value.to_string();
        }
    }

    /// Whether the field holds an extracted value rather than the sentinel.
    pub fn is_available(&self, field: Field) -> bool {
        self.get(field) != SENTINEL
    }

    /// Entity name.
    pub fn name(&self) -> &str {
        self.get(Field::SchoolName)
    }

    /// Individual values of a field, split on [`VALUE_SEPARATOR`].
    ///
    /// Empty for a field at the sentinel.
    pub fn values(&self, field: Field) -> Vec<&str> {
        if !self.is_available(field) {
            return Vec::new();
        }
        self.get(field).split(VALUE_SEPARATOR).collect()
    }

    /// Iterate over `(field, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        FIELDS.iter().map(move |&f| (f, self.get(f)))
    }

    /// Number of labeled fields that were captured.
    ///
    /// A record with a name but no labeled field usually comes from a
    /// spurious anchor inside another entry's text.
    pub fn labeled_field_count(&self) -> usize {
        LABELED_FIELDS
            .iter()
            .filter(|&&f| self.is_available(f))
            .count()
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}
