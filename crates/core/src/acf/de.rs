//! Lenient deserialization helpers for ACF payloads.
//!
//! ACF reports "no value" as `false`, sometimes as `null` or `[]`, and image
//! fields may come back as a bare attachment id depending on the field's
//! return format. These helpers fold every such case into the field's default
//! so that the mapper only ever sees well-typed values.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes `T`, or `T::default()` if the value has any other shape.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserializes a text field. Numbers are stringified, anything else is `""`.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// A repeater or flexible-content array.
///
/// Anything that is not an array (`false`, `null`, an object) deserializes to
/// an empty list, and array elements that do not match `T` are dropped while
/// the remaining ones keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeater<T>(Vec<T>);

impl<T> Repeater<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for Repeater<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for Repeater<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> Deref for Repeater<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<'a, T> IntoIterator for &'a Repeater<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de, T> Deserialize<'de> for Repeater<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match serde_json::from_value(item) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        tracing::debug!(error = %e, "skipping malformed repeater row");
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "text")]
        title: String,
        #[serde(deserialize_with = "lenient")]
        count: Option<u32>,
        items: Repeater<u32>,
    }

    #[test]
    fn test_false_and_missing_fields_default() {
        let row: Row = serde_json::from_value(json!({"title": false, "count": false, "items": false})).unwrap();
        assert_eq!(row, Row::default());

        let row: Row = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row, Row::default());
    }

    #[test]
    fn test_numbers_become_text() {
        let row: Row = serde_json::from_value(json!({"title": 2024})).unwrap();
        assert_eq!(row.title, "2024");
    }

    #[test]
    fn test_repeater_skips_bad_rows_and_keeps_order() {
        let row: Row = serde_json::from_value(json!({"items": [3, "x", 1, null, 2]})).unwrap();
        assert_eq!(&*row.items, &[3, 1, 2]);
    }

    #[test]
    fn test_wrong_type_is_default() {
        let row: Row = serde_json::from_value(json!({"count": "many", "items": {"0": 1}})).unwrap();
        assert_eq!(row.count, None);
        assert!(row.items.is_empty());
    }
}
