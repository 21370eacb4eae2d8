use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ScopelogError;
use crate::value::Value;

/// How attached fields are rendered in the trailing column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRepresentation {
    /// Omit the fields column
    None,
    /// A JSON object
    #[default]
    Json,
    /// `key=value,` pairs
    #[serde(rename = "kv", alias = "key_value", alias = "keyvalue")]
    KeyValue,
}

impl std::str::FromStr for FieldRepresentation {
    type Err = ScopelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(FieldRepresentation::None),
            "json" => Ok(FieldRepresentation::Json),
            "kv" | "keyvalue" | "key_value" => Ok(FieldRepresentation::KeyValue),
            _ => Err(ScopelogError::UnknownFieldRepresentation(s.to_string())),
        }
    }
}

/// Key/value annotations carried by a logger.
///
/// Cloning is cheap and shares storage; merging always builds a new map, so
/// a parent's fields are never touched by a child's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Arc<BTreeMap<String, Value>>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of these fields with one more entry.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = (*self.0).clone();
        map.insert(key.into(), value.into());
        Self(Arc::new(map))
    }

    /// Copy of these fields overlaid with `other`; keys in `other` win.
    pub fn merged(&self, other: &Fields) -> Self {
        let mut map = (*self.0).clone();
        map.extend(other.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(Arc::new(map))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Render for the fields column, or `None` when fields are hidden.
    pub fn render(&self, representation: FieldRepresentation) -> Option<String> {
        match representation {
            FieldRepresentation::None => None,
            FieldRepresentation::Json => Some(self.to_json()),
            FieldRepresentation::KeyValue => Some(self.to_key_values()),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&*self.0).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_key_values(&self) -> String {
        self.iter().map(|(k, v)| format!("{}={},", k, v)).collect()
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }
}

impl From<BTreeMap<String, Value>> for Fields {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(Arc::new(map))
    }
}

impl From<std::collections::HashMap<String, Value>> for Fields {
    fn from(map: std::collections::HashMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Build [`Fields`] from `key => value` pairs.
///
/// ```
/// let fields = scopelog::fields! { "a" => "b", "b" => 5 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {
        <$crate::Fields as ::std::iter::FromIterator<(::std::string::String, $crate::Value)>>::from_iter([
            $((::std::string::String::from($key), $crate::Value::from($value))),*
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    #[test]
    fn test_merge_child_wins_parent_fills_gaps() {
        let parent = fields! { "a" => 1 };
        let child = parent.merged(&fields! { "a" => 2, "b" => 3 });

        assert_eq!(child.get("a"), Some(&Value::Int(2)));
        assert_eq!(child.get("b"), Some(&Value::Int(3)));
        assert_eq!(child.len(), 2);
    }

    #[test]
    fn test_merge_leaves_parent_untouched() {
        let parent = fields! { "a" => "b", "b" => 5 };
        let _child = parent.merged(&fields! { "c" => 3.14, "a" => 9 });

        assert_eq!(parent.get("a"), Some(&Value::from("b")));
        assert!(!parent.contains_key("c"));
        assert_eq!(parent.len(), 2);
    }

    #[test]
    fn test_with_copies() {
        let base = Fields::new();
        let next = base.with("k", "v");
        assert!(base.is_empty());
        assert_eq!(next.get("k"), Some(&Value::from("v")));
    }

    #[test]
    fn test_render_json() {
        let fields = fields! { "a" => "b", "b" => 5 };
        assert_eq!(
            fields.render(FieldRepresentation::Json).as_deref(),
            Some(r#"{"a":"b","b":5}"#)
        );
    }

    #[test]
    fn test_render_key_values_contains_every_pair() {
        let fields = fields! { "a" => "b", "b" => 5 };
        let rendered = fields.render(FieldRepresentation::KeyValue).unwrap();
        for (k, v) in fields.iter() {
            assert!(rendered.contains(&format!("{}={},", k, v)), "{}", rendered);
        }
    }

    #[test]
    fn test_render_none() {
        let fields = fields! { "a" => "b" };
        assert_eq!(fields.render(FieldRepresentation::None), None);
    }

    #[test]
    fn test_representation_from_str() {
        assert_eq!("JSON".parse::<FieldRepresentation>().unwrap(), FieldRepresentation::Json);
        assert_eq!("kv".parse::<FieldRepresentation>().unwrap(), FieldRepresentation::KeyValue);
        assert_eq!("none".parse::<FieldRepresentation>().unwrap(), FieldRepresentation::None);
        assert!("yaml".parse::<FieldRepresentation>().is_err());
    }
}
