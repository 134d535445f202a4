//! Ordered tag collection attached to each log record
//!
//! Tags behave like an insertion-ordered map from string keys to arbitrary
//! JSON-like values. Values may also be pushed without a key; those are
//! rendered positionally.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tags {
    entries: Vec<(Option<String>, Value)>,
}

impl Tags {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a keyed tag
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.insert(key, value);
        self
    }

    /// Add an unkeyed tag
    pub fn with_value<V: Into<Value>>(mut self, value: V) -> Self {
        self.push(value);
        self
    }

    /// Insert a keyed tag (mutable version)
    ///
    /// An existing key keeps its position and takes the new value.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.as_deref() == Some(key.as_str()))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((Some(key), value)),
        }
    }

    /// Append an unkeyed tag
    pub fn push<V: Into<Value>>(&mut self, value: V) {
        self.entries.push((None, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_deref() == Some(key))
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_deref(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as the line suffix: `""` or ` {k=v, k2=v2}`
    pub fn format_suffix(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let parts = self
            .entries
            .iter()
            .map(|(key, value)| match key {
                Some(key) => format!("{}={}", key, stringify(value)),
                None => stringify(value),
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!(" {{{}}}", parts)
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_suffix())
    }
}

impl<K, V> FromIterator<(K, V)> for Tags
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (key, value) in iter {
            tags.insert(key, value);
        }
        tags
    }
}

/// Scalars print as-is, null prints empty, arrays and objects print as
/// compact JSON with unicode and slashes left unescaped.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
