//! Query-string parameters.
//!
//! Accepts the three shapes callers tend to hold: an already-encoded string,
//! an ordered list of key/value pairs, or a string map. Everything is
//! serialized with `application/x-www-form-urlencoded` rules, so spaces
//! become `+` and reserved characters are percent-encoded. Values are plain
//! strings; there is no flattening of arrays or nested objects, and such
//! values cannot be passed in at all.

use std::collections::{BTreeMap, HashMap};

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an already-encoded query string. A leading `?` is ignored.
    pub fn parse(encoded: &str) -> Self {
        let encoded = encoded.strip_prefix('?').unwrap_or(encoded);
        Self {
            pairs: form_urlencoded::parse(encoded.as_bytes()).into_owned().collect(),
        }
    }

    /// Append a pair. Duplicate keys are kept.
    pub fn append(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Serialize without the leading `?`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl From<&str> for QueryParams {
    fn from(encoded: &str) -> Self {
        Self::parse(encoded)
    }
}

impl From<String> for QueryParams {
    fn from(encoded: String) -> Self {
        Self::parse(&encoded)
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for QueryParams {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for QueryParams {
    fn from(pairs: [(K, V); N]) -> Self {
        Self {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for QueryParams {
    fn from(map: BTreeMap<K, V>) -> Self {
        Self {
            pairs: map.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for QueryParams {
    fn from(map: HashMap<K, V>) -> Self {
        Self {
            pairs: map.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
