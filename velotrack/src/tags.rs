use std::collections::BTreeMap;

use serde::Serialize;

/// OSM-style key/value tags attached to a way or node, parsed from BRouter's `k=v k=v` strings.
#[derive(Serialize, Clone, Default, PartialEq, Debug)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    /// Splits on whitespace, then each token on its first `=`. Tokens without `=` or with an
    /// empty key are skipped. A repeated key keeps its last value.
    pub fn parse(raw: &str) -> Self {
        let mut tags = BTreeMap::new();
        for token in raw.split_whitespace() {
            match token.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    tags.insert(key.to_string(), value.to_string());
                }
                _ => {
                    log::debug!("Ignoring malformed tag {token:?}");
                }
            }
        }
        Self(tags)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|x| x.as_str())
    }

    pub fn is(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
