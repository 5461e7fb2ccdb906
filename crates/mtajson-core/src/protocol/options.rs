//! Options table (second envelope element).
//!
//! Keys are matched case-insensitively: `method`, `Method` and `METHOD` all
//! address the same option. An exact-case key wins if several variants exist.

use serde_json::{Map, Value};

/// Option key selecting the request method.
pub const METHOD_KEY: &str = "method";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    map: Map<String, Value>,
}

impl Options {
    pub fn new(map: Map<String, Value>) -> Self {
        Self { map }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(v) = self.map.get(key) {
            return Some(v);
        }
        self.map
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Case-insensitive lookup of a string option. Non-strings yield `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn method(&self) -> Option<&str> {
        self.get_str(METHOD_KEY)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self::new(map)
    }
}
