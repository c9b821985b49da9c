//! Query string assembly for the archive request

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is when encoding a URI component
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query value
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Append-only list of `(key, encoded value)` pairs in collection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryAccumulator {
    pairs: Vec<(String, String)>,
}

impl QueryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finalized field; the value is encoded here, exactly once
    pub fn push(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), encode_component(value)));
    }

    /// Encoded pairs in insertion order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Join the accumulated pairs into `key=value&key=value`
pub fn build_query(query: &QueryAccumulator) -> String {
    let mut out = String::new();
    for (key, value) in query.pairs() {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('&');
    }
    // trailing separator
    out.pop();
    out
}
