use std::fmt;

use serde::{Deserialize, Serialize};

/// Content identifier handed out by the IPFS node.
///
/// Treated as an opaque string: this crate never parses or hashes it, it
/// only threads it between node calls and into gateway URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cid(String);

impl Cid {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Cid {
    fn from(value: String) -> Self {
        Self(value)
    }
}
