//! Hypermedia link value object.

use serde::{Deserialize, Serialize};

/// A URL and its relation to the resource it is attached to.
///
/// Links are rebuilt on every response and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub link: String,
    pub rel: String,
}

impl Link {
    pub fn new(link: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            rel: rel.into(),
        }
    }
}
