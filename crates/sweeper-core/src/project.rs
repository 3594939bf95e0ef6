use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Tracker project. Issues only carry its name, which is also the key
/// used for per-project accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
