//! Patron definition

use serde::{Deserialize, Serialize};

/// A borrower. The name is the only identity; two patrons with the same
/// name are the same patron.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Patron {
    pub name: String,
}

impl Patron {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
