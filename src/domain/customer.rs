use serde::{Deserialize, Serialize};

/// A registered customer. Registration happens elsewhere; existence is the
/// precondition for any purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
}

impl Customer {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
