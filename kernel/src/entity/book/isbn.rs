use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct BookIsbn(String);

impl BookIsbn {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }
}
