use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct AuthorBiography(String);

impl AuthorBiography {
    pub fn new(biography: impl Into<String>) -> Self {
        Self(biography.into())
    }
}
