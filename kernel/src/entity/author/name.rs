use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(
    Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Rejects names that are empty or only whitespace.
    pub fn parse(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("Author name must not be empty"));
        }
        Ok(Self(name))
    }
}
