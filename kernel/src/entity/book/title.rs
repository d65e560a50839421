use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn parse(title: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("Book title must not be empty"));
        }
        Ok(Self(title))
    }
}
