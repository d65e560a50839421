use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    NotFound,
    Validation,
    Timeout,
    Internal,
}

impl KernelError {
    pub fn kind(&self) -> &'static str {
        match self {
            KernelError::NotFound => "NotFound",
            KernelError::Validation => "ValidationFailure",
            KernelError::Timeout => "Timeout",
            KernelError::Internal => "Internal",
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Referenced entity does not exist"),
            KernelError::Validation => write!(f, "Invalid argument"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
