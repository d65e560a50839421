use error_stack::Report;
use kernel::KernelError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    SqlX(#[from] sqlx::Error),
    #[error(transparent)]
    Env(#[from] dotenvy::Error),
}

/// Lifts a driver-level failure into the kernel's error kind.
pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, DriverError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                DriverError::SqlX(sqlx::Error::PoolTimedOut) => KernelError::Timeout,
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}
