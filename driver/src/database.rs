#[cfg(feature = "memory")]
pub use self::memory::*;
pub use self::postgres::*;

#[cfg(feature = "memory")]
mod memory;
mod postgres;
