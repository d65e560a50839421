use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct BookQuantity(i32);

impl BookQuantity {
    pub fn new(quantity: impl Into<i32>) -> Self {
        Self(quantity.into())
    }
}
