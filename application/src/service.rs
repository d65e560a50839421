mod author;
mod book;
mod relation;

pub use self::{author::*, book::*, relation::*};
