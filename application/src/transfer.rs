mod author;
mod book;
mod page;
mod patch;
mod relation;

pub use self::{author::*, book::*, page::*, patch::*, relation::*};
