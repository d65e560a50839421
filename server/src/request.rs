mod author;
mod book;
mod page;

pub use self::{author::*, book::*, page::*};
