mod id;
mod isbn;
mod price;
mod quantity;
mod title;

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub use self::{id::*, isbn::*, price::*, quantity::*, title::*};
use crate::entity::common::SortDirection;
use crate::entity::AuthorId;
use crate::KernelError;
use destructure::{Destructure, Mutation};
use error_stack::Report;
use vodca::References;

/// A persisted book. Identity is the id alone.
///
/// The owned author set is kept by the store as (book, author) pairs and is
/// never embedded here.
#[derive(Debug, Clone, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    isbn: Option<BookIsbn>,
    price: BookPrice,
    quantity: Option<BookQuantity>,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        isbn: Option<BookIsbn>,
        price: BookPrice,
        quantity: Option<BookQuantity>,
    ) -> Self {
        Self {
            id,
            title,
            isbn,
            price,
            quantity,
        }
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A book that has not been stored yet, together with the authors it is
/// written by.
#[derive(Debug, Clone, References, Destructure)]
pub struct BookDraft {
    title: BookTitle,
    isbn: Option<BookIsbn>,
    price: BookPrice,
    quantity: Option<BookQuantity>,
    authors: BTreeSet<AuthorId>,
}

impl BookDraft {
    pub fn new(
        title: BookTitle,
        isbn: Option<BookIsbn>,
        price: BookPrice,
        quantity: Option<BookQuantity>,
        authors: BTreeSet<AuthorId>,
    ) -> Self {
        Self {
            title,
            isbn,
            price,
            quantity,
            authors,
        }
    }

    pub fn into_book(self, id: BookId) -> (Book, BTreeSet<AuthorId>) {
        let book = Book::new(id, self.title, self.isbn, self.price, self.quantity);
        (book, self.authors)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum BookSortKey {
    Id,
    Title,
    Isbn,
    Price,
    Quantity,
}

impl FromStr for BookSortKey {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "isbn" => Ok(Self::Isbn),
            "price" => Ok(Self::Price),
            "quantity" => Ok(Self::Quantity),
            other => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Unknown book sort field: {other}"))),
        }
    }
}

impl BookSortKey {
    pub fn compare(&self, a: &Book, b: &Book, direction: SortDirection) -> std::cmp::Ordering {
        match self {
            BookSortKey::Id => direction.apply(a.id().cmp(b.id())),
            BookSortKey::Title => direction.apply(a.title().cmp(b.title())),
            BookSortKey::Isbn => direction.nulls_last(a.isbn().as_ref(), b.isbn().as_ref()),
            BookSortKey::Price => direction.apply(a.price().cmp(b.price())),
            BookSortKey::Quantity => {
                direction.nulls_last(a.quantity().as_ref(), b.quantity().as_ref())
            }
        }
    }
}
