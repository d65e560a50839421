mod biography;
mod id;
mod name;

use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub use self::{biography::*, id::*, name::*};
use crate::entity::common::SortDirection;
use crate::KernelError;
use destructure::{Destructure, Mutation};
use error_stack::Report;
use vodca::References;

/// A persisted author. Identity is the id alone.
///
/// The books an author belongs to are not part of this value; they are
/// resolved from the store on demand.
#[derive(Debug, Clone, References, Destructure, Mutation)]
pub struct Author {
    id: AuthorId,
    name: AuthorName,
    biography: Option<AuthorBiography>,
}

impl Author {
    pub fn new(id: AuthorId, name: AuthorName, biography: Option<AuthorBiography>) -> Self {
        Self {
            id,
            name,
            biography,
        }
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An author that has not been stored yet and therefore has no identity.
#[derive(Debug, Clone, References, Destructure)]
pub struct AuthorDraft {
    name: AuthorName,
    biography: Option<AuthorBiography>,
}

impl AuthorDraft {
    pub fn new(name: AuthorName, biography: Option<AuthorBiography>) -> Self {
        Self { name, biography }
    }

    pub fn into_author(self, id: AuthorId) -> Author {
        Author::new(id, self.name, self.biography)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AuthorSortKey {
    Id,
    Name,
    Biography,
}

impl FromStr for AuthorSortKey {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "biography" => Ok(Self::Biography),
            other => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Unknown author sort field: {other}"))),
        }
    }
}

impl AuthorSortKey {
    pub fn compare(&self, a: &Author, b: &Author, direction: SortDirection) -> std::cmp::Ordering {
        match self {
            AuthorSortKey::Id => direction.apply(a.id().cmp(b.id())),
            AuthorSortKey::Name => direction.apply(a.name().cmp(b.name())),
            AuthorSortKey::Biography => {
                direction.nulls_last(a.biography().as_ref(), b.biography().as_ref())
            }
        }
    }
}
