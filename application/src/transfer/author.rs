use uuid::Uuid;

use crate::transfer::{PageDto, Patch};

pub struct GetAuthorDto {
    pub id: Uuid,
}

/// A blank `name` lists every author.
pub struct GetAuthorsDto {
    pub name: Option<String>,
    pub page: PageDto,
}

pub struct CreateAuthorDto {
    pub name: String,
    pub biography: Option<String>,
}

pub struct UpdateAuthorDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub biography: Patch<Option<String>>,
}

pub struct DeleteAuthorDto {
    pub id: Uuid,
}
