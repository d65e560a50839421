use crate::controller::Intake;
use crate::request::PageQuery;
use application::transfer::{
    CreateAuthorDto, DeleteAuthorDto, GetAuthorDto, GetAuthorsDto, Patch, ResolveBooksDto,
    UpdateAuthorDto,
};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorInclude {
    Books,
}

#[derive(Debug, Deserialize)]
pub struct GetAuthorsRequest {
    name: Option<String>,
    include: Option<AuthorInclude>,
}

#[derive(Debug, Deserialize)]
pub struct GetAuthorRequest {
    include: Option<AuthorInclude>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAuthorRequest {
    name: String,
    biography: Option<String>,
}

/// `biography` left out keeps the stored value; `"biography": null` clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateAuthorRequest {
    name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    biography: Patch<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Patch<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Patch::Set)
}

#[derive(Debug)]
pub struct DeleteAuthorRequest {
    id: Uuid,
}

impl DeleteAuthorRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetAuthorBooksRequest {
    id: Uuid,
}

impl GetAuthorBooksRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct AuthorTransformer;

impl Intake<(GetAuthorsRequest, PageQuery)> for AuthorTransformer {
    type To = (GetAuthorsDto, bool);
    fn emit(&self, input: (GetAuthorsRequest, PageQuery)) -> Self::To {
        let (req, page) = input;
        let dto = GetAuthorsDto {
            name: req.name,
            page: page.into(),
        };
        (dto, req.include == Some(AuthorInclude::Books))
    }
}

impl Intake<(Uuid, GetAuthorRequest)> for AuthorTransformer {
    type To = (GetAuthorDto, bool);
    fn emit(&self, input: (Uuid, GetAuthorRequest)) -> Self::To {
        let (id, req) = input;
        (GetAuthorDto { id }, req.include == Some(AuthorInclude::Books))
    }
}

impl Intake<CreateAuthorRequest> for AuthorTransformer {
    type To = CreateAuthorDto;
    fn emit(&self, input: CreateAuthorRequest) -> Self::To {
        CreateAuthorDto {
            name: input.name,
            biography: input.biography,
        }
    }
}

impl Intake<(Uuid, UpdateAuthorRequest)> for AuthorTransformer {
    type To = UpdateAuthorDto;
    fn emit(&self, input: (Uuid, UpdateAuthorRequest)) -> Self::To {
        let (id, input) = input;
        UpdateAuthorDto {
            id,
            name: input.name,
            biography: input.biography,
        }
    }
}

impl Intake<DeleteAuthorRequest> for AuthorTransformer {
    type To = DeleteAuthorDto;
    fn emit(&self, input: DeleteAuthorRequest) -> Self::To {
        DeleteAuthorDto { id: input.id }
    }
}

impl Intake<GetAuthorBooksRequest> for AuthorTransformer {
    type To = ResolveBooksDto;
    fn emit(&self, input: GetAuthorBooksRequest) -> Self::To {
        ResolveBooksDto { author_id: input.id }
    }
}

#[cfg(test)]
mod test {
    use super::UpdateAuthorRequest;
    use application::transfer::Patch;

    #[test]
    fn biography_presence_is_preserved() {
        let omitted: UpdateAuthorRequest = serde_json::from_str(r#"{"name":"Lev"}"#).unwrap();
        assert_eq!(omitted.biography, Patch::Unchanged);

        let cleared: UpdateAuthorRequest =
            serde_json::from_str(r#"{"biography":null}"#).unwrap();
        assert_eq!(cleared.biography, Patch::Set(None));

        let replaced: UpdateAuthorRequest =
            serde_json::from_str(r#"{"biography":"Novelist"}"#).unwrap();
        assert_eq!(replaced.biography, Patch::Set(Some("Novelist".to_string())));
    }
}
