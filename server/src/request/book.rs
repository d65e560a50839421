use crate::controller::Intake;
use crate::request::PageQuery;
use application::transfer::{
    CreateBookDto, DeleteBookDto, GetBookDto, GetBooksDto, ResolveAuthorsDto, UpdateBookDto,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookInclude {
    Authors,
}

#[derive(Debug, Deserialize)]
pub struct GetBooksRequest {
    include: Option<BookInclude>,
}

#[derive(Debug, Deserialize)]
pub struct SearchBooksRequest {
    title: String,
    include: Option<BookInclude>,
}

#[derive(Debug, Deserialize)]
pub struct GetBookRequest {
    include: Option<BookInclude>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    title: String,
    author_ids: Vec<Uuid>,
    isbn: Option<String>,
    price: Option<f64>,
    quantity: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author_ids: Option<Vec<Uuid>>,
    isbn: Option<String>,
    price: Option<f64>,
    quantity: Option<i32>,
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: Uuid,
}

impl DeleteBookRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetBookAuthorsRequest {
    id: Uuid,
}

impl GetBookAuthorsRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct BookTransformer;

impl Intake<(GetBooksRequest, PageQuery)> for BookTransformer {
    type To = (GetBooksDto, bool);
    fn emit(&self, input: (GetBooksRequest, PageQuery)) -> Self::To {
        let (req, page) = input;
        let dto = GetBooksDto {
            title: None,
            page: page.into(),
        };
        (dto, req.include == Some(BookInclude::Authors))
    }
}

impl Intake<(SearchBooksRequest, PageQuery)> for BookTransformer {
    type To = (GetBooksDto, bool);
    fn emit(&self, input: (SearchBooksRequest, PageQuery)) -> Self::To {
        let (req, page) = input;
        let dto = GetBooksDto {
            title: Some(req.title),
            page: page.into(),
        };
        (dto, req.include == Some(BookInclude::Authors))
    }
}

impl Intake<(Uuid, GetBookRequest)> for BookTransformer {
    type To = (GetBookDto, bool);
    fn emit(&self, input: (Uuid, GetBookRequest)) -> Self::To {
        let (id, req) = input;
        (GetBookDto { id }, req.include == Some(BookInclude::Authors))
    }
}

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author_ids: input.author_ids,
            isbn: input.isbn,
            price: input.price,
            quantity: input.quantity,
        }
    }
}

impl Intake<(Uuid, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (Uuid, UpdateBookRequest)) -> Self::To {
        let (id, input) = input;
        UpdateBookDto {
            id,
            title: input.title,
            author_ids: input.author_ids,
            isbn: input.isbn,
            price: input.price,
            quantity: input.quantity,
        }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

impl Intake<GetBookAuthorsRequest> for BookTransformer {
    type To = ResolveAuthorsDto;
    fn emit(&self, input: GetBookAuthorsRequest) -> Self::To {
        ResolveAuthorsDto { book_id: input.id }
    }
}

#[cfg(test)]
mod test {
    use super::{BookTransformer, CreateBookRequest, GetBooksRequest, UpdateBookRequest};
    use crate::controller::Intake;
    use crate::request::PageQuery;
    use uuid::Uuid;

    #[test]
    fn create_body_uses_camel_case() {
        let author = Uuid::new_v4();
        let body = format!(r#"{{"title":"War and Peace","authorIds":["{author}"],"price":19.99}}"#);
        let req: CreateBookRequest = serde_json::from_str(&body).unwrap();
        let dto = BookTransformer.emit(req);
        assert_eq!(dto.author_ids, vec![author]);
        assert_eq!(dto.price, Some(19.99));
        assert!(dto.isbn.is_none());
    }

    #[test]
    fn update_body_may_omit_everything() {
        let req: UpdateBookRequest = serde_json::from_str("{}").unwrap();
        let dto = BookTransformer.emit((Uuid::nil(), req));
        assert!(dto.title.is_none());
        assert!(dto.author_ids.is_none());
    }

    #[test]
    fn include_requests_expansion() {
        let req: GetBooksRequest = serde_json::from_str(r#"{"include":"authors"}"#).unwrap();
        let (_, expand) = BookTransformer.emit((req, PageQuery::default()));
        assert!(expand);

        let req: GetBooksRequest = serde_json::from_str("{}").unwrap();
        let (_, expand) = BookTransformer.emit((req, PageQuery::default()));
        assert!(!expand);

        assert!(serde_json::from_str::<GetBooksRequest>(r#"{"include":"reviews"}"#).is_err());
    }
}
