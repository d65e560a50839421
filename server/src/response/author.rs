use crate::controller::Exhaust;
use crate::response::{BookResponse, DeletedResponse, PageResponse};
use application::transfer::Expanded;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::{
    Author, AuthorBiography, AuthorId, AuthorName, Book, DestructAuthor, Page,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    id: AuthorId,
    name: AuthorName,
    biography: Option<AuthorBiography>,
    #[serde(skip_serializing_if = "Option::is_none")]
    books: Option<Vec<BookResponse>>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        let DestructAuthor {
            id,
            name,
            biography,
        } = author.into_destruct();
        Self {
            id,
            name,
            biography,
            books: None,
        }
    }
}

impl From<Expanded<Author, Book>> for AuthorResponse {
    fn from(expanded: Expanded<Author, Book>) -> Self {
        let (author, books) = expanded.into_parts();
        Self {
            books: books.map(|books| books.into_iter().map(BookResponse::from).collect()),
            ..Self::from(author)
        }
    }
}

impl IntoResponse for AuthorResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

pub struct AuthorPresenter;

impl Exhaust<Author> for AuthorPresenter {
    type To = AuthorResponse;
    fn emit(&self, input: Author) -> Self::To {
        AuthorResponse::from(input)
    }
}

impl Exhaust<Option<Expanded<Author, Book>>> for AuthorPresenter {
    type To = Option<AuthorResponse>;
    fn emit(&self, input: Option<Expanded<Author, Book>>) -> Self::To {
        input.map(AuthorResponse::from)
    }
}

impl Exhaust<Page<Expanded<Author, Book>>> for AuthorPresenter {
    type To = PageResponse<AuthorResponse>;
    fn emit(&self, input: Page<Expanded<Author, Book>>) -> Self::To {
        PageResponse::new(input, AuthorResponse::from)
    }
}

impl Exhaust<Vec<Author>> for AuthorPresenter {
    type To = Json<Vec<AuthorResponse>>;
    fn emit(&self, input: Vec<Author>) -> Self::To {
        Json(input.into_iter().map(AuthorResponse::from).collect())
    }
}

impl Exhaust<bool> for AuthorPresenter {
    type To = DeletedResponse;
    fn emit(&self, input: bool) -> Self::To {
        DeletedResponse::new(input)
    }
}
