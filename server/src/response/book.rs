use crate::controller::Exhaust;
use crate::response::{AuthorResponse, DeletedResponse, PageResponse};
use application::transfer::Expanded;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::{
    Author, Book, BookId, BookIsbn, BookPrice, BookQuantity, BookTitle, DestructBook, Page,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: BookId,
    title: BookTitle,
    isbn: Option<BookIsbn>,
    price: BookPrice,
    quantity: Option<BookQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authors: Option<Vec<AuthorResponse>>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        let DestructBook {
            id,
            title,
            isbn,
            price,
            quantity,
        } = book.into_destruct();
        Self {
            id,
            title,
            isbn,
            price,
            quantity,
            authors: None,
        }
    }
}

impl From<Expanded<Book, Author>> for BookResponse {
    fn from(expanded: Expanded<Book, Author>) -> Self {
        let (book, authors) = expanded.into_parts();
        Self {
            authors: authors.map(|authors| authors.into_iter().map(AuthorResponse::from).collect()),
            ..Self::from(book)
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<Book> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, input: Book) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<Option<Expanded<Book, Author>>> for BookPresenter {
    type To = Option<BookResponse>;
    fn emit(&self, input: Option<Expanded<Book, Author>>) -> Self::To {
        input.map(BookResponse::from)
    }
}

impl Exhaust<Page<Expanded<Book, Author>>> for BookPresenter {
    type To = PageResponse<BookResponse>;
    fn emit(&self, input: Page<Expanded<Book, Author>>) -> Self::To {
        PageResponse::new(input, BookResponse::from)
    }
}

impl Exhaust<Vec<Book>> for BookPresenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<Book>) -> Self::To {
        Json(input.into_iter().map(BookResponse::from).collect())
    }
}

impl Exhaust<bool> for BookPresenter {
    type To = DeletedResponse;
    fn emit(&self, input: bool) -> Self::To {
        DeletedResponse::new(input)
    }
}

#[cfg(test)]
mod test {
    use super::BookResponse;
    use application::transfer::Expanded;
    use kernel::prelude::entity::{
        Author, AuthorId, AuthorName, Book, BookId, BookPrice, BookTitle,
    };
    use serde_json::json;
    use uuid::Uuid;

    fn war_and_peace() -> Book {
        Book::new(
            BookId::new(Uuid::nil()),
            BookTitle::new("War and Peace"),
            None,
            BookPrice::try_from(19.99).unwrap(),
            None,
        )
    }

    #[test]
    fn price_is_a_decimal_string() {
        let body = serde_json::to_value(BookResponse::from(war_and_peace())).unwrap();
        assert_eq!(
            body,
            json!({
                "id": Uuid::nil(),
                "title": "War and Peace",
                "isbn": null,
                "price": "19.99",
                "quantity": null,
            })
        );
    }

    #[test]
    fn authors_appear_only_when_expanded() {
        let tolstoy = Author::new(AuthorId::new(Uuid::nil()), AuthorName::new("Leo Tolstoy"), None);
        let mut expanded = Expanded::new(war_and_peace());
        expanded.attach(vec![tolstoy]);
        let body = serde_json::to_value(BookResponse::from(expanded)).unwrap();
        assert_eq!(body["authors"][0]["name"], "Leo Tolstoy");

        let body = serde_json::to_value(BookResponse::from(Expanded::<Book, Author>::new(
            war_and_peace(),
        )))
        .unwrap();
        assert!(body.get("authors").is_none());
    }
}
