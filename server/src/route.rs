use crate::error::ErrorStatus;
use axum::extract::{Path, Query};
use axum::Json;
use axum_extra::extract::WithRejection;
use uuid::Uuid;

mod author;
mod book;

pub use self::{author::*, book::*};

// Extractor failures are answered with the same `{kind, message}` body as
// service failures.
type Body<T> = WithRejection<Json<T>, ErrorStatus>;
type Params<T> = WithRejection<Query<T>, ErrorStatus>;
type Id = WithRejection<Path<Uuid>, ErrorStatus>;

#[cfg(test)]
mod test {
    use crate::handler::AppModule;
    use crate::route::{AuthorRouter, BookRouter};
    use application::service::{CreateAuthorService, CreateBookService};
    use application::transfer::{CreateAuthorDto, CreateBookDto};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use driver::database::InMemoryDatabase;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(db: &InMemoryDatabase) -> Router {
        Router::<AppModule<InMemoryDatabase>>::new()
            .route_book()
            .route_author()
            .with_state(AppModule::with_database(db.clone()))
    }

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn tolstoy(db: &InMemoryDatabase) -> Uuid {
        let author = db
            .create_author(CreateAuthorDto {
                name: "Leo Tolstoy".to_string(),
                biography: Some("Russian novelist".to_string()),
            })
            .await
            .unwrap();
        author.id().clone().into()
    }

    async fn war_and_peace(db: &InMemoryDatabase, author: Uuid) -> Uuid {
        let book = db
            .create_book(CreateBookDto {
                title: "War and Peace".to_string(),
                author_ids: vec![author],
                isbn: None,
                price: Some(19.99),
                quantity: Some(2),
            })
            .await
            .unwrap();
        book.id().clone().into()
    }

    #[tokio::test]
    async fn create_book_responds_created() {
        let db = InMemoryDatabase::new();
        let author = tolstoy(&db).await;

        let body = json!({ "title": "Anna Karenina", "authorIds": [author], "price": 12.5 });
        let (status, body) = send(app(&db), Method::POST, "/books", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], "Anna Karenina");
        assert_eq!(body["price"], "12.5");
    }

    #[tokio::test]
    async fn malformed_requests_are_validation_failures() {
        let db = InMemoryDatabase::new();
        let author = tolstoy(&db).await;

        let body = json!({ "authorIds": [author] });
        let (status, body) = send(app(&db), Method::POST, "/books", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "ValidationFailure");
        assert!(body["message"].as_str().unwrap().contains("title"));

        let (status, body) = send(app(&db), Method::GET, "/books?page=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "ValidationFailure");

        let (status, body) = send(app(&db), Method::GET, "/books/search", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "ValidationFailure");

        let (status, body) = send(app(&db), Method::GET, "/authors/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "ValidationFailure");

        let body = json!({ "title": "Anna Karenina", "authorIds": [] });
        let (status, body) = send(app(&db), Method::POST, "/books", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "ValidationFailure");
    }

    #[tokio::test]
    async fn unknown_book_is_not_found() {
        let db = InMemoryDatabase::new();
        let uri = format!("/books/{}", Uuid::new_v4());
        let (status, _) = send(app(&db), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/books/{}/authors", Uuid::new_v4());
        let (status, body) = send(app(&db), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "NotFound");
    }

    #[tokio::test]
    async fn include_embeds_related_entities() {
        let db = InMemoryDatabase::new();
        let author = tolstoy(&db).await;
        let book = war_and_peace(&db, author).await;

        let (status, body) = send(app(&db), Method::GET, "/books?include=authors", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalElements"], 1);
        assert_eq!(body["content"][0]["authors"][0]["name"], "Leo Tolstoy");

        let (_, body) = send(app(&db), Method::GET, "/books", None).await;
        assert!(body["content"][0].get("authors").is_none());

        let uri = format!("/books/{book}?include=authors");
        let (status, body) = send(app(&db), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authors"][0]["id"], json!(author));

        let uri = format!("/authors/{author}?include=books");
        let (_, body) = send(app(&db), Method::GET, &uri, None).await;
        assert_eq!(body["books"][0]["title"], "War and Peace");

        let uri = "/authors?name=tolstoy&include=books";
        let (_, body) = send(app(&db), Method::GET, uri, None).await;
        assert_eq!(body["content"][0]["books"][0]["price"], "19.99");
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let db = InMemoryDatabase::new();
        let author = tolstoy(&db).await;
        let book = war_and_peace(&db, author).await;

        let uri = format!("/books/{book}");
        let (status, body) = send(app(&db), Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "existed": true }));

        let (_, body) = send(app(&db), Method::DELETE, &uri, None).await;
        assert_eq!(body, json!({ "existed": false }));

        let (status, _) = send(app(&db), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn biography_null_clears() {
        let db = InMemoryDatabase::new();
        let author = tolstoy(&db).await;
        let uri = format!("/authors/{author}");

        let body = json!({ "name": "Lev Tolstoy" });
        let (status, body) = send(app(&db), Method::PATCH, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["biography"], "Russian novelist");

        let body = json!({ "biography": null });
        let (_, body) = send(app(&db), Method::PATCH, &uri, Some(body)).await;
        assert_eq!(body["name"], "Lev Tolstoy");
        assert!(body["biography"].is_null());
    }
}
