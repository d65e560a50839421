use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::Page;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    content: Vec<T>,
    total_elements: u64,
    total_pages: u64,
    number: u32,
    size: u32,
    has_next: bool,
    has_previous: bool,
}

impl<T> PageResponse<T> {
    pub fn new<E>(page: Page<E>, f: impl FnMut(E) -> T) -> Self {
        let page = page.map(f);
        Self {
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            number: page.number(),
            size: page.size(),
            has_next: page.has_next(),
            has_previous: page.has_previous(),
            content: page.into_content(),
        }
    }
}

impl<T: Serialize> IntoResponse for PageResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    existed: bool,
}

impl DeletedResponse {
    pub fn new(existed: bool) -> Self {
        Self { existed }
    }
}

impl IntoResponse for DeletedResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::PageResponse;
    use kernel::prelude::entity::{Page, PageRequest};
    use serde_json::json;

    #[test]
    fn metadata_is_camel_case() {
        let request = PageRequest::<()>::new(1, 2).unwrap();
        let page = Page::new(vec!["C", "D"], 5, &request);
        let body = serde_json::to_value(PageResponse::new(page, str::to_string)).unwrap();
        assert_eq!(
            body,
            json!({
                "content": ["C", "D"],
                "totalElements": 5,
                "totalPages": 3,
                "number": 1,
                "size": 2,
                "hasNext": true,
                "hasPrevious": true,
            })
        );
    }
}
