use uuid::Uuid;

use crate::transfer::PageDto;

pub struct GetBookDto {
    pub id: Uuid,
}

/// `title` narrows the listing to books whose title contains it, ignoring case.
pub struct GetBooksDto {
    pub title: Option<String>,
    pub page: PageDto,
}

pub struct CreateBookDto {
    pub title: String,
    pub author_ids: Vec<Uuid>,
    pub isbn: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

pub struct UpdateBookDto {
    pub id: Uuid,
    pub title: Option<String>,
    pub author_ids: Option<Vec<Uuid>>,
    pub isbn: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

pub struct DeleteBookDto {
    pub id: Uuid,
}
