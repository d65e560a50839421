use application::transfer::PageDto;
use kernel::prelude::entity::SortDirection;
use serde::Deserialize;

/// `?page&size&sort&direction`, shared by every listing route. Extracted next to
/// the route's own query struct.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<i64>,
    size: Option<i64>,
    sort: Option<String>,
    direction: Option<SortDirection>,
}

impl From<PageQuery> for PageDto {
    fn from(query: PageQuery) -> Self {
        PageDto {
            page: query.page,
            size: query.size,
            sort: query.sort,
            direction: query.direction,
        }
    }
}
