use std::str::FromStr;

use error_stack::Report;
use kernel::prelude::entity::{
    PageRequest, Sort, SortDirection, DEFAULT_PAGE_INDEX, DEFAULT_PAGE_SIZE,
};
use kernel::KernelError;

/// Paging arguments as the caller sent them; every field may be omitted.
#[derive(Debug, Clone, Default)]
pub struct PageDto {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
}

impl PageDto {
    pub(crate) fn into_request<K>(self) -> error_stack::Result<PageRequest<K>, KernelError>
    where
        K: FromStr<Err = Report<KernelError>>,
    {
        let request = PageRequest::new(
            self.page.unwrap_or(i64::from(DEFAULT_PAGE_INDEX)),
            self.size.unwrap_or(i64::from(DEFAULT_PAGE_SIZE)),
        )?;
        match self.sort {
            None => Ok(request),
            Some(field) => {
                let sort = Sort::new(field.parse::<K>()?, self.direction.unwrap_or_default());
                Ok(request.sorted_by(sort))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::{BookSortKey, PageRequest, SortDirection};
    use kernel::KernelError;

    use super::PageDto;

    #[test]
    fn omitted_arguments_use_defaults() {
        let request = PageDto::default().into_request::<BookSortKey>().unwrap();
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn sort_field_is_parsed() {
        let dto = PageDto {
            page: Some(2),
            size: Some(5),
            sort: Some("price".to_string()),
            direction: Some(SortDirection::Desc),
        };
        let request = dto.into_request::<BookSortKey>().unwrap();
        let sort = request.sort().unwrap();
        assert_eq!(sort.key(), &BookSortKey::Price);
        assert_eq!(sort.direction(), SortDirection::Desc);
        assert_eq!(request.offset(), 10);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let dto = PageDto {
            sort: Some("publisher".to_string()),
            ..PageDto::default()
        };
        let error = dto.into_request::<BookSortKey>().unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Validation);
    }
}
