use serde::Serialize;

use super::errors::DomainError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// One page of a counted collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub has_next: bool,
}

impl<T> PagedList<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            has_next: self.has_next,
        }
    }
}

/// A collection that can be counted and sliced.
///
/// The helper imposes no ordering; pages are only stable if `fetch` is.
pub trait PageSource<T> {
    fn total_count(&self) -> Result<i64, DomainError>;
    fn fetch(&self, offset: i64, limit: i64) -> Result<Vec<T>, DomainError>;
}

impl<T: Clone> PageSource<T> for [T] {
    fn total_count(&self) -> Result<i64, DomainError> {
        Ok(self.len() as i64)
    }

    fn fetch(&self, offset: i64, limit: i64) -> Result<Vec<T>, DomainError> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.iter().skip(offset).take(limit).cloned().collect())
    }
}

/// Returns page `page` (1-based) of `source`.
///
/// `page < 1` is treated as 1 and `page_size < 1` as [`DEFAULT_PAGE_SIZE`].
pub fn list_entities<T, S>(
    source: &S,
    page: i64,
    page_size: i64,
) -> Result<PagedList<T>, DomainError>
where
    S: PageSource<T> + ?Sized,
{
    let page = page.max(1);
    let page_size = if page_size < 1 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };

    let total_count = source.total_count()?;
    let offset = (page - 1).saturating_mul(page_size);
    let items = source.fetch(offset, page_size)?;

    Ok(PagedList {
        items,
        total_count,
        has_next: page.saturating_mul(page_size) < total_count,
    })
}
