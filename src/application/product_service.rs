use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::paged::{list_entities, PagedList};
use crate::domain::ports::ProductRepository;
use crate::domain::product::Product;

pub struct ProductService {
    products: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub fn list_products(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<PagedList<Product>, DomainError> {
        list_entities(self.products.as_ref(), page, page_size)
    }
}
