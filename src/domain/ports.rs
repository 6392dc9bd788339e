use super::customer::Customer;
use super::errors::DomainError;
use super::order::{NewOrder, Order, OrderFilter};
use super::paged::PageSource;
use super::product::Product;

/// Customers, listed in whatever order the store yields them.
pub trait CustomerRepository: PageSource<Customer> + Send + Sync + 'static {
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn count(&self, filter: &OrderFilter) -> Result<i64, DomainError>;
    fn insert(&self, order: NewOrder) -> Result<Order, DomainError>;
}

/// Products, listed by ascending id.
pub trait ProductRepository: PageSource<Product> + Send + Sync + 'static {}

/// Numbers already handed out by the random number service.
pub trait NumberRepository: Send + Sync + 'static {
    fn exists(&self, number: i32) -> Result<bool, DomainError>;
    fn count(&self) -> Result<i64, DomainError>;
    fn insert(&self, number: i32) -> Result<(), DomainError>;
}
