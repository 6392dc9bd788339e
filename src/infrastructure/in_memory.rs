use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderFilter};
use crate::domain::paged::PageSource;
use crate::domain::ports::{
    CustomerRepository, NumberRepository, OrderRepository, ProductRepository,
};
use crate::domain::product::Product;

/// A thread-safe in-memory record store.
///
/// Backs the service when no database is configured, and every test that
/// does not need Postgres. Order ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    customers: RwLock<Vec<Customer>>,
    products: RwLock<Vec<Product>>,
    orders: RwLock<Vec<Order>>,
    numbers: RwLock<BTreeSet<i32>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, DomainError> {
    lock.read()
        .map_err(|_| DomainError::Store("in-memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, DomainError> {
    lock.write()
        .map_err(|_| DomainError::Store("in-memory store lock poisoned".to_string()))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same twenty customers and twenty products the initial database
    /// migration seeds.
    pub fn with_sample_data() -> Self {
        Self::new()
            .with_customers((1..=20).map(|i| Customer::new(i, format!("Customer {}", i))))
            .with_products((1..=20).map(|i| Product::new(i, format!("Product {}", i))))
    }

    pub fn with_customers(self, customers: impl IntoIterator<Item = Customer>) -> Self {
        self.customers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .extend(customers);
        self
    }

    pub fn with_products(self, products: impl IntoIterator<Item = Product>) -> Self {
        self.products
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .extend(products);
        self
    }

    /// Seeds historical orders as given, keeping their ids and dates.
    pub fn with_orders(self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.orders
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .extend(orders);
        self
    }

    /// Snapshot of every stored order, in insertion order.
    pub fn orders(&self) -> Result<Vec<Order>, DomainError> {
        Ok(read(&self.orders)?.clone())
    }
}

impl PageSource<Customer> for InMemoryStore {
    fn total_count(&self) -> Result<i64, DomainError> {
        read(&self.customers)?.as_slice().total_count()
    }

    fn fetch(&self, offset: i64, limit: i64) -> Result<Vec<Customer>, DomainError> {
        read(&self.customers)?.as_slice().fetch(offset, limit)
    }
}

impl CustomerRepository for InMemoryStore {
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        Ok(read(&self.customers)?.iter().find(|c| c.id == id).cloned())
    }
}

impl OrderRepository for InMemoryStore {
    fn count(&self, filter: &OrderFilter) -> Result<i64, DomainError> {
        Ok(read(&self.orders)?.iter().filter(|o| filter.matches(o)).count() as i64)
    }

    fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut orders = write(&self.orders)?;
        if !read(&self.customers)?.iter().any(|c| c.id == order.customer_id) {
            return Err(DomainError::Store(format!(
                "customer {} referenced by order does not exist",
                order.customer_id
            )));
        }
        let id = orders
            .iter()
            .map(|o| o.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| DomainError::Store("order id sequence exhausted".to_string()))?;
        let order = Order {
            id,
            customer_id: order.customer_id,
            value: order.value,
            order_date: order.order_date,
        };
        orders.push(order.clone());
        Ok(order)
    }
}

impl PageSource<Product> for InMemoryStore {
    fn total_count(&self) -> Result<i64, DomainError> {
        Ok(read(&self.products)?.len() as i64)
    }

    fn fetch(&self, offset: i64, limit: i64) -> Result<Vec<Product>, DomainError> {
        let mut products = read(&self.products)?.clone();
        products.sort_by_key(|p| p.id);
        products.as_slice().fetch(offset, limit)
    }
}

impl ProductRepository for InMemoryStore {}

impl NumberRepository for InMemoryStore {
    fn exists(&self, number: i32) -> Result<bool, DomainError> {
        Ok(read(&self.numbers)?.contains(&number))
    }

    fn count(&self) -> Result<i64, DomainError> {
        Ok(read(&self.numbers)?.len() as i64)
    }

    fn insert(&self, number: i32) -> Result<(), DomainError> {
        if !write(&self.numbers)?.insert(number) {
            return Err(DomainError::Store(format!(
                "number {} has already been stored",
                number
            )));
        }
        Ok(())
    }
}
