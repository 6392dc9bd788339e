use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderFilter};
use crate::domain::paged::PageSource;
use crate::domain::ports::{
    CustomerRepository, NumberRepository, OrderRepository, ProductRepository,
};
use crate::domain::product::Product;
use crate::schema::{customers, orders, products, random_numbers};

use super::models::{CustomerRow, NewOrderRow, NewRandomNumberRow, OrderRow, ProductRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Store(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Store(e.to_string())
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Postgres-backed record store. Every call checks a connection out of the
/// pool and blocks until the query returns.
#[derive(Clone)]
pub struct DieselStore {
    pool: DbPool,
}

impl DieselStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PageSource<Customer> for DieselStore {
    fn total_count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(customers::table.count().get_result(&mut conn)?)
    }

    fn fetch(&self, offset: i64, limit: i64) -> Result<Vec<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = customers::table
            .select(CustomerRow::as_select())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }
}

impl CustomerRepository for DieselStore {
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Customer::from))
    }
}

impl OrderRepository for DieselStore {
    fn count(&self, filter: &OrderFilter) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        let customer_orders = orders::table.filter(orders::customer_id.eq(filter.customer_id));

        let total = match filter.placed_since {
            Some(since) => customer_orders
                .filter(orders::order_date.ge(since))
                .count()
                .get_result(&mut conn)?,
            None => customer_orders.count().get_result(&mut conn)?,
        };
        Ok(total)
    }

    fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(orders::table)
            .values(&NewOrderRow::from(order))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }
}

impl PageSource<Product> for DieselStore {
    fn total_count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(products::table.count().get_result(&mut conn)?)
    }

    fn fetch(&self, offset: i64, limit: i64) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::id.asc())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}

impl ProductRepository for DieselStore {}

impl NumberRepository for DieselStore {
    fn exists(&self, number: i32) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(
            diesel::select(diesel::dsl::exists(random_numbers::table.find(number)))
                .get_result(&mut conn)?,
        )
    }

    fn count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(random_numbers::table.count().get_result(&mut conn)?)
    }

    fn insert(&self, number: i32) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::insert_into(random_numbers::table)
            .values(&NewRandomNumberRow { number })
            .execute(&mut conn)?;
        Ok(())
    }
}
