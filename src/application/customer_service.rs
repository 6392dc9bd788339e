use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Datelike, Months, Timelike, Utc, Weekday};
use log::debug;

use crate::domain::clock::Clock;
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::OrderFilter;
use crate::domain::paged::{list_entities, PagedList};
use crate::domain::ports::{CustomerRepository, OrderRepository};

/// Largest amount a customer with no order history may spend.
pub const FIRST_PURCHASE_LIMIT: i64 = 100;

const OPENING_HOUR: u32 = 8;
/// Last hour in which purchases are accepted; 18:59:59 still passes.
const LAST_OPEN_HOUR: u32 = 18;

pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    orders: Arc<dyn OrderRepository>,
    clock: Arc<dyn Clock>,
}

impl CustomerService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        orders: Arc<dyn OrderRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            customers,
            orders,
            clock,
        }
    }

    /// Customers in store order; pages are not guaranteed to be stable.
    pub fn list_customers(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<PagedList<Customer>, DomainError> {
        list_entities(self.customers.as_ref(), page, page_size)
    }

    /// Decides whether `customer_id` may place a purchase of `purchase_value`
    /// right now.
    ///
    /// The rules run in a fixed order and the first one that fails decides:
    /// at most one order per calendar month, a first purchase of at most
    /// [`FIRST_PURCHASE_LIMIT`], hours 08 through 18 inclusive, Monday to
    /// Friday. All times are UTC.
    pub fn can_purchase(
        &self,
        customer_id: i32,
        purchase_value: &BigDecimal,
    ) -> Result<bool, DomainError> {
        if customer_id <= 0 {
            return Err(DomainError::invalid_argument(
                "customer_id",
                "must be greater than zero",
            ));
        }
        if *purchase_value <= BigDecimal::zero() {
            return Err(DomainError::invalid_argument(
                "purchase_value",
                "must be greater than zero",
            ));
        }

        if self.customers.find_by_id(customer_id)?.is_none() {
            return Err(DomainError::CustomerNotFound(customer_id));
        }

        if self.bought_within_last_month(customer_id)? {
            debug!("Customer {} already bought within the last month", customer_id);
            return Ok(false);
        }

        if !self.has_bought_before(customer_id)?
            && *purchase_value > BigDecimal::from(FIRST_PURCHASE_LIMIT)
        {
            debug!(
                "First purchase of {} by customer {} exceeds {}",
                purchase_value, customer_id, FIRST_PURCHASE_LIMIT
            );
            return Ok(false);
        }

        if self.outside_business_hours() {
            debug!("Purchase by customer {} outside business hours", customer_id);
            return Ok(false);
        }

        if self.on_weekend() {
            debug!("Purchase by customer {} on a weekend", customer_id);
            return Ok(false);
        }

        Ok(true)
    }

    fn bought_within_last_month(&self, customer_id: i32) -> Result<bool, DomainError> {
        let base_date = one_month_before(self.clock.utc_now());
        let filter = OrderFilter::for_customer(customer_id).placed_since(base_date);
        Ok(self.orders.count(&filter)? > 0)
    }

    fn has_bought_before(&self, customer_id: i32) -> Result<bool, DomainError> {
        Ok(self.orders.count(&OrderFilter::for_customer(customer_id))? > 0)
    }

    // Each bound reads the clock again.
    fn outside_business_hours(&self) -> bool {
        self.clock.utc_now().hour() < OPENING_HOUR || self.clock.utc_now().hour() > LAST_OPEN_HOUR
    }

    fn on_weekend(&self) -> bool {
        matches!(self.clock.utc_now().weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// Calendar-month subtraction, clamped to the end of a shorter month.
fn one_month_before(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(1))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use chrono::TimeZone;

    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::order::Order;
    use crate::infrastructure::in_memory::InMemoryStore;

    /// Monday, 2025-08-18.
    fn monday_at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 18, hour, 0, 0).unwrap()
    }

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn order_on(id: i32, customer_id: i32, order_date: DateTime<Utc>) -> Order {
        Order {
            id,
            customer_id,
            value: dec("10"),
            order_date,
        }
    }

    fn service(store: InMemoryStore, now: DateTime<Utc>) -> CustomerService {
        let store = Arc::new(store);
        CustomerService::new(store.clone(), store, Arc::new(FixedClock::new(now)))
    }

    fn registered() -> InMemoryStore {
        InMemoryStore::new().with_customers([Customer::new(1, "Ana")])
    }

    #[test]
    fn rejects_non_positive_customer_id() {
        let sut = service(registered(), monday_at(12));
        for id in [0, -1] {
            let err = sut.can_purchase(id, &dec("10")).unwrap_err();
            assert!(matches!(
                err,
                DomainError::InvalidArgument { param: "customer_id", .. }
            ));
        }
    }

    #[test]
    fn rejects_non_positive_purchase_value() {
        let sut = service(registered(), monday_at(12));
        for value in ["0", "-10"] {
            let err = sut.can_purchase(1, &dec(value)).unwrap_err();
            assert!(matches!(
                err,
                DomainError::InvalidArgument { param: "purchase_value", .. }
            ));
        }
    }

    #[test]
    fn unknown_customer_is_reported_with_id() {
        let sut = service(registered(), monday_at(12));
        let err = sut.can_purchase(999, &dec("50")).unwrap_err();
        assert!(matches!(err, DomainError::CustomerNotFound(999)));
        let msg = err.to_string();
        assert!(msg.contains("does not exist") && msg.contains("999"));
    }

    #[test]
    fn order_within_last_month_blocks_any_amount() {
        let store = registered().with_orders([order_on(
            1,
            1,
            Utc.with_ymd_and_hms(2025, 8, 10, 12, 0, 0).unwrap(),
        )]);
        let sut = service(store, monday_at(12));
        assert!(!sut.can_purchase(1, &dec("50")).unwrap());
        assert!(!sut.can_purchase(1, &dec("0.01")).unwrap());
    }

    #[test]
    fn order_exactly_one_month_ago_still_blocks() {
        let store = registered().with_orders([order_on(
            1,
            1,
            Utc.with_ymd_and_hms(2025, 7, 18, 12, 0, 0).unwrap(),
        )]);
        let sut = service(store, monday_at(12));
        assert!(!sut.can_purchase(1, &dec("50")).unwrap());
    }

    #[test]
    fn order_older_than_a_month_allows_purchase_above_first_cap() {
        let store = registered().with_orders([order_on(
            1,
            1,
            Utc.with_ymd_and_hms(2025, 7, 18, 11, 59, 59).unwrap(),
        )]);
        let sut = service(store, monday_at(12));
        assert!(sut.can_purchase(1, &dec("150")).unwrap());
    }

    #[test]
    fn month_window_clamps_to_end_of_shorter_month() {
        // 2025-03-31 minus one month is 2025-02-28.
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 10, 0, 0).unwrap();
        assert_eq!(
            one_month_before(now),
            Utc.with_ymd_and_hms(2025, 2, 28, 10, 0, 0).unwrap()
        );

        let store = registered().with_orders([order_on(
            1,
            1,
            Utc.with_ymd_and_hms(2025, 2, 28, 10, 0, 0).unwrap(),
        )]);
        let sut = service(store, now);
        assert!(!sut.can_purchase(1, &dec("50")).unwrap());
    }

    #[test]
    fn orders_of_other_customers_are_ignored() {
        let store = InMemoryStore::new()
            .with_customers([Customer::new(1, "Ana"), Customer::new(2, "Bruno")])
            .with_orders([order_on(1, 2, monday_at(9))]);
        let sut = service(store, monday_at(12));
        assert!(sut.can_purchase(1, &dec("100")).unwrap());
    }

    #[test]
    fn first_purchase_over_cap_is_refused() {
        let sut = service(registered(), monday_at(12));
        assert!(!sut.can_purchase(1, &dec("150")).unwrap());
        assert!(!sut.can_purchase(1, &dec("100.01")).unwrap());
    }

    #[test]
    fn first_purchase_at_cap_is_allowed() {
        let sut = service(registered(), monday_at(10));
        assert!(sut.can_purchase(1, &dec("100")).unwrap());
    }

    #[test]
    fn refused_outside_business_hours() {
        for hour in [0, 7, 19, 23] {
            let sut = service(registered(), monday_at(hour));
            assert!(!sut.can_purchase(1, &dec("50")).unwrap(), "hour {}", hour);
        }
    }

    #[test]
    fn business_hour_bounds_are_inclusive() {
        for hour in [8, 18] {
            let sut = service(registered(), monday_at(hour));
            assert!(sut.can_purchase(1, &dec("100")).unwrap(), "hour {}", hour);
        }
        let last_second = Utc.with_ymd_and_hms(2025, 8, 18, 18, 59, 59).unwrap();
        assert!(service(registered(), last_second)
            .can_purchase(1, &dec("100"))
            .unwrap());
    }

    #[test]
    fn refused_on_weekends() {
        let saturday = Utc.with_ymd_and_hms(2025, 8, 16, 12, 0, 0).unwrap();
        let sunday = Utc.with_ymd_and_hms(2025, 8, 17, 12, 0, 0).unwrap();
        for day in [saturday, sunday] {
            let sut = service(registered(), day);
            assert!(!sut.can_purchase(1, &dec("50")).unwrap());
        }
    }

    #[test]
    fn friday_evening_boundary() {
        let friday = Utc.with_ymd_and_hms(2025, 8, 22, 18, 30, 0).unwrap();
        assert!(service(registered(), friday)
            .can_purchase(1, &dec("50"))
            .unwrap());
    }

    /// Records every filter passed to `count` and reports no orders.
    #[derive(Default)]
    struct RecordingOrders(Mutex<Vec<OrderFilter>>);

    impl OrderRepository for RecordingOrders {
        fn count(&self, filter: &OrderFilter) -> Result<i64, DomainError> {
            self.0.lock().unwrap().push(*filter);
            Ok(0)
        }

        fn insert(&self, _order: crate::domain::order::NewOrder) -> Result<Order, DomainError> {
            unreachable!("eligibility never inserts")
        }
    }

    #[test]
    fn history_rules_issue_two_separate_counts() {
        let now = monday_at(12);
        let orders = Arc::new(RecordingOrders::default());
        let sut = CustomerService::new(
            Arc::new(registered()),
            orders.clone(),
            Arc::new(FixedClock::new(now)),
        );

        assert!(sut.can_purchase(1, &dec("50")).unwrap());

        let month_ago = Utc.with_ymd_and_hms(2025, 7, 18, 12, 0, 0).unwrap();
        assert_eq!(
            *orders.0.lock().unwrap(),
            vec![
                OrderFilter::for_customer(1).placed_since(month_ago),
                OrderFilter::for_customer(1),
            ]
        );
    }

    /// Hands out the queued instants in turn, then repeats the last one.
    struct SequenceClock(Mutex<Vec<DateTime<Utc>>>);

    impl Clock for SequenceClock {
        fn utc_now(&self) -> DateTime<Utc> {
            let mut queue = self.0.lock().unwrap();
            if queue.len() > 1 {
                queue.remove(0)
            } else {
                queue[0]
            }
        }
    }

    #[test]
    fn hour_checks_read_the_clock_separately() {
        // Reads: month window, lower hour bound, upper hour bound, weekday.
        // The lower bound sees 18:59:59 and the upper bound sees 19:00.
        let clock = SequenceClock(Mutex::new(vec![
            Utc.with_ymd_and_hms(2025, 8, 18, 18, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2025, 8, 18, 18, 59, 59).unwrap(),
            monday_at(19),
        ]));
        let store = Arc::new(registered());
        let sut = CustomerService::new(store.clone(), store, Arc::new(clock));
        assert!(!sut.can_purchase(1, &dec("50")).unwrap());
    }

    #[test]
    fn lists_customers_in_pages() {
        let store = InMemoryStore::new()
            .with_customers((1..=25).map(|i| Customer::new(i, format!("Customer {}", i))));
        let sut = service(store, monday_at(10));

        let page1 = sut.list_customers(1, 10).unwrap();
        assert_eq!(page1.total_count, 25);
        assert!(page1.has_next);
        assert_eq!(page1.items.len(), 10);

        let page3 = sut.list_customers(3, 10).unwrap();
        assert!(!page3.has_next);
        assert_eq!(page3.items.len(), 5);
    }
}
