pub mod customer_service;
pub mod order_service;
pub mod payment_registry;
pub mod product_service;
pub mod random_service;
