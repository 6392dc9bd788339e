pub mod clock;
pub mod customer;
pub mod errors;
pub mod order;
pub mod paged;
pub mod payment;
pub mod ports;
pub mod product;
