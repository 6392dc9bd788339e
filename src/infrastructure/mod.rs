pub mod diesel_store;
pub mod in_memory;
pub mod models;
