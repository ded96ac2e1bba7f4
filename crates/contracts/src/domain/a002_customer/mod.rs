pub mod aggregate;

pub use aggregate::{CreateCustomer, Customer, UpdateCustomer};
