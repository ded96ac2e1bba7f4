pub mod aggregate;

pub use aggregate::{CreateOrder, Order, OrderLine, OrderStatus, UpdateOrder};
