pub mod aggregate;

pub use aggregate::{CreateProduct, Product, StockAdjustment, UpdateProduct};
