pub mod aggregate;

pub use aggregate::{CreateSupplier, Supplier, UpdateSupplier};
