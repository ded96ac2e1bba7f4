pub mod aggregate;

pub use aggregate::{CreateSupplierInvoice, SupplierInvoice, SupplierInvoiceLine, UpdateSupplierInvoice};
