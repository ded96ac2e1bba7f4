pub mod aggregate;

pub use aggregate::{CreateShippingZone, ShippingZone, UpdateShippingZone};
