pub mod a001_product;
pub mod a002_customer;
pub mod a003_order;
pub mod a004_supplier;
pub mod a005_shipping_zone;
pub mod a006_supplier_invoice;
pub mod a007_category;
