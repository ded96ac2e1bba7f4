use crate::shared::api_utils::{api_url, get_json, post_json, put_json};
use contracts::domain::a006_supplier_invoice::{
    CreateSupplierInvoice, SupplierInvoice, UpdateSupplierInvoice,
};

pub async fn list_supplier_invoices() -> Result<Vec<SupplierInvoice>, String> {
    get_json(&api_url("/api/supplier-invoices")).await
}

pub async fn create_supplier_invoice(
    invoice: &CreateSupplierInvoice,
) -> Result<SupplierInvoice, String> {
    post_json(&api_url("/api/supplier-invoices"), invoice).await
}

pub async fn update_supplier_invoice(
    id: &str,
    changes: &UpdateSupplierInvoice,
) -> Result<SupplierInvoice, String> {
    let url = api_url(&format!("/api/supplier-invoices/{}", urlencoding::encode(id)));
    put_json(&url, changes).await
}
