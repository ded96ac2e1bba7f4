use crate::shared::api_utils::{api_url, get_json};
use contracts::domain::a007_category::Category;

/// Справочник для шага настройки
pub async fn list_categories() -> Result<Vec<Category>, String> {
    get_json(&api_url("/api/categories")).await
}
