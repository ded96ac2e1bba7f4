//! REST client for the import endpoints

use crate::shared::api_utils::{api_url, file_form, get_json, post_form, post_json};
use contracts::usecases::u501_import_wizard::{
    CheckCodesRequest, CheckCodesResponse, ExecuteRequest, ExecuteResponse, ImportSource,
    ParsedFileResponse, SearchParams, SearchResponse, SourceKind,
};
use web_sys::{File, FormData};

pub async fn get_sources() -> Result<Vec<ImportSource>, String> {
    get_json(&api_url("/api/import/sources")).await
}

pub async fn search(params: &SearchParams) -> Result<SearchResponse, String> {
    let query = serde_qs::to_string(params).map_err(|e| format!("Failed to encode query: {}", e))?;
    let url = format!("{}?{}", api_url("/api/import/search"), query);
    get_json(&url).await
}

pub async fn parse_invoice(file: &File) -> Result<ParsedFileResponse, String> {
    post_form(&api_url("/api/import/parse-invoice"), file_form(file)?).await
}

pub async fn parse_excel(file: &File) -> Result<ParsedFileResponse, String> {
    post_form(&api_url("/api/import/parse-excel"), file_form(file)?).await
}

/// Parse an uploaded file with the endpoint matching the source
pub async fn parse_file(kind: SourceKind, file: &File) -> Result<ParsedFileResponse, String> {
    match kind {
        SourceKind::PdfInvoice => parse_invoice(file).await,
        SourceKind::Excel => parse_excel(file).await,
        other => Err(format!("{} does not accept files", other.display_name())),
    }
}

/// Submit the batch. The payload goes as a JSON `payload` part, the original
/// file (for upload sources) as `file`.
pub async fn execute(request: &ExecuteRequest, file: Option<&File>) -> Result<ExecuteResponse, String> {
    let payload = serde_json::to_string(request).map_err(|e| e.to_string())?;

    let form = FormData::new().map_err(|e| format!("{e:?}"))?;
    form.append_with_str("payload", &payload)
        .map_err(|e| format!("{e:?}"))?;
    if let Some(file) = file {
        form.append_with_blob("file", file)
            .map_err(|e| format!("{e:?}"))?;
    }

    post_form(&api_url("/api/import/execute"), form).await
}

pub async fn check_codes(codes: Vec<String>) -> Result<CheckCodesResponse, String> {
    post_json(&api_url("/api/import/check-codes"), &CheckCodesRequest { codes }).await
}
