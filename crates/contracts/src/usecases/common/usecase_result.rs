use serde::{Deserialize, Serialize};

/// Error body returned by the back-office API for a failed use case call.
///
/// The backend answers either with this structured shape or with a bare
/// `{ "error": "..." }`; `message` accepts both through the `error` alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseError {
    #[serde(default = "UseCaseError::default_code")]
    pub code: String,
    #[serde(alias = "error")]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl UseCaseError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    fn default_code() -> String {
        "ERROR".to_string()
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    /// Build an error from a non-2xx response. Falls back to the status line
    /// when the body is not one of the known JSON shapes.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<UseCaseError>(body) {
            Ok(err) if !err.message.trim().is_empty() => err,
            _ => Self::new(format!("HTTP_{}", status), format!("HTTP {}", status)),
        }
    }

    /// Text for a notification detail line
    pub fn user_message(&self) -> String {
        match &self.details {
            Some(details) => format!("{} ({})", self.message, details),
            None => self.message.clone(),
        }
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}

impl From<anyhow::Error> for UseCaseError {
    fn from(err: anyhow::Error) -> Self {
        UseCaseError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_structured_body() {
        let body = r#"{"code":"DUPLICATE_CODE","message":"Code already used","details":"A-1"}"#;
        let err = UseCaseError::from_response(409, body);
        assert_eq!(err.code, "DUPLICATE_CODE");
        assert_eq!(err.user_message(), "Code already used (A-1)");
    }

    #[test]
    fn test_from_response_bare_error_body() {
        let err = UseCaseError::from_response(400, r#"{"error":"Invalid file"}"#);
        assert_eq!(err.code, "ERROR");
        assert_eq!(err.message, "Invalid file");
    }

    #[test]
    fn test_from_response_unparseable_body() {
        let err = UseCaseError::from_response(502, "<html>Bad gateway</html>");
        assert_eq!(err.code, "HTTP_502");
        assert_eq!(err.to_string(), "[HTTP_502] HTTP 502");
    }

    #[test]
    fn test_from_anyhow_with_details() {
        let err = UseCaseError::from(anyhow::anyhow!("settings file is invalid"))
            .with_details("page_size must be greater than zero");
        assert_eq!(err.code, "INTERNAL_ERROR");
        assert_eq!(
            err.to_string(),
            "[INTERNAL_ERROR] settings file is invalid: page_size must be greater than zero"
        );
    }
}
