//! Wizard settings loader
//!
//! `import_wizard.toml` is served next to the SPA. When it is missing or
//! broken the settings compiled into the bundle are used.

use contracts::usecases::u501_import_wizard::WizardSettings;
use gloo_net::http::Request;

const SETTINGS_PATH: &str = "/import_wizard.toml";

pub async fn load_settings() -> WizardSettings {
    match fetch_settings_file().await {
        Ok(Some(contents)) => match WizardSettings::from_toml_str(&contents) {
            Ok(settings) => {
                log::info!("Loaded wizard settings from {}", SETTINGS_PATH);
                settings
            }
            Err(e) => {
                log::warn!("Invalid {}: {}. Using defaults", SETTINGS_PATH, e);
                embedded_settings()
            }
        },
        Ok(None) => {
            log::debug!("{} not found, using defaults", SETTINGS_PATH);
            embedded_settings()
        }
        Err(e) => {
            log::warn!("Failed to fetch {}: {}. Using defaults", SETTINGS_PATH, e);
            embedded_settings()
        }
    }
}

fn embedded_settings() -> WizardSettings {
    WizardSettings::embedded().unwrap_or_else(|e| {
        log::error!("Embedded wizard settings are invalid: {}", e);
        WizardSettings::default()
    })
}

async fn fetch_settings_file() -> Result<Option<String>, String> {
    let response = Request::get(SETTINGS_PATH)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if response.status() == 404 {
        return Ok(None);
    }
    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let contents = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;
    Ok(Some(contents))
}
