use serde::Deserialize;

use super::pricing::MarginMultiplier;

/// Настройки мастера импорта из `import_wizard.toml`
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WizardSettings {
    /// Строк на страницу поиска
    pub page_size: u32,
    /// Пауза после последней правки кода перед проверкой каталога
    pub code_check_debounce_ms: u32,
    /// Фиксированные наценки (кнопки)
    pub margin_presets: Vec<f64>,
    pub custom_margin_min: f64,
    pub custom_margin_max: f64,
    /// Время показа уведомлений
    pub notification_life_ms: u32,
}

/// Конфигурация по умолчанию, встроенная в сборку
pub const DEFAULT_SETTINGS: &str = r#"
page_size = 50
code_check_debounce_ms = 500
margin_presets = [2.0, 2.5]
custom_margin_min = 1.0
custom_margin_max = 10.0
notification_life_ms = 5000
"#;

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            page_size: 50,
            code_check_debounce_ms: 500,
            margin_presets: vec![2.0, 2.5],
            custom_margin_min: 1.0,
            custom_margin_max: 10.0,
            notification_life_ms: 5000,
        }
    }
}

impl WizardSettings {
    /// Parse a settings file; keys that are absent keep their default
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let settings: WizardSettings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Встроенные настройки
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_toml_str(DEFAULT_SETTINGS)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than zero");
        }
        if !(self.custom_margin_min > 0.0 && self.custom_margin_min <= self.custom_margin_max) {
            anyhow::bail!(
                "custom margin range {}..{} is invalid",
                self.custom_margin_min,
                self.custom_margin_max
            );
        }
        if let Some(bad) = self.margin_presets.iter().find(|m| !(m.is_finite() && **m > 0.0)) {
            anyhow::bail!("margin preset {} must be a positive number", bad);
        }
        Ok(())
    }

    pub fn presets(&self) -> Vec<MarginMultiplier> {
        self.margin_presets
            .iter()
            .copied()
            .map(MarginMultiplier::preset)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_settings_match_default() {
        let settings = WizardSettings::embedded().unwrap();
        assert_eq!(settings, WizardSettings::default());
        assert_eq!(
            settings.presets(),
            vec![MarginMultiplier::DOUBLE, MarginMultiplier::DOUBLE_AND_HALF]
        );
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let settings = WizardSettings::from_toml_str("page_size = 25\n").unwrap();
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.code_check_debounce_ms, 500);
        assert_eq!(settings.custom_margin_max, 10.0);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(WizardSettings::from_toml_str("page_size = 0").is_err());
        assert!(WizardSettings::from_toml_str("custom_margin_min = 12.0").is_err());
        assert!(WizardSettings::from_toml_str("margin_presets = [2.0, -1.0]").is_err());
        assert!(WizardSettings::from_toml_str("page_size = \"many\"").is_err());
    }
}
