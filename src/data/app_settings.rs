use crate::data::persistence::Persistable;
use crate::data::selection::Meridiem;
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Defaults the picker starts with on mount. The time fields seed the
/// selection; `initial_month` ("YYYY-MM") overrides the month the grid
/// opens on, falling back to the current month when absent or invalid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub default_hour: u32,
    pub default_minute: u32,
    pub default_meridiem: Meridiem,
    #[serde(default)]
    pub initial_month: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            default_hour: 10,
            default_minute: 29,
            default_meridiem: Meridiem::Am,
            initial_month: None,
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml, so the file
/// stays extensible without breaking older configs.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }

    pub fn save_to(&self, dir: &std::path::Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        Persistable::save_to(&wrapper, dir)
    }

    /// First day of the configured initial month, if `initial_month`
    /// parses as "YYYY-MM". Invalid values are ignored.
    pub fn initial_month_date(&self) -> Option<NaiveDate> {
        let raw = self.initial_month.as_deref()?;
        NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_hour, 10);
        assert_eq!(settings.default_minute, 29);
        assert_eq!(settings.default_meridiem, Meridiem::Am);
        assert_eq!(settings.initial_month, None);
    }

    #[test]
    fn test_settings_wrapper_yaml_roundtrip() {
        let wrapper = SettingsWrapper {
            settings: AppSettings {
                default_hour: 9,
                default_minute: 15,
                default_meridiem: Meridiem::Pm,
                initial_month: Some("2025-12".to_string()),
            },
        };
        let yaml = serde_norway::to_string(&wrapper).unwrap();
        let parsed: SettingsWrapper = serde_norway::from_str(&yaml).unwrap();
        assert_eq!(parsed.settings, wrapper.settings);
    }

    #[test]
    fn test_settings_wrapper_missing_key_uses_default() {
        // When config.yaml has no 'settings' key, default values kick in
        let yaml = "other_key: []";
        let parsed: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(parsed.settings.default_hour, 10);
    }

    #[test]
    fn test_initial_month_date_parses_year_month() {
        let settings = AppSettings {
            initial_month: Some("2025-12".to_string()),
            ..AppSettings::default()
        };
        assert_eq!(
            settings.initial_month_date(),
            NaiveDate::from_ymd_opt(2025, 12, 1)
        );
    }

    #[test]
    fn test_initial_month_date_rejects_garbage() {
        let settings = AppSettings {
            initial_month: Some("december".to_string()),
            ..AppSettings::default()
        };
        assert_eq!(settings.initial_month_date(), None);
    }

    #[test]
    fn test_initial_month_date_none_when_unset() {
        assert_eq!(AppSettings::default().initial_month_date(), None);
    }

    #[test]
    fn test_save_to_and_load_roundtrip() {
        use tempfile::TempDir;
        let tmp = TempDir::new().unwrap();
        let settings = AppSettings {
            default_hour: 7,
            ..AppSettings::default()
        };
        settings.save_to(tmp.path()).unwrap();
        let loaded = SettingsWrapper::load_from(tmp.path()).unwrap();
        assert_eq!(loaded.settings.default_hour, 7);
    }
}
