use crate::data::persistence::get_data_dir;
use crate::data::AppSettings;
use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = get_data_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir)?;
    println!("Config initialized at {}", dir.display());
    Ok(())
}

/// Writes a default config.yaml into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    AppSettings::default().save_to(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Persistable;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Default, Debug)]
    struct RawConfig {
        settings: AppSettings,
    }

    impl Persistable for RawConfig {
        fn filename() -> &'static str {
            "config.yaml"
        }
    }

    #[test]
    fn test_run_in_dir_writes_config() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        assert!(tmp.path().join("config.yaml").exists());
    }

    #[test]
    fn test_written_config_parses_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        let parsed = RawConfig::load_from(tmp.path()).unwrap();
        assert_eq!(parsed.settings, AppSettings::default());
    }
}
