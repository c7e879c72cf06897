use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::{EnforcementError, Result},
    schedule::{Guideline, MajorityAge, PaymentInterval, StepdownCalculator},
};

pub const HOME_ENV_VAR: &str = "SUPPORT_ENFORCEMENT_HOME";
const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "support_enforcement";
const TMP_SUFFIX: &str = "tmp";

/// Policy knobs that differ between jurisdictions and firms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "Settings::default_majority_age")]
    pub majority_age_years: u32,
    #[serde(default)]
    pub guideline: Guideline,
    #[serde(default)]
    pub default_payment_interval: PaymentInterval,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            majority_age_years: Self::default_majority_age(),
            guideline: Guideline::default(),
            default_payment_interval: PaymentInterval::default(),
        }
    }
}

impl Settings {
    pub fn default_majority_age() -> u32 {
        18
    }

    /// Rejects settings the stepdown cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.majority_age_years == 0 {
            return Err(EnforcementError::Config(
                "majority_age_years must be at least 1".into(),
            ));
        }
        if let Guideline::Table(amounts) = &self.guideline {
            if let Some(amount) = amounts.iter().find(|a| **a < Decimal::ZERO) {
                return Err(EnforcementError::Config(format!(
                    "guideline table amounts must not be negative, got {amount}"
                )));
            }
        }
        Ok(())
    }

    pub fn calculator(&self) -> StepdownCalculator<MajorityAge, Guideline> {
        StepdownCalculator::new(
            MajorityAge {
                years: self.majority_age_years,
            },
            self.guideline.clone(),
        )
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Resolves the settings file from `SUPPORT_ENFORCEMENT_HOME`, falling back
    /// to the platform configuration directory.
    pub fn new() -> Result<Self> {
        let base = match env::var_os(HOME_ENV_VAR) {
            Some(home) => PathBuf::from(home),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| {
                    EnforcementError::Config("no configuration directory available".into())
                })?,
        };
        Ok(Self::with_base_dir(base))
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    pub fn load(&self) -> Result<Settings> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let settings: Settings = serde_json::from_str(&data)?;
            settings.validate()?;
            Ok(settings)
        } else {
            tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        assert_eq!(manager.load().unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().join("nested"));
        let settings = Settings {
            majority_age_years: 19,
            guideline: Guideline::Table(vec![dec!(400), dec!(650)]),
            default_payment_interval: PaymentInterval::Semimonthly,
        };
        manager.save(&settings).unwrap();
        assert!(!tmp_path(manager.path()).exists());
        assert_eq!(manager.load().unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{"default_payment_interval":52}"#).unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        let settings = manager.load().unwrap();
        assert_eq!(settings.majority_age_years, 18);
        assert_eq!(settings.default_payment_interval, PaymentInterval::Weekly);
        assert_eq!(settings.guideline, Guideline::Texas);
    }

    #[test]
    fn zero_majority_age_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{"majority_age_years":0}"#).unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        assert!(matches!(manager.load(), Err(EnforcementError::Config(_))));
    }

    #[test]
    fn negative_table_amount_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"guideline":{"kind":"table","amounts":["400.00","-5.00"]}}"#,
        )
        .unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        match manager.load() {
            Err(EnforcementError::Config(message)) => assert!(message.contains("-5.00")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn zero_and_positive_table_amounts_are_accepted() {
        let settings = Settings {
            guideline: Guideline::Table(vec![dec!(0), dec!(250.00)]),
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn calculator_uses_configured_age() {
        let settings = Settings {
            majority_age_years: 21,
            ..Settings::default()
        };
        assert_eq!(settings.calculator().age_out.years, 21);
    }
}
