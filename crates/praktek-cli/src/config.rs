//! Environment configuration.

use std::env;
use std::path::PathBuf;

use tracing::warn;

const DEFAULT_DB_PATH: &str = "praktek.db";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite file holding the clinic tables
    pub db_path: PathBuf,
    /// Fill empty doctor/patient/schedule tables with demo data on open
    pub seed_defaults: bool,
}

impl AppConfig {
    /// Read the environment. `db_override` (the `--db` flag) wins over
    /// `PRAKTEK_DB_PATH`, which is then not consulted at all.
    pub fn from_env(db_override: Option<PathBuf>) -> Self {
        Self::from_lookup(db_override, |key| env::var(key).ok())
    }

    fn from_lookup(db_override: Option<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = match db_override {
            Some(path) => path,
            None => lookup("PRAKTEK_DB_PATH")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    warn!("PRAKTEK_DB_PATH not set, using {}", DEFAULT_DB_PATH);
                    PathBuf::from(DEFAULT_DB_PATH)
                }),
        };

        let seed_defaults = match lookup("PRAKTEK_SEED_DEFAULTS") {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "PRAKTEK_SEED_DEFAULTS is not a boolean, using true");
                true
            }),
            None => true,
        };

        Self {
            db_path,
            seed_defaults,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(None, |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.db_path, PathBuf::from("praktek.db"));
        assert!(config.seed_defaults);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PRAKTEK_DB_PATH", "/var/lib/praktek/clinic.db"),
            ("PRAKTEK_SEED_DEFAULTS", "off"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/praktek/clinic.db"));
        assert!(!config.seed_defaults);
    }

    #[test]
    fn test_db_flag_skips_env_lookup() {
        let config = AppConfig::from_lookup(Some(PathBuf::from("flag.db")), |key| {
            assert_ne!(key, "PRAKTEK_DB_PATH", "db path read despite --db");
            None
        });
        assert_eq!(config.db_path, PathBuf::from("flag.db"));
        assert!(config.seed_defaults);
    }

    #[test]
    fn test_unparsable_flag_keeps_default() {
        assert!(config(&[("PRAKTEK_SEED_DEFAULTS", "maybe")]).seed_defaults);
        assert_eq!(parse_flag(" FALSE "), Some(false));
    }
}
