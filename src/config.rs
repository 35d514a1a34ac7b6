//! Runtime settings.
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config`)
//! 3. `STATUS_SENTINEL_*` environment variables
//! 4. Command-line flags
//!
//! ```toml
//! file = "status-checker-database.db"
//! scope = "tablet"
//! refresh_interval_ms = 30000
//! limit = 150
//! log_file = "status-sentinel.log"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::data::Scope;
use crate::store::{FileLoader, SnapshotLoader, StoreLoader, DEFAULT_DATABASE_PATH};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "STATUS_SENTINEL";

const DEFAULT_REFRESH_INTERVAL_MS: i64 = 60_000;
const DEFAULT_LIMIT: i64 = 150;
const DEFAULT_LOG_FILE: &str = "status-sentinel.log";

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Local database file. Ignored when `url` is set.
    pub file: Option<PathBuf>,
    /// Snapshot URL returning the whole database.
    pub url: Option<String>,
    pub scope: Scope,
    /// Polling period in milliseconds; 0 disables polling.
    pub refresh_interval_ms: u64,
    /// Maximum number of recent results per fetch.
    pub limit: usize,
    pub log_file: PathBuf,
}

/// Values given on the command line. `None` leaves lower layers in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub file: Option<PathBuf>,
    pub url: Option<String>,
    pub scope: Option<Scope>,
    pub refresh_interval_ms: Option<u64>,
    pub limit: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from all layers.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(
            config_path,
            overrides,
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    fn load_with_env(
        config_path: Option<&Path>,
        overrides: &Overrides,
        env: Environment,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("scope", Scope::default().label())?
            .set_default("refresh_interval_ms", DEFAULT_REFRESH_INTERVAL_MS)?
            .set_default("limit", DEFAULT_LIMIT)?
            .set_default("log_file", DEFAULT_LOG_FILE)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let config = builder
            .add_source(env)
            .set_override_option("file", overrides.file.as_deref().map(path_value))?
            .set_override_option("url", overrides.url.clone())?
            .set_override_option("scope", overrides.scope.map(|s| s.label()))?
            .set_override_option(
                "refresh_interval_ms",
                overrides.refresh_interval_ms.map(|ms| ms as i64),
            )?
            .set_override_option("limit", overrides.limit.map(|n| n as i64))?
            .set_override_option("log_file", overrides.log_file.as_deref().map(path_value))?
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// The loader these settings select: the snapshot URL when given,
    /// otherwise the local file.
    pub fn loader(&self) -> Box<dyn StoreLoader> {
        match (&self.url, &self.file) {
            (Some(url), _) => Box::new(SnapshotLoader::new(url.clone())),
            (None, Some(path)) => Box::new(FileLoader::new(path)),
            (None, None) => Box::new(FileLoader::new(DEFAULT_DATABASE_PATH)),
        }
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_with_env(None, &Overrides::default(), no_env()).unwrap();
        assert_eq!(settings.file, None);
        assert_eq!(settings.url, None);
        assert_eq!(settings.scope, Scope::Desktop);
        assert_eq!(settings.refresh_interval_ms, 60_000);
        assert_eq!(settings.limit, 150);
        assert_eq!(settings.log_file, PathBuf::from("status-sentinel.log"));
        assert_eq!(
            settings.loader().description(),
            "file: status-checker-database.db"
        );
    }

    #[test]
    fn test_file_then_env_then_flags() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "file = \"from-file.db\"\nscope = \"tablet\"\nrefresh_interval_ms = 5000\nlimit = 60"
        )
        .unwrap();

        let settings = Settings::load_with_env(
            Some(file.path()),
            &Overrides::default(),
            env(&[("STATUS_SENTINEL_LIMIT", "30")]),
        )
        .unwrap();
        assert_eq!(settings.file, Some(PathBuf::from("from-file.db")));
        assert_eq!(settings.scope, Scope::Tablet);
        assert_eq!(settings.refresh_interval_ms, 5000);
        assert_eq!(settings.limit, 30);

        let overrides = Overrides {
            scope: Some(Scope::Mobile),
            limit: Some(10),
            ..Default::default()
        };
        let settings = Settings::load_with_env(
            Some(file.path()),
            &overrides,
            env(&[("STATUS_SENTINEL_LIMIT", "30")]),
        )
        .unwrap();
        assert_eq!(settings.scope, Scope::Mobile);
        assert_eq!(settings.limit, 10);
    }

    #[test]
    fn test_url_selects_snapshot_loader() {
        let overrides = Overrides {
            file: Some(PathBuf::from("ignored.db")),
            url: Some("http://localhost:8080/db".to_string()),
            ..Default::default()
        };
        let settings = Settings::load_with_env(None, &overrides, no_env()).unwrap();
        assert_eq!(
            settings.loader().description(),
            "snapshot: http://localhost:8080/db"
        );
    }

    #[test]
    fn test_missing_config_file() {
        let result = Settings::load_with_env(
            Some(Path::new("/nonexistent/status-sentinel.toml")),
            &Overrides::default(),
            no_env(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_scope() {
        let result = Settings::load_with_env(
            None,
            &Overrides::default(),
            env(&[("STATUS_SENTINEL_SCOPE", "watch")]),
        );
        assert!(result.is_err());
    }
}
