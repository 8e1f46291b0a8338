//! Configuration sources
//!
//! Settings file, environment variables and command line flags, merged in
//! priority order.

use super::{ConfigError, DiagnosticConfig};
use std::env::VarError;
use std::path::Path;
use tracing::debug;

pub const ENV_TEXTURE_PATH: &str = "MAPVIEW_DOCTOR_TEXTURE_PATH";
pub const ENV_API_URL: &str = "MAPVIEW_DOCTOR_API_URL";
pub const ENV_BASE_URL: &str = "MAPVIEW_DOCTOR_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "MAPVIEW_DOCTOR_TIMEOUT_MS";

/// Configuration source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSource {
    /// Built-in defaults
    Default,
    /// YAML settings file
    File,
    /// `MAPVIEW_DOCTOR_*` environment variables
    Env,
    /// Command line flags
    Flags,
}

impl ConfigSource {
    /// Higher wins
    pub fn priority(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Env => 2,
            ConfigSource::Flags => 3,
        }
    }
}

impl DiagnosticConfig {
    /// Load a YAML settings file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `MAPVIEW_DOCTOR_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let request_timeout_ms = match env_var(ENV_TIMEOUT_MS)? {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidEnv {
                    var: ENV_TIMEOUT_MS,
                    value: value.clone(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            texture_path: env_var(ENV_TEXTURE_PATH)?,
            api_url: env_var(ENV_API_URL)?,
            base_url: env_var(ENV_BASE_URL)?,
            request_timeout_ms,
        })
    }

    /// Merge every source: defaults, optional file, environment, then flags
    pub fn load(file: Option<&Path>, flags: DiagnosticConfig) -> Result<Self, ConfigError> {
        let mut layers = vec![(ConfigSource::Default, Self::default())];
        if let Some(path) = file {
            layers.push((ConfigSource::File, Self::from_file(path)?));
        }
        layers.push((ConfigSource::Env, Self::from_env()?));
        layers.push((ConfigSource::Flags, flags));
        layers.sort_by_key(|(source, _)| source.priority());

        let config = layers
            .into_iter()
            .fold(Self::default(), |acc, (source, layer)| {
                debug!(?source, ?layer, "applying config layer");
                acc.merge(layer)
            });
        config.validate()?;
        Ok(config)
    }
}

/// Unset is `None`; a value that is not valid UTF-8 is an error
fn env_var(var: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidEnv {
            var,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() -> [(&'static str, Option<&'static str>); 4] {
        [
            (ENV_TEXTURE_PATH, None),
            (ENV_API_URL, None),
            (ENV_BASE_URL, None),
            (ENV_TIMEOUT_MS, None),
        ]
    }

    #[test]
    fn test_priority_order() {
        assert!(ConfigSource::Flags.priority() > ConfigSource::Env.priority());
        assert!(ConfigSource::Env.priority() > ConfigSource::File.priority());
        assert!(ConfigSource::File.priority() > ConfigSource::Default.priority());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apiUrl: /health\nbaseUrl: https://maps.example.com").unwrap();

        let config = DiagnosticConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_url(), "/health");
        assert_eq!(config.base_url.as_deref(), Some("https://maps.example.com"));
        assert!(config.texture_path.is_none());
    }

    #[test]
    fn test_from_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = DiagnosticConfig::from_file(file.path()).unwrap();
        assert_eq!(config, DiagnosticConfig::default());
    }

    #[test]
    fn test_from_file_unknown_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apiURL: /health").unwrap();

        let err = DiagnosticConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = DiagnosticConfig::from_file(&temp.path().join("doctor.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        temp_env::with_vars(
            [
                (ENV_TEXTURE_PATH, Some("/textures/a.png")),
                (ENV_API_URL, None),
                (ENV_BASE_URL, None),
                (ENV_TIMEOUT_MS, Some("2500")),
            ],
            || {
                let config = DiagnosticConfig::from_env().unwrap();
                assert_eq!(config.texture_path(), "/textures/a.png");
                assert!(config.api_url.is_none());
                assert_eq!(config.request_timeout_ms, Some(2500));
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_timeout() {
        temp_env::with_vars([(ENV_TIMEOUT_MS, Some("soon"))], || {
            let err = DiagnosticConfig::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidEnv {
                    var: ENV_TIMEOUT_MS,
                    ..
                }
            ));
        });
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_from_env_non_unicode_value() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/api/\xffstatus");
        temp_env::with_vars(clear_env(), || {
            temp_env::with_var(ENV_API_URL, Some(raw), || {
                let err = DiagnosticConfig::from_env().unwrap_err();
                assert!(matches!(
                    err,
                    ConfigError::InvalidEnv {
                        var: ENV_API_URL,
                        ..
                    }
                ));
            });
        });
    }

    #[test]
    #[serial]
    fn test_load_layering() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "texturePath: file.png\napiUrl: /file").unwrap();

        let mut vars = clear_env();
        vars[1] = (ENV_API_URL, Some("/env"));
        temp_env::with_vars(vars, || {
            let flags = DiagnosticConfig::new().with_texture_path("flag.png");
            let config = DiagnosticConfig::load(Some(file.path()), flags).unwrap();
            assert_eq!(config.texture_path(), "flag.png");
            assert_eq!(config.api_url(), "/env");
        });
    }

    #[test]
    #[serial]
    fn test_load_validates() {
        temp_env::with_vars(clear_env(), || {
            let flags = DiagnosticConfig::new().with_api_url(" ");
            let err = DiagnosticConfig::load(None, flags).unwrap_err();
            assert!(matches!(err, ConfigError::EmptyField("apiUrl")));
        });
    }
}
