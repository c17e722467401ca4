use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use stacksheet_core::DEFAULT_PRECISION;

const MAX_CONFIG_FILE_BYTES: u64 = 65_536; // 64 KiB
/// Beyond this `f64` output carries no more information.
pub(crate) const MAX_PRECISION: usize = 17;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    precision: Option<usize>,
}

/// Settings resolved from the config file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
    /// Decimal places printed for each value.
    pub precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            precision: DEFAULT_PRECISION,
        }
    }
}

pub(crate) fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "stacksheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load settings from `explicit`, or from the default location.
///
/// Never fails: problems are returned as warnings and defaults are used.
/// A missing default file is not worth a warning.
pub(crate) fn load_config(explicit: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => return (Config::default(), warnings),
        },
    };

    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let file = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match parse_config(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    let mut config = Config::default();
    if let Some(precision) = file.and_then(|f| f.precision) {
        if precision > MAX_PRECISION {
            warnings.push(format!(
                "precision {} in {} is above {}; using {}",
                precision,
                path.display(),
                MAX_PRECISION,
                MAX_PRECISION
            ));
        }
        config.precision = precision.min(MAX_PRECISION);
    }
    (config, warnings)
}

fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str::<ConfigFile>(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "stacksheet_{}_{}.toml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn default_config_path_is_deterministic() {
        // Should never panic and should either be Some(path) or None.
        let _ = default_config_path();
    }

    #[test]
    fn test_parse_config() {
        assert_eq!(parse_config("precision = 3").unwrap().precision, Some(3));
        assert_eq!(parse_config("").unwrap().precision, None);
        assert!(parse_config("colour = true").is_err());
    }

    #[test]
    fn test_load_explicit_config() {
        let path = temp_config("explicit", "precision = 2\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config.precision, 2);
        assert!(warnings.is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_explicit_config_warns() {
        let path = std::env::temp_dir().join("stacksheet_definitely_missing.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_bad_config_falls_back_to_defaults() {
        let path = temp_config("bad", "precision = \"six\"\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert!(warnings[0].starts_with("Failed to parse"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_precision_is_clamped() {
        let path = temp_config("clamp", "precision = 40\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config.precision, MAX_PRECISION);
        assert_eq!(warnings.len(), 1);
        let _ = std::fs::remove_file(path);
    }
}
