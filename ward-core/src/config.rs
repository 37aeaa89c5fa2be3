use crate::dates::Normalizer;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where the JSON tables live.
    pub data_dir: PathBuf,
    /// Moment treated as "now": the past-appointment check and the dashboard's
    /// "today" are measured against it. Stamped from the local clock on load.
    pub reference_time: NaiveDateTime,
    /// Format of `from`/`to` listing boundaries. Default is "%Y-%m-%d".
    pub boundary_date_format: String,
    /// Format used to print timestamps. Default is "%Y-%m-%d %H:%M".
    pub display_datetime_format: String,
    /// Replaces the built-in template list of the date-time normalizer.
    pub input_datetime_formats: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    boundary_date_format: Option<String>,
    display_datetime_format: Option<String>,
    input_datetime_formats: Option<Vec<String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|error| {
            warn!(%error, "ignoring unreadable config file");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        Self {
            data_dir: file_config.data_dir.unwrap_or_else(Self::default_data_dir),
            reference_time: Local::now().naive_local(),
            boundary_date_format: file_config
                .boundary_date_format
                .unwrap_or_else(|| "%Y-%m-%d".to_string()),
            display_datetime_format: file_config
                .display_datetime_format
                .unwrap_or_else(|| "%Y-%m-%d %H:%M".to_string()),
            input_datetime_formats: file_config
                .input_datetime_formats
                .filter(|formats| !formats.is_empty()),
        }
    }

    /// Date-time normalizer using the configured templates, if any.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.input_datetime_formats.clone())
    }

    /// Default data root: `{data_dir}/ward`
    /// - macOS:   `~/Library/Application Support/ward`
    /// - Linux:   `$XDG_DATA_HOME/ward` or `~/.local/share/ward`
    /// - Windows: `%APPDATA%\ward`
    fn default_data_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            base.data_dir().join("ward")
        } else {
            PathBuf::from("./ward")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            v.push(b.home_dir().join(".config").join("ward").join("config.toml"));
            v.push(b.config_dir().join("ward").join("config.toml"));
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            debug!(path = %path.display(), "reading config");
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b.home_dir().join(".config").join("ward").join("config.toml");
            let expected_native = b.config_dir().join("ward").join("config.toml");
            let c = Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_all_keys() {
        let toml = r#"
            data_dir = "/tmp/ward-data"
            boundary_date_format = "%d/%m/%Y"
            display_datetime_format = "%d %b %Y %H:%M"
            input_datetime_formats = ["%d/%m/%Y %H:%M"]
        "#;
        let fc = Config::parse_file(toml).unwrap();
        assert_eq!(fc.data_dir.as_deref(), Some(Path::new("/tmp/ward-data")));

        let config = Config::from_file_config(fc);
        assert_eq!(config.boundary_date_format, "%d/%m/%Y");
        assert_eq!(config.display_datetime_format, "%d %b %Y %H:%M");
        assert_eq!(
            config.input_datetime_formats,
            Some(vec!["%d/%m/%Y %H:%M".to_string()])
        );
        assert!(config.normalizer().normalize("15/03/2024 09:30").is_ok());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_file_config(Config::parse_file("").unwrap());
        assert_eq!(config.boundary_date_format, "%Y-%m-%d");
        assert_eq!(config.display_datetime_format, "%Y-%m-%d %H:%M");
        assert!(config.input_datetime_formats.is_none());
        assert!(config.data_dir.ends_with("ward"));
    }

    #[test]
    fn empty_format_list_falls_back_to_builtin() {
        let fc = Config::parse_file("input_datetime_formats = []").unwrap();
        assert!(Config::from_file_config(fc).input_datetime_formats.is_none());
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(Config::parse_file("data_dir = 42").is_err());
    }
}
