//! Settings file support (`config.toml`).
//!
//! ```toml
//! [compare]
//! consider_row_gaps = true
//! consider_column_gaps = false
//!
//! [report]
//! detail = true
//! format = "json"
//! ```

use clap::ValueEnum;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use griddiff_core::DiffConfig;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub compare: CompareSection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareSection {
    pub consider_row_gaps: Option<bool>,
    pub consider_column_gaps: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    pub detail: Option<bool>,
    pub format: Option<OutputFormat>,
}

/// Effective settings after the file and the command line are merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub diff: DiffConfig,
    pub detail: bool,
    pub format: OutputFormat,
}

/// Command-line values; `None` defers to the file, then to defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overrides {
    pub consider_row_gaps: Option<bool>,
    pub consider_column_gaps: Option<bool>,
    pub detail: Option<bool>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    pub fn resolve(file: &ConfigFile, overrides: &Overrides) -> Settings {
        let defaults = DiffConfig::default();
        Settings {
            diff: DiffConfig {
                consider_row_gaps: overrides
                    .consider_row_gaps
                    .or(file.compare.consider_row_gaps)
                    .unwrap_or(defaults.consider_row_gaps),
                consider_column_gaps: overrides
                    .consider_column_gaps
                    .or(file.compare.consider_column_gaps)
                    .unwrap_or(defaults.consider_column_gaps),
            },
            detail: overrides.detail.or(file.report.detail).unwrap_or(false),
            format: overrides.format.or(file.report.format).unwrap_or_default(),
        }
    }
}

/// Read the settings file. An explicit `config_file` wins over the user config directory.
/// Problems are reported as warnings and leave the defaults in place.
pub fn load_config(config_file: Option<&Path>) -> (ConfigFile, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.map(Path::to_path_buf).or_else(user_config_path) else {
        return (ConfigFile::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (ConfigFile::default(), warnings);
    }

    let parsed = match std::fs::metadata(&path) {
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
            Ok(content) => match toml::from_str::<ConfigFile>(&content) {
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

    (parsed.unwrap_or_default(), warnings)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "griddiff")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> ConfigFile {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::resolve(&ConfigFile::default(), &Overrides::default());
        assert_eq!(
            settings,
            Settings {
                diff: DiffConfig::default(),
                detail: false,
                format: OutputFormat::Text,
            }
        );
    }

    #[test]
    fn test_file_values_apply() {
        let file = parse(
            "[compare]\nconsider_column_gaps = true\n\n[report]\ndetail = true\nformat = \"json\"\n",
        );
        let settings = Settings::resolve(&file, &Overrides::default());
        assert!(settings.diff.consider_row_gaps);
        assert!(settings.diff.consider_column_gaps);
        assert!(settings.detail);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_command_line_overrides_file() {
        let file = parse("[compare]\nconsider_row_gaps = true\n");
        let overrides = Overrides {
            consider_row_gaps: Some(false),
            ..Overrides::default()
        };
        assert!(!Settings::resolve(&file, &overrides).diff.consider_row_gaps);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<ConfigFile>("[compare]\nrow_gaps = true\n").is_err());
        assert!(toml::from_str::<ConfigFile>("[colors]\n").is_err());
    }

    #[test]
    fn test_load_reports_bad_file_as_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[compare\n").unwrap();

        let (file, warnings) = load_config(Some(path.as_path()));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse"));
        assert!(file.compare.consider_row_gaps.is_none());
    }

    #[test]
    fn test_load_missing_explicit_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let (_, warnings) = load_config(Some(dir.path().join("nope.toml").as_path()));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Config file not found"));
    }
}
