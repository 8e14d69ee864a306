use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Error;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub outline: OutlineConfig,
    pub json: JsonConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Outline,
    Json,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Format,
    /// Attach inline runs to prose blocks.
    pub runs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::Outline,
            runs: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Prefix written before every code line.
    pub code_gutter: String,
    #[serde(skip)]
    pub runs: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            code_gutter: "| ".to_string(),
            runs: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Outline settings with the output-level `runs` switch applied.
    pub fn outline(&self) -> OutlineConfig {
        OutlineConfig {
            runs: self.output.runs,
            ..self.outline.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("lessonmark.toml")).unwrap();
        assert_eq!(config.output.format, Format::Outline);
        assert!(config.output.runs);
        assert_eq!(config.outline.indent, 2);
        assert_eq!(config.outline.code_gutter, "| ");
        assert!(config.json.pretty);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lessonmark.toml");
        fs::write(&path, "[output]\nformat = \"json\"\n\n[outline]\nindent = 4\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output.format, Format::Json);
        assert!(config.output.runs);
        assert_eq!(config.outline.indent, 4);
        assert_eq!(config.outline.code_gutter, "| ");
    }

    #[test]
    fn runs_switch_reaches_outline() {
        let config: Config = toml::from_str("[output]\nruns = false\n").unwrap();
        assert!(!config.outline().runs);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lessonmark.toml");
        fs::write(&path, "[output\nformat = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("lessonmark.toml"));
    }

    #[test]
    fn unknown_format_is_an_error() {
        let result: Result<Config, _> = toml::from_str("[output]\nformat = \"html\"\n");
        assert!(result.is_err());
    }
}
