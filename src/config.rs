//! Run configuration for the batch converter.
//!
//! Directories and the layout-dump switch can come from an optional JSON (or
//! JSON5) file and are then overridden by command-line flags. Spacing and
//! styles are fixed and only reachable through the library API.

use crate::layout::LayoutConfig;
use crate::theme::Theme;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_DIR: &str = "./xmindInput";
pub const DEFAULT_OUTPUT_DIR: &str = "./drawioOutput";

#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Write a `<name>.layout.json` dump next to every output.
    pub dump_layout: bool,
    pub layout: LayoutConfig,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dump_layout: false,
            layout: LayoutConfig::default(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    dump_layout: Option<bool>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    let parsed = parse_config_file(&contents)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    if let Some(dir) = parsed.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = parsed.output_dir {
        config.output_dir = dir;
    }
    if let Some(dump) = parsed.dump_layout {
        config.dump_layout = dump;
    }
    Ok(config)
}

// Plain JSON first; JSON5 allows comments and trailing commas.
fn parse_config_file(contents: &str) -> anyhow::Result<ConfigFile> {
    match serde_json::from_str(contents) {
        Ok(parsed) => Ok(parsed),
        Err(json_err) => json5::from_str(contents).map_err(|_| json_err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.input_dir, Path::new(DEFAULT_INPUT_DIR));
        assert_eq!(config.output_dir, Path::new(DEFAULT_OUTPUT_DIR));
        assert!(!config.dump_layout);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn file_overrides_directories() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "inputDir": "maps", "outputDir": "diagrams", "dumpLayout": true }}"#
        )
        .unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.input_dir, Path::new("maps"));
        assert_eq!(config.output_dir, Path::new("diagrams"));
        assert!(config.dump_layout);
    }

    #[test]
    fn json5_comments_are_accepted() {
        let parsed = parse_config_file(
            r#"{
                // where the maps live
                inputDir: "maps",
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.input_dir.as_deref(), Some(Path::new("maps")));
        assert!(parsed.output_dir.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config_file(r#"{ "xSpacing": 10 }"#).is_err());
    }
}
