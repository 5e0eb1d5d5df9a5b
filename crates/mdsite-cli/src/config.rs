//! Site configuration loaded from `mdsite.toml`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CliError;

/// Config file looked up in the working directory when none is given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "mdsite.toml";

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    pub paths: PathsConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct PathsConfig {
    /// Markdown sources.
    pub content: PathBuf,
    /// Files copied verbatim into the output.
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    /// Page template with `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
    /// Output directory, recreated on every build.
    pub public: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            template: PathBuf::from("template.html"),
            public: PathBuf::from("public"),
        }
    }
}

/// Path overrides taken from the command line.
#[derive(Debug, Default)]
pub(crate) struct PathOverrides {
    pub content: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub public: Option<PathBuf>,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// With no explicit path, `mdsite.toml` is used if present and defaults
    /// otherwise. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(CliError::io(path, e)),
        };

        Self::parse(&content).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, overrides: PathOverrides) -> Self {
        if let Some(content) = overrides.content {
            self.paths.content = content;
        }
        if let Some(static_dir) = overrides.static_dir {
            self.paths.static_dir = static_dir;
        }
        if let Some(template) = overrides.template {
            self.paths.template = template;
        }
        if let Some(public) = overrides.public {
            self.paths.public = public;
        }
        self
    }
}
