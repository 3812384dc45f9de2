use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Which code blocks clear a pending ignore.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreConsumer {
    /// Only blocks in one of the target languages.
    #[default]
    Executable,
    /// Any code block, whatever its language.
    Any,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_shebang")]
    pub shebang: String,

    #[serde(default = "default_shell_options")]
    pub shell_options: String,

    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    #[serde(default)]
    pub ignore_consumer: IgnoreConsumer,

    #[serde(default = "default_executable")]
    pub executable: bool,
}

fn default_shebang() -> String {
    "#!/bin/bash".to_string()
}
fn default_shell_options() -> String {
    "set -e -x".to_string()
}
fn default_languages() -> Vec<String> {
    vec!["bash".to_string()]
}
fn default_executable() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shebang: default_shebang(),
            shell_options: default_shell_options(),
            languages: default_languages(),
            ignore_consumer: IgnoreConsumer::Executable,
            executable: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_target(&self, language: Option<&str>) -> bool {
        language.is_some_and(|lang| self.languages.iter().any(|l| l == lang))
    }
}
