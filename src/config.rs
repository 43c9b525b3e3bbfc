use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const FALLBACK_LANGUAGE: &str = "en_US";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub personal_dictionary: Option<PathBuf>,

    /// Directory the documented sources were read from; relative file
    /// names in the documentation tree resolve against it.
    pub source_dir: Option<PathBuf>,

    pub max_suggestions: usize,

    /// Accept words made of several dictionary words run together.
    pub run_together: bool,
}

fn default_max_suggestions() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            personal_dictionary: None,
            source_dir: None,
            max_suggestions: default_max_suggestions(),
            run_together: true,
        }
    }
}

/// Language named by `LANG` without its encoding suffix (`en_US.UTF-8` -> `en_US`).
pub fn default_language() -> String {
    env::var("LANG")
        .ok()
        .and_then(|lang| lang.split('.').next().map(str::to_string))
        .filter(|lang| !lang.is_empty() && lang != "C" && lang != "POSIX")
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// One configuration file; keys it leaves out keep the value of the layer below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub language: Option<String>,
    pub personal_dictionary: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub max_suggestions: Option<usize>,
    pub run_together: Option<bool>,
}

/// Command-line values that take priority over configuration files.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub personal_dictionary: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub no_run_together: bool,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        let local_path = PathBuf::from(".docspell.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        if let Some(language) = overrides.language {
            config.language = language;
        }
        if let Some(dict) = overrides.personal_dictionary {
            config.personal_dictionary = Some(dict);
        }
        if let Some(dir) = overrides.source_dir {
            config.source_dir = Some(dir);
        }
        if overrides.no_run_together {
            config.run_together = false;
        }

        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        if let Some(path) = &config.personal_dictionary {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create personal dictionary directory")?;
            }
            if !path.exists() {
                fs::write(path, "").context("Failed to create personal dictionary file")?;
            }
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, layer: ConfigFile) -> Self {
        if let Some(language) = layer.language {
            self.language = language;
        }
        if let Some(dict) = layer.personal_dictionary {
            self.personal_dictionary = Some(dict);
        }
        if let Some(dir) = layer.source_dir {
            self.source_dir = Some(dir);
        }
        if let Some(max) = layer.max_suggestions {
            self.max_suggestions = max;
        }
        if let Some(run_together) = layer.run_together {
            self.run_together = run_together;
        }
        self
    }

    /// Source directory, falling back to the working directory.
    pub fn source_dir(&self) -> PathBuf {
        self.source_dir
            .clone()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        if let Some(dir) = env::var_os("DOCSPELL_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.toml"));
        }
        ProjectDirs::from("", "", "docspell").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        if let Some(dir) = env::var_os("DOCSPELL_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("personal.txt"));
        }
        ProjectDirs::from("", "", "docspell").map(|dirs| dirs.config_dir().join("personal.txt"))
    }

    /// Where compiled `.dict` word sets live. `DOCSPELL_DATA_DIR` wins.
    pub fn data_dir() -> Option<PathBuf> {
        if let Some(dir) = env::var_os("DOCSPELL_DATA_DIR") {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("", "", "docspell").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

/// Reads words for the personal word list.
///
/// With no argument the words come from `stdin`, whitespace separated. An
/// argument containing a comma is an inline list; anything else names a file.
pub fn read_word_list(source: Option<&str>, mut stdin: impl Read) -> Result<Vec<String>> {
    let text = match source {
        None | Some("") | Some("-") => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("Failed to read words from stdin")?;
            text
        }
        Some(list) if list.contains(',') => {
            return Ok(list
                .split(',')
                .map(str::trim)
                .filter(|word| !word.is_empty())
                .map(str::to_string)
                .collect());
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list: {}", path))?,
    };

    Ok(text.split_whitespace().map(str::to_string).collect())
}
