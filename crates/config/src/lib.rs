//! Configuration loading and validation.
//!
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults (the file names the Goodreads export uses),
//! 2. a configuration file: TOML, YAML or JSON picked by extension, either
//!    given explicitly or found at the platform config directory
//!    (`~/.config/folio/config.toml` on Linux),
//! 3. environment variables prefixed `FOLIO_`, nested keys separated by `__`
//!    (`FOLIO_EXPORT__OUTPUT=Notes`).
//!
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! input = "goodreads_library_export.csv"
//!
//! [export]
//! output = "Goodreads Library"
//! ids = "libraryIds.txt"
//! book_template = "Books/{{ name }}"
//! author_template = "Authors/{{ name }}"
//! extension = "md"
//! conflicts = "fail"
//! concurrency = 16
//! ```

pub mod error;

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

pub const ENV_PREFIX: &str = "FOLIO_";
pub const DEFAULT_INPUT: &str = "goodreads_library_export.csv";
pub const DEFAULT_OUTPUT: &str = "Goodreads Library";
pub const DEFAULT_IDS: &str = "libraryIds.txt";
pub const DEFAULT_TEMPLATE: &str = "{{ name }}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Goodreads library export (CSV).
    pub input: PathBuf,
    pub export: ExportConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            export: ExportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the notes are written to. Created if missing.
    pub output: PathBuf,
    /// File receiving the list of exported book IDs.
    pub ids: PathBuf,
    /// Note path template for books, without extension.
    pub book_template: String,
    /// Note path template for authors, without extension.
    pub author_template: String,
    pub extension: String,
    /// What to do when two notes end up with the same path.
    pub conflicts: ConflictPolicy,
    /// Maximum number of notes written at the same time.
    pub concurrency: usize,
}
impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            ids: PathBuf::from(DEFAULT_IDS),
            book_template: DEFAULT_TEMPLATE.to_string(),
            author_template: DEFAULT_TEMPLATE.to_string(),
            extension: "md".to_string(),
            conflicts: ConflictPolicy::default(),
            concurrency: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Abort the export before anything is written.
    #[default]
    Fail,
    /// Keep the note planned last for the path.
    Overwrite,
}

impl Config {
    /// Platform specific location of the configuration file, if the platform
    /// has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "folio").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads the layered configuration.
    ///
    /// An explicit `path` must exist; the default location is optional.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) if !path.exists() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };
        if let Some(path) = &path {
            tracing::debug!(path = %path.display(), "Loading configuration file");
        }
        let config: Self = Self::figment(path.as_deref()).extract().or_raise(|| ErrorKind::Load)?;
        config.validate()
    }

    /// The provider stack [`load`](Self::load) extracts from.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
            figment = match extension.as_deref() {
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(self) -> Result<Self> {
        if self.export.extension.trim_matches('.').trim().is_empty() {
            exn::bail!(ErrorKind::Invalid {
                field: "export.extension",
                reason: "must not be empty".to_string(),
            });
        }
        if self.export.concurrency == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "export.concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        for (field, template) in
            [("export.book_template", &self.export.book_template), ("export.author_template", &self.export.author_template)]
        {
            if template.trim().is_empty() {
                exn::bail!(ErrorKind::Invalid {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(self)
    }
}
