//! Shared configuration loader for the taglink toolchain.
//!
//! `defaults/taglink.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`TaglinkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use taglink_core::{IndexOptions, Namespace, UnresolvedPolicy};

const DEFAULT_TOML: &str = include_str!("../defaults/taglink.default.toml");

/// Top-level configuration consumed by taglink applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TaglinkConfig {
    pub index: IndexConfig,
    pub namespace: NamespaceConfig,
    pub generate: GenerateConfig,
    pub rewrite: RewriteConfig,
}

/// Where the tag file lives and which compounds to read from it.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    pub tag_file: PathBuf,
    pub kinds: Vec<String>,
    pub ensure_html_suffix: bool,
}

impl IndexConfig {
    pub fn options(&self) -> IndexOptions {
        IndexOptions {
            kinds: self.kinds.clone(),
            ensure_html_suffix: self.ensure_html_suffix,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamespaceConfig {
    pub name: String,
    pub aliases: Vec<String>,
}

impl NamespaceConfig {
    pub fn namespace(&self) -> Namespace {
        self.aliases
            .iter()
            .fold(Namespace::new(self.name.clone()), |ns, alias| {
                ns.with_alias(alias.clone())
            })
    }
}

/// Index page generation knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateConfig {
    pub layout_file: PathBuf,
    pub link_prefix: String,
    pub output: PathBuf,
    pub unresolved: Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unresolved {
    EmptyLink,
    Omit,
}

impl From<Unresolved> for UnresolvedPolicy {
    fn from(value: Unresolved) -> Self {
        match value {
            Unresolved::EmptyLink => UnresolvedPolicy::EmptyLink,
            Unresolved::Omit => UnresolvedPolicy::Omit,
        }
    }
}

/// Marker rewriting knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RewriteConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub link_base: String,
    pub marker_tag: String,
    pub key_attribute: String,
}

/// File picked up from the project directory when present.
pub const PROJECT_FILE: &str = "taglink.toml";

/// Layers, lowest priority first: embedded defaults, the project's `taglink.toml`, an explicit
/// config file, then per-key overrides coming from command-line flags.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Defaults plus `<dir>/taglink.toml` if that file exists.
    pub fn for_project(dir: impl AsRef<Path>) -> Self {
        Self::new().with_source(dir.as_ref().join(PROJECT_FILE), false)
    }

    /// Layer a config file the user asked for explicitly; a missing file is an error.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(path.as_ref(), true)
    }

    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(path.as_ref(), false)
    }

    fn with_source(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply a batch of `section.key = value` overrides, e.g. collected from CLI flags.
    pub fn with_overrides<'k, I>(self, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'k str, String)>,
    {
        overrides
            .into_iter()
            .try_fold(self, |loader, (key, value)| loader.set_override(key, value))
    }

    /// Merge every layer and check the values the rest of the toolchain relies on.
    pub fn build(self) -> Result<TaglinkConfig, ConfigError> {
        let config: TaglinkConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl TaglinkConfig {
    /// Reject settings that would make every lookup or rewrite silently do nothing.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.name.trim().is_empty() {
            return Err(ConfigError::Message("namespace.name must not be empty".into()));
        }
        if let Some(alias) = self.namespace.aliases.iter().find(|a| a.trim().is_empty()) {
            return Err(ConfigError::Message(format!(
                "namespace.aliases contains an empty alias: {:?}",
                alias
            )));
        }
        if self.index.kinds.is_empty() {
            return Err(ConfigError::Message(
                "index.kinds must list at least one compound kind".into(),
            ));
        }
        if self.rewrite.marker_tag.trim().is_empty() {
            return Err(ConfigError::Message("rewrite.marker_tag must not be empty".into()));
        }
        if self.rewrite.key_attribute.trim().is_empty() {
            return Err(ConfigError::Message(
                "rewrite.key_attribute must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TaglinkConfig, ConfigError> {
    Loader::new().build()
}
