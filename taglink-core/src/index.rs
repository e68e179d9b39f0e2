//! Symbol index built from a Doxygen tag file
//!
//! The tag file is a flat list of `<compound>` records, one per documented entity:
//!
//! ```xml
//! <tagfile>
//!   <compound kind="class">
//!     <name>cinder::gl::Texture</name>
//!     <filename>classcinder_1_1gl_1_1_texture.html</filename>
//!     <member kind="function">...</member>
//!   </compound>
//!   <compound kind="namespace">...</compound>
//! </tagfile>
//! ```
//!
//! Only compounds whose kind is listed in [`IndexOptions::kinds`] (just `class` by default)
//! end up in the index. Members and every other child element are ignored.

use crate::error::Error;
use quick_xml::de::{from_reader, from_str};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct TagFile {
    #[serde(rename = "compound", default)]
    compounds: Vec<Compound>,
}

#[derive(Debug, Deserialize)]
struct Compound {
    #[serde(rename = "@kind", default)]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    filename: Option<String>,
}

/// Controls which compounds are indexed and how file paths are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    pub kinds: Vec<String>,
    /// Append `.html` to file names that lack it (older Doxygen versions omit it).
    pub ensure_html_suffix: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            kinds: vec!["class".to_string()],
            ensure_html_suffix: false,
        }
    }
}

impl IndexOptions {
    fn indexes(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k == kind)
    }
}

/// Mapping from fully qualified symbol name to documentation file path.
///
/// Immutable once built; pass it by reference to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolIndex {
    entries: BTreeMap<String, String>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and index a tag file from disk with the default options.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_path_with(path, &IndexOptions::default())
    }

    pub fn from_path_with(path: impl AsRef<Path>, options: &IndexOptions) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let index = Self::from_reader(BufReader::new(file), path, options)?;
        debug!(path = %path.display(), symbols = index.len(), "loaded tag file");
        Ok(index)
    }

    /// Index a tag file from any buffered reader. `origin` is only used in error messages.
    pub fn from_reader<R: BufRead>(
        reader: R,
        origin: &Path,
        options: &IndexOptions,
    ) -> Result<Self, Error> {
        let tag_file: TagFile =
            from_reader(reader).map_err(|e| Error::parse(origin, e.to_string()))?;
        Ok(Self::from_compounds(tag_file.compounds, options))
    }

    /// Index tag file contents held in memory.
    pub fn parse(source: &str, options: &IndexOptions) -> Result<Self, Error> {
        let tag_file: TagFile =
            from_str(source).map_err(|e| Error::parse("<memory>", e.to_string()))?;
        Ok(Self::from_compounds(tag_file.compounds, options))
    }

    fn from_compounds(compounds: Vec<Compound>, options: &IndexOptions) -> Self {
        let mut index = Self::new();
        for compound in compounds {
            if !options.indexes(&compound.kind) {
                continue;
            }
            let name = compound.name.map(|n| n.trim().to_string());
            let filename = compound.filename.map(|f| f.trim().to_string());
            match (name, filename) {
                (Some(name), Some(filename)) if !name.is_empty() && !filename.is_empty() => {
                    let filename = if options.ensure_html_suffix && !filename.ends_with(".html") {
                        format!("{}.html", filename)
                    } else {
                        filename
                    };
                    index.insert(name, filename);
                }
                (name, _) => {
                    warn!(
                        kind = %compound.kind,
                        name = name.as_deref().unwrap_or("<unnamed>"),
                        "skipping compound without name or filename"
                    );
                }
            }
        }
        index
    }

    /// Add or replace a mapping. Later entries win, matching tag files with duplicates.
    pub fn insert(&mut self, name: impl Into<String>, file: impl Into<String>) {
        self.entries.insert(name.into(), file.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by symbol name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SymbolIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (name, file) in iter {
            index.insert(name, file);
        }
        index
    }
}
