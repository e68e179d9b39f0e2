//! Whole-tree publishing
//!
//! Walks a source directory, rewriting every `.html` page and copying everything else byte for
//! byte. The output directory is flat: `src/guide/intro.html` lands at `out/intro.html`.
//!
//! Two sources with the same file name would land on the same target; the first one wins and
//! the later ones are reported as failures. Publishing a tree onto itself is allowed: pages are
//! rewritten in place and other files are left untouched.
//!
//! A file that fails (unreadable, not UTF-8, unknown aliased symbol, ...) is logged and
//! recorded in the report; the walk goes on with the next file.

use crate::error::Error;
use crate::rewrite::MarkerRewriter;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// What happened during a [`publish_tree`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Pages written through the rewriter.
    pub rewritten: Vec<PathBuf>,
    /// Files copied unchanged.
    pub copied: Vec<PathBuf>,
    /// Source files that could not be processed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl PublishReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

fn is_html(path: &Path) -> bool {
    path.extension().map(|ext| ext == "html").unwrap_or(false)
}

/// Publish `source_dir` into `output_dir`.
///
/// Only setting up the walk can fail as a whole: a missing source directory is
/// [`Error::NotFound`], an output directory that cannot be created is [`Error::Io`].
pub fn publish_tree(
    rewriter: &MarkerRewriter<'_>,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<PublishReport, Error> {
    if !source_dir.is_dir() {
        return Err(Error::NotFound {
            path: source_dir.to_path_buf(),
        });
    }
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let mut report = PublishReport::default();
    let mut entries: Vec<_> = Vec::new();
    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => entries.push(entry.into_path()),
            Ok(_) => {}
            Err(err) => {
                let path = err.path().unwrap_or(source_dir).to_path_buf();
                warn!(path = %path.display(), "skipping unreadable entry: {}", err);
                report.failed.push((path, err.to_string()));
            }
        }
    }

    let output_root = fs::canonicalize(output_dir).map_err(|e| Error::io(output_dir, e))?;
    // target (canonical) → source that claimed it
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

    for path in entries {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let target = output_dir.join(file_name);
        let canonical_target = output_root.join(file_name);
        if let Some(first) = claimed.get(&canonical_target) {
            let reason = format!(
                "duplicate output name {}, already written from {}",
                target.display(),
                first.display()
            );
            warn!(path = %path.display(), "{}", reason);
            report.failed.push((path, reason));
            continue;
        }
        claimed.insert(canonical_target.clone(), path.clone());

        let in_place = fs::canonicalize(&path)
            .map(|source| source == canonical_target)
            .unwrap_or(false);
        let outcome = if is_html(&path) {
            rewriter.rewrite_file(&path, &target).map(|_| true)
        } else if in_place {
            // fs::copy onto itself would truncate the file
            Ok(false)
        } else {
            fs::copy(&path, &target)
                .map(|_| false)
                .map_err(|e| Error::io(&path, e))
        };
        match outcome {
            Ok(true) => report.rewritten.push(target),
            Ok(false) => report.copied.push(target),
            Err(err) => {
                warn!(path = %path.display(), "failed to publish: {}", err);
                report.failed.push((path, err.to_string()));
            }
        }
    }

    info!(
        rewritten = report.rewritten.len(),
        copied = report.copied.len(),
        failed = report.failed.len(),
        "published {}",
        source_dir.display()
    );
    Ok(report)
}
