//! Subcommand handlers
//!
//! Each handler loads the tag file once, builds the resolver from the configured namespace and
//! hands both to the library. Nothing here prints directly except through `tracing`.

use std::path::{Path, PathBuf};
use taglink_config::{RewriteConfig, TaglinkConfig};
use taglink_core::{
    publish_tree, Error, IndexPage, Layout, MarkerRewriter, Resolver, SymbolIndex,
};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The run finished but some files could not be processed.
    PartialFailure,
}

/// What `taglink rewrite` should do for a given set of positional paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteJob {
    Tree { source: PathBuf, output: PathBuf },
    File { input: PathBuf, output: PathBuf },
}

/// Map 0, 1 or 2 positional paths onto a job.
///
/// - none: the configured source tree into the configured output directory
/// - a directory, optionally with a target directory: that tree
/// - a file alone: the file, written under the configured output directory
/// - a file and a target: that file into that target
pub fn plan_rewrite(
    input: Option<&Path>,
    output: Option<&Path>,
    config: &RewriteConfig,
) -> Result<RewriteJob, Error> {
    let Some(input) = input else {
        return Ok(RewriteJob::Tree {
            source: config.source_dir.clone(),
            output: output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| config.output_dir.clone()),
        });
    };

    if input.is_dir() {
        return Ok(RewriteJob::Tree {
            source: input.to_path_buf(),
            output: output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| config.output_dir.clone()),
        });
    }

    let output = match output {
        Some(output) => output.to_path_buf(),
        None => {
            let name = input.file_name().ok_or_else(|| Error::InvalidPath {
                path: input.to_path_buf(),
                reason: "has no file name to write under the output directory".to_string(),
            })?;
            config.output_dir.join(name)
        }
    };
    Ok(RewriteJob::File {
        input: input.to_path_buf(),
        output,
    })
}

fn load_index(config: &TaglinkConfig) -> Result<SymbolIndex, Error> {
    let index = SymbolIndex::from_path_with(&config.index.tag_file, &config.index.options())?;
    info!(
        "indexed {} symbols from {}",
        index.len(),
        config.index.tag_file.display()
    );
    Ok(index)
}

/// Handle the index command
pub fn handle_index_command(config: &TaglinkConfig) -> Result<Outcome, Error> {
    let index = load_index(config)?;
    let namespace = config.namespace.namespace();
    let layout = Layout::from_path(&config.generate.layout_file)?;

    IndexPage::new(Resolver::new(&index, &namespace), &layout)
        .with_link_prefix(config.generate.link_prefix.clone())
        .with_unresolved(config.generate.unresolved.into())
        .render_to_path(&config.generate.output)?;

    Ok(Outcome::Success)
}

/// Handle the rewrite command
pub fn handle_rewrite_command(
    config: &TaglinkConfig,
    input: Option<&str>,
    output: Option<&str>,
) -> Result<Outcome, Error> {
    let job = plan_rewrite(input.map(Path::new), output.map(Path::new), &config.rewrite)?;

    let index = load_index(config)?;
    let namespace = config.namespace.namespace();
    let rewriter = MarkerRewriter::new(Resolver::new(&index, &namespace))
        .with_link_base(config.rewrite.link_base.clone())
        .with_marker(&config.rewrite.marker_tag, &config.rewrite.key_attribute);

    match job {
        RewriteJob::File { input, output } => {
            let rewritten = rewriter.rewrite_file(&input, &output)?;
            info!(
                "{} → {} ({} linked, {} unresolved)",
                input.display(),
                output.display(),
                rewritten.linked,
                rewritten.unresolved
            );
            Ok(Outcome::Success)
        }
        RewriteJob::Tree { source, output } => {
            let report = publish_tree(&rewriter, &source, &output)?;
            if report.is_success() {
                Ok(Outcome::Success)
            } else {
                for (path, reason) in &report.failed {
                    warn!("not published: {} ({})", path.display(), reason);
                }
                Ok(Outcome::PartialFailure)
            }
        }
    }
}
