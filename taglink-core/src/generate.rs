//! Index page generation
//!
//! Produces a nested list of links from a [`Layout`]:
//!
//! ```html
//! <html>
//! <ul>
//! <li class="categoryName">{category}</li>
//! <ul>
//! 	<li><a href="{prefix}{file}">{phrase}</a></li>
//! </ul>
//! </ul>
//! </html>
//! ```

use crate::error::Error;
use crate::layout::{Layout, LayoutEntry};
use crate::resolver::Resolver;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// What to do with a layout entry whose symbol is not in the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    /// Keep the entry, linking to an empty href.
    #[default]
    EmptyLink,
    /// Leave the entry out of the page.
    Omit,
}

pub struct IndexPage<'a> {
    resolver: Resolver<'a>,
    layout: &'a Layout,
    link_prefix: String,
    unresolved: UnresolvedPolicy,
}

impl<'a> IndexPage<'a> {
    pub fn new(resolver: Resolver<'a>, layout: &'a Layout) -> Self {
        Self {
            resolver,
            layout,
            link_prefix: String::new(),
            unresolved: UnresolvedPolicy::default(),
        }
    }

    /// Prefix prepended verbatim to every resolved file path (e.g. `html/`).
    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = prefix.into();
        self
    }

    pub fn with_unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    /// Render the page. Fails only on alias-qualified symbols missing from the index.
    pub fn render(&self) -> Result<String, Error> {
        let mut out = String::new();
        out.push_str("<html>\n<ul>\n");
        for category in &self.layout.categories {
            let _ = writeln!(
                out,
                "<li class=\"categoryName\">{}</li>",
                escape_text(&category.name)
            );
            out.push_str("<ul>\n");
            for entry in &category.entries {
                if let Some(href) = self.href_for(entry)? {
                    let _ = writeln!(
                        out,
                        "\t<li><a href=\"{}\">{}</a></li>",
                        escape_attr(&href),
                        escape_text(&entry.phrase)
                    );
                }
            }
            out.push_str("</ul>\n");
        }
        out.push_str("</ul>\n</html>\n");
        Ok(out)
    }

    pub fn write_to<W: io::Write>(&self, out: &mut W) -> Result<(), Error> {
        let page = self.render()?;
        out.write_all(page.as_bytes())
            .map_err(|e| Error::io("<output>", e))
    }

    /// Render to `path`, creating parent directories as needed.
    pub fn render_to_path(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let page = self.render()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(path, page).map_err(|e| Error::io(path, e))?;
        info!(path = %path.display(), "wrote index page");
        Ok(())
    }

    /// `None` means the entry is dropped from the page.
    fn href_for(&self, entry: &LayoutEntry) -> Result<Option<String>, Error> {
        match self.resolver.resolve_or_warn(&entry.symbol)? {
            Some(file) => Ok(Some(format!("{}{}", self.link_prefix, file))),
            None => match self.unresolved {
                UnresolvedPolicy::EmptyLink => Ok(Some(String::new())),
                UnresolvedPolicy::Omit => Ok(None),
            },
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
