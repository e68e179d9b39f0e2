//! Links hand-written documentation to generated class docs
//!
//!     This crate reads the tag file a documentation generator (Doxygen) writes next to its
//!     output, and uses the class → file mapping in it for two jobs:
//!
//!     - Building an index page from a curated layout file, grouping classes into categories.
//!     - Rewriting marker elements in hand-written HTML pages (`<d>Texture</d>`) into links
//!       pointing at the generated page for that class.
//!
//!     This is a pure lib, that is, it powers taglink-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it printing to stdout, env vars or exit codes.
//!     Diagnostics go through `tracing`, the binary decides where they end up.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs        # Error taxonomy shared by every stage
//!     ├── index.rs        # SymbolIndex: tag file → name/file map
//!     ├── resolver.rs     # Namespace-aware lookups against the index
//!     ├── layout.rs       # Category layout file parser
//!     ├── generate.rs     # Index page generator
//!     ├── rewrite.rs      # Marker → anchor rewriting on an html5ever DOM
//!     ├── publish.rs      # Directory walk: rewrite html, copy everything else
//!     └── lib.rs
//!
//!     The index is built once and passed explicitly to whatever needs it. The generator and
//!     the rewriter are independent entry points; neither calls the other.
//!
//! Resolution
//!
//!     Hand-written docs qualify names inconsistently: `ci::gl::Texture`, `cinder::gl::Texture`
//!     and `gl::Texture` all mean the same class. The resolver normalizes the three forms, see
//!     [resolver::Resolver::resolve] for the exact order.
//!
//!     A lookup that misses is not an error. It is reported as a warning and the caller decides
//!     whether to emit an empty link, omit the entry, or leave the marker as is.
//!
pub mod error;
pub mod generate;
pub mod index;
pub mod layout;
pub mod publish;
pub mod resolver;
pub mod rewrite;

pub use error::Error;
pub use generate::{IndexPage, UnresolvedPolicy};
pub use index::{IndexOptions, SymbolIndex};
pub use layout::{Category, Layout, LayoutEntry};
pub use publish::{publish_tree, PublishReport};
pub use resolver::{Namespace, Resolver};
pub use rewrite::{MarkerRewriter, Rewritten};
