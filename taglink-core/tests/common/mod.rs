use std::path::PathBuf;
use taglink_core::{IndexOptions, Namespace, SymbolIndex};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn cinder_index() -> SymbolIndex {
    SymbolIndex::from_path_with(fixture_path("cinder.tag"), &IndexOptions::default())
        .expect("fixture tag file to parse")
}

pub fn cinder_namespace() -> Namespace {
    Namespace::new("cinder").with_alias("ci")
}
