//! Index page generation from the fixture tag file and layout

mod common;

use common::{cinder_index, cinder_namespace, fixture_path};
use taglink_core::{IndexPage, Layout, Resolver, UnresolvedPolicy};

#[test]
fn cinder_index_page() {
    let index = cinder_index();
    let namespace = cinder_namespace();
    let layout = Layout::from_path(fixture_path("class_layout.txt")).unwrap();

    let html = IndexPage::new(Resolver::new(&index, &namespace), &layout)
        .with_link_prefix("html/")
        .render()
        .unwrap();

    insta::assert_snapshot!(html);
}

#[test]
fn tag_file_has_one_entry_per_class() {
    let index = cinder_index();
    assert_eq!(index.len(), 5);
    assert!(!index.contains("cinder::Area"));
    assert!(!index.contains("cinder::gl"));
}

#[test]
fn omitting_unresolved_entries_drops_them_from_the_page() {
    let index = cinder_index();
    let namespace = cinder_namespace();
    let layout = Layout::from_path(fixture_path("class_layout.txt")).unwrap();

    let html = IndexPage::new(Resolver::new(&index, &namespace), &layout)
        .with_unresolved(UnresolvedPolicy::Omit)
        .render()
        .unwrap();

    assert!(!html.contains("Shaders"));
    assert!(html.contains("<a href=\"classcinder_1_1gl_1_1_fbo.html\">Framebuffers</a>"));
}

#[test]
fn writes_page_into_missing_directory() {
    let index = cinder_index();
    let namespace = cinder_namespace();
    let layout = Layout::parse("[Basics]\nVector class Vec3\n");
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("html").join("index.html");

    IndexPage::new(Resolver::new(&index, &namespace), &layout)
        .with_link_prefix("html/")
        .render_to_path(&target)
        .unwrap();

    let html = std::fs::read_to_string(target).unwrap();
    assert!(html.contains("<a href=\"html/classcinder_1_1_vec3.html\">Vector class</a>"));
}
