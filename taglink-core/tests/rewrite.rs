//! Marker rewriting, single file and whole tree

mod common;

use common::{cinder_index, cinder_namespace, fixture_path};
use std::fs;
use taglink_core::{publish_tree, MarkerRewriter, Resolver};

#[test]
fn rewrites_fixture_page() {
    let index = cinder_index();
    let namespace = cinder_namespace();
    let rewriter =
        MarkerRewriter::new(Resolver::new(&index, &namespace)).with_link_base("classes/");
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("intro.html");

    let result = rewriter
        .rewrite_file(&fixture_path("htmlsrc/guide/intro.html"), &target)
        .unwrap();

    assert_eq!(result.linked, 3);
    assert_eq!(result.unresolved, 1);
    let html = fs::read_to_string(target).unwrap();
    assert!(html.contains("<a href=\"classes/classcinder_1_1_vec3.html\">Vec3</a>"));
    assert!(html.contains("<a href=\"classes/classcinder_1_1_surface8u.html\">surface</a>"));
    assert!(html.contains(
        "<a href=\"classes/classcinder_1_1gl_1_1_texture2d.html\">gl::Texture2d</a>"
    ));
    assert!(html.contains("<d>Quaternion</d>"));
    assert!(html.contains("<title>Getting started</title>"));
}

#[test]
fn publishes_html_and_copies_assets() {
    let index = cinder_index();
    let namespace = cinder_namespace();
    let rewriter = MarkerRewriter::new(Resolver::new(&index, &namespace)).with_link_base("../");
    let out = tempfile::tempdir().unwrap();

    let report = publish_tree(&rewriter, &fixture_path("htmlsrc"), out.path()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.rewritten.len(), 1);
    assert_eq!(report.copied.len(), 1);

    let html = fs::read_to_string(out.path().join("intro.html")).unwrap();
    assert!(html.contains("<a href=\"../classcinder_1_1_vec3.html\">Vec3</a>"));

    let original = fs::read(fixture_path("htmlsrc/guide/logo.png")).unwrap();
    let copied = fs::read(out.path().join("logo.png")).unwrap();
    assert_eq!(original, copied);
}

#[test]
fn published_output_is_stable_under_a_second_pass() {
    let index = cinder_index();
    let namespace = cinder_namespace();
    let rewriter = MarkerRewriter::new(Resolver::new(&index, &namespace));
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    publish_tree(&rewriter, &fixture_path("htmlsrc"), first.path()).unwrap();
    let report = publish_tree(&rewriter, first.path(), second.path()).unwrap();

    assert!(report.is_success());
    assert_eq!(
        fs::read_to_string(first.path().join("intro.html")).unwrap(),
        fs::read_to_string(second.path().join("intro.html")).unwrap()
    );
}
