//! Marker rewriting (hand-written HTML → linked HTML)
//!
//! Hand-written pages reference classes with a marker element instead of a hard-coded link:
//!
//! ```html
//! <p>Upload it with a <d>gl::Texture2d</d>, or a <d dox="ci::gl::Fbo">framebuffer</d>.</p>
//! ```
//!
//! The lookup key is the key attribute when present, the element's text otherwise. Markers
//! that resolve become anchors; the rest are left untouched so the page still renders.
//!
//! Pipeline: HTML string → RcDom (html5ever) → in-place marker replacement → HTML string.
//! Because the output goes back through the html5ever serializer the markup is normalized
//! (`<html>`, `<head>` and `<body>` are always present). Anchors are never markers, so a second
//! pass over the output changes nothing.

use crate::error::Error;
use crate::resolver::Resolver;
use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_document, serialize, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, warn};

pub const DEFAULT_MARKER_TAG: &str = "d";
pub const DEFAULT_KEY_ATTRIBUTE: &str = "dox";

/// Result of rewriting one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub html: String,
    /// Markers turned into anchors.
    pub linked: usize,
    /// Markers left as they were because their symbol did not resolve.
    pub unresolved: usize,
}

pub struct MarkerRewriter<'a> {
    resolver: Resolver<'a>,
    link_base: String,
    marker_tag: String,
    key_attribute: String,
}

impl<'a> MarkerRewriter<'a> {
    pub fn new(resolver: Resolver<'a>) -> Self {
        Self {
            resolver,
            link_base: String::new(),
            marker_tag: DEFAULT_MARKER_TAG.to_string(),
            key_attribute: DEFAULT_KEY_ATTRIBUTE.to_string(),
        }
    }

    /// Path prepended to every resolved file (e.g. `../classes/`).
    pub fn with_link_base(mut self, base: impl Into<String>) -> Self {
        self.link_base = base.into();
        self
    }

    /// Element name of markers and the attribute carrying an explicit key.
    ///
    /// HTML element and attribute names are case-insensitive, so both are lowercased.
    pub fn with_marker(mut self, tag: &str, key_attribute: &str) -> Self {
        self.marker_tag = tag.to_ascii_lowercase();
        self.key_attribute = key_attribute.to_ascii_lowercase();
        self
    }

    pub fn rewrite_html(&self, source: &str) -> Result<Rewritten, Error> {
        let dom = parse_document(RcDom::default(), Default::default()).one(source);

        let mut counts = Counts::default();
        self.rewrite_children(&dom.document, &mut counts)?;

        let html = serialize_dom(&dom)?;
        Ok(Rewritten {
            html,
            linked: counts.linked,
            unresolved: counts.unresolved,
        })
    }

    /// Rewrite `input` into `output`, creating the output's parent directories.
    pub fn rewrite_file(&self, input: &Path, output: &Path) -> Result<Rewritten, Error> {
        let bytes = fs::read(input).map_err(|e| Error::io(input, e))?;
        let source = String::from_utf8(bytes)
            .map_err(|e| Error::parse(input, format!("not valid UTF-8: {}", e)))?;
        let rewritten = self.rewrite_html(&source)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(output, &rewritten.html).map_err(|e| Error::io(output, e))?;
        debug!(
            input = %input.display(),
            output = %output.display(),
            linked = rewritten.linked,
            unresolved = rewritten.unresolved,
            "rewrote page"
        );
        Ok(rewritten)
    }

    fn rewrite_children(&self, parent: &Handle, counts: &mut Counts) -> Result<(), Error> {
        let children: Vec<Handle> = parent.children.borrow().clone();
        for (position, child) in children.iter().enumerate() {
            self.rewrite_children(child, counts)?;

            let Some(key) = self.marker_key(child) else {
                continue;
            };
            if key.is_empty() {
                warn!("empty <{}> marker left unlinked", self.marker_tag);
                counts.unresolved += 1;
                continue;
            }
            match self.resolver.resolve_or_warn(&key)? {
                Some(file) => {
                    let href = format!("{}{}", self.link_base, file);
                    let anchor = self.anchor_from_marker(child, &href);
                    anchor.parent.set(Some(Rc::downgrade(parent)));
                    parent.children.borrow_mut()[position] = anchor;
                    counts.linked += 1;
                }
                None => counts.unresolved += 1,
            }
        }
        Ok(())
    }

    /// `Some(key)` when `node` is a marker element.
    fn marker_key(&self, node: &Handle) -> Option<String> {
        let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = node.data
        else {
            return None;
        };
        if &*name.local != self.marker_tag.as_str() {
            return None;
        }
        let explicit = attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == self.key_attribute.as_str())
            .map(|attr| attr.value.trim().to_string());
        Some(explicit.unwrap_or_else(|| text_content(node).trim().to_string()))
    }

    /// Build an `<a href>` that takes over the marker's children and remaining attributes.
    fn anchor_from_marker(&self, marker: &Handle, href: &str) -> Handle {
        let mut attributes = vec![Attribute {
            name: QualName::new(None, ns!(), LocalName::from("href")),
            value: href.to_string().into(),
        }];
        if let NodeData::Element { ref attrs, .. } = marker.data {
            attributes.extend(
                attrs
                    .borrow()
                    .iter()
                    .filter(|attr| {
                        let local = &*attr.name.local;
                        local != self.key_attribute.as_str() && local != "href"
                    })
                    .cloned(),
            );
        }

        let anchor = Rc::new(Node {
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
            data: NodeData::Element {
                name: QualName::new(None, ns!(html), LocalName::from("a")),
                attrs: RefCell::new(attributes),
                template_contents: Default::default(),
                mathml_annotation_xml_integration_point: false,
            },
        });

        let children = std::mem::take(&mut *marker.children.borrow_mut());
        let children = unwrap_anchors(children);
        for child in &children {
            child.parent.set(Some(Rc::downgrade(&anchor)));
        }
        *anchor.children.borrow_mut() = children;
        anchor
    }
}

/// Replace every `<a>` in `nodes` (at any depth) by its children.
///
/// Anchors cannot nest: a parser splits `<a><a>..</a></a>` apart, so a marker that wraps an
/// already linked marker must not produce one.
fn unwrap_anchors(nodes: Vec<Handle>) -> Vec<Handle> {
    let mut flattened = Vec::with_capacity(nodes.len());
    for node in nodes {
        let grandchildren = std::mem::take(&mut *node.children.borrow_mut());
        let grandchildren = unwrap_anchors(grandchildren);
        if is_anchor(&node) {
            flattened.extend(grandchildren);
        } else {
            for child in &grandchildren {
                child.parent.set(Some(Rc::downgrade(&node)));
            }
            *node.children.borrow_mut() = grandchildren;
            flattened.push(node);
        }
    }
    flattened
}

fn is_anchor(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { ref name, .. } if &*name.local == "a")
}

#[derive(Default)]
struct Counts {
    linked: usize,
    unresolved: usize,
}

fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Serialize the whole document, doctype included.
fn serialize_dom(dom: &RcDom) -> Result<String, Error> {
    let mut output = Vec::new();
    let document = SerializableHandle::from(dom.document.clone());
    serialize(&mut output, &document, Default::default())
        .map_err(|e| Error::parse("<html>", format!("HTML serialization failed: {}", e)))?;
    String::from_utf8(output)
        .map_err(|e| Error::parse("<html>", format!("UTF-8 conversion failed: {}", e)))
}
