//! The assertion skeleton.
//!
//! A fixed template containing the assertion elements in schema order.
//! It is parsed once per process and cloned for every generation call.

use std::sync::OnceLock;

use xmltree::{Element, XMLNode};

use crate::error::{SamlError, SamlResult};

static SKELETON_XML: &str = include_str!("assertion.template.xml");

static SKELETON: OnceLock<Result<Element, String>> = OnceLock::new();

/// Returns a fresh copy of the assertion skeleton.
pub(crate) fn skeleton() -> SamlResult<Element> {
    let parsed = SKELETON.get_or_init(|| {
        Element::parse(SKELETON_XML.as_bytes())
            .map(|mut root| {
                strip_whitespace_nodes(&mut root);
                detach_inherited_namespaces(&mut root);
                root
            })
            .map_err(|e| e.to_string())
    });

    match parsed {
        Ok(root) => Ok(root.clone()),
        Err(message) => Err(SamlError::XmlParse(message.clone())),
    }
}

/// Drops whitespace-only text nodes left over from template indentation.
fn strip_whitespace_nodes(element: &mut Element) {
    element
        .children
        .retain(|node| !matches!(node, XMLNode::Text(text) if text.trim().is_empty()));
    for node in &mut element.children {
        if let XMLNode::Element(child) = node {
            strip_whitespace_nodes(child);
        }
    }
}

/// Clears the namespace maps the parser snapshots onto every element.
/// Left in place, the writer would re-declare them on each child; only
/// the root element may carry declarations.
fn detach_inherited_namespaces(element: &mut Element) {
    for node in &mut element.children {
        if let XMLNode::Element(child) = node {
            child.namespaces = None;
            detach_inherited_namespaces(child);
        }
    }
}
