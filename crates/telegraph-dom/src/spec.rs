//! Nested document descriptions.
//!
//! Upstream markup parsers commonly hand back elements carrying an optional
//! leading text run (text before the first child) and an optional trailing
//! text run (text after the element's end tag, still inside its parent).
//! [`ElementSpec`] mirrors that shape so documents can be loaded from JSON;
//! [`DomTree::from_spec`] turns the runs into ordinary text nodes.

use serde::Deserialize;
use thiserror::Error;

use crate::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

/// Problems found while converting an [`ElementSpec`] into a tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    /// An element was described with an empty or blank tag name.
    #[error("element at {path} has an empty tag name")]
    EmptyTagName {
        /// Slash-separated child indices from the root, e.g. `/0/2`.
        path: String,
    },
}

/// One element of a nested document description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    /// Tag name; lower-cased on conversion.
    pub tag: String,
    /// Attribute map, including `class`, `id` and `style`.
    #[serde(default)]
    pub attrs: AttributesMap,
    /// Text before the first child element.
    #[serde(default)]
    pub text: Option<String>,
    /// Child elements in document order.
    #[serde(default)]
    pub children: Vec<ElementSpec>,
    /// Text following this element inside its parent.
    #[serde(default)]
    pub tail: Option<String>,
}

impl ElementSpec {
    /// Shorthand constructor used by tests and callers building specs in code.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}

impl DomTree {
    /// Build a tree whose document element is `root`.
    ///
    /// The root's own `tail` is ignored: there is no parent to hold it.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::EmptyTagName`] if any element has a blank tag.
    pub fn from_spec(root: &ElementSpec) -> Result<Self, DomError> {
        let mut tree = Self::new();
        let _ = tree.append_spec(NodeId::ROOT, root, "")?;
        Ok(tree)
    }

    fn append_spec(
        &mut self,
        parent: NodeId,
        spec: &ElementSpec,
        path: &str,
    ) -> Result<NodeId, DomError> {
        let tag = spec.tag.trim();
        if tag.is_empty() {
            return Err(DomError::EmptyTagName {
                path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            });
        }

        let data = ElementData {
            tag_name: tag.to_ascii_lowercase(),
            attrs: spec
                .attrs
                .iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
                .collect(),
        };
        let id = self.alloc(NodeType::Element(data));
        self.append_child(parent, id);

        if let Some(text) = spec.text.as_deref().filter(|t| !t.is_empty()) {
            let _ = self.append_text(id, text);
        }

        for (index, child) in spec.children.iter().enumerate() {
            let _ = self.append_spec(id, child, &format!("{path}/{index}"))?;
            if let Some(tail) = child.tail.as_deref().filter(|t| !t.is_empty()) {
                let _ = self.append_text(id, tail);
            }
        }

        Ok(id)
    }
}
