//! HTML node tree produced by the converter.
//!
//! The tree has two node shapes:
//!
//! - **Leaf**: a tag with text content. A leaf without a tag renders its text
//!   verbatim, which is how plain inline runs are emitted.
//! - **Parent**: a tag wrapping an ordered list of child nodes.
//!
//! Rendering performs no escaping. Text and attribute values are written to
//! the output exactly as given.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ConvertError, Result};

/// Element attributes in insertion order.
pub type Attributes = IndexMap<String, String>;

/// A node in the HTML document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// Text content with an optional wrapping tag.
    Leaf(LeafNode),
    /// Element wrapping child nodes.
    Parent(ParentNode),
}

/// A node holding text and no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafNode {
    /// Element tag; `None` renders the text without markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Text content.
    pub text: String,
    /// Element attributes.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: Attributes,
}

/// A node holding children and no text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentNode {
    /// Element tag; required for rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Child nodes in document order (may be empty).
    pub children: Vec<Node>,
    /// Element attributes.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: Attributes,
}

impl Node {
    /// Create an untagged leaf that renders as raw text.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: None,
            text: text.into(),
            attributes: Attributes::new(),
        })
    }

    /// Create a tagged leaf.
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: Some(tag.into()),
            text: text.into(),
            attributes: Attributes::new(),
        })
    }

    /// Create a tagged parent.
    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent(ParentNode {
            tag: Some(tag.into()),
            children,
            attributes: Attributes::new(),
        })
    }

    /// Append an attribute, keeping earlier ones first.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes_mut().insert(key.into(), value.into());
        self
    }

    /// Get the element tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag.as_deref(),
            Node::Parent(parent) => parent.tag.as_deref(),
        }
    }

    /// Get the element attributes.
    pub fn attributes(&self) -> &Attributes {
        match self {
            Node::Leaf(leaf) => &leaf.attributes,
            Node::Parent(parent) => &parent.attributes,
        }
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            Node::Leaf(leaf) => &mut leaf.attributes,
            Node::Parent(parent) => &mut parent.attributes,
        }
    }

    /// Get the children of a parent node; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Parent(parent) => &parent.children,
        }
    }

    /// Render this node and its descendants to an HTML string.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Leaf(leaf) => {
                let Some(tag) = leaf.tag.as_deref() else {
                    out.push_str(&leaf.text);
                    return Ok(());
                };
                open_tag(out, tag, &leaf.attributes);
                out.push_str(&leaf.text);
                close_tag(out, tag);
            }
            Node::Parent(parent) => {
                let tag = parent.tag.as_deref().ok_or(ConvertError::MissingTag)?;
                open_tag(out, tag, &parent.attributes);
                for child in &parent.children {
                    child.render_into(out)?;
                }
                close_tag(out, tag);
            }
        }
        Ok(())
    }

    /// Build a node tree from an untyped JSON value.
    ///
    /// The expected shape is the one produced by serializing a [`Node`]:
    /// an object with `"kind"` set to `"leaf"` or `"parent"`, an optional
    /// `"tag"` string, an optional `"attributes"` object of strings, and
    /// either `"text"` or `"children"`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ConvertError::invalid_type("node object", type_name(value)))?;
        node_from_object(object)
    }
}

/// Render a node tree to an HTML string.
pub fn render(node: &Node) -> Result<String> {
    node.render()
}

/// Render attributes as ` key="value"` pairs in insertion order.
pub fn render_attributes(attributes: &Attributes) -> String {
    let mut out = String::new();
    push_attributes(&mut out, attributes);
    out
}

#[inline]
fn push_attributes(out: &mut String, attributes: &Attributes) {
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}

#[inline]
fn open_tag(out: &mut String, tag: &str, attributes: &Attributes) {
    out.push('<');
    out.push_str(tag);
    push_attributes(out, attributes);
    out.push('>');
}

#[inline]
fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn node_from_object(object: &Map<String, Value>) -> Result<Node> {
    let tag = optional_string(object, "tag")?;
    let attributes = attributes_from(object)?;

    match object.get("kind").and_then(Value::as_str) {
        Some("leaf") => {
            let text = match object.get("text") {
                None | Some(Value::Null) => return Err(ConvertError::MissingContent { tag }),
                Some(Value::String(text)) => text.clone(),
                Some(other) => return Err(ConvertError::invalid_type("string", type_name(other))),
            };
            Ok(Node::Leaf(LeafNode {
                tag,
                text,
                attributes,
            }))
        }
        Some("parent") => {
            let items = match object.get("children") {
                None | Some(Value::Null) => return Err(ConvertError::MissingStructure { tag }),
                Some(Value::Array(items)) => items,
                Some(other) => return Err(ConvertError::invalid_type("array", type_name(other))),
            };
            let mut children = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let child = item
                    .as_object()
                    .filter(|o| matches!(o.get("kind").and_then(Value::as_str), Some("leaf" | "parent")))
                    .ok_or_else(|| ConvertError::InvalidChild {
                        index,
                        found: describe_child(item),
                    })?;
                children.push(node_from_object(child)?);
            }
            Ok(Node::Parent(ParentNode {
                tag,
                children,
                attributes,
            }))
        }
        Some(other) => Err(ConvertError::invalid_type(
            "node kind \"leaf\" or \"parent\"",
            format!("{other:?}"),
        )),
        None => Err(ConvertError::invalid_type("node kind", "object without \"kind\"")),
    }
}

fn optional_string(object: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ConvertError::invalid_type("string", type_name(other))),
    }
}

fn attributes_from(object: &Map<String, Value>) -> Result<Attributes> {
    let mut attributes = Attributes::new();
    let entries = match object.get("attributes") {
        None | Some(Value::Null) => return Ok(attributes),
        Some(Value::Object(entries)) => entries,
        Some(other) => return Err(ConvertError::invalid_type("object", type_name(other))),
    };
    for (key, value) in entries {
        let value = value
            .as_str()
            .ok_or_else(|| ConvertError::invalid_type("string", type_name(value)))?;
        attributes.insert(key.clone(), value.to_string());
    }
    Ok(attributes)
}

fn describe_child(value: &Value) -> String {
    match value.as_object().and_then(|o| o.get("kind")) {
        Some(kind) => format!("node of kind {kind}"),
        None => type_name(value).to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
