//! Integration tests for the HTML node model

use mdsite_core::node::render_attributes;
use mdsite_core::{
    render, Attributes, ConvertError, ConvertErrorKind, LeafNode, Node, ParentNode,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Rendering Tests
// ============================================================================

#[test]
fn test_render_attributes_in_insertion_order() {
    let mut attributes = Attributes::new();
    attributes.insert("href".to_string(), "https://www.google.com".to_string());
    attributes.insert("target".to_string(), "_blank".to_string());
    assert_eq!(
        render_attributes(&attributes),
        r#" href="https://www.google.com" target="_blank""#
    );
}

#[test]
fn test_render_attributes_empty() {
    assert_eq!(render_attributes(&Attributes::new()), "");
}

#[test]
fn test_leaf_with_tag() {
    assert_eq!(Node::leaf("p", "Some Value").render().unwrap(), "<p>Some Value</p>");
}

#[test]
fn test_leaf_with_attributes() {
    let node = Node::leaf("a", "Click me!").with_attr("href", "https://www.google.com");
    assert_eq!(
        node.render().unwrap(),
        r#"<a href="https://www.google.com">Click me!</a>"#
    );
}

#[test]
fn test_leaf_without_tag_is_raw_text() {
    assert_eq!(Node::text("hello").render().unwrap(), "hello");
}

#[test]
fn test_raw_text_is_not_escaped() {
    assert_eq!(Node::text("<b>&</b>").render().unwrap(), "<b>&</b>");
}

#[test]
fn test_nested_parents() {
    let node = Node::parent(
        "ul",
        vec![
            Node::leaf("li", "item 1"),
            Node::leaf("li", "item 2"),
            Node::parent("ol", vec![Node::leaf("li", "item 3"), Node::leaf("li", "item 4")]),
        ],
    );
    assert_eq!(
        render(&node).unwrap(),
        "<ul><li>item 1</li><li>item 2</li><ol><li>item 3</li><li>item 4</li></ol></ul>"
    );
}

#[test]
fn test_parent_mixed_children() {
    let node = Node::parent(
        "p",
        vec![
            Node::leaf("b", "Bold text"),
            Node::text("Normal text"),
            Node::leaf("i", "italic text"),
            Node::text("Normal text"),
        ],
    );
    assert_eq!(
        node.render().unwrap(),
        "<p><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
    );
}

#[test]
fn test_parent_with_no_children() {
    assert_eq!(Node::parent("div", vec![]).render().unwrap(), "<div></div>");
}

#[test]
fn test_parent_without_tag_fails() {
    let node = Node::Parent(ParentNode {
        tag: None,
        children: vec![Node::text("x")],
        attributes: Attributes::new(),
    });
    assert_eq!(node.render(), Err(ConvertError::MissingTag));
}

#[test]
fn test_untagged_parent_deep_in_tree_fails() {
    let inner = Node::Parent(ParentNode {
        tag: None,
        children: vec![],
        attributes: Attributes::new(),
    });
    let node = Node::parent("div", vec![Node::parent("p", vec![inner])]);
    assert_eq!(node.render().unwrap_err().kind(), ConvertErrorKind::MissingTag);
}

#[test]
fn test_accessors() {
    let node = Node::parent("a", vec![Node::text("x")]).with_attr("href", "/");
    assert_eq!(node.tag(), Some("a"));
    assert_eq!(node.children().len(), 1);
    assert_eq!(node.attributes().get("href").map(String::as_str), Some("/"));
    assert!(Node::text("x").children().is_empty());
}

// ============================================================================
// JSON Interchange Tests
// ============================================================================

#[test]
fn test_serialize_shape() {
    let node = Node::parent(
        "p",
        vec![Node::text("hi "), Node::leaf("a", "there").with_attr("href", "/x")],
    );
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "kind": "parent",
            "tag": "p",
            "children": [
                {"kind": "leaf", "text": "hi "},
                {"kind": "leaf", "tag": "a", "text": "there", "attributes": {"href": "/x"}}
            ]
        })
    );
}

#[test]
fn test_from_value_round_trip() {
    let node = Node::parent(
        "div",
        vec![Node::leaf("img", "").with_attr("src", "a.png").with_attr("alt", "a")],
    );
    let value = serde_json::to_value(&node).unwrap();
    let back = Node::from_value(&value).unwrap();
    assert_eq!(back, node);
    assert_eq!(
        back.render().unwrap(),
        r#"<div><img src="a.png" alt="a"></img></div>"#
    );
}

#[test]
fn test_from_value_missing_text() {
    let err = Node::from_value(&json!({"kind": "leaf", "tag": "b"})).unwrap_err();
    assert_eq!(
        err,
        ConvertError::MissingContent {
            tag: Some("b".to_string())
        }
    );
}

#[test]
fn test_from_value_missing_children() {
    let err = Node::from_value(&json!({"kind": "parent", "tag": "ul"})).unwrap_err();
    assert_eq!(err.kind(), ConvertErrorKind::MissingStructure);
}

#[test]
fn test_from_value_empty_children_is_valid() {
    let node = Node::from_value(&json!({"kind": "parent", "tag": "ul", "children": []})).unwrap();
    assert_eq!(
        node,
        Node::Parent(ParentNode {
            tag: Some("ul".to_string()),
            children: vec![],
            attributes: Attributes::new(),
        })
    );
}

#[test]
fn test_from_value_invalid_child() {
    let err = Node::from_value(&json!({
        "kind": "parent",
        "tag": "p",
        "children": [{"kind": "leaf", "text": "ok"}, "not a node"]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        ConvertError::InvalidChild {
            index: 1,
            found: "string".to_string()
        }
    );
}

#[test]
fn test_from_value_unknown_child_kind() {
    let err = Node::from_value(&json!({
        "kind": "parent",
        "tag": "p",
        "children": [{"kind": "comment", "text": "x"}]
    }))
    .unwrap_err();
    assert_eq!(err.kind(), ConvertErrorKind::InvalidChild);
}

#[test]
fn test_from_value_wrong_root_type() {
    let err = Node::from_value(&json!("just text")).unwrap_err();
    assert_eq!(
        err,
        ConvertError::InvalidInputType {
            expected: "node object",
            found: "string".to_string()
        }
    );
}

#[test]
fn test_from_value_wrong_field_type() {
    let err = Node::from_value(&json!({"kind": "leaf", "text": 3})).unwrap_err();
    assert_eq!(err.kind(), ConvertErrorKind::InvalidInputType);
}

#[test]
fn test_from_value_untagged_leaf() {
    let node = Node::from_value(&json!({"kind": "leaf", "text": "plain"})).unwrap();
    assert_eq!(
        node,
        Node::Leaf(LeafNode {
            tag: None,
            text: "plain".to_string(),
            attributes: Attributes::new(),
        })
    );
}
