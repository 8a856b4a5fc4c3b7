//! Structured example documents.
//!
//! An example is a TOML file holding an ordered list of visual primitives:
//!
//! ```toml
//! title = "Stacked images"
//! cap = 150
//!
//! [[element]]
//! kind = "label"
//! text = "Ferris"
//!
//! [[element]]
//! kind = "image"
//! src = "ferris.png"
//! width = 200
//! height = 200
//! ```

use serde::Deserialize;

use super::{ContentBody, ContentUnit, PageMeta};
use crate::error::ContentError;

/// A visual primitive in an example document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
pub enum Element {
    Label {
        text: String,
    },
    Image {
        src: String,
        width: u32,
        height: u32,
        #[serde(default)]
        alt: String,
    },
    Link {
        href: String,
        label: String,
    },
    /// Children stacked vertically in order.
    Stack {
        children: Vec<Element>,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExampleDocument {
    title: Option<String>,
    cap: Option<u32>,
    #[serde(default, rename = "element")]
    elements: Vec<Element>,
}

pub(super) fn parse(id: &str, source: &str) -> Result<ContentUnit, ContentError> {
    let document: ExampleDocument =
        toml::from_str(source).map_err(|e| ContentError::malformed(id, e.message()))?;

    if document.cap == Some(0) {
        return Err(ContentError::malformed(id, "cap must be greater than zero"));
    }
    if document.elements.is_empty() {
        return Err(ContentError::malformed(id, "example has no elements"));
    }
    validate(id, &document.elements)?;

    let meta = PageMeta {
        title: document.title,
        cap: document.cap,
    };
    Ok(ContentUnit::new(id, meta, ContentBody::Example(document.elements)))
}

fn validate(id: &str, elements: &[Element]) -> Result<(), ContentError> {
    for element in elements {
        match element {
            Element::Image { src, width, height, .. } if *width == 0 || *height == 0 => {
                return Err(ContentError::malformed(
                    id,
                    format!("image '{src}' has a zero dimension ({width}x{height})"),
                ));
            }
            Element::Stack { children } if children.is_empty() => {
                return Err(ContentError::malformed(id, "stack has no children"));
            }
            Element::Stack { children } => validate(id, children)?,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const STACKED: &str = r#"
title = "Stacked"
cap = 150

[[element]]
kind = "label"
text = "Ferris"

[[element]]
kind = "image"
src = "small.png"
width = 200
height = 200

[[element]]
kind = "image"
src = "wide.png"
width = 472
height = 315
alt = "A wide crab"
"#;

    #[test]
    fn parses_elements_in_order() {
        let unit = parse("stacked", STACKED).unwrap();
        assert_eq!(unit.meta().cap, Some(150));
        assert_eq!(unit.title(), "Stacked");

        let ContentBody::Example(elements) = unit.body() else {
            unreachable!("example source");
        };
        assert_eq!(elements.len(), 3);
        assert_eq!(
            elements[0],
            Element::Label {
                text: "Ferris".to_string()
            }
        );
        assert_eq!(
            elements[2],
            Element::Image {
                src: "wide.png".to_string(),
                width: 472,
                height: 315,
                alt: "A wide crab".to_string(),
            }
        );
    }

    #[test]
    fn parses_nested_stacks() {
        let source = r#"
[[element]]
kind = "stack"
children = [
    { kind = "label", text = "inner" },
    { kind = "link", href = "/index.html", label = "Home" },
]
"#;
        let unit = parse("nested", source).unwrap();
        let ContentBody::Example(elements) = unit.body() else {
            unreachable!("example source");
        };
        assert!(matches!(&elements[0], Element::Stack { children } if children.len() == 2));
    }

    #[test_case("element = 3" ; "wrong shape")]
    #[test_case("title = \"empty\"" ; "no elements")]
    #[test_case("cap = 0\n[[element]]\nkind = \"label\"\ntext = \"x\"" ; "zero cap")]
    #[test_case("[[element]]\nkind = \"video\"\nsrc = \"a.mp4\"" ; "unknown kind")]
    #[test_case("[[element]]\nkind = \"image\"\nsrc = \"a.png\"\nwidth = 0\nheight = 10" ; "zero width image")]
    #[test_case("[[element]]\nkind = \"label\"\ntext = \"x\"\ncolour = \"red\"" ; "unknown element field")]
    #[test_case("[[element]]\nkind = \"stack\"\nchildren = [{ kind = \"label\", text = \"x\", size = 3 }]" ; "unknown nested field")]
    #[test_case("[[element]]\nkind = \"stack\"\nchildren = []" ; "empty stack")]
    #[test_case("[[element]]\nkind = \"stack\"\nchildren = [{ kind = \"image\", src = \"a.png\", width = 5, height = 0 }]" ; "nested zero height")]
    fn rejects_malformed_documents(source: &str) {
        let result = parse("bad", source);
        assert!(matches!(result, Err(ContentError::Malformed { id, .. }) if id == "bad"));
    }

    #[test]
    fn unknown_element_field_is_named() {
        let source = "[[element]]\nkind = \"label\"\ntext = \"x\"\ncolour = \"red\"";
        match parse("bad", source) {
            Err(ContentError::Malformed { reason, .. }) => assert!(reason.contains("colour")),
            other => panic!("expected malformed, got {other:?}"),
        }
    }
}
