//! Uniform read-only view over the topics of either XMind encoding.
//!
//! [`root_topic`] picks the representation once, from the [`RawDocument`]
//! tag. Everything downstream (layout, diagram building) is generic over
//! [`Topic`] and never looks at the underlying JSON or XML again.

use serde_json::Value;

use crate::error::ConvertError;
use crate::source::RawDocument;
use crate::xml::Element;

/// Namespace of every element in a legacy `content.xml` payload.
pub const XMAP_NAMESPACE: &str = "urn:xmind:xmap:xmlns:content:2.0";

/// Title used for topics whose source title is missing or empty.
pub const DEFAULT_TITLE: &str = "Topic";

pub trait Topic: Sized {
    /// Source title, `None` when absent or empty.
    fn title(&self) -> Option<&str>;

    /// Children in the primary hierarchy, in source order.
    fn attached(&self) -> Vec<Self>;

    /// Annotation topics hanging off this topic, in source order.
    fn callouts(&self) -> Vec<Self>;

    fn display_title(&self) -> &str {
        self.title().unwrap_or(DEFAULT_TITLE)
    }
}

/// Topic backed by a `content.json` object.
#[derive(Debug, Clone, Copy)]
pub struct JsonTopic<'a> {
    value: &'a Value,
}

impl<'a> JsonTopic<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn child_list(&self, key: &str) -> Vec<Self> {
        self.value
            .get("children")
            .and_then(|children| children.get(key))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .map(JsonTopic::new)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Topic for JsonTopic<'_> {
    fn title(&self) -> Option<&str> {
        self.value
            .get("title")
            .and_then(Value::as_str)
            .filter(|title| !title.is_empty())
    }

    fn attached(&self) -> Vec<Self> {
        self.child_list("attached")
    }

    fn callouts(&self) -> Vec<Self> {
        self.child_list("callout")
    }
}

/// Topic backed by a `<topic>` element of a legacy `content.xml` payload.
#[derive(Debug, Clone, Copy)]
pub struct XmlTopic<'a> {
    element: &'a Element,
}

impl<'a> XmlTopic<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }
}

impl Topic for XmlTopic<'_> {
    fn title(&self) -> Option<&str> {
        self.element
            .child(XMAP_NAMESPACE, "title")
            .and_then(|title| title.text.as_deref())
            .filter(|title| !title.is_empty())
    }

    fn attached(&self) -> Vec<Self> {
        let Some(children) = self.element.child(XMAP_NAMESPACE, "children") else {
            return Vec::new();
        };
        children
            .children_named(XMAP_NAMESPACE, "topics")
            .flat_map(|topics| topics.children_named(XMAP_NAMESPACE, "topic"))
            .map(XmlTopic::new)
            .collect()
    }

    // The legacy schema has no callout concept.
    fn callouts(&self) -> Vec<Self> {
        Vec::new()
    }
}

/// Root topic of a document, still tagged by the encoding that backs it.
#[derive(Debug, Clone, Copy)]
pub enum RootTopic<'a> {
    Json(JsonTopic<'a>),
    Xml(XmlTopic<'a>),
}

/// Locates the single root topic of `document`.
///
/// JSON payloads are a list of sheets; the root is the `rootTopic` of the
/// first one. XML payloads hold the root as the direct `topic` child of the
/// first `sheet` element.
pub fn root_topic(document: &RawDocument) -> Result<RootTopic<'_>, ConvertError> {
    match document {
        RawDocument::Json(value) => value
            .as_array()
            .and_then(|sheets| sheets.first())
            .and_then(|sheet| sheet.get("rootTopic"))
            .filter(|topic| topic.is_object())
            .map(|topic| RootTopic::Json(JsonTopic::new(topic)))
            .ok_or(ConvertError::MissingRootTopic),
        RawDocument::Xml(root) => root
            .descendants()
            .find(|element| element.is(XMAP_NAMESPACE, "sheet"))
            .and_then(|sheet| sheet.child(XMAP_NAMESPACE, "topic"))
            .map(|topic| RootTopic::Xml(XmlTopic::new(topic)))
            .ok_or(ConvertError::MissingRootTopic),
    }
}
