//! Assertion attribute types.
//!
//! Attribute values are an explicit tagged union decided at the call
//! boundary: plain text, boolean, number, or a nested XML structure.

use serde::{Deserialize, Serialize};

use super::constants::name_formats;

/// A single attribute carried in the assertion's `AttributeStatement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionAttribute {
    /// The attribute name (typically a URI).
    pub name: String,

    /// The attribute values. An attribute with no values is omitted
    /// from the generated assertion.
    pub values: Vec<AttributeValue>,
}

impl AssertionAttribute {
    /// Creates a new attribute with a single value.
    #[must_use]
    pub fn single(name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            values: vec![value],
        }
    }

    /// Creates a new attribute with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a new attribute with a single text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::single(name, AttributeValue::Text(value.into()))
    }
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean value, rendered as `true`/`false`.
    Boolean(bool),
    /// Numeric value.
    Number(f64),
    /// Plain text value.
    Text(String),
    /// Nested XML structure, expanded into child elements when
    /// structured values are enabled.
    Nested(XmlValue),
}

impl AttributeValue {
    /// Returns the XML Schema type identifier for this value.
    #[must_use]
    pub const fn schema_type(&self) -> &'static str {
        match self {
            Self::Text(_) => "xs:string",
            Self::Boolean(_) => "xs:boolean",
            Self::Number(_) => "xs:double",
            Self::Nested(_) => "xs:anyType",
        }
    }

    /// Renders a scalar value as element text. Returns `None` for
    /// nested structures.
    #[must_use]
    pub fn text_content(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            Self::Boolean(value) => Some(value.to_string()),
            Self::Number(value) => Some(value.to_string()),
            Self::Nested(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A nested XML structure used as a structured attribute value.
///
/// Attributes apply to the element the value describes; children become
/// child elements in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XmlValue {
    /// XML attributes set on the element.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,

    /// Child elements in order, each a name plus text or a nested value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<(String, XmlContent)>,
}

impl XmlValue {
    /// Creates an empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an XML attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Adds a text child element.
    #[must_use]
    pub fn with_text_child(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.children
            .push((name.into(), XmlContent::Text(text.into())));
        self
    }

    /// Adds a nested child element.
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, child: XmlValue) -> Self {
        self.children.push((name.into(), XmlContent::Element(child)));
        self
    }
}

/// Content of a nested child element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XmlContent {
    /// Text content.
    Text(String),
    /// A nested element.
    Element(XmlValue),
}

/// The format of an attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeNameFormat {
    /// The name is an absolute URI.
    Uri,
    /// The name is a valid XML `Name` token.
    Basic,
    /// Neither of the above.
    #[default]
    Unspecified,
}

impl AttributeNameFormat {
    /// Returns the URI for this name format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Uri => name_formats::URI,
            Self::Basic => name_formats::BASIC,
            Self::Unspecified => name_formats::UNSPECIFIED,
        }
    }

    /// Infers the name format from an attribute name: absolute URIs use
    /// the `uri` format, XML `Name` tokens use `basic`, anything else
    /// is `unspecified`.
    #[must_use]
    pub fn infer(name: &str) -> Self {
        if url::Url::parse(name).is_ok() {
            Self::Uri
        } else if is_valid_xml_name(name) {
            Self::Basic
        } else {
            Self::Unspecified
        }
    }
}

/// Checks the XML 1.0 `Name` production.
pub(crate) fn is_valid_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_name_start_char(c) => {}
        _ => return false,
    }
    chars.all(is_name_char)
}

fn is_name_start_char(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_numeric() || c == '-' || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_format_inference() {
        assert_eq!(
            AttributeNameFormat::infer("http://schemas.example.com/role"),
            AttributeNameFormat::Uri
        );
        assert_eq!(
            AttributeNameFormat::infer("urn:oid:2.5.4.42"),
            AttributeNameFormat::Uri
        );
        assert_eq!(AttributeNameFormat::infer("email"), AttributeNameFormat::Basic);
        assert_eq!(
            AttributeNameFormat::infer("user.name"),
            AttributeNameFormat::Basic
        );
        assert_eq!(
            AttributeNameFormat::infer("not a name"),
            AttributeNameFormat::Unspecified
        );
        assert_eq!(AttributeNameFormat::infer(""), AttributeNameFormat::Unspecified);
        assert_eq!(
            AttributeNameFormat::infer("1leading-digit"),
            AttributeNameFormat::Unspecified
        );
    }

    #[test]
    fn xml_name_validation() {
        assert!(is_valid_xml_name("_abc123"));
        assert!(is_valid_xml_name("saml:Assertion"));
        assert!(!is_valid_xml_name("9abc"));
        assert!(!is_valid_xml_name("with space"));
        assert!(!is_valid_xml_name(""));
    }

    #[test]
    fn scalar_text_rendering() {
        assert_eq!(
            AttributeValue::Text("admin".to_string()).text_content(),
            Some("admin".to_string())
        );
        assert_eq!(
            AttributeValue::Boolean(false).text_content(),
            Some("false".to_string())
        );
        assert_eq!(
            AttributeValue::Number(12.5).text_content(),
            Some("12.5".to_string())
        );
        assert_eq!(AttributeValue::Nested(XmlValue::new()).text_content(), None);
    }

    #[test]
    fn schema_types() {
        assert_eq!(AttributeValue::from("x").schema_type(), "xs:string");
        assert_eq!(AttributeValue::from(true).schema_type(), "xs:boolean");
        assert_eq!(AttributeValue::from(3.0).schema_type(), "xs:double");
    }

    #[test]
    fn attribute_value_serde_is_untagged() {
        let value: AttributeValue = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(value, AttributeValue::Text("admin".to_string()));

        let value: AttributeValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, AttributeValue::Boolean(true));

        let value: AttributeValue = serde_json::from_str("4.5").unwrap();
        assert_eq!(value, AttributeValue::Number(4.5));
    }

    #[test]
    fn nested_value_builder() {
        let value = XmlValue::new()
            .with_attribute("Locale", "en")
            .with_text_child("GivenName", "Ada")
            .with_child("Address", XmlValue::new().with_text_child("City", "London"));

        assert_eq!(value.attributes.len(), 1);
        assert_eq!(value.children.len(), 2);
    }
}
