//! Core SAML types and constants.

pub mod constants;

mod attribute;

pub use attribute::{
    AssertionAttribute, AttributeNameFormat, AttributeValue, XmlContent, XmlValue,
};

pub(crate) use attribute::is_valid_xml_name;
