//! Namespace sanitization of serialized assertion text.
//!
//! Serializers can repeat the default assertion-namespace declaration on
//! child elements. The signature reference and downstream consumers
//! expect exactly one declaration on the root `Assertion` element, so
//! this pass runs on the text that gets signed and again on the signed
//! output (signing re-serializes the tree).

use crate::types::constants::SAML_NS;

const MARKER: &str = "__ASSERTION_DEFAULT_NS__";

/// Removes every default-namespace declaration except the first one on
/// the root `Assertion` opening tag. Idempotent.
pub(crate) fn strip_redundant_namespace(xml: &str) -> String {
    let declaration = format!(" xmlns=\"{SAML_NS}\"");
    let anchored = format!("Assertion{declaration}");

    let marked = xml.replacen(&anchored, MARKER, 1);
    let stripped = marked.replace(&declaration, "");
    stripped.replacen(MARKER, &anchored, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration_count(xml: &str) -> usize {
        xml.matches(SAML_NS).count()
    }

    #[test]
    fn strips_child_declarations() {
        let xml = format!(
            "<Assertion xmlns=\"{SAML_NS}\"><Issuer xmlns=\"{SAML_NS}\">idp</Issuer>\
             <Subject xmlns=\"{SAML_NS}\"/></Assertion>"
        );
        let sanitized = strip_redundant_namespace(&xml);

        assert_eq!(declaration_count(&sanitized), 1);
        assert!(sanitized.starts_with(&format!("<Assertion xmlns=\"{SAML_NS}\">")));
        assert!(sanitized.contains("<Issuer>idp</Issuer>"));
    }

    #[test]
    fn is_idempotent() {
        let xml = format!(
            "<Assertion xmlns=\"{SAML_NS}\"><Issuer xmlns=\"{SAML_NS}\">idp</Issuer></Assertion>"
        );
        let once = strip_redundant_namespace(&xml);
        let twice = strip_redundant_namespace(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_input_is_unchanged() {
        let xml = format!("<Assertion xmlns=\"{SAML_NS}\"><Issuer>idp</Issuer></Assertion>");
        assert_eq!(strip_redundant_namespace(&xml), xml);
    }

    #[test]
    fn other_namespaces_are_untouched() {
        let xml = format!(
            "<Assertion xmlns=\"{SAML_NS}\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
             <Issuer xmlns=\"{SAML_NS}\">idp</Issuer></Assertion>"
        );
        let sanitized = strip_redundant_namespace(&xml);
        assert!(sanitized.contains("xmlns:xsi="));
        assert_eq!(declaration_count(&sanitized), 1);
    }
}
