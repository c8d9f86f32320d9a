//! XML encryption orchestration.
//!
//! The XML-Enc work (symmetric content encryption, key wrapping,
//! `EncryptedData`/`EncryptedKey` structure) is delegated to an
//! [`XmlEncryptionProvider`]. This module builds the request from the
//! normalized options and wraps the provider output in the
//! `EncryptedAssertion` envelope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, SamlError, SamlResult};
use crate::options::EncryptionSettings;
use crate::types::constants::{encryption_algorithms, key_transport_algorithms, SAML_NS};

/// Symmetric content-encryption algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncryptionAlgorithm {
    /// AES-128 in CBC mode.
    Aes128Cbc,
    /// AES-256 in CBC mode (default).
    #[default]
    Aes256Cbc,
    /// AES-128 in GCM mode.
    Aes128Gcm,
    /// AES-256 in GCM mode.
    Aes256Gcm,
}

impl EncryptionAlgorithm {
    /// Returns the URI for this content-encryption algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Aes128Cbc => encryption_algorithms::AES128_CBC,
            Self::Aes256Cbc => encryption_algorithms::AES256_CBC,
            Self::Aes128Gcm => encryption_algorithms::AES128_GCM,
            Self::Aes256Gcm => encryption_algorithms::AES256_GCM,
        }
    }

    /// Parses a content-encryption algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            encryption_algorithms::AES128_CBC => Some(Self::Aes128Cbc),
            encryption_algorithms::AES256_CBC => Some(Self::Aes256Cbc),
            encryption_algorithms::AES128_GCM => Some(Self::Aes128Gcm),
            encryption_algorithms::AES256_GCM => Some(Self::Aes256Gcm),
            _ => None,
        }
    }
}

/// Key-transport (key-wrapping) algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyTransportAlgorithm {
    /// RSA-OAEP with MGF1 (default).
    #[default]
    RsaOaepMgf1p,
    /// Legacy RSAES-PKCS1-v1_5 (not recommended).
    #[serde(rename = "rsa-1_5")]
    Rsa15,
}

impl KeyTransportAlgorithm {
    /// Returns the URI for this key-transport algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::RsaOaepMgf1p => key_transport_algorithms::RSA_OAEP_MGF1P,
            Self::Rsa15 => key_transport_algorithms::RSA_1_5,
        }
    }

    /// Parses a key-transport algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            key_transport_algorithms::RSA_OAEP_MGF1P => Some(Self::RsaOaepMgf1p),
            key_transport_algorithms::RSA_1_5 => Some(Self::Rsa15),
            _ => None,
        }
    }
}

/// One encryption request, consumed by an [`XmlEncryptionProvider`].
#[derive(Debug, Clone)]
pub struct EncryptionRequest<'a> {
    /// Recipient certificate in PEM format, embedded in the
    /// `EncryptedKey`'s `KeyInfo`.
    pub certificate: &'a str,
    /// Recipient RSA public key in PEM format, used to wrap the
    /// generated content key.
    pub public_key: Option<&'a str>,
    /// Content-encryption algorithm URI.
    pub content_algorithm: &'a str,
    /// Key-transport algorithm URI.
    pub key_transport_algorithm: &'a str,
}

/// Capability interface for an XML-Enc implementation.
///
/// The provider generates a content key, encrypts `xml` with it, wraps
/// the key for the recipient, and returns the `EncryptedData` element
/// (with its embedded `EncryptedKey`) as serialized XML.
#[async_trait]
pub trait XmlEncryptionProvider: Send + Sync {
    /// Encrypts `xml` for the recipient described by the request.
    async fn encrypt(
        &self,
        xml: &str,
        request: &EncryptionRequest<'_>,
    ) -> Result<String, ProviderError>;
}

/// Encrypts the signed assertion and wraps the result in an
/// `EncryptedAssertion` envelope.
pub(crate) async fn encrypt_assertion(
    provider: &dyn XmlEncryptionProvider,
    xml: &str,
    settings: &EncryptionSettings<'_>,
) -> SamlResult<String> {
    let request = EncryptionRequest {
        certificate: settings.certificate,
        public_key: settings.public_key,
        content_algorithm: settings.content_algorithm.uri(),
        key_transport_algorithm: settings.key_transport_algorithm.uri(),
    };

    debug!(
        content_algorithm = request.content_algorithm,
        key_transport_algorithm = request.key_transport_algorithm,
        "encrypting assertion"
    );

    let encrypted = provider
        .encrypt(xml, &request)
        .await
        .map_err(|e| SamlError::Encryption(e.to_string()))?;

    // The envelope element is unprefixed; it only carries the `saml`
    // prefix binding for the ciphertext's benefit.
    let envelope = format!(
        "<EncryptedAssertion xmlns:saml=\"{SAML_NS}\">{encrypted}</EncryptedAssertion>"
    );
    Ok(collapse_inter_tag_whitespace(&envelope))
}

/// Removes whitespace runs between adjacent tags. Provider output is
/// often pretty-printed; the envelope must stay compact.
fn collapse_inter_tag_whitespace(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut pending = String::new();

    for ch in xml.chars() {
        if ch.is_whitespace() {
            pending.push(ch);
            continue;
        }
        if !pending.is_empty() {
            // Keep whitespace only when it sits inside text content.
            let after_tag = out.ends_with('>');
            if !(after_tag && ch == '<') {
                out.push_str(&pending);
            }
            pending.clear();
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoEncryptor;

    #[async_trait]
    impl XmlEncryptionProvider for EchoEncryptor {
        async fn encrypt(
            &self,
            _xml: &str,
            request: &EncryptionRequest<'_>,
        ) -> Result<String, ProviderError> {
            Ok(format!(
                "<xenc:EncryptedData Algorithm=\"{}\">\n  <xenc:CipherData/>\n</xenc:EncryptedData>",
                request.content_algorithm
            ))
        }
    }

    struct FailingEncryptor;

    #[async_trait]
    impl XmlEncryptionProvider for FailingEncryptor {
        async fn encrypt(
            &self,
            _xml: &str,
            _request: &EncryptionRequest<'_>,
        ) -> Result<String, ProviderError> {
            Err("no public key".into())
        }
    }

    fn settings() -> EncryptionSettings<'static> {
        EncryptionSettings {
            certificate: "CERT",
            public_key: Some("PUB"),
            content_algorithm: EncryptionAlgorithm::Aes256Cbc,
            key_transport_algorithm: KeyTransportAlgorithm::RsaOaepMgf1p,
        }
    }

    #[test]
    fn encryption_algorithm_uri_roundtrip() {
        for alg in [
            EncryptionAlgorithm::Aes128Cbc,
            EncryptionAlgorithm::Aes256Cbc,
            EncryptionAlgorithm::Aes128Gcm,
            EncryptionAlgorithm::Aes256Gcm,
        ] {
            assert_eq!(EncryptionAlgorithm::from_uri(alg.uri()), Some(alg));
        }
        assert_eq!(EncryptionAlgorithm::from_uri("urn:nope"), None);
    }

    #[test]
    fn key_transport_uri_roundtrip() {
        for alg in [KeyTransportAlgorithm::RsaOaepMgf1p, KeyTransportAlgorithm::Rsa15] {
            assert_eq!(KeyTransportAlgorithm::from_uri(alg.uri()), Some(alg));
        }
    }

    #[test]
    fn key_transport_serde_names() {
        let alg: KeyTransportAlgorithm = serde_json::from_str("\"rsa-1_5\"").unwrap();
        assert_eq!(alg, KeyTransportAlgorithm::Rsa15);
        let alg: EncryptionAlgorithm = serde_json::from_str("\"aes128-gcm\"").unwrap();
        assert_eq!(alg, EncryptionAlgorithm::Aes128Gcm);
    }

    #[test]
    fn collapse_keeps_text_content() {
        let xml = "<a>\n  <b>hello world</b>\n</a>";
        assert_eq!(collapse_inter_tag_whitespace(xml), "<a><b>hello world</b></a>");
    }

    #[tokio::test]
    async fn envelope_wraps_provider_output() {
        let out = encrypt_assertion(&EchoEncryptor, "<Assertion/>", &settings())
            .await
            .unwrap();

        assert!(out.starts_with(&format!(
            "<EncryptedAssertion xmlns:saml=\"{SAML_NS}\">"
        )));
        assert!(out.ends_with("</EncryptedAssertion>"));
        assert!(!out.contains("<saml:EncryptedAssertion"));
        assert!(out.contains(EncryptionAlgorithm::Aes256Cbc.uri()));
        assert!(!out.contains('\n'));
    }

    #[tokio::test]
    async fn provider_failure_maps_to_encryption_error() {
        let err = encrypt_assertion(&FailingEncryptor, "<Assertion/>", &settings())
            .await
            .unwrap_err();
        match err {
            SamlError::Encryption(message) => assert_eq!(message, "no public key"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
