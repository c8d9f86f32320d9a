//! XML signature orchestration.
//!
//! The cryptographic work of XML-DSig (canonicalization, digesting,
//! signing) is delegated to an [`XmlSignatureProvider`]. This module
//! builds the signing request — reference selector, transforms, digest
//! algorithm, key material, insertion point — and re-sanitizes the
//! provider's output.

mod signer;

pub use signer::{strip_pem, ASSERTION_REFERENCE, DEFAULT_SIGNATURE_ANCHOR};

pub(crate) use signer::sign_assertion;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::types::constants::{digest_algorithms, signature_algorithms};

/// Signature algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureAlgorithm {
    /// RSA with SHA-256 (recommended).
    #[default]
    RsaSha256,
    /// Legacy RSA with SHA-1 (not recommended).
    RsaSha1,
}

impl SignatureAlgorithm {
    /// Returns the URI for this signature algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::RsaSha256 => signature_algorithms::RSA_SHA256,
            Self::RsaSha1 => signature_algorithms::RSA_SHA1,
        }
    }

    /// Parses a signature algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            signature_algorithms::RSA_SHA256 => Some(Self::RsaSha256),
            signature_algorithms::RSA_SHA1 => Some(Self::RsaSha1),
            _ => None,
        }
    }
}

/// Digest algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlgorithm {
    /// SHA-256 (recommended).
    #[default]
    Sha256,
    /// Legacy SHA-1 (not recommended).
    Sha1,
}

impl DigestAlgorithm {
    /// Returns the URI for this digest algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Sha256 => digest_algorithms::SHA256,
            Self::Sha1 => digest_algorithms::SHA1,
        }
    }

    /// Parses a digest algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            digest_algorithms::SHA256 => Some(Self::Sha256),
            digest_algorithms::SHA1 => Some(Self::Sha1),
            _ => None,
        }
    }
}

/// Placement of the signature relative to its anchor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignaturePlacement {
    /// Insert the signature immediately after the anchor.
    #[default]
    After,
}

/// Where the computed `Signature` element is inserted.
#[derive(Debug, Clone)]
pub struct SignatureLocation<'a> {
    /// XPath locator of the anchor node, relative to the assertion.
    pub reference_xpath: &'a str,
    /// Placement relative to the anchor.
    pub placement: SignaturePlacement,
}

/// One signing request, consumed by an [`XmlSignatureProvider`].
#[derive(Debug, Clone)]
pub struct SignatureRequest<'a> {
    /// XPath selecting the element to sign by local name.
    pub reference_xpath: &'a str,
    /// Transform URIs applied to the reference, in order.
    pub transforms: &'a [&'a str],
    /// Digest algorithm URI.
    pub digest_algorithm: &'a str,
    /// Signature algorithm URI.
    pub signature_algorithm: &'a str,
    /// Signing private key in PEM format.
    pub signing_key: &'a str,
    /// Where the signature is inserted.
    pub location: SignatureLocation<'a>,
    /// Namespace prefix for the inserted signature; empty for none.
    pub namespace_prefix: &'a str,
    /// Certificate content (PEM armor stripped) for `KeyInfo`.
    pub(crate) certificate: String,
}

impl SignatureRequest<'_> {
    /// Renders the `KeyInfo` contents: the certificate embedded in
    /// `X509Data/X509Certificate`, honoring the configured prefix.
    #[must_use]
    pub fn key_info_xml(&self) -> String {
        let prefix = if self.namespace_prefix.is_empty() {
            String::new()
        } else {
            format!("{}:", self.namespace_prefix)
        };
        format!(
            "<{prefix}X509Data><{prefix}X509Certificate>{cert}</{prefix}X509Certificate></{prefix}X509Data>",
            cert = self.certificate
        )
    }
}

/// Capability interface for an XML-DSig implementation.
///
/// The provider canonicalizes, digests, and signs per the request, then
/// returns the document with the `Signature` element inserted at the
/// requested location.
pub trait XmlSignatureProvider: Send + Sync {
    /// Computes an enveloped signature over `xml` and returns the
    /// signed document.
    fn sign(&self, xml: &str, request: &SignatureRequest<'_>) -> Result<String, ProviderError>;
}
