//! SAML assertion generation error types.
//!
//! Provides error types for the assertion pipeline: option validation,
//! document construction, signature computation, and encryption.

use thiserror::Error;

/// Result type for assertion generation operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// Boxed error returned by capability providers.
///
/// Signing and encryption providers report failures through this type;
/// the orchestrators surface the message to the caller unchanged.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Assertion generation errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// No signing private key was supplied.
    #[error("expected a private key in PEM format")]
    MissingCredential,

    /// No public certificate was supplied.
    #[error("expected a public key cert in PEM format")]
    MissingCertificate,

    /// The skeleton or mutated document failed to parse or serialize.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Reference resolution or signature computation failed.
    #[error("signature computation failed: {0}")]
    SignatureComputation(String),

    /// The encryption provider reported a failure.
    #[error("encryption failed: {0}")]
    Encryption(String),
}

impl From<xmltree::ParseError> for SamlError {
    fn from(err: xmltree::ParseError) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<xmltree::Error> for SamlError {
    fn from(err: xmltree::Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}
