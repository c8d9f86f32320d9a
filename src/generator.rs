//! The assertion generation pipeline.

use std::sync::Arc;

use tracing::debug;

use crate::document;
use crate::encryption::{self, XmlEncryptionProvider};
use crate::error::SamlResult;
use crate::options::AssertionOptions;
use crate::signature::{self, XmlSignatureProvider};

/// Generates signed (and optionally encrypted) SAML 2.0 assertions.
///
/// The generator owns the capability providers; per-call configuration
/// arrives as [`AssertionOptions`]. Cloning is cheap and shares the
/// providers.
#[derive(Clone)]
pub struct AssertionGenerator {
    signer: Arc<dyn XmlSignatureProvider>,
    encryptor: Option<Arc<dyn XmlEncryptionProvider>>,
}

impl AssertionGenerator {
    /// Creates a generator that signs with the given provider.
    #[must_use]
    pub fn new(signer: Arc<dyn XmlSignatureProvider>) -> Self {
        Self {
            signer,
            encryptor: None,
        }
    }

    /// Adds an encryption provider, enabling encrypted assertions for
    /// calls that supply recipient key material.
    #[must_use]
    pub fn with_encryption_provider(mut self, encryptor: Arc<dyn XmlEncryptionProvider>) -> Self {
        self.encryptor = Some(encryptor);
        self
    }

    /// Generates one assertion.
    ///
    /// The pipeline is: validate and default the options, build the
    /// assertion document, serialize and sanitize it, sign it, and —
    /// when the options carry an encryption certificate and an
    /// encryption provider is configured — encrypt the signed result.
    ///
    /// Returns the serialized `Assertion` element, or the
    /// `EncryptedAssertion` envelope when encrypting.
    pub async fn generate(&self, options: &AssertionOptions) -> SamlResult<String> {
        let normalized = options.normalize()?;

        let unsigned = document::build(&normalized)?;
        let signed = signature::sign_assertion(self.signer.as_ref(), &unsigned, &normalized)?;

        match (&normalized.encryption, &self.encryptor) {
            (Some(settings), Some(encryptor)) => {
                encryption::encrypt_assertion(encryptor.as_ref(), &signed, settings).await
            }
            (Some(_), None) => Err(crate::error::SamlError::Encryption(
                "no encryption provider is configured".to_string(),
            )),
            (None, _) => {
                debug!("returning signed assertion");
                Ok(signed)
            }
        }
    }
}

impl std::fmt::Debug for AssertionGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssertionGenerator")
            .field("encryption", &self.encryptor.is_some())
            .finish_non_exhaustive()
    }
}
