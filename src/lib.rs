//! SAML 2.0 assertion generation.
//!
//! Builds signed, optionally encrypted, SAML 2.0 `Assertion` documents
//! from a fixed schema-ordered skeleton. The XML-DSig and XML-Enc
//! primitives are not implemented here; they are consumed through the
//! [`signature::XmlSignatureProvider`] and
//! [`encryption::XmlEncryptionProvider`] capability interfaces.
//!
//! ```no_run
//! use std::sync::Arc;
//! use saml_assertion::{AssertionGenerator, AssertionOptions};
//! # use saml_assertion::signature::XmlSignatureProvider;
//! # fn provider() -> Arc<dyn XmlSignatureProvider> { unimplemented!() }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = AssertionGenerator::new(provider());
//! let mut options = AssertionOptions::new("<key pem>", "<cert pem>");
//! options.issuer = Some("urn:issuer".to_string());
//! options.lifetime_in_seconds = Some(600);
//! let assertion = generator.generate(&options).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod encryption;
pub mod error;
pub mod generator;
pub mod options;
pub mod signature;
pub mod types;

mod document;
mod sanitize;
mod template;

pub use encryption::{EncryptionAlgorithm, KeyTransportAlgorithm, XmlEncryptionProvider};
pub use error::{ProviderError, SamlError, SamlResult};
pub use generator::AssertionGenerator;
pub use options::AssertionOptions;
pub use signature::{DigestAlgorithm, SignatureAlgorithm, XmlSignatureProvider};
pub use types::{AssertionAttribute, AttributeNameFormat, AttributeValue, XmlContent, XmlValue};
