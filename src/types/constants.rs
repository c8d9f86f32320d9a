//! SAML 2.0 constants and URIs.
//!
//! Contains namespace URIs, attribute name formats, and the algorithm
//! identifiers used by XML-DSig and XML-Enc.

/// SAML 2.0 assertion namespace URI.
pub const SAML_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// XML Digital Signature namespace URI.
pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// XML Encryption namespace URI.
pub const XMLENC_NS: &str = "http://www.w3.org/2001/04/xmlenc#";

/// XSI namespace URI.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XS namespace URI.
pub const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Attribute name-format URIs.
pub mod name_formats {
    /// URI name format.
    pub const URI: &str = "urn:oasis:names:tc:SAML:2.0:attrname-format:uri";

    /// Basic name format.
    pub const BASIC: &str = "urn:oasis:names:tc:SAML:2.0:attrname-format:basic";

    /// Unspecified name format.
    pub const UNSPECIFIED: &str = "urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified";
}

/// Reference transform URIs applied before digesting.
pub mod transforms {
    /// Enveloped signature transform.
    pub const ENVELOPED_SIGNATURE: &str = "http://www.w3.org/2000/09/xmldsig#enveloped-signature";

    /// Exclusive C14N without comments.
    pub const EXCLUSIVE_C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";
}

/// XML signature algorithms.
pub mod signature_algorithms {
    /// RSA-SHA256 signature algorithm.
    pub const RSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256";

    /// Legacy RSA-SHA1 signature algorithm (not recommended).
    pub const RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
}

/// Digest algorithms.
pub mod digest_algorithms {
    /// SHA-256 digest algorithm.
    pub const SHA256: &str = "http://www.w3.org/2001/04/xmlenc#sha256";

    /// Legacy SHA-1 digest algorithm (not recommended).
    pub const SHA1: &str = "http://www.w3.org/2000/09/xmldsig#sha1";
}

/// Symmetric content-encryption algorithms.
pub mod encryption_algorithms {
    /// AES-128 in CBC mode.
    pub const AES128_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes128-cbc";

    /// AES-256 in CBC mode.
    pub const AES256_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes256-cbc";

    /// AES-128 in GCM mode.
    pub const AES128_GCM: &str = "http://www.w3.org/2009/xmlenc11#aes128-gcm";

    /// AES-256 in GCM mode.
    pub const AES256_GCM: &str = "http://www.w3.org/2009/xmlenc11#aes256-gcm";
}

/// Key-transport algorithms.
pub mod key_transport_algorithms {
    /// RSA-OAEP with MGF1.
    pub const RSA_OAEP_MGF1P: &str = "http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p";

    /// Legacy RSA PKCS#1 v1.5 (not recommended).
    pub const RSA_1_5: &str = "http://www.w3.org/2001/04/xmlenc#rsa-1_5";
}
