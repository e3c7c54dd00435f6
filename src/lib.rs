//! Shared-secret authentication of HTTP requests with the `AuthHMAC` scheme.
//!
//! A signer computes an HMAC-SHA1 over the request's [canonical string](CanonicalString)
//! and attaches it as `Authorization: AuthHMAC <access_key_id>:<signature>`. A verifier
//! looks up the secret for the access key id, recomputes the signature from the request it
//! received, and compares.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use auth_hmac::{HmacAuthenticator, OwnedRequest};
//!
//! let mut credentials = HashMap::new();
//! credentials.insert("access key 1".to_string(), "secret1".to_string());
//! let authenticator = HmacAuthenticator::new(credentials);
//!
//! let mut headers = HashMap::new();
//! headers.insert("date".to_string(), "Thu, 10 Jul 2008 03:29:56 GMT".to_string());
//! let mut request = OwnedRequest::new("GET", "/photos/1?size=large", headers);
//!
//! authenticator.sign(&mut request, "access key 1")?;
//! assert!(authenticator.authenticate(&request));
//! # Ok::<(), auth_hmac::Error>(())
//! ```
#![forbid(unsafe_code)]

mod authenticator;
mod canonical;
mod error;
pub mod request;
mod store;
mod token;

pub use authenticator::{signature_for, HmacAuthenticator};

pub use canonical::{CanonicalString, CONTENT_MD5, CONTENT_TYPE, DATE};

pub use error::{Error, Result};

pub use request::{BorrowedRequest, CgiRequest, Headers, OwnedRequest, RequestView};

pub use store::{CredentialStore, SingleCredential};

pub use token::{AuthorizationToken, AUTHORIZATION_HEADER, AUTH_SCHEME};
