use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    sync::Arc,
};

/// Looks up the shared secret belonging to an access key id.
///
/// Any associative structure works, and so does a shim in front of an external secret
/// service. Lookups may be invoked concurrently when the store is shared between threads,
/// and must return a stable answer for the duration of one authentication attempt.
pub trait CredentialStore {
    /// Returns the secret for `access_key_id`, or `None` if the id is unknown.
    fn lookup(&self, access_key_id: &str) -> Option<Cow<'_, [u8]>>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for &S {
    fn lookup(&self, access_key_id: &str) -> Option<Cow<'_, [u8]>> {
        (**self).lookup(access_key_id)
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    fn lookup(&self, access_key_id: &str) -> Option<Cow<'_, [u8]>> {
        (**self).lookup(access_key_id)
    }
}

impl CredentialStore for HashMap<String, String> {
    fn lookup(&self, access_key_id: &str) -> Option<Cow<'_, [u8]>> {
        self.get(access_key_id).map(|secret| Cow::Borrowed(secret.as_bytes()))
    }
}

impl CredentialStore for HashMap<String, Vec<u8>> {
    fn lookup(&self, access_key_id: &str) -> Option<Cow<'_, [u8]>> {
        self.get(access_key_id).map(|secret| Cow::Borrowed(secret.as_slice()))
    }
}

impl CredentialStore for BTreeMap<String, String> {
    fn lookup(&self, access_key_id: &str) -> Option<Cow<'_, [u8]>> {
        self.get(access_key_id).map(|secret| Cow::Borrowed(secret.as_bytes()))
    }
}

impl CredentialStore for BTreeMap<String, Vec<u8>> {
    fn lookup(&self, access_key_id: &str) -> Option<Cow<'_, [u8]>> {
        self.get(access_key_id).map(|secret| Cow::Borrowed(secret.as_slice()))
    }
}

/// A store holding exactly one credential.
#[derive(Clone)]
pub struct SingleCredential {
    access_key_id: String,
    secret: Vec<u8>,
}

impl SingleCredential {
    pub fn new(access_key_id: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret: secret.into(),
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }
}

impl CredentialStore for SingleCredential {
    fn lookup(&self, access_key_id: &str) -> Option<Cow<'_, [u8]>> {
        if access_key_id == self.access_key_id {
            Some(Cow::Borrowed(self.secret.as_slice()))
        } else {
            None
        }
    }
}

// Keep the secret out of debug output.
impl Debug for SingleCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleCredential")
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}
