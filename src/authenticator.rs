use log::{debug, trace};
use ring::{constant_time, hmac};

use crate::{
    canonical::CanonicalString,
    error::{Error, Result},
    request::RequestView,
    store::{CredentialStore, SingleCredential},
    token::{AuthorizationToken, AUTHORIZATION_HEADER},
};

/// Computes the signature of `request` under `secret`: the Base64-encoded HMAC-SHA1 of the
/// request's [canonical string](CanonicalString).
pub fn signature_for<R: RequestView + ?Sized>(request: &R, secret: &[u8]) -> Result<String> {
    let canonical = CanonicalString::build(request)?;
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, secret);
    let tag = hmac::sign(&key, canonical.as_bytes());
    let mut signature = base64::encode(tag.as_ref());
    signature.truncate(signature.trim_end().len());
    Ok(signature)
}

/// Signs requests and authenticates signed requests using the secrets held by a
/// [CredentialStore].
///
/// Signing writes `Authorization: AuthHMAC <access_key_id>:<signature>`. Authentication
/// recomputes the signature from the received request and compares it with the one in the
/// header. The authenticator holds no mutable state, so it can be shared between threads
/// whenever its store can.
#[derive(Clone, Debug, Default)]
pub struct HmacAuthenticator<S> {
    store: S,
}

impl<S: CredentialStore> HmacAuthenticator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Computes the Authorization header value for `request` without modifying it.
    pub fn authorization_for<R: RequestView + ?Sized>(
            &self,
            request: &R,
            access_key_id: &str) -> Result<String> {
        let secret = self
            .store
            .lookup(access_key_id)
            .ok_or_else(|| Error::UnknownCredential(access_key_id.to_string()))?;
        let signature = signature_for(request, &secret)?;
        Ok(AuthorizationToken::new(access_key_id, &signature).to_string())
    }

    /// Signs `request` with the secret of `access_key_id`, overwriting any Authorization
    /// header already present.
    ///
    /// Fails with [Error::UnknownCredential] when the store has no such id; asking to sign
    /// with an unknown key is a caller bug rather than an authentication failure.
    pub fn sign<R: RequestView + ?Sized>(&self, request: &mut R, access_key_id: &str) -> Result<()> {
        let authorization = self.authorization_for(request, access_key_id)?;
        request.set_header(AUTHORIZATION_HEADER, &authorization)?;
        trace!("signed request with access key id {:?}", access_key_id);
        Ok(())
    }

    /// Returns true if `request` carries a valid Authorization header.
    ///
    /// Never fails: a missing or malformed header, an unknown access key id, an unusable
    /// request and a wrong signature all yield `false`, and the result does not reveal
    /// which of these happened.
    pub fn authenticate<R: RequestView + ?Sized>(&self, request: &R) -> bool {
        let header = match request.header(AUTHORIZATION_HEADER) {
            Ok(Some(header)) => header,
            Ok(None) => {
                debug!("rejecting request: no {} header", AUTHORIZATION_HEADER);
                return false;
            }
            Err(err) => {
                debug!("rejecting request: {}", err);
                return false;
            }
        };
        let token = match AuthorizationToken::parse(header) {
            Some(token) => token,
            None => {
                debug!("rejecting request: malformed {} header", AUTHORIZATION_HEADER);
                return false;
            }
        };
        let secret = match self.store.lookup(token.access_key_id()) {
            Some(secret) => secret,
            None => {
                debug!("rejecting request: unknown access key id {:?}", token.access_key_id());
                return false;
            }
        };
        let expected = match signature_for(request, &secret) {
            Ok(expected) => expected,
            Err(err) => {
                debug!("rejecting request: {}", err);
                return false;
            }
        };
        if constant_time::verify_slices_are_equal(expected.as_bytes(), token.signature().as_bytes()).is_err() {
            debug!("rejecting request: signature mismatch for access key id {:?}", token.access_key_id());
            return false;
        }
        trace!("authenticated request with access key id {:?}", token.access_key_id());
        true
    }
}

impl HmacAuthenticator<SingleCredential> {
    /// Signs `request` with a single key pair, for callers that have no credential store.
    pub fn sign_one_shot<R: RequestView + ?Sized>(
            request: &mut R,
            access_key_id: &str,
            secret: impl Into<Vec<u8>>) -> Result<()> {
        Self::new(SingleCredential::new(access_key_id, secret)).sign(request, access_key_id)
    }
}
