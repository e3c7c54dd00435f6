use std::fmt;

/// The scheme name that opens every Authorization header value.
pub const AUTH_SCHEME: &str = "AuthHMAC";

/// The header the token is written to and read from.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// An `Authorization` header value of the form `AuthHMAC <access_key_id>:<signature>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AuthorizationToken<'a> {
    access_key_id: &'a str,
    signature: &'a str,
}

impl<'a> AuthorizationToken<'a> {
    pub fn new(access_key_id: &'a str, signature: &'a str) -> Self {
        Self {
            access_key_id,
            signature,
        }
    }

    /// Parses a header value. Returns `None` unless the value is the scheme name, a single
    /// space, a non-empty access key id, `:` and a non-empty signature.
    ///
    /// The split happens at the last `:`. Base64 never produces a `:`, so this agrees with
    /// splitting at the first `:` for every id without one, and still recovers ids that do
    /// contain `:`.
    pub fn parse(value: &'a str) -> Option<Self> {
        let credentials = value.strip_prefix(AUTH_SCHEME)?.strip_prefix(' ')?;
        let (access_key_id, signature) = credentials.rsplit_once(':')?;
        if access_key_id.is_empty() || signature.is_empty() {
            return None;
        }
        Some(Self::new(access_key_id, signature))
    }

    pub fn access_key_id(&self) -> &'a str {
        self.access_key_id
    }

    pub fn signature(&self) -> &'a str {
        self.signature
    }
}

impl fmt::Display for AuthorizationToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", AUTH_SCHEME, self.access_key_id, self.signature)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn formats_wire_value() {
        let token = AuthorizationToken::new("access key 1", "c7tpCLo0sWHCqCi+EHwHLQ0EhBc=");
        assert_eq!(
            token.to_string(),
            "AuthHMAC access key 1:c7tpCLo0sWHCqCi+EHwHLQ0EhBc="
        );
    }

    #[test]
    fn parses_wire_value() {
        let token = AuthorizationToken::parse("AuthHMAC access key 1:c7tpCLo0sWHCqCi+EHwHLQ0EhBc=").unwrap();
        assert_eq!(token.access_key_id(), "access key 1");
        assert_eq!(token.signature(), "c7tpCLo0sWHCqCi+EHwHLQ0EhBc=");
    }

    #[test]
    fn recovers_access_key_id_containing_colon() {
        let value = AuthorizationToken::new("tenant:alice", "abc=").to_string();
        let token = AuthorizationToken::parse(&value).unwrap();
        assert_eq!(token.access_key_id(), "tenant:alice");
        assert_eq!(token.signature(), "abc=");
    }

    #[test]
    fn splits_at_last_colon() {
        let token = AuthorizationToken::parse("AuthHMAC a:b:c").unwrap();
        assert_eq!((token.access_key_id(), token.signature()), ("a:b", "c"));

        // A real signature is Base64 and has no colon, so splitting at the first or the last
        // colon agrees whenever the id has none.
        let value = "AuthHMAC access key 1:c7tpCLo0sWHCqCi+EHwHLQ0EhBc=";
        let first = value["AuthHMAC ".len()..].split_once(':').unwrap();
        let token = AuthorizationToken::parse(value).unwrap();
        assert_eq!((token.access_key_id(), token.signature()), first);
        assert!(!base64::encode([0xffu8; 20]).contains(':'));
    }

    #[test]
    fn rejects_malformed_values() {
        for value in [
            "",
            "Bearer xyz",
            "AuthHMAC",
            "AuthHMAC ",
            "AuthHMAC id",
            "AuthHMAC :sig",
            "AuthHMAC id:",
            "AuthHMACid:sig",
            "authhmac id:sig",
            "Basic AuthHMAC id:sig",
        ] {
            assert_eq!(AuthorizationToken::parse(value), None, "{:?}", value);
        }
    }
}
