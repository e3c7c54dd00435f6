/// Errors raised while signing a request or building its canonical string.
///
/// Verification never surfaces these: [authenticate](crate::HmacAuthenticator::authenticate)
/// folds every failure into `false`.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The access key id passed to `sign` has no secret in the credential store.
    #[error("unknown access key id `{0}`")]
    UnknownCredential(String),

    /// The request does not expose the named capability (a method or a path).
    #[error("request does not expose a {0}")]
    UnsupportedRequestKind(&'static str),

    /// The named canonical field contains a line break, which would make the canonical
    /// string ambiguous.
    #[error("{0} contains a line break")]
    InvalidCanonicalField(&'static str),

    /// A header the canonical string depends on appears more than once.
    #[error("header `{0}` has more than one value")]
    MultivaluedHeader(String),

    /// A header value could not be read as a string, or the request's header map refused
    /// the computed header value.
    #[error("invalid value for header `{0}`")]
    InvalidHeaderValue(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
