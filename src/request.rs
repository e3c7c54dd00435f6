use std::collections::HashMap;

use crate::error::Result;

/// This trait exposes all of the information about a HTTP request that is required to
/// build the canonical string, plus write access to the `Authorization` header.
///
/// The [OwnedRequest], [BorrowedRequest] and [CgiRequest] types are provided for use
/// cases where you do not have preexisting structs representing HTTP requests. Support for
/// the [http](https://crates.io/crates/http) crate's `Request` type can be enabled with the
/// `http` **feature**, which is off by default.
pub trait RequestView {
    /// The HTTP method, if the request carries one explicitly.
    fn method(&self) -> Option<&str>;

    /// Environment-style variables such as `REQUEST_METHOD`, for CGI-style requests. The
    /// canonical string builder falls back to `REQUEST_METHOD` when [method](Self::method)
    /// returns `None`.
    fn env_var(&self, _name: &str) -> Option<&str> {
        None
    }

    /// The request path. A trailing query string is allowed and is stripped during
    /// canonicalization.
    fn path(&self) -> Option<&str>;

    /// Looks up a header by its exact (case-sensitive) name. Fails when the header is
    /// present but cannot be read as exactly one string value.
    fn header(&self, name: &str) -> Result<Option<&str>>;

    /// Sets a header, replacing any previous value.
    fn set_header(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Read and write access to the headers of an [OwnedRequest] or [BorrowedRequest].
pub trait Headers {
    /// Returns the value of the header with the given `name`, if present. It is up to the
    /// implementor whether header names are case sensitive. Repeated headers and values
    /// that are not valid strings must be reported as errors rather than skipped.
    fn header(&self, name: &str) -> Result<Option<&str>>;

    /// Inserts a header with the given `name` and `value`, replacing any existing value.
    /// This is used to insert the computed Authorization header.
    fn insert_header(&mut self, name: &str, value: &str) -> Result<()>;
}

/// This is a simple implementation of [RequestView] that does not depend on any external
/// library. It owns all of the request data.
#[derive(Clone, Debug, Default)]
pub struct OwnedRequest<H> {
    method: String,
    path: String,
    headers: H,
}

impl<H> OwnedRequest<H> {
    /// Build a new [OwnedRequest] from owned components. `path` may include a query string.
    pub fn new(method: impl Into<String>, path: impl Into<String>, headers: H) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers,
        }
    }

    pub fn headers(&self) -> &H {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut H {
        &mut self.headers
    }

    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = method.into();
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }
}

impl<H: Headers> RequestView for OwnedRequest<H> {
    fn method(&self) -> Option<&str> {
        Some(&self.method)
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn header(&self, name: &str) -> Result<Option<&str>> {
        self.headers.header(name)
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        self.headers.insert_header(name, value)
    }
}

/// This is a simple implementation of [RequestView] that does not depend on any external
/// library. It borrows all of the request data.
#[derive(Debug)]
pub struct BorrowedRequest<'request, H> {
    method: &'request str,
    path: &'request str,
    headers: &'request mut H,
}

impl<'request, H> BorrowedRequest<'request, H> {
    /// Build a new [BorrowedRequest] from borrowed components.
    pub fn new(method: &'request str, path: &'request str, headers: &'request mut H) -> Self {
        Self {
            method,
            path,
            headers,
        }
    }
}

impl<'request, H: Headers> RequestView for BorrowedRequest<'request, H> {
    fn method(&self) -> Option<&str> {
        Some(self.method)
    }

    fn path(&self) -> Option<&str> {
        Some(self.path)
    }

    fn header(&self, name: &str) -> Result<Option<&str>> {
        self.headers.header(name)
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        self.headers.insert_header(name, value)
    }
}

/// A request described by a CGI environment, as handed to CGI scripts and Rack-style
/// servers. Headers live in `HTTP_*` variables (with `CONTENT_TYPE` and `CONTENT_MD5` as
/// the usual exceptions) and the method is only available as `REQUEST_METHOD`.
#[derive(Clone, Debug, Default)]
pub struct CgiRequest {
    env: HashMap<String, String>,
}

impl CgiRequest {
    pub fn new(env: HashMap<String, String>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.env
    }

    fn first_var(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.env_var(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CgiRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Maps a header name onto its CGI variable, e.g. `x-foo` to `HTTP_X_FOO`.
fn cgi_variable(header: &str) -> String {
    let mut variable = String::with_capacity(header.len() + 5);
    variable.push_str("HTTP_");
    variable.extend(header.chars().map(|c| match c {
        '-' => '_',
        c => c.to_ascii_uppercase(),
    }));
    variable
}

impl RequestView for CgiRequest {
    fn method(&self) -> Option<&str> {
        None
    }

    fn env_var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    fn path(&self) -> Option<&str> {
        self.first_var(&["REQUEST_URI", "PATH_INFO"])
    }

    fn header(&self, name: &str) -> Result<Option<&str>> {
        Ok(match name {
            "content-type" => self.first_var(&["CONTENT_TYPE", "HTTP_CONTENT_TYPE"]),
            "content-md5" => self.first_var(&["CONTENT_MD5", "HTTP_CONTENT_MD5"]),
            other => self.env_var(&cgi_variable(other)),
        })
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        self.env.insert(cgi_variable(name), value.to_string());
        Ok(())
    }
}

/// Support for representing [Headers] as a [HashMap](std::collections::HashMap).
mod hash_map {
    use crate::error::Result;

    impl super::Headers for std::collections::HashMap<String, String> {
        fn header(&self, name: &str) -> Result<Option<&str>> {
            Ok(self.get(name).map(String::as_str))
        }

        fn insert_header(&mut self, name: &str, value: &str) -> Result<()> {
            self.insert(name.into(), value.into());
            Ok(())
        }
    }
}

/// Support for representing [Headers] as a [BTreeMap](std::collections::BTreeMap).
mod btree_map {
    use crate::error::Result;

    impl super::Headers for std::collections::BTreeMap<String, String> {
        fn header(&self, name: &str) -> Result<Option<&str>> {
            Ok(self.get(name).map(String::as_str))
        }

        fn insert_header(&mut self, name: &str, value: &str) -> Result<()> {
            self.insert(name.into(), value.into());
            Ok(())
        }
    }
}

/// Adds support for using types from the [http](https://crates.io/crates/http) crate
/// as implementations of [RequestView] and [Headers].
///
/// `http::HeaderMap` looks names up case-insensitively. A header that appears more than
/// once, or whose value is not visible ASCII, is an error.
///
/// Requires the `http` feature to be enabled.
#[cfg(feature = "http")]
mod http {
    use http::{header::HeaderName, HeaderMap, HeaderValue};

    use super::{Headers, RequestView};
    use crate::error::{Error, Result};

    impl<Body> RequestView for ::http::Request<Body> {
        fn method(&self) -> Option<&str> {
            Some(self.method().as_str())
        }

        fn path(&self) -> Option<&str> {
            let uri = self.uri();
            Some(uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str()))
        }

        fn header(&self, name: &str) -> Result<Option<&str>> {
            self.headers().header(name)
        }

        fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
            self.headers_mut().insert_header(name, value)
        }
    }

    impl Headers for HeaderMap<HeaderValue> {
        fn header(&self, name: &str) -> Result<Option<&str>> {
            let mut values = self.get_all(name).iter();
            let value = match values.next() {
                Some(value) => value,
                None => return Ok(None),
            };
            if values.next().is_some() {
                return Err(Error::MultivaluedHeader(name.to_string()));
            }
            value
                .to_str()
                .map(Some)
                .map_err(|_err| Error::InvalidHeaderValue(name.to_string()))
        }

        fn insert_header(&mut self, name: &str, value: &str) -> Result<()> {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_err| Error::InvalidHeaderValue(name.to_string()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_err| Error::InvalidHeaderValue(name.to_string()))?;
            self.insert(header_name, header_value);
            Ok(())
        }
    }
}
