use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    error::{Error, Result},
    request::RequestView,
};

pub const CONTENT_TYPE: &str = "content-type";
pub const CONTENT_MD5: &str = "content-md5";
pub const DATE: &str = "date";

/// The string that gets signed: the method, the `content-type`, `content-md5` and `date`
/// headers, and the path without its query string, joined by `\n`.
///
/// No other header and no part of the body contribute, so those can change in transit
/// without invalidating the signature. Missing headers are treated as empty, which means
/// signer and verifier must agree on whether a header is absent or present but empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanonicalString(Bytes);

impl CanonicalString {
    pub fn build<R: RequestView + ?Sized>(request: &R) -> Result<Self> {
        let method = request
            .method()
            .or_else(|| request.env_var("REQUEST_METHOD"))
            .ok_or(Error::UnsupportedRequestKind("method"))?;
        let path = request
            .path()
            .ok_or(Error::UnsupportedRequestKind("path"))?;
        let path = path.split_once('?').map_or(path, |(path, _query)| path);

        let fields = [
            ("method", method),
            (CONTENT_TYPE, request.header(CONTENT_TYPE)?.unwrap_or_default()),
            (CONTENT_MD5, request.header(CONTENT_MD5)?.unwrap_or_default()),
            (DATE, request.header(DATE)?.unwrap_or_default()),
            ("path", path),
        ];

        let capacity: usize = fields.iter().map(|(_, value)| value.len() + 1).sum();
        let mut buffer = BytesMut::with_capacity(capacity);
        for (index, (name, value)) in fields.into_iter().enumerate() {
            // Fields are joined without escaping.
            if value.contains(&['\n', '\r'][..]) {
                return Err(Error::InvalidCanonicalField(name));
            }
            if index > 0 {
                buffer.put_u8(b'\n');
            }
            buffer.extend_from_slice(value.as_bytes());
        }
        Ok(Self(buffer.freeze()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::request::{CgiRequest, OwnedRequest};

    fn request(method: &str, path: &str, headers: &[(&str, &str)]) -> OwnedRequest<HashMap<String, String>> {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        OwnedRequest::new(method, path, headers)
    }

    #[test]
    fn strips_query_and_fills_missing_headers() {
        let request = request(
            "GET",
            "/photos/1?size=large",
            &[("date", "Thu, 10 Jul 2008 03:29:56 GMT")],
        );
        let canonical = CanonicalString::build(&request).unwrap();
        assert_eq!(
            canonical.as_bytes(),
            &b"GET\n\n\nThu, 10 Jul 2008 03:29:56 GMT\n/photos/1"[..]
        );
    }

    #[test]
    fn includes_all_three_headers_in_order() {
        let request = request(
            "PUT",
            "/photos/1",
            &[
                ("content-type", "image/png"),
                ("content-md5", "Q2hlY2sgSW50ZWdyaXR5IQ=="),
                ("date", "Thu, 10 Jul 2008 03:29:56 GMT"),
            ],
        );
        assert_eq!(
            CanonicalString::build(&request).unwrap().to_string(),
            "PUT\nimage/png\nQ2hlY2sgSW50ZWdyaXR5IQ==\nThu, 10 Jul 2008 03:29:56 GMT\n/photos/1"
        );
    }

    #[test]
    fn ignores_other_headers() {
        let bare = request("GET", "/", &[]);
        let noisy = request("GET", "/", &[("x-request-id", "42"), ("Content-Type", "text/html")]);
        assert_eq!(
            CanonicalString::build(&bare).unwrap(),
            CanonicalString::build(&noisy).unwrap()
        );
    }

    #[test]
    fn path_is_byte_literal() {
        let request = request("GET", "/Photos/%7Euser/", &[]);
        assert_eq!(
            CanonicalString::build(&request).unwrap().to_string(),
            "GET\n\n\n\n/Photos/%7Euser/"
        );
    }

    #[test]
    fn falls_back_to_request_method_variable() {
        let request: CgiRequest = vec![
            ("REQUEST_METHOD", "DELETE"),
            ("REQUEST_URI", "/photos/1?force=true"),
            ("HTTP_DATE", "Thu, 10 Jul 2008 03:29:56 GMT"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            CanonicalString::build(&request).unwrap().to_string(),
            "DELETE\n\n\nThu, 10 Jul 2008 03:29:56 GMT\n/photos/1"
        );
    }

    #[test]
    fn missing_method_is_unsupported() {
        let request: CgiRequest = vec![("PATH_INFO", "/")].into_iter().collect();
        assert_eq!(
            CanonicalString::build(&request),
            Err(Error::UnsupportedRequestKind("method"))
        );
    }

    #[test]
    fn missing_path_is_unsupported() {
        let request: CgiRequest = vec![("REQUEST_METHOD", "GET")].into_iter().collect();
        assert_eq!(
            CanonicalString::build(&request),
            Err(Error::UnsupportedRequestKind("path"))
        );
    }

    #[test]
    fn rejects_line_breaks() {
        let request = request("GET", "/", &[("date", "today\nPOST")]);
        assert_eq!(
            CanonicalString::build(&request),
            Err(Error::InvalidCanonicalField(DATE))
        );
    }
}
