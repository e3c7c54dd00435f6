extern crate auth_hmac;

use std::collections::HashMap;

use auth_hmac::{CanonicalString, HmacAuthenticator, OwnedRequest, RequestView};

fn main() {
    env_logger::init();

    let mut credentials = HashMap::new();
    credentials.insert("my_key_id".to_string(), "my secret".to_string());
    let authenticator = HmacAuthenticator::new(credentials);

    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    headers.insert("date".to_string(), "Thu, 10 Jul 2008 03:29:56 GMT".to_string());
    headers.insert("x-foo".to_string(), "bar".to_string());
    let mut request = OwnedRequest::new("POST", "/foo/bar?foo=bar", headers);

    let canonical = CanonicalString::build(&request).expect("Failed to canonicalize");
    println!("canonical string: {:?}", canonical.to_string());

    authenticator.sign(&mut request, "my_key_id").expect("Failed to sign");
    println!("{}: {}", auth_hmac::AUTHORIZATION_HEADER, request.header("Authorization").ok().flatten().unwrap_or_default());
    println!("authenticated: {}", authenticator.authenticate(&request));

    request.set_method("DELETE");
    println!("authenticated after changing method: {}", authenticator.authenticate(&request));
}
