use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;

use crate::constants::{
    HEADER_IDENTITY_NAME, HEADER_IDENTITY_SIGNATURE, HEADER_IDENTITY_SUBJECT,
    HEADER_IDENTITY_TIMESTAMP,
};
use crate::security::Credentials;

/// Identity headers forwarded by the auth gateway, still unverified
///
/// Extraction never fails: missing or malformed headers yield `None` and the
/// service decides whether the operation needs an identity.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Credentials>);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(credentials_from_headers(&parts.headers)))
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Read the four identity headers; all must be present and the timestamp numeric
pub fn credentials_from_headers(headers: &HeaderMap) -> Option<Credentials> {
    let subject = header(headers, HEADER_IDENTITY_SUBJECT)?;
    let name = header(headers, HEADER_IDENTITY_NAME)?;
    let timestamp = header(headers, HEADER_IDENTITY_TIMESTAMP)?.parse().ok()?;
    let signature = header(headers, HEADER_IDENTITY_SIGNATURE)?;

    Some(Credentials {
        subject: subject.to_string(),
        name: name.to_string(),
        timestamp,
        signature: signature.to_string(),
    })
}
