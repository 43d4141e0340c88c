mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::errors::{GpaError, Result};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use tracing::debug;

/// Sends `fields` as a form-encoded POST and reads the whole body.
///
/// The response is consumed before returning, which hands the connection
/// back to the client on every path.
pub async fn post_form<C: HttpClient>(
    client: &C,
    url: &str,
    fields: &[(&str, &str)],
) -> Result<(StatusCode, Vec<u8>)> {
    let url: Url = url
        .parse()
        .map_err(|e| GpaError::Config(format!("invalid portal url {url:?}: {e}")))?;

    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();

    let mut req = reqwest::Request::new(Method::POST, url);
    req.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    *req.body_mut() = Some(body.into());

    let resp = client.execute(req).await?;
    let status = resp.status();
    let bytes = resp.bytes().await?;
    debug!(status = status.as_u16(), bytes = bytes.len(), "Form response read");

    Ok((status, bytes.to_vec()))
}
