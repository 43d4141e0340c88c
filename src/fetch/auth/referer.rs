use crate::errors::{GpaError, Result};
use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, REFERER};

/// An [`HttpClient`] wrapper that stamps a fixed `Referer` header on every
/// request.
///
/// The portal rejects login posts whose referer is not the login page itself,
/// so this is normally built with the endpoint URL.
pub struct Referer<C> {
    inner: C,
    value: HeaderValue,
}

impl<C> Referer<C> {
    pub fn new(inner: C, referer: &str) -> Result<Self> {
        let value = HeaderValue::from_str(referer)
            .map_err(|e| GpaError::Config(format!("invalid referer {referer:?}: {e}")))?;
        Ok(Self { inner, value })
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for Referer<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(REFERER, self.value.clone());
        self.inner.execute(req).await
    }
}
