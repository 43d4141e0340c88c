//! Login against the student-records portal.

use tracing::{info, warn};

use crate::config::PortalConfig;
use crate::credentials::CredentialPair;
use crate::errors::{GpaError, Result};
use crate::fetch::auth::Referer;
use crate::fetch::{HttpClient, post_form};
use crate::parser::{Document, parse_document};

/// The portal login endpoint behind an injected transport.
pub struct Portal<C> {
    client: Referer<C>,
    config: PortalConfig,
}

impl<C: HttpClient> Portal<C> {
    /// Wraps `client` so every request carries the endpoint URL as `referer`.
    pub fn new(client: C, config: PortalConfig) -> Result<Self> {
        let client = Referer::new(client, &config.url)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// The transport underneath the referer wrapper.
    pub fn client(&self) -> &C {
        self.client.inner()
    }

    /// Posts the credential pair once and returns the page the portal sends back.
    ///
    /// # Errors
    ///
    /// - [`GpaError::AuthenticationFailure`] if the page carries the login-error marker.
    /// - [`GpaError::Transport`] if the request or body read fails.
    #[tracing::instrument(skip_all, fields(url = %self.config.url))]
    pub async fn authenticate(&self, credentials: &CredentialPair) -> Result<Document> {
        let fields = [("userid", credentials.id()), ("pwd", credentials.secret())];
        let (status, body) = post_form(&self.client, &self.config.url, &fields).await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Portal answered with a non-success status");
        }

        let doc = parse_document(&body);
        ensure_logged_in(&doc, &self.config.login_error_id)?;

        info!(bytes = body.len(), "Portal login accepted");
        Ok(doc)
    }
}

/// Fails if `<body>` holds the `span` the portal shows for rejected logins.
pub fn ensure_logged_in(doc: &Document, login_error_id: &str) -> Result<()> {
    if doc.has_element_id_in_body("span", login_error_id)? {
        warn!("Portal rejected the credentials");
        return Err(GpaError::AuthenticationFailure);
    }
    Ok(())
}
