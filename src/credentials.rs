use std::fmt;

/// A portal user id and password, held only for the duration of one run.
///
/// `Debug` redacts the secret. There is no `Display` or `Serialize` impl.
#[derive(Clone)]
pub struct CredentialPair {
    id: String,
    secret: String,
}

impl CredentialPair {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("id", &self.id)
            .field("secret", &"***")
            .finish()
    }
}
