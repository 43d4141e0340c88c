//! Error types for the portal pipeline.
//!
//! Every variant is terminal for a single run. None of them carry the
//! credential secret.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpaError {
    /// The portal rejected the credential pair.
    #[error("login failed, please recheck user id and password")]
    AuthenticationFailure,

    /// The page layout or a numeric cell did not match what extraction expects.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// No entry carried a grade present in the scale.
    #[error("no gradable credits found")]
    NoGradableCredits,

    /// The HTTP round trip itself failed.
    #[error("portal request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A configuration value or scale file is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GpaError>;
