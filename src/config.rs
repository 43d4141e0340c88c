//! Portal endpoint and page-layout settings.
//!
//! Values come from the environment (the binary loads a `.env` file first)
//! and fall back to the live McMaster course-history page.

use std::time::Duration;

use crate::errors::{GpaError, Result};
use crate::extract::CellLayout;

pub const DEFAULT_PORTAL_URL: &str = "https://csprd.mcmaster.ca/psc/prcsprd/EMPLOYEE/SA/c/SA_LEARNER_SERVICES.SSS_MY_CRSEHIST.GBL?Page=SSS_MY_CRSEHIST&Action=U";
pub const DEFAULT_LOGIN_ERROR_ID: &str = "login_error";

#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    /// Login endpoint; also sent as the `referer`.
    pub url: String,
    /// Id of the `<span>` the portal renders when a login is rejected.
    pub login_error_id: String,
    pub layout: CellLayout,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PORTAL_URL.to_string(),
            login_error_id: DEFAULT_LOGIN_ERROR_ID.to_string(),
            layout: CellLayout::default(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl PortalConfig {
    /// Reads `GPA_PORTAL_URL`, `GPA_LOGIN_ERROR_ID`, `GPA_CELL_CLASS`,
    /// `GPA_TIMEOUT_SECS` and `GPA_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PortalConfig::from_env`] but with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("GPA_PORTAL_URL") {
            config.url = url;
        }
        if let Some(id) = lookup("GPA_LOGIN_ERROR_ID") {
            config.login_error_id = id;
        }
        if let Some(class) = lookup("GPA_CELL_CLASS") {
            config.layout.cell_class = class;
        }
        if let Some(secs) = lookup("GPA_TIMEOUT_SECS") {
            config.timeout = parse_secs("GPA_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("GPA_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = parse_secs("GPA_CONNECT_TIMEOUT_SECS", &secs)?;
        }

        Ok(config)
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| GpaError::Config(format!("{key} must be a whole number of seconds, got {value:?}")))
}
