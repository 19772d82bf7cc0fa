//! Construction of the HTTP clients backing a session.
//!
//! Redirect handling is fixed per `reqwest::Client`, so a session owns two
//! clients: one that never follows redirects (probing) and one that does
//! (handshake and command). Both share a single cookie jar, which is what
//! makes them one logical session towards the device.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};

use crate::error::SessionError;

/// Connect and response budget used by the command line tool.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_REDIRECTS: usize = 30;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Budget for establishing a connection, and again for the response
    /// once connected.
    pub timeout: Duration,
    /// Skips TLS certificate and hostname verification.
    ///
    /// WattBox units ship self-signed certificates, so this is on by default.
    pub accept_invalid_certs: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: REQUEST_TIMEOUT,
            accept_invalid_certs: true,
        }
    }
}

pub(crate) struct HttpClients {
    /// Never follows redirects.
    pub probe: Client,
    /// Follows redirects.
    pub follow: Client,
}

impl HttpClients {
    pub fn build(cfg: &SessionConfig) -> Result<Self, SessionError> {
        let jar: Arc<Jar> = Arc::new(Jar::default());

        let probe = builder(cfg, &jar)
            .redirect(Policy::none())
            .build()
            .context("building probe client")?;

        let follow = builder(cfg, &jar)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .context("building session client")?;

        Ok(Self { probe, follow })
    }
}

fn builder(cfg: &SessionConfig, jar: &Arc<Jar>) -> ClientBuilder {
    Client::builder()
        .user_agent(concat!("wattbox/", env!("CARGO_PKG_VERSION")))
        .cookie_provider(Arc::clone(jar))
        .connect_timeout(cfg.timeout)
        // The response timer starts with the request, before connecting.
        .read_timeout(cfg.timeout.saturating_mul(2))
        .danger_accept_invalid_certs(cfg.accept_invalid_certs)
}
