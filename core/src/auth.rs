//! Attaching credentials to outgoing requests.
//!
//! Basic credentials are sent with every request. Digest needs a challenge
//! first: the initial request goes out bare, the device answers `401` with a
//! `WWW-Authenticate: Digest ...` header, and the request is repeated with a
//! computed answer. The parsed challenge is kept so later requests answer it
//! up front, each with the next nonce count.

use anyhow::{Context, anyhow};
use digest_auth::{AuthContext, WwwAuthenticateHeader};
use reqwest::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::warn;
use url::{Position, Url};
use wattbox_common::device::auth::AuthScheme;
use wattbox_common::device::credentials::Credentials;

use crate::error::SessionError;

pub struct Authenticator {
    scheme: AuthScheme,
    credentials: Credentials,
    challenge: Option<WwwAuthenticateHeader>,
}

impl Authenticator {
    pub fn new(scheme: AuthScheme, credentials: Credentials) -> Self {
        Self {
            scheme,
            credentials,
            challenge: None,
        }
    }

    pub fn scheme(&self) -> AuthScheme {
        self.scheme
    }

    /// Adds whatever `Authorization` header the scheme calls for.
    ///
    /// A Digest authenticator that has not seen a challenge yet leaves the
    /// request untouched.
    pub fn authorize(&mut self, request: RequestBuilder, url: &str) -> Result<RequestBuilder, SessionError> {
        match self.scheme {
            AuthScheme::Basic => Ok(request.basic_auth(
                self.credentials.username(),
                Some(self.credentials.password()),
            )),
            AuthScheme::Digest => {
                let Some(challenge) = self.challenge.as_mut() else {
                    return Ok(request);
                };

                let uri = request_uri(url)?;
                let context = AuthContext::new(
                    self.credentials.username(),
                    self.credentials.password(),
                    uri.as_str(),
                );
                let answer = challenge
                    .respond(&context)
                    .map_err(|e| anyhow!("answering digest challenge for {uri}: {e}"))?;

                Ok(request.header(AUTHORIZATION, answer.to_header_string()))
            }
        }
    }

    /// Stores a fresh Digest challenge carried by `response`.
    ///
    /// Returns `true` when the request that produced `response` should be
    /// sent again with an answer. Basic authenticators never retry.
    pub fn accept_challenge(&mut self, response: &Response) -> Result<bool, SessionError> {
        if self.scheme != AuthScheme::Digest || response.status() != StatusCode::UNAUTHORIZED {
            return Ok(false);
        }

        let Some(header) = response.headers().get(WWW_AUTHENTICATE) else {
            return Ok(false);
        };
        let header = String::from_utf8_lossy(header.as_bytes());

        let Some(challenge) = digest_challenge(&header) else {
            return Ok(false);
        };

        match digest_auth::parse(&challenge) {
            Ok(parsed) => {
                self.challenge = Some(parsed);
                Ok(true)
            }
            Err(e) => {
                // Left unanswered, the 401 surfaces as an HTTP error.
                warn!("Ignoring malformed digest challenge '{challenge}': {e}");
                Ok(false)
            }
        }
    }
}

/// Cuts the Digest challenge out of a `WWW-Authenticate` value.
///
/// Devices may list several challenges in one header; everything from the
/// first `digest` token (any case) onwards is kept, with the scheme name
/// spelled the way the parser expects.
fn digest_challenge(header: &str) -> Option<String> {
    const SCHEME: &str = "digest";

    let start = header.to_ascii_lowercase().find(SCHEME)?;
    Some(format!("Digest{}", &header[start + SCHEME.len()..]))
}

/// Path and query of `url`, the form Digest signs.
fn request_uri(url: &str) -> anyhow::Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("invalid request url '{url}'"))?;
    Ok(parsed[Position::BeforePath..Position::AfterQuery].to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
