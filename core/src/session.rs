//! The negotiation and command sequence for one device.
//!
//! A [`DeviceSession`] moves through [`Stage`]s strictly forward:
//!
//! ```text
//! Init -> Probed -> SchemeDetected -> Authenticated -> CommandSent
//! ```
//!
//! Calling a step out of order is reported as [`SessionError::Unexpected`];
//! nothing is ever retried or repeated behind the caller's back.

use anyhow::anyhow;
use reqwest::StatusCode;
use reqwest::header::{LOCATION, WWW_AUTHENTICATE};
use reqwest::Response;
use tracing::{debug, info_span, warn, Instrument};
use wattbox_common::device::auth::AuthScheme;
use wattbox_common::device::command::OutletCommand;
use wattbox_common::device::credentials::Credentials;
use wattbox_common::device::target::Target;

use crate::auth::Authenticator;
use crate::client::{HttpClients, SessionConfig};
use crate::error::SessionError;

const REDIRECT_STATUSES: [StatusCode; 5] = [
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::FOUND,
    StatusCode::SEE_OTHER,
    StatusCode::TEMPORARY_REDIRECT,
    StatusCode::PERMANENT_REDIRECT,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    Probed,
    SchemeDetected,
    Authenticated,
    CommandSent,
}

/// Outcome of a command the device accepted.
#[derive(Debug, Clone)]
pub struct CommandReport {
    pub command: OutletCommand,
    /// Address the command was sent to, after any HTTPS upgrade.
    pub target: Target,
    pub scheme: AuthScheme,
    pub status: StatusCode,
}

pub struct DeviceSession {
    target: Target,
    credentials: Credentials,
    clients: HttpClients,
    stage: Stage,
    /// `WWW-Authenticate` value of the last probe response.
    challenge: Option<String>,
    auth: Option<Authenticator>,
}

impl DeviceSession {
    pub fn new(target: Target, credentials: Credentials, cfg: &SessionConfig) -> Result<Self, SessionError> {
        Ok(Self {
            target,
            credentials,
            clients: HttpClients::build(cfg)?,
            stage: Stage::Init,
            challenge: None,
            auth: None,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Runs every step in order and sends `command`.
    pub async fn run(mut self, command: OutletCommand) -> Result<CommandReport, SessionError> {
        self.probe().instrument(info_span!("probe")).await?;
        self.detect_scheme()?;
        self.authenticate().instrument(info_span!("handshake")).await?;
        self.send_command(command).instrument(info_span!("command")).await
    }

    /// Requests the landing page without credentials or redirects.
    ///
    /// A redirect to an `https://` location replaces the target with that
    /// location's origin and probes once more there. A second redirect is
    /// not followed.
    pub async fn probe(&mut self) -> Result<&Target, SessionError> {
        self.expect_stage(Stage::Init, "probe")?;
        debug!("Connecting to {}...", self.target);

        let mut response = self.probe_once().await?;

        if REDIRECT_STATUSES.contains(&response.status()) {
            let location = header_string(&response, LOCATION).unwrap_or_default();
            debug!("Detected redirect to: {location}");

            if let Some(upgraded) = Target::upgrade_from_location(&location) {
                debug!("Switching to HTTPS: {upgraded}");
                self.target = upgraded;
                response = self.probe_once().await?;
            } else if location.starts_with("https://") {
                warn!("Ignoring unparsable redirect target '{location}'");
            }
        }

        self.challenge = header_string(&response, WWW_AUTHENTICATE);
        self.stage = Stage::Probed;
        Ok(&self.target)
    }

    /// Picks the auth scheme from the challenge seen by [`Self::probe`].
    pub fn detect_scheme(&mut self) -> Result<AuthScheme, SessionError> {
        self.expect_stage(Stage::Probed, "detect the auth scheme")?;

        let scheme = AuthScheme::detect(self.challenge.as_deref());
        debug!("Using {scheme} authentication");

        self.auth = Some(Authenticator::new(scheme, self.credentials.clone()));
        self.stage = Stage::SchemeDetected;
        Ok(scheme)
    }

    /// Logs in by requesting the landing page with credentials.
    pub async fn authenticate(&mut self) -> Result<StatusCode, SessionError> {
        self.expect_stage(Stage::SchemeDetected, "authenticate")?;

        let url = self.target.landing_url();
        debug!("Authenticating to {url}...");

        let response = self.authorized_get(&url).await?;
        let response = SessionError::check_status(response).await?;

        let status = response.status();
        debug!("Authentication successful (Status: {})", status.as_u16());
        debug!("Final URL: {}", response.url());

        self.stage = Stage::Authenticated;
        Ok(status)
    }

    /// Asks the device to run `command`.
    ///
    /// Success only means the device accepted the request, the outlet state
    /// is not read back.
    pub async fn send_command(&mut self, command: OutletCommand) -> Result<CommandReport, SessionError> {
        self.expect_stage(Stage::Authenticated, "send a command")?;

        let url = self.target.command_url(&command);
        debug!("Sending command to {url}...");

        let response = self.authorized_get(&url).await?;
        self.stage = Stage::CommandSent;
        let response = SessionError::check_status(response).await?;

        let status = response.status();
        debug!("Command successful (Status: {})", status.as_u16());

        Ok(CommandReport {
            command,
            target: self.target.clone(),
            scheme: self.auth.as_ref().map_or(AuthScheme::Basic, Authenticator::scheme),
            status,
        })
    }

    async fn probe_once(&self) -> Result<Response, SessionError> {
        self.clients
            .probe
            .get(self.target.landing_url())
            .send()
            .await
            .map_err(|e| SessionError::transport(e, &self.target))
    }

    /// GET through the redirect-following client with credentials attached.
    ///
    /// A Digest challenge in the answer is accepted and the request that
    /// drew it is sent once more.
    async fn authorized_get(&mut self, url: &str) -> Result<Response, SessionError> {
        let auth = self
            .auth
            .as_mut()
            .ok_or_else(|| anyhow!("no auth scheme selected"))?;

        let request = auth.authorize(self.clients.follow.get(url), url)?;
        let response = request
            .send()
            .await
            .map_err(|e| SessionError::transport(e, &self.target))?;

        if !auth.accept_challenge(&response)? {
            return Ok(response);
        }

        let retry_url = response.url().to_string();
        debug!("Answering digest challenge for {retry_url}");

        let request = auth.authorize(self.clients.follow.get(&retry_url), &retry_url)?;
        request
            .send()
            .await
            .map_err(|e| SessionError::transport(e, &self.target))
    }

    fn expect_stage(&self, expected: Stage, action: &str) -> Result<(), SessionError> {
        if self.stage == expected {
            return Ok(());
        }
        Err(anyhow!("cannot {action} at stage {:?}, expected {:?}", self.stage, expected).into())
    }
}

fn header_string(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
