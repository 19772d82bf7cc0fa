use std::error::Error as _;
use std::io;

use reqwest::StatusCode;
use thiserror::Error;
use wattbox_common::device::target::Target;

/// Every way a run can fail. Each variant is terminal.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The device answered with a status outside 2xx.
    #[error("{status} for url: {url}")]
    Http {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// The device could not be reached (DNS, refused, connect timeout) or
    /// dropped the connection mid-request.
    #[error("could not connect to {target}")]
    Connection {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    /// No answer arrived before the request timeout.
    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Any other transport failure, such as a redirect loop.
    #[error(transparent)]
    Request(reqwest::Error),

    /// A fault that has nothing to do with the network.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl SessionError {
    /// Sorts a transport error into the matching variant.
    ///
    /// Connect failures win over timeouts, so a connect that stalls is a
    /// connection error. A reset or early close from the device counts as
    /// a connection error too.
    pub fn transport(err: reqwest::Error, target: &Target) -> Self {
        if err.is_connect() || is_dropped_connection(&err) {
            Self::Connection {
                target: target.to_string(),
                source: err,
            }
        } else if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Request(err)
        }
    }

    /// Turns a completed response into an error unless its status is 2xx.
    pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Self> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();

        Err(Self::Http { status, url, body })
    }
}

fn is_dropped_connection(err: &reqwest::Error) -> bool {
    let mut source = err.source();

    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<io::Error>() {
            if matches!(
                io.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        if let Some(hyper) = inner.downcast_ref::<hyper::Error>() {
            if hyper.is_incomplete_message() {
                return true;
            }
        }
        source = inner.source();
    }

    false
}
