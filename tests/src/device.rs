//! Stand-in devices and session helpers shared by the scenarios.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wattbox_common::device::credentials::Credentials;
use wattbox_common::device::target::Target;
use wattbox_core::{DeviceSession, SessionConfig};

pub const USERNAME: &str = "wattbox";
pub const PASSWORD: &str = "wattbox";

/// `Authorization` value for [`USERNAME`] / [`PASSWORD`].
pub const BASIC_AUTHORIZATION: &str = "Basic d2F0dGJveDp3YXR0Ym94";

pub const DIGEST_CHALLENGE: &str = r#"Digest realm="WattBox", qop="auth", nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093", opaque="5ccc069c403ebaf9f0171e9517f40e41""#;

pub fn session(base: &str) -> DeviceSession {
    session_with(base, SessionConfig::default())
}

pub fn session_with(base: &str, cfg: SessionConfig) -> DeviceSession {
    let target = Target::from_str(base).expect("valid test address");
    DeviceSession::new(target, Credentials::new(USERNAME, PASSWORD), &cfg).expect("session builds")
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

/// A device that answers `/main` right away and never answers anything else.
pub async fn spawn_stalling_device() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);

                if request.starts_with("GET /main ") {
                    let _ = socket
                        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                        .await;
                } else {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
            });
        }
    });

    Ok(addr)
}

/// A device that reads the request and answers with a TCP reset.
pub async fn spawn_resetting_device() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            // A zero linger turns the close into a reset.
            #[allow(deprecated)]
            let _ = socket.set_linger(Some(Duration::ZERO));
            drop(socket);
        }
    });

    Ok(addr)
}
