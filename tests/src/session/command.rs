use std::time::Duration;

use mockito::{Matcher, Server};
use wattbox_common::device::auth::AuthScheme;
use wattbox_common::device::command::{Action, OutletCommand};
use wattbox_core::{SessionConfig, SessionError};

use crate::device::{self, BASIC_AUTHORIZATION, DIGEST_CHALLENGE};

fn outlet(number: u32, action: Action) -> OutletCommand {
    OutletCommand::new(number, action).unwrap()
}

#[tokio::test]
async fn basic_device_runs_command() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/main")
        .with_status(200)
        .expect(2)
        .create_async()
        .await;
    let command = server
        .mock("GET", "/outlet/off")
        .match_query(Matcher::UrlEncoded("o".into(), "3".into()))
        .match_header("authorization", BASIC_AUTHORIZATION)
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let report = device::session(&server.url())
        .run(outlet(3, Action::Off))
        .await
        .unwrap();

    command.assert_async().await;
    assert_eq!(report.command.to_string(), "'off' on outlet 3");
    assert_eq!(report.scheme, AuthScheme::Basic);
    assert_eq!(report.target.as_str(), server.url());
    assert_eq!(report.status.as_u16(), 200);
}

#[tokio::test]
async fn rejected_handshake_never_sends_command() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/main")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .create_async()
        .await;
    server
        .mock("GET", "/main")
        .match_header("authorization", BASIC_AUTHORIZATION)
        .with_status(401)
        .create_async()
        .await;
    let command = server
        .mock("GET", Matcher::Regex("^/outlet/".into()))
        .expect(0)
        .create_async()
        .await;

    let result = device::session(&server.url())
        .run(outlet(3, Action::Off))
        .await;

    match result {
        Err(SessionError::Http { status, .. }) => assert_eq!(status.as_u16(), 401),
        other => panic!("expected an HTTP error, got {other:?}"),
    }
    command.assert_async().await;
}

#[tokio::test]
async fn rejected_command_is_a_failure() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/main").with_status(200).create_async().await;
    server
        .mock("GET", "/outlet/reset")
        .match_query(Matcher::UrlEncoded("o".into(), "9".into()))
        .with_status(500)
        .with_body("outlet 9 does not exist")
        .create_async()
        .await;

    let result = device::session(&server.url())
        .run(outlet(9, Action::Reset))
        .await;

    match result {
        Err(SessionError::Http { status, url, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(url, format!("{}/outlet/reset?o=9", server.url()));
            assert_eq!(body, "outlet 9 does not exist");
        }
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn stalled_command_times_out() {
    let addr = device::spawn_stalling_device().await.unwrap();
    let cfg = SessionConfig {
        timeout: Duration::from_millis(300),
        ..SessionConfig::default()
    };

    let result = device::session_with(&format!("http://{addr}"), cfg)
        .run(outlet(3, Action::Off))
        .await;

    assert!(
        matches!(result, Err(SessionError::Timeout(_))),
        "expected a timeout, got {result:?}"
    );
}

/// Cookies handed out while negotiating come back with the command.
#[tokio::test]
async fn cookies_carry_over_to_command() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/main")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("set-cookie", "sid=probe-42; Path=/")
        .create_async()
        .await;
    server
        .mock("GET", "/main")
        .match_header("authorization", BASIC_AUTHORIZATION)
        .match_header("cookie", Matcher::Regex("sid=probe-42".into()))
        .with_status(200)
        .create_async()
        .await;
    let command = server
        .mock("GET", "/outlet/on")
        .match_query(Matcher::UrlEncoded("o".into(), "1".into()))
        .match_header("cookie", Matcher::Regex("sid=probe-42".into()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    device::session(&server.url())
        .run(outlet(1, Action::On))
        .await
        .unwrap();

    command.assert_async().await;
}

/// After the handshake the command answers the stored Digest challenge up front.
#[tokio::test]
async fn digest_command_is_answered_up_front() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/main")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_header("WWW-Authenticate", DIGEST_CHALLENGE)
        .create_async()
        .await;
    server
        .mock("GET", "/main")
        .match_header("authorization", Matcher::Regex("^Digest ".into()))
        .with_status(200)
        .create_async()
        .await;
    let bare_command = server
        .mock("GET", "/outlet/on")
        .match_query(Matcher::Any)
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_header("WWW-Authenticate", DIGEST_CHALLENGE)
        .expect(0)
        .create_async()
        .await;
    let command = server
        .mock("GET", "/outlet/on")
        .match_query(Matcher::UrlEncoded("o".into(), "2".into()))
        .match_header(
            "authorization",
            Matcher::AllOf(vec![
                Matcher::Regex("^Digest ".into()),
                Matcher::Regex(r#"uri="/outlet/on\?o=2""#.into()),
                Matcher::Regex("nc=00000002".into()),
            ]),
        )
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let report = device::session(&server.url())
        .run(outlet(2, Action::On))
        .await
        .unwrap();

    bare_command.assert_async().await;
    command.assert_async().await;
    assert_eq!(report.scheme, AuthScheme::Digest);
}
