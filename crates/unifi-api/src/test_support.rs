// Shared fixtures for the wiremock-backed unit tests.
//
// The public constructor only accepts https:// URLs and wiremock serves
// plain HTTP, so tests build clients through `Client::build` directly.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::auth::Credentials;
use crate::client::Client;
use crate::config::ClientConfig;
use crate::transport::TransportConfig;

pub(crate) fn client_for(base_url: &str, transport: TransportConfig) -> Client {
    let config = ClientConfig::new(base_url, Credentials::new("admin", "hunter2".to_owned()))
        .with_transport(transport);
    Client::build(config, false).unwrap()
}

pub(crate) fn logged_out_client(base_url: &str) -> Client {
    client_for(base_url, TransportConfig::default())
}

/// Mount the flavor check and a successful login for the given flavor.
pub(crate) async fn mount_login(server: &MockServer, unifi_os: bool) {
    let (root_status, login_path) = if unifi_os {
        (200, "/api/auth/login")
    } else {
        (302, "/api/login")
    };

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(root_status))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(login_path))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Start a mock controller and return a client already logged in to it.
pub(crate) async fn logged_in(unifi_os: bool) -> (MockServer, Client) {
    let server = MockServer::start().await;
    mount_login(&server, unifi_os).await;
    let mut client = logged_out_client(&server.uri());
    client.login().await.unwrap();
    (server, client)
}

/// An `ok` envelope around `data`.
pub(crate) fn ok_envelope(data: Value) -> Value {
    json!({ "meta": { "rc": "ok" }, "data": data })
}

/// Mount a site-scoped endpoint (legacy routing) answering with `data`.
pub(crate) async fn mount_ok(server: &MockServer, verb: &str, suffix: &str, data: Value) {
    Mock::given(method(verb))
        .and(path(format!("/api/s/default/{suffix}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(data)))
        .expect(1)
        .mount(server)
        .await;
}

/// JSON body of the last request the server received on `request_path`.
pub(crate) async fn last_body(server: &MockServer, request_path: &str) -> Value {
    let requests = server.received_requests().await.unwrap();
    let req = requests
        .iter()
        .rev()
        .find(|r| r.url.path() == request_path)
        .unwrap();
    serde_json::from_slice(&req.body).unwrap()
}
