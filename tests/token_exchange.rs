//! End-to-end token exchange tests.
//!
//! These drive the default reqwest transport against a local mock server.

use nylas_mail::{ClientConfig, Error, GrantType, NylasClient, Provider};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, NylasClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(
        server.uri(),
        "client-1",
        "secret-1",
        "https://app.example.com/callback",
    );
    let client = NylasClient::new(config).unwrap();
    (server, client)
}

fn grant_body() -> serde_json::Value {
    json!({
        "access_token": "tok1",
        "expires_in": 3600,
        "id_token": "idt",
        "email": "a@b.com",
        "scopes": "a b c",
        "token_type": "Bearer",
        "grant_id": "g1",
        "provider": "google",
    })
}

#[tokio::test]
async fn authorization_code_exchange_yields_online_grant() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v3/connect/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=authcode"))
        .and(body_string_contains("code_verifier=nylas"))
        .and(body_string_contains(
            "redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant_body()))
        .expect(1)
        .mount(&server)
        .await;

    let grant = client.exchange_token("authcode", true).await.unwrap();

    assert_eq!(grant.scopes(), ["a", "b", "c"]);
    assert_eq!(grant.provider(), Some(Provider::Google));
    assert_eq!(grant.grant_type(), GrantType::Online);
    assert!(!grant.is_token_expired());
    assert_eq!(grant.refresh_token(), None);
}

#[tokio::test]
async fn refresh_token_exchange_yields_offline_grant() {
    let (server, client) = setup().await;

    let mut body = grant_body();
    body["refresh_token"] = json!("r-123");
    body["expires_in"] = json!(0);

    Mock::given(method("POST"))
        .and(path("/v3/connect/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=r-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let grant = client.exchange_token("r-123", false).await.unwrap();

    assert_eq!(grant.grant_type(), GrantType::Offline);
    assert_eq!(grant.refresh_token(), Some("r-123"));
    assert!(grant.is_token_expired());
}

#[tokio::test]
async fn rejected_exchange_reports_provider_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v3/connect/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error_code": 7, "error_description": "invalid_grant"})),
        )
        .mount(&server)
        .await;

    let err = client.exchange_token("authcode", true).await.unwrap_err();
    match err {
        Error::UnsuccessfulTokenExchange { code, description } => {
            assert_eq!(code, Some(7));
            assert_eq!(description, "invalid_grant");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = ClientConfig::new(uri, "client-1", "secret-1", "https://cb");
    let client = NylasClient::new(config).unwrap();

    let err = client.exchange_token("authcode", true).await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
}

#[tokio::test]
async fn grant_record_round_trips_response_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v3/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant_body()))
        .mount(&server)
        .await;

    let grant = client.exchange_token("authcode", true).await.unwrap();
    let record = grant.to_record();

    for key in [
        "access_token",
        "expires_in",
        "id_token",
        "email",
        "token_type",
        "grant_id",
        "provider",
    ] {
        assert_eq!(record[key], grant_body()[key], "{key}");
    }
    assert_eq!(record["scopes"], json!(["a", "b", "c"]));
    assert_eq!(record["refresh_token"], json!(null));
    assert_eq!(record["grant_type"], json!("online"));
}
