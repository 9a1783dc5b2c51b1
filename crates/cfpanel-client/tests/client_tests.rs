use cfpanel_client::{PanelClient, PanelError};
use cfpanel_core::{ChangePasswordRequest, RegisterRequest, TempTunnelRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> PanelClient {
    PanelClient::new(server.uri()).unwrap()
}

#[tokio::test]
async fn zones_reply_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/zones"))
        .and(body_json(json!({"token": "T"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "zones": [{"id": "1", "name": "example.com"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).await.zones().list("T").await.unwrap();

    assert!(reply.ok);
    let zones = reply.data.unwrap().zones;
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].id, "1");
    assert_eq!(zones[0].name, "example.com");
}

#[tokio::test]
async fn error_status_with_json_body_is_a_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/change_password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error": "password must be at least 8 characters"
        })))
        .mount(&server)
        .await;

    let request = ChangePasswordRequest {
        old_password: "a".into(),
        new_password: "b".into(),
    };
    let reply = client_for(&server)
        .await
        .auth()
        .change_password(&request)
        .await
        .unwrap();

    assert!(!reply.ok);
    assert_eq!(
        reply.error.as_deref(),
        Some("password must be at least 8 characters")
    );
}

#[tokio::test]
async fn html_rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string("<h1>Too Many Requests</h1>"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .auth()
        .login("admin", "pw")
        .await
        .unwrap_err();

    assert!(matches!(err, PanelError::RateLimited { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn html_unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/check"))
        .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.system().check().await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn run_sends_exact_domain_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/run"))
        .and(body_json(json!({"domain": "foo.example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "pid": 4242})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .await
        .bindings()
        .run("foo.example.com")
        .await
        .unwrap();

    assert_eq!(reply.data.unwrap().pid, Some(4242));
}

#[tokio::test]
async fn list_keeps_string_ports() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "items": [{"domain": "a.example.com", "local_port": "8080", "api_token": "x", "yml_path": "/etc/cf_pro/yml/a.yml"}]
        })))
        .mount(&server)
        .await;

    let list = client_for(&server)
        .await
        .bindings()
        .list()
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(list.items[0].domain, "a.example.com");
    assert_eq!(list.items[0].local_port, "8080");
}

#[tokio::test]
async fn register_posts_all_form_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(json!({
            "token": "T",
            "account_id": "acc",
            "domain": "example.com",
            "zone_id": "1",
            "subdomain": "app",
            "local_port": "3000",
            "type": "http"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "domain": "app.example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = RegisterRequest {
        token: "T".into(),
        account_id: "acc".into(),
        domain: "example.com".into(),
        zone_id: "1".into(),
        subdomain: "app".into(),
        local_port: "3000".into(),
        service_type: "http".into(),
    };
    let reply = client_for(&server)
        .await
        .zones()
        .register(&request)
        .await
        .unwrap();

    let registration = reply.data.unwrap();
    assert_eq!(registration.domain.as_deref(), Some("app.example.com"));
    assert!(registration.is_running());
}

#[tokio::test]
async fn logout_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    assert!(client_for(&server).await.auth().logout().await.unwrap());
}

#[tokio::test]
async fn logout_failure_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!client_for(&server).await.auth().logout().await.unwrap());
}

#[tokio::test]
async fn login_cookie_is_sent_on_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/; HttpOnly")
                .set_body_json(json!({"ok": true, "message": "login success"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/temp_tunnel"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "domain": "https://quiet-river.trycloudflare.com",
            "pid": 77
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let login = client.auth().login("admin", "admin123").await.unwrap();
    assert!(login.ok);
    assert_eq!(client.session_cookie().as_deref(), Some("session=abc123"));

    let tunnel = client
        .tunnels()
        .temp_tunnel(&TempTunnelRequest::for_port(""))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(tunnel.pid, Some(77));
}

#[tokio::test]
async fn restored_session_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/list"))
        .and(header("cookie", "session=saved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.restore_session("session=saved");

    let reply = client.bindings().list().await.unwrap();
    assert!(reply.data.unwrap().items.is_empty());
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Nothing listens on port 9 locally
    let client = PanelClient::new("http://127.0.0.1:9").unwrap();
    let err = client.bindings().list().await.unwrap_err();
    assert!(matches!(
        err,
        PanelError::Connection(_) | PanelError::Http(_)
    ));
}

#[test]
fn invalid_base_url_is_rejected() {
    assert!(matches!(
        PanelClient::new("not a url"),
        Err(PanelError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn check_reads_unwrapped_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cloudflared": true,
            "xray": false,
            "main_dir": "/opt/cf_pro"
        })))
        .mount(&server)
        .await;

    let check = client_for(&server).await.system().check().await.unwrap();

    assert!(check.cloudflared);
    assert!(!check.is_ready());
    assert_eq!(check.main_dir, "/opt/cf_pro");
}

#[tokio::test]
async fn check_without_session_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/check"))
        .respond_with(ResponseTemplate::new(401).set_body_string("<h1>Unauthorized</h1>"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.system().check().await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn unexpected_payload_still_returns_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/temp_tunnel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "domain": null,
            "pid": "4242"
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .await
        .tunnels()
        .temp_tunnel(&TempTunnelRequest::for_port("8080"))
        .await
        .unwrap();

    assert!(reply.ok);
    assert!(reply.data.is_none());
    assert_eq!(reply.compact(), r#"{"ok":true,"domain":null,"pid":"4242"}"#);
}
