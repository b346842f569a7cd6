#![allow(clippy::unwrap_used)]
// Integration tests for `FmgProvider` against a mocked JSON-RPC endpoint.

use std::collections::HashMap;

use serde_json::{Value as Json, json};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

use fmg_core::differ::{Diff, diff};
use fmg_core::provider::Provider;
use fmg_core::resource::{Resource, ResourceId, Value};
use fmg_provider::{Error, FmgProvider, FortiClient, ProviderConfig, ProviderSettings};

// ── Helpers ─────────────────────────────────────────────────────────

fn settings(server: &MockServer) -> ProviderSettings {
    ProviderSettings {
        hostname: Some(server.uri()),
        token: Some("t0k".into()),
        device_name: Some("FGT1".into()),
        ..Default::default()
    }
}

fn provider(server: &MockServer, settings: &ProviderSettings) -> FmgProvider {
    let config = ProviderConfig::resolve(settings, |_| None).unwrap();
    let client = FortiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        config.credentials.clone(),
    );
    FmgProvider::with_client(client, config)
}

fn ok(url: &str, data: Option<Json>) -> ResponseTemplate {
    let mut result = json!({"status": {"code": 0, "message": "OK"}, "url": url});
    if let Some(data) = data {
        result["data"] = data;
    }
    ResponseTemplate::new(200).set_body_json(json!({"id": 1, "result": [result]}))
}

fn status(url: &str, code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": 1,
        "result": [{"status": {"code": code, "message": message}, "url": url}]
    }))
}

fn rpc(rpc_method: &str, url: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(
            json!({"method": rpc_method, "params": [{"url": url}]}),
        ))
}

const DNAT: &str = "/pm/config/device/FGT1/vdom/root/firewall/dnstranslation";

fn dnat(fosid: i64) -> Resource {
    Resource::new("firewall_dnstranslation", "web")
        .with_attribute("fosid", Value::Int(fosid))
        .with_attribute("src", Value::from("10.0.0.1"))
        .with_attribute("dst", Value::from("192.168.0.1"))
}

// ── Session tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_login_session_is_sent_with_calls() {
    let server = MockServer::start().await;
    let mut s = settings(&server);
    s.token = None;
    s.username = Some("admin".into());
    s.password = Some("secret".into());
    let p = provider(&server, &s);

    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({
            "method": "exec",
            "params": [{"url": "/sys/login/user", "data": {"user": "admin", "passwd": "secret"}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "result": [{"status": {"code": 0, "message": "OK"}, "url": "/sys/login/user"}],
            "session": "sess-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = "/pm/config/device/FGT1/global/system/dns";
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({"method": "get", "session": "sess-1"})))
        .respond_with(ok(url, Some(json!({"primary": "8.8.8.8"}))))
        .expect(1)
        .mount(&server)
        .await;

    p.connect().await.unwrap();
    let id = ResourceId::new("system_dns", "dns");
    let state = p.read(&id, None, &HashMap::new()).await.unwrap();

    assert!(state.exists);
    assert_eq!(state.identifier.as_deref(), Some("SystemDns"));
    assert_eq!(state.attributes.get("primary"), Some(&Value::from("8.8.8.8")));
}

#[tokio::test]
async fn test_login_failure() {
    let server = MockServer::start().await;
    let mut s = settings(&server);
    s.token = None;
    s.username = Some("admin".into());
    s.password = Some("wrong".into());
    let p = provider(&server, &s);

    rpc("exec", "/sys/login/user")
        .respond_with(status("/sys/login/user", -22, "Login fail"))
        .mount(&server)
        .await;

    let result = p.connect().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    let config = ProviderConfig::resolve(&settings(&server), |_| None).unwrap();
    let p = FmgProvider::new(config).unwrap();

    let url = "/pm/config/device/FGT1/global/system/dns";
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(header("authorization", "Bearer t0k"))
        .respond_with(ok(url, Some(json!({"primary": "1.1.1.1"}))))
        .expect(1)
        .mount(&server)
        .await;

    let id = ResourceId::new("system_dns", "dns");
    let state = p.read(&id, None, &HashMap::new()).await.unwrap();
    assert!(state.exists);
}

// ── CRUD tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_reads_back() {
    let server = MockServer::start().await;
    let p = provider(&server, &settings(&server));

    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({
            "method": "add",
            "params": [{"url": DNAT, "data": {"id": 3, "src": "10.0.0.1", "dst": "192.168.0.1"}}]
        })))
        .respond_with(ok(DNAT, None))
        .expect(1)
        .mount(&server)
        .await;

    let object_url = format!("{DNAT}/3");
    rpc("get", &object_url)
        .respond_with(ok(
            &object_url,
            Some(json!({
                "id": 3,
                "src": "10.0.0.1",
                "dst": "192.168.0.1",
                "netmask": "255.255.255.255"
            })),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let state = p.create(&dnat(3)).await.unwrap();

    assert!(state.exists);
    assert_eq!(state.identifier.as_deref(), Some("3"));
    assert_eq!(state.attributes.get("fosid"), Some(&Value::Int(3)));
    assert_eq!(
        state.attributes.get("netmask"),
        Some(&Value::from("255.255.255.255"))
    );
}

#[tokio::test]
async fn test_create_address_round_trips_mask_form() {
    let server = MockServer::start().await;
    let p = provider(&server, &settings(&server));
    let collection = "/pm/config/adom/root/obj/firewall/address";

    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({
            "method": "add",
            "params": [{
                "url": collection,
                "data": {"name": "lan", "subnet": "10.0.0.0 255.255.255.0"}
            }]
        })))
        .respond_with(ok(collection, None))
        .expect(1)
        .mount(&server)
        .await;

    let object_url = format!("{collection}/lan");
    rpc("get", &object_url)
        .respond_with(ok(
            &object_url,
            Some(json!({
                "name": "lan",
                "type": "ipmask",
                "subnet": ["10.0.0.0", "255.255.255.0"]
            })),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let desired = Resource::new("object_firewall_address", "lan")
        .with_attribute("name", Value::from("lan"))
        .with_attribute("subnet", Value::from("10.0.0.0/24"));
    let state = p.create(&desired).await.unwrap();

    assert_eq!(state.identifier.as_deref(), Some("lan"));
    assert_eq!(
        state.attributes.get("subnet"),
        Some(&Value::from("10.0.0.0 255.255.255.0"))
    );

    let schema = fmg_provider::schemas::find_config("object_firewall_address")
        .unwrap()
        .schema;
    assert!(matches!(
        diff(&desired, &state, Some(&schema)),
        Diff::NoChange(_)
    ));
}

#[tokio::test]
async fn test_create_error_message() {
    let server = MockServer::start().await;
    let p = provider(&server, &settings(&server));

    rpc("add", DNAT)
        .respond_with(status(DNAT, -10, "The data is invalid for selected url"))
        .mount(&server)
        .await;

    let err = p.create(&dnat(3)).await.unwrap_err();
    assert!(
        err.message
            .starts_with("Error creating FirewallDnstranslation resource:"),
        "{}",
        err.message
    );
    assert!(err.message.contains("The data is invalid"));
}

#[tokio::test]
async fn test_update_keyed_object() {
    let server = MockServer::start().await;
    let p = provider(&server, &settings(&server));

    let object_url = format!("{DNAT}/3");
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_partial_json(json!({
            "method": "update",
            "params": [{"url": object_url, "data": {"src": "10.0.0.9"}}]
        })))
        .respond_with(ok(&object_url, None))
        .expect(1)
        .mount(&server)
        .await;
    rpc("get", &object_url)
        .respond_with(ok(
            &object_url,
            Some(json!({"id": 3, "src": "10.0.0.9", "dst": "192.168.0.1"})),
        ))
        .mount(&server)
        .await;

    let id = ResourceId::new("firewall_dnstranslation", "web");
    let to = dnat(3).with_attribute("src", Value::from("10.0.0.9"));
    let from = fmg_core::resource::State::existing(id.clone(), HashMap::new());
    let state = p.update(&id, "3", &from, &to).await.unwrap();

    assert_eq!(state.attributes.get("src"), Some(&Value::from("10.0.0.9")));
}

#[tokio::test]
async fn test_read_missing_object_is_not_found() {
    let server = MockServer::start().await;
    let p = provider(&server, &settings(&server));

    let object_url = format!("{DNAT}/9");
    rpc("get", &object_url)
        .respond_with(status(&object_url, -3, "Object does not exist"))
        .mount(&server)
        .await;

    let id = ResourceId::new("firewall_dnstranslation", "web");
    let state = p.read(&id, Some("9"), &HashMap::new()).await.unwrap();

    assert!(!state.exists);
    assert!(state.identifier.is_none());
}

#[tokio::test]
async fn test_read_reports_bad_field() {
    let server = MockServer::start().await;
    let p = provider(&server, &settings(&server));

    let object_url = format!("{DNAT}/3");
    rpc("get", &object_url)
        .respond_with(ok(&object_url, Some(json!({"id": 3, "src": "not-an-ip"}))))
        .mount(&server)
        .await;

    let id = ResourceId::new("firewall_dnstranslation", "web");
    let err = p.read(&id, Some("3"), &HashMap::new()).await.unwrap_err();
    assert!(err.message.starts_with("Error reading src:"), "{}", err.message);
}

#[tokio::test]
async fn test_read_keeps_scope_attributes() {
    let server = MockServer::start().await;
    let p = provider(&server, &settings(&server));

    let url = "/pm/config/device/FGT2/vdom/dmz/firewall/dnstranslation/3";
    rpc("get", url)
        .respond_with(ok(url, Some(json!({"id": 3}))))
        .expect(1)
        .mount(&server)
        .await;

    let id = ResourceId::new("firewall_dnstranslation", "web");
    let mut attributes = HashMap::new();
    attributes.insert("device_name".to_string(), Value::from("FGT2"));
    attributes.insert("device_vdom".to_string(), Value::from("dmz"));
    let state = p.read(&id, Some("3"), &attributes).await.unwrap();

    assert_eq!(state.attributes.get("device_name"), Some(&Value::from("FGT2")));
    assert_eq!(state.attributes.get("device_vdom"), Some(&Value::from("dmz")));
}

#[tokio::test]
async fn test_delete_escapes_key() {
    let server = MockServer::start().await;
    let p = provider(&server, &settings(&server));

    let url = "/pm/config/adom/root/obj/firewall/address/net\\/24";
    rpc("delete", url)
        .respond_with(ok(url, None))
        .expect(1)
        .mount(&server)
        .await;

    let id = ResourceId::new("object_firewall_address", "net");
    p.delete(&id, "net/24", &HashMap::new()).await.unwrap();
}

#[tokio::test]
async fn test_delete_error_message() {
    let server = MockServer::start().await;
    let p = provider(&server, &settings(&server));

    let url = "/pm/config/device/FGT1/global/system/global";
    rpc("delete", url)
        .respond_with(status(url, -6, "Invalid url"))
        .mount(&server)
        .await;

    let id = ResourceId::new("system_global", "global");
    let err = p
        .delete(&id, "SystemGlobal", &HashMap::new())
        .await
        .unwrap_err();
    assert!(
        err.message
            .starts_with("Error deleting SystemGlobal resource:"),
        "{}",
        err.message
    );
}

// ── Workspace tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_workspace_lock_commit_unlock() {
    let server = MockServer::start().await;
    let mut s = settings(&server);
    s.workspace_mode = Some("normal".into());
    s.adom = Some("prod".into());
    let p = provider(&server, &s);

    for action in ["lock", "commit", "unlock"] {
        let url = format!("/dvmdb/adom/prod/workspace/{action}");
        rpc("exec", &url)
            .respond_with(ok(&url, None))
            .expect(1)
            .mount(&server)
            .await;
    }

    let url = "/pm/config/device/FGT1/global/system/dns";
    rpc("set", url)
        .respond_with(ok(url, None))
        .expect(1)
        .mount(&server)
        .await;
    rpc("get", url)
        .respond_with(ok(url, Some(json!({"primary": "9.9.9.9"}))))
        .mount(&server)
        .await;

    let resource =
        Resource::new("system_dns", "dns").with_attribute("primary", Value::from("9.9.9.9"));
    let state = p.create(&resource).await.unwrap();
    assert_eq!(state.identifier.as_deref(), Some("SystemDns"));
}

#[tokio::test]
async fn test_workspace_unlocks_after_failure() {
    let server = MockServer::start().await;
    let mut s = settings(&server);
    s.workspace_mode = Some("normal".into());
    let p = provider(&server, &s);

    for (action, calls) in [("lock", 1u64), ("commit", 0), ("unlock", 1)] {
        let url = format!("/dvmdb/adom/root/workspace/{action}");
        rpc("exec", &url)
            .respond_with(ok(&url, None))
            .expect(calls)
            .mount(&server)
            .await;
    }

    let url = "/pm/config/device/FGT1/global/system/dns";
    rpc("set", url)
        .respond_with(status(url, -10, "invalid"))
        .mount(&server)
        .await;

    let resource =
        Resource::new("system_dns", "dns").with_attribute("primary", Value::from("9.9.9.9"));
    assert!(p.create(&resource).await.is_err());
}
