use crate::common::{
    TEST_SECRET, create_test_config, header_value, raw_request, spawn_server, spawn_server_with,
};
use session_counter::config::SessionSettings;
use session_counter::core::middleware::SessionLogger;
use session_counter::core::pipeline::Pipeline;
use session_counter::core::router::Router;
use session_counter::session::{CredentialSigner, MemoryStore, SessionData, SessionStore};
use std::sync::Arc;

#[tokio::test]
async fn test_cookie_attributes() {
    let server = spawn_server(create_test_config()).await;

    let response = raw_request(server.addr, "GET", "/", None).await;
    let set_cookie = header_value(&response, "set-cookie").unwrap();

    assert!(set_cookie.starts_with("sid="));
    assert!(set_cookie.contains("; Path=/"));
    assert!(set_cookie.contains("; HttpOnly"));
    assert!(set_cookie.contains("; SameSite=Lax"));
    assert!(!set_cookie.contains("Secure"));
    assert!(!set_cookie.contains("Max-Age"));
}

#[tokio::test]
async fn test_custom_cookie_name_and_secure_flag() {
    let mut config = (*create_test_config()).clone();
    config.session = SessionSettings {
        cookie_name: "visitor".to_string(),
        cookie_secure: true,
        ..SessionSettings::default()
    };
    let server = spawn_server(Arc::new(config)).await;

    let response = raw_request(server.addr, "GET", "/", None).await;
    let set_cookie = header_value(&response, "set-cookie").unwrap().to_string();
    assert!(set_cookie.starts_with("visitor="));
    assert!(set_cookie.contains("; Secure"));

    let pair = set_cookie.split(';').next().unwrap();
    raw_request(server.addr, "GET", "/", Some(pair)).await;
    assert_eq!(server.counter_for(&set_cookie).await, Some(2));
}

#[tokio::test]
async fn test_forged_cookie_is_replaced() {
    let server = spawn_server(create_test_config()).await;

    let first = raw_request(server.addr, "GET", "/", None).await;
    let genuine = header_value(&first, "set-cookie").unwrap().to_string();
    let token = server.app.sessions().extract_token(&genuine).unwrap();
    let session_id = server.app.sessions().signer().verify(token).unwrap();

    let forged = CredentialSigner::new(&format!("not-{TEST_SECRET}")).sign(&session_id);
    let response = raw_request(server.addr, "GET", "/", Some(&format!("sid={forged}"))).await;

    let replacement = header_value(&response, "set-cookie").expect("forged cookie is replaced");
    assert_ne!(replacement, genuine);
    assert_eq!(server.counter_for(replacement).await, Some(1));
    assert_eq!(server.counter_for(&genuine).await, Some(1));
}

#[tokio::test]
async fn test_garbage_cookie_is_replaced() {
    let server = spawn_server(create_test_config()).await;

    let response = raw_request(server.addr, "GET", "/", Some("sid=%%%not-a-token")).await;
    assert!(response.starts_with("HTTP/1.1 200"));
    let set_cookie = header_value(&response, "set-cookie").unwrap();
    assert_eq!(server.counter_for(set_cookie).await, Some(1));
}

#[tokio::test]
async fn test_session_lost_from_store_starts_over() {
    let server = spawn_server(create_test_config()).await;
    let token = server.app.sessions().signer().sign("gone-after-restart");

    let response = raw_request(server.addr, "GET", "/", Some(&format!("sid={token}"))).await;
    let set_cookie = header_value(&response, "set-cookie").unwrap();
    assert!(!set_cookie.contains("gone-after-restart"));
    assert_eq!(server.counter_for(set_cookie).await, Some(1));
}

#[tokio::test]
async fn test_stored_zero_counts_to_one() {
    let server = spawn_server(create_test_config()).await;
    let mut data = SessionData::new();
    data.insert("counter".to_string(), serde_json::Value::from(0));
    server.store.save("zeroed", &data).await.unwrap();

    let token = server.app.sessions().signer().sign("zeroed");
    let pair = format!("sid={token}");
    raw_request(server.addr, "GET", "/", Some(&pair)).await;

    assert_eq!(server.counter_for(&pair).await, Some(1));
}

#[tokio::test]
async fn test_untouched_session_not_saved_when_save_uninitialized_off() {
    let mut config = (*create_test_config()).clone();
    config.session.save_uninitialized = false;
    let store = Arc::new(MemoryStore::new());
    let server = spawn_server_with(
        Arc::new(config),
        store,
        Pipeline::new(Router).with_stage(SessionLogger),
    )
    .await;

    let response = raw_request(server.addr, "GET", "/", None).await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(header_value(&response, "set-cookie").is_none());
    assert!(server.store.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_counting_session_saved_when_save_uninitialized_off() {
    let mut config = (*create_test_config()).clone();
    config.session.save_uninitialized = false;
    let server = spawn_server(Arc::new(config)).await;

    let response = raw_request(server.addr, "GET", "/", None).await;
    let set_cookie = header_value(&response, "set-cookie").unwrap();
    assert_eq!(server.counter_for(set_cookie).await, Some(1));
}
