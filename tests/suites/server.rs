use crate::common::{client, create_test_config, header_value, raw_request, spawn_server};
use session_counter::session::SessionStore;

#[tokio::test]
async fn test_root_returns_fixed_text() {
    let server = spawn_server(create_test_config()).await;

    let resp = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
    assert_eq!(resp.text().await.unwrap(), "Hello");
}

#[tokio::test]
async fn test_unmatched_route_is_404_and_still_counts() {
    let server = spawn_server(create_test_config()).await;

    let response = raw_request(server.addr, "GET", "/missing", None).await;
    assert!(response.starts_with("HTTP/1.1 404"));
    assert!(response.ends_with("Cannot GET /missing"));

    let set_cookie = header_value(&response, "set-cookie").unwrap();
    assert_eq!(server.counter_for(set_cookie).await, Some(1));
}

#[tokio::test]
async fn test_head_root_has_no_body() {
    let server = spawn_server(create_test_config()).await;

    let response = raw_request(server.addr, "HEAD", "/", None).await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("\r\n\r\n"));
}

#[tokio::test]
async fn test_parallel_clients_each_get_a_session() {
    let server = spawn_server(create_test_config()).await;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let url = server.url("/");
        handles.push(tokio::spawn(async move {
            client().get(url).send().await.unwrap().status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), 200);
    }

    assert_eq!(server.store.len().await.unwrap(), 16);
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let server = spawn_server(create_test_config()).await;
    let addr = server.addr;

    let response = raw_request(addr, "GET", "/", None).await;
    assert!(response.starts_with("HTTP/1.1 200"));

    server.stop().await.unwrap();

    let connect = tokio::net::TcpStream::connect(addr).await;
    assert!(connect.is_err());
}
