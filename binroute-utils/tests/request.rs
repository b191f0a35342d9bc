#![cfg(feature = "request")]

use binroute_utils::*;
use std::net::SocketAddr;
use warp::{http::StatusCode, Filter};

fn serve() -> SocketAddr {
    let ok = warp::path("ok").and(warp::get()).map(|| "all good");
    let fail = warp::path("fail").and(warp::get()).map(|| {
        warp::reply::with_status("backend exploded", StatusCode::INTERNAL_SERVER_ERROR)
    });
    let agent = warp::path("agent")
        .and(warp::get())
        .and(warp::header::<String>("user-agent"))
        .map(|agent: String| agent);
    let (addr, server) = warp::serve(ok.or(fail).or(agent)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

#[tokio::test]
async fn test_get_success() {
    let addr = serve();
    let body = get::<String>(&format!("http://{}/ok", addr), None)
        .await
        .unwrap();
    assert_eq!(body, "all good");
}

#[tokio::test]
async fn test_get_status_error() {
    let addr = serve();
    let err = get::<String>(&format!("http://{}/fail", addr), None)
        .await
        .unwrap_err();
    let status_err = err.downcast_ref::<StatusError>().unwrap();
    assert_eq!(status_err.status, 500);
    assert_eq!(status_err.body, "backend exploded");
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_get_sends_headers() {
    let addr = serve();
    let body = get::<String>(
        &format!("http://{}/agent", addr),
        Some(vec![("user-agent".to_string(), "binroute".to_string())]),
    )
    .await
    .unwrap();
    assert_eq!(body, "binroute");
}

#[tokio::test]
async fn test_get_transport_error() {
    // port is released before the request is made
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = get::<String>(&format!("http://{}/ok", addr), None)
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<StatusError>().is_none());
}

#[test]
fn test_is_success() {
    assert!(is_success(200));
    assert!(is_success(204));
    assert!(!is_success(302));
    assert!(!is_success(404));
    assert!(!is_success(500));
}
