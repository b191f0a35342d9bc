use binroute_api::*;
use binroute_utils::StatusError;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use warp::{http::StatusCode, Filter};

type Hits = Arc<Mutex<Vec<String>>>;

fn serve(status: StatusCode) -> (SocketAddr, Hits) {
    let hits: Hits = Arc::new(Mutex::new(Vec::new()));
    let record = hits.clone();
    let routes = warp::get()
        .and(warp::path::full())
        .and(warp::query::raw().or(warp::any().map(String::new)).unify())
        .map(move |path: warp::path::FullPath, query: String| {
            record
                .lock()
                .unwrap()
                .push(format!("{}?{}", path.as_str(), query));
            let body = match path.as_str() {
                "/optimize-route" => json!({
                    "optimized_route": ["B1", "B2"],
                    "total_distance": 12.5,
                    "bins_covered": 2
                }),
                "/compare-algorithms" => json!({
                    "dijkstra": {"distance": 10.0, "bins": 2, "route": ["B1", "B2"]},
                    "astar": {"distance": 8.0, "bins": 2, "route": ["B2", "B1"]},
                    "naive": {"distance": 15.0, "bins": 2, "route": ["B1", "B2"]},
                    "Main": {"distance": 8.0, "bins": 2, "route": ["B2", "B1"]}
                }),
                _ => json!({"detail": "not found"}),
            };
            warp::reply::with_status(warp::reply::json(&body), status)
        });
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, hits)
}

#[tokio::test]
async fn test_optimize_route() {
    let (addr, hits) = serve(StatusCode::OK);
    let api = Api::new(format!("http://{}", addr));
    let resp = api
        .optimize_route(OptimizeRouteReq {
            bins: 10,
            threshold: 0.7,
        })
        .await
        .unwrap();
    assert_eq!(resp.optimized_route, vec!["B1", "B2"]);
    assert_eq!(resp.total_distance, 12.5);
    assert_eq!(resp.bins_covered, 2);
    assert_eq!(
        *hits.lock().unwrap(),
        vec!["/optimize-route?bins=10&threshold=0.7".to_string()]
    );
}

#[tokio::test]
async fn test_compare_algorithms() {
    let (addr, hits) = serve(StatusCode::OK);
    let api = Api::new(format!("http://{}/", addr));
    let resp = api
        .compare_algorithms(CompareAlgorithmsReq {
            bins: 25,
            threshold: 1.0,
        })
        .await
        .unwrap();
    assert_eq!(resp.winner_by_distance(), Algorithm::AStar);
    assert_eq!(
        *hits.lock().unwrap(),
        vec!["/compare-algorithms?bins=25&threshold=1".to_string()]
    );
}

#[tokio::test]
async fn test_http_error_carries_status() {
    let (addr, hits) = serve(StatusCode::INTERNAL_SERVER_ERROR);
    let api = Api::new(format!("http://{}", addr));
    let err = api
        .optimize_route(OptimizeRouteReq {
            bins: 10,
            threshold: 0.7,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"));
    assert_eq!(err.downcast_ref::<StatusError>().unwrap().status, 500);
    assert_eq!(hits.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_out_of_range_values_are_forwarded() {
    let (addr, hits) = serve(StatusCode::UNPROCESSABLE_ENTITY);
    let api = Api::new(format!("http://{}", addr));
    let err = api
        .compare_algorithms(CompareAlgorithmsReq {
            bins: 0,
            threshold: 1.5,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("422"));
    assert_eq!(
        *hits.lock().unwrap(),
        vec!["/compare-algorithms?bins=0&threshold=1.5".to_string()]
    );
}

#[tokio::test]
async fn test_malformed_payload() {
    let (addr, _) = serve(StatusCode::OK);
    // unknown paths answer 200 with a body that is not a route
    let err = Api::new(format!("http://{}/missing", addr))
        .optimize_route(OptimizeRouteReq {
            bins: 3,
            threshold: 0.2,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to dejsonify"));
}

#[test]
fn test_visualization_url() {
    let api = Api::new("http://localhost:8000/".to_string());
    assert_eq!(api.api_url(), "http://localhost:8000");
    assert_eq!(
        api.last_route_visualization_url(0.7),
        "http://localhost:8000/view-last-route?threshold=0.7"
    );
    assert_eq!(
        api.last_route_visualization_url(0.0),
        "http://localhost:8000/view-last-route?threshold=0"
    );
}

#[tokio::test]
async fn test_threshold_formatting() {
    let (addr, hits) = serve(StatusCode::OK);
    let api = Api::new(format!("http://{}", addr));
    for threshold in [0.7, 1.0, 0.1 + 0.2] {
        api.optimize_route(OptimizeRouteReq {
            bins: 5,
            threshold,
        })
        .await
        .unwrap();
    }
    assert_eq!(
        *hits.lock().unwrap(),
        vec![
            "/optimize-route?bins=5&threshold=0.7".to_string(),
            "/optimize-route?bins=5&threshold=1".to_string(),
            "/optimize-route?bins=5&threshold=0.30000000000000004".to_string(),
        ]
    );
    assert_eq!(
        api.last_route_visualization_url(0.1 + 0.2),
        format!("http://{}/view-last-route?threshold=0.30000000000000004", addr)
    );
}
