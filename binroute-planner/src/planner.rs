use crate::comparison::{ComparisonState, Tab};
use crate::RouteParams;
use binroute_api::{Api, CompareAlgorithmsReq, OptimizeRouteReq, RouteResponse};
use binroute_structs::config::ClientConfig;
use futures::{lock::Mutex, FutureExt};
use serde::Serialize;
use std::{future::Future, panic::AssertUnwindSafe, sync::Arc};

pub type Result<T> = std::result::Result<T, String>;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct State {
    pub params: RouteParams,
    pub route: Option<RouteResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub show_comparison: bool,
    pub comparison: ComparisonState,
    pub modal_open: bool,
    pub visualization_url: String,
    #[serde(skip_serializing)]
    route_token: u64,
}

impl State {
    fn new(params: RouteParams, visualization_url: String) -> Self {
        Self {
            params,
            route: None,
            loading: false,
            error: None,
            show_comparison: false,
            comparison: ComparisonState::default(),
            modal_open: false,
            visualization_url,
            route_token: 0,
        }
    }

    pub fn status(&self) -> Status {
        if self.loading {
            Status::Loading
        } else if self.error.is_some() {
            Status::Error
        } else if self.route.is_some() {
            Status::Success
        } else {
            Status::Idle
        }
    }
}

/// Owns the client state and drives every fetch.
///
/// Cloning is cheap and clones share state, so a front-end can hand a clone
/// to each spawned task. The lock is never held across a request.
#[derive(Clone)]
pub struct Planner {
    api: Arc<Api>,
    state: Arc<Mutex<State>>,
}

impl Planner {
    pub fn new(config: &ClientConfig) -> Self {
        let api = Api::new(config.api_url.clone());
        let params = RouteParams {
            bins: config.default_bins,
            threshold: config.default_threshold,
        };
        let visualization_url = api.last_route_visualization_url(params.threshold);
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(State::new(params, visualization_url))),
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub async fn snapshot(&self) -> State {
        self.state.lock().await.clone()
    }

    /// Requests a route for new parameters. Returns false when a newer
    /// submit overtook this one and its outcome was dropped.
    pub async fn submit(&self, bins: u32, threshold: f64) -> bool {
        let params = RouteParams { bins, threshold };
        let (route_token, comparison_token) = {
            let mut state = self.state.lock().await;
            state.error = None;
            state.params = params.clone();
            state.visualization_url = self.api.last_route_visualization_url(threshold);
            state.loading = true;
            state.route_token += 1;
            let comparison_token = if state.show_comparison
                && state.comparison.needs_refetch(&params)
            {
                Some(state.comparison.begin(params.clone()))
            } else {
                None
            };
            (state.route_token, comparison_token)
        };
        log::info!("Optimizing route for bins={} threshold={}", bins, threshold);

        let (applied, _) = futures::join!(self.fetch_route(route_token, &params), async {
            if let Some(token) = comparison_token {
                self.fetch_comparison(token, &params).await;
            }
        });
        applied
    }

    async fn fetch_route(&self, token: u64, params: &RouteParams) -> bool {
        let outcome = guarded(self.api.optimize_route(OptimizeRouteReq {
            bins: params.bins,
            threshold: params.threshold,
        }))
        .await;

        let mut state = self.state.lock().await;
        if state.route_token != token {
            log::debug!("Dropping stale route response (token {})", token);
            return false;
        }
        state.loading = false;
        match outcome {
            Ok(route) => {
                log::info!(
                    "Route covers {} bins over {:.2} units",
                    route.bins_covered,
                    route.total_distance
                );
                state.route = Some(route);
                state.error = None;
            }
            Err(e) => {
                log::warn!("Route request failed: {}", e);
                state.route = None;
                state.modal_open = false;
                state.error = Some(e);
            }
        }
        true
    }

    async fn fetch_comparison(&self, token: u64, params: &RouteParams) -> bool {
        log::info!(
            "Comparing algorithms for bins={} threshold={}",
            params.bins,
            params.threshold
        );
        let outcome = guarded(self.api.compare_algorithms(CompareAlgorithmsReq {
            bins: params.bins,
            threshold: params.threshold,
        }))
        .await;

        let mut state = self.state.lock().await;
        let applied = state.comparison.finish(token, outcome);
        if !applied {
            log::debug!("Dropping stale comparison response (token {})", token);
        }
        applied
    }

    /// Shows or hides the comparison panel. Opening always fetches afresh.
    /// Returns whether the panel is now shown.
    pub async fn toggle_comparison(&self) -> bool {
        let pending = {
            let mut state = self.state.lock().await;
            state.show_comparison = !state.show_comparison;
            if state.show_comparison {
                let params = state.params.clone();
                Some((state.comparison.begin(params.clone()), params))
            } else {
                state.comparison.reset();
                None
            }
        };
        match pending {
            Some((token, params)) => {
                self.fetch_comparison(token, &params).await;
                true
            }
            None => false,
        }
    }

    pub async fn select_tab(&self, tab: Tab) {
        self.state.lock().await.comparison.select_tab(tab);
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.error = None;
    }

    /// Opens the visualization modal. Only possible once a route has been
    /// fetched successfully.
    pub async fn open_visualization(&self) -> bool {
        let mut state = self.state.lock().await;
        state.modal_open = state.route.is_some();
        state.modal_open
    }

    pub async fn close_visualization(&self) {
        self.state.lock().await.modal_open = false;
    }
}

/// Runs a request, turning its error (or a panic while producing it) into
/// the message shown to the user.
async fn guarded<T>(fut: impl Future<Output = anyhow::Result<T>>) -> Result<T> {
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(UNKNOWN_ERROR.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guarded_maps_panics_to_fallback() {
        let result: Result<u32> = guarded(async {
            if UNKNOWN_ERROR.is_empty() {
                return Ok(0);
            }
            panic!("lost")
        })
        .await;
        assert_eq!(result, Err(UNKNOWN_ERROR.to_string()));
    }

    #[tokio::test]
    async fn test_guarded_keeps_error_message() {
        let result: Result<u32> =
            guarded(async { Err(anyhow::anyhow!("Request error (status: 500, body: )")) }).await;
        assert_eq!(
            result,
            Err("Request error (status: 500, body: )".to_string())
        );
        assert_eq!(guarded(async { Ok(7) }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_visualization_needs_route() {
        let planner = Planner::new(&ClientConfig::default());
        assert!(!planner.open_visualization().await);
        let state = planner.snapshot().await;
        assert!(!state.modal_open);
        assert_eq!(state.status(), Status::Idle);
        assert_eq!(
            state.visualization_url,
            "http://localhost:8000/view-last-route?threshold=0.7"
        );
    }
}
