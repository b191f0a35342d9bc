#[cfg(not(any(feature = "request", feature = "request-js")))]
compile_error!("Either feature `request` or `request-js` must be enabled");
#[cfg(all(feature = "request", feature = "request-js"))]
compile_error!("features `request` and `request-js` are mutually exclusive");

use anyhow::{anyhow, Result};
pub use binroute_structs::api::*;
use binroute_utils::{dejsonify, get};
use serde::de::DeserializeOwned;

#[derive(Clone, Debug)]
pub struct Api {
    api_url: String,
}

impl Api {
    pub fn new(api_url: String) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get<T>(&self, path: String) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = get::<String>(
            format!("{}/{}", self.api_url, path).as_str(),
            Some(vec![("user-agent".to_string(), "binroute".to_string())]),
        )
        .await?;
        dejsonify::<T>(&resp).map_err(|e| anyhow!("Failed to dejsonify: {}", e))
    }

    pub async fn optimize_route(&self, req: OptimizeRouteReq) -> Result<RouteResponse> {
        self.get(format!(
            "optimize-route?bins={}&threshold={}",
            req.bins, req.threshold
        ))
        .await
        .inspect_err(|e| log::error!("Failed to fetch optimized route: {}", e))
    }

    pub async fn compare_algorithms(
        &self,
        req: CompareAlgorithmsReq,
    ) -> Result<AlgorithmComparisonResponse> {
        self.get(format!(
            "compare-algorithms?bins={}&threshold={}",
            req.bins, req.threshold
        ))
        .await
        .inspect_err(|e| log::error!("Failed to fetch algorithm comparison: {}", e))
    }

    /// Document rendered by the backend for the most recently optimized
    /// route. Nothing is fetched here.
    pub fn last_route_visualization_url(&self, threshold: f64) -> String {
        format!("{}/view-last-route?threshold={}", self.api_url, threshold)
    }
}
