use crate::RouteParams;
use binroute_api::{Algorithm, AlgorithmComparisonResponse};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Metrics,
    Routes,
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metrics" => Ok(Tab::Metrics),
            "routes" => Ok(Tab::Routes),
            _ => Err(format!("Invalid Tab: {}", s)),
        }
    }
}

/// Fetch lifecycle of the algorithm comparison panel.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ComparisonState {
    pub params: Option<RouteParams>,
    pub data: Option<AlgorithmComparisonResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub tab: Tab,
    #[serde(skip_serializing)]
    token: u64,
}

impl ComparisonState {
    /// Enters loading for `params` and returns the token the response must
    /// present to be applied.
    pub fn begin(&mut self, params: RouteParams) -> u64 {
        self.token += 1;
        self.params = Some(params);
        self.loading = true;
        self.error = None;
        self.token
    }

    /// Applies a response. Returns false when a newer fetch or a reset has
    /// happened since `token` was issued.
    pub fn finish(
        &mut self,
        token: u64,
        outcome: Result<AlgorithmComparisonResponse, String>,
    ) -> bool {
        if token != self.token || !self.loading {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                self.data = None;
                self.error = Some(e);
            }
        }
        true
    }

    /// Drops everything fetched so far, including the selected tab, and
    /// invalidates in-flight requests.
    pub fn reset(&mut self) {
        let token = self.token + 1;
        *self = Self {
            token,
            ..Default::default()
        };
    }

    pub fn needs_refetch(&self, params: &RouteParams) -> bool {
        self.params.as_ref() != Some(params)
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn winner(&self) -> Option<Algorithm> {
        self.data.as_ref().map(|d| d.winner_by_distance())
    }
}
