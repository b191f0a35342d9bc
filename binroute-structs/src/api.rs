use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

serializable_struct_with_getters! {
    OptimizeRouteReq {
        bins: u32,
        threshold: f64,
    }
}

serializable_struct_with_getters! {
    RouteResponse {
        optimized_route: Vec<String>,
        total_distance: f64,
        bins_covered: u32,
    }
}

serializable_struct_with_getters! {
    CompareAlgorithmsReq {
        bins: u32,
        threshold: f64,
    }
}

serializable_struct_with_getters! {
    AlgorithmResult {
        distance: f64,
        bins: u32,
        route: Vec<String>,
    }
}

serializable_struct_with_getters! {
    AlgorithmComparisonResponse {
        dijkstra: AlgorithmResult,
        astar: AlgorithmResult,
        naive: AlgorithmResult,
        #[serde(rename = "Main")]
        main: AlgorithmResult,
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    #[serde(rename = "naive")]
    Naive,
    #[serde(rename = "Main")]
    Main,
}

impl Algorithm {
    /// Iteration order used for rendering and for breaking ties.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Naive,
        Algorithm::Main,
    ];

    /// Key used by the backend in comparison payloads.
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Naive => "naive",
            Algorithm::Main => "Main",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
            Algorithm::Naive => "Naive",
            Algorithm::Main => "Main",
        }
    }

    pub fn is_primary(self) -> bool {
        self == Algorithm::Main
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.key() == s)
            .ok_or_else(|| format!("Invalid Algorithm: {}", s))
    }
}

impl AlgorithmComparisonResponse {
    pub fn get(&self, algorithm: Algorithm) -> &AlgorithmResult {
        match algorithm {
            Algorithm::Dijkstra => &self.dijkstra,
            Algorithm::AStar => &self.astar,
            Algorithm::Naive => &self.naive,
            Algorithm::Main => &self.main,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &AlgorithmResult)> {
        Algorithm::ALL.into_iter().map(move |a| (a, self.get(a)))
    }

    /// Algorithm with the strictly lowest distance. A later algorithm only
    /// replaces the current winner when it is strictly shorter, so ties go to
    /// whichever comes first in `Algorithm::ALL`.
    pub fn winner_by_distance(&self) -> Algorithm {
        self.iter()
            .skip(1)
            .fold(Algorithm::ALL[0], |winner, (current, result)| {
                if result.distance < self.get(winner).distance {
                    current
                } else {
                    winner
                }
            })
    }
}
