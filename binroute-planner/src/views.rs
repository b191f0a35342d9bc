//! Plain-text rendering of the client state. Every function is pure: it
//! takes a piece of state and returns the lines to show.

use crate::{
    comparison::{ComparisonState, Tab},
    form::{RouteForm, MAX_THRESHOLD, MIN_BINS, MIN_THRESHOLD, THRESHOLD_STEP},
    planner::State,
};
use binroute_api::{Algorithm, AlgorithmComparisonResponse, RouteResponse};

const WINNER: &str = "🏆";

fn algorithm_label(algorithm: Algorithm) -> String {
    if algorithm.is_primary() {
        format!("{} (Primary)", algorithm.display_name())
    } else {
        algorithm.display_name().to_string()
    }
}

pub fn render_form(form: &RouteForm, loading: bool) -> Vec<String> {
    vec![
        "Route Optimization Parameters".to_string(),
        format!("  Number of Bins: {} (min {})", form.bins(), MIN_BINS),
        format!(
            "  Fill Threshold: {} ({:.1} - {:.1}, step {})",
            form.threshold(),
            MIN_THRESHOLD,
            MAX_THRESHOLD,
            THRESHOLD_STEP
        ),
        if loading {
            "  [Optimizing...]".to_string()
        } else {
            "  [Optimize Route]".to_string()
        },
    ]
}

pub fn render_results(route: &RouteResponse) -> Vec<String> {
    let mut lines = vec![
        "Optimized Route Results".to_string(),
        "  Bins to Visit:".to_string(),
    ];
    if route.optimized_route.is_empty() {
        lines.push("    No bins to visit.".to_string());
    } else {
        lines.extend(route.optimized_route.iter().map(|bin| format!("    - {}", bin)));
    }
    lines.push(format!(
        "  Total Distance: {:.2} units",
        route.total_distance
    ));
    lines.push(format!("  Bins Covered: {}", route.bins_covered));
    lines.push("  [Visualize Route Graph]".to_string());
    lines
}

pub fn render_error(message: &str) -> Vec<String> {
    vec![format!("Error: {}", message)]
}

pub fn render_metrics(data: &AlgorithmComparisonResponse, winner: Algorithm) -> Vec<String> {
    let mut lines = vec![format!(
        "  {:<18}{:<12}{}",
        "Algorithm", "Distance", "Bins Covered"
    )];
    for (algorithm, result) in data.iter() {
        let (distance, bins) = if algorithm == winner {
            (
                format!("{} {}", result.distance, WINNER),
                format!("{} {}", result.bins, WINNER),
            )
        } else {
            (result.distance.to_string(), result.bins.to_string())
        };
        let row = format!(
            "  {:<18}{:<12}{}",
            algorithm_label(algorithm),
            distance,
            bins
        );
        lines.push(row.trim_end().to_string());
    }
    lines
}

pub fn render_routes(data: &AlgorithmComparisonResponse, winner: Algorithm) -> Vec<String> {
    let mut lines = Vec::new();
    for (algorithm, result) in data.iter() {
        let mut title = format!("  {}", algorithm_label(algorithm));
        if algorithm == winner {
            title.push(' ');
            title.push_str(WINNER);
        }
        lines.push(title);
        lines.push(format!(
            "    Distance: {}  Bins: {}",
            result.distance, result.bins
        ));
        lines.push(format!("    Route: {}", result.route.join(" → ")));
    }
    lines
}

pub fn render_comparison(state: &ComparisonState) -> Vec<String> {
    if state.loading {
        return vec!["Loading algorithm comparison...".to_string()];
    }
    if let Some(error) = &state.error {
        return render_error(error);
    }
    let (Some(data), Some(winner)) = (&state.data, state.winner()) else {
        return Vec::new();
    };

    let mut lines = vec!["Algorithm Comparison".to_string()];
    if let Some(params) = &state.params {
        lines.push(format!(
            "  Comparison of different routing algorithms with bins: {}, threshold: {}",
            params.bins, params.threshold
        ));
    }
    lines.push(match state.tab {
        Tab::Metrics => "  [Performance Metrics]  Routes".to_string(),
        Tab::Routes => "  Performance Metrics  [Routes]".to_string(),
    });
    lines.extend(match state.tab {
        Tab::Metrics => render_metrics(data, winner),
        Tab::Routes => render_routes(data, winner),
    });
    lines
}

pub fn render_modal(state: &State) -> Vec<String> {
    if !state.modal_open {
        return Vec::new();
    }
    vec![
        "Route Visualization".to_string(),
        format!("  {}", state.visualization_url),
        "  [Close]".to_string(),
    ]
}

pub fn render_app(state: &State, form: &RouteForm) -> Vec<String> {
    let mut lines = vec![
        "Waste Collection Route Optimizer".to_string(),
        if state.show_comparison {
            "[Hide Algorithm Comparison]".to_string()
        } else {
            "[Compare Algorithms]".to_string()
        },
    ];
    if let Some(error) = &state.error {
        lines.extend(render_error(error));
    }
    lines.extend(render_form(form, state.loading));
    if state.loading {
        lines.push("Optimizing route...".to_string());
    } else if let Some(route) = &state.route {
        lines.extend(render_results(route));
    }
    if state.show_comparison {
        lines.extend(render_comparison(&state.comparison));
    }
    lines.extend(render_modal(state));
    lines
}
