mod session;
use binroute_planner::{
    comparison::Tab,
    planner::{Planner, Result},
    views::{render_comparison, render_error, render_results},
};
use binroute_structs::config::{ClientConfig, DEFAULT_API_URL};
use binroute_utils::jsonify_pretty;
use clap::{arg, value_parser, ArgMatches, Command};

fn cli() -> Command {
    Command::new("binroute")
        .about("Waste collection route optimizer client")
        .arg_required_else_help(true)
        .arg(
            arg!(--api <URL> "(Optional) Set api_url")
                .default_value(DEFAULT_API_URL)
                .value_parser(value_parser!(String))
                .global(true),
        )
        .subcommand(
            Command::new("optimize")
                .about("Requests an optimized route")
                .arg(arg!(<BINS> "Number of bins").value_parser(value_parser!(u32)))
                .arg(arg!(<THRESHOLD> "Fill threshold between 0 and 1").value_parser(value_parser!(f64)))
                .arg(arg!(--json "Print the raw response as json")),
        )
        .subcommand(
            Command::new("compare")
                .about("Compares the routes of every algorithm")
                .arg(arg!(<BINS> "Number of bins").value_parser(value_parser!(u32)))
                .arg(arg!(<THRESHOLD> "Fill threshold between 0 and 1").value_parser(value_parser!(f64)))
                .arg(
                    arg!(--view <VIEW> "(Optional) metrics or routes")
                        .default_value("metrics")
                        .value_parser(["metrics", "routes"]),
                )
                .arg(arg!(--json "Print the raw response as json")),
        )
        .subcommand(
            Command::new("visualize-url")
                .about("Prints the url of the last route visualization")
                .arg(arg!(<THRESHOLD> "Fill threshold between 0 and 1").value_parser(value_parser!(f64))),
        )
        .subcommand(Command::new("session").about("Interactive session"))
}

fn required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Result<T> {
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| format!("Missing argument {}", id))
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

async fn optimize(config: ClientConfig, matches: &ArgMatches) -> Result<()> {
    let bins = required::<u32>(matches, "BINS")?;
    let threshold = required::<f64>(matches, "THRESHOLD")?;
    let planner = Planner::new(&config);
    planner.submit(bins, threshold).await;
    let state = planner.snapshot().await;
    match (state.route, state.error) {
        (_, Some(error)) => {
            print_lines(render_error(&error));
            Err(error)
        }
        (Some(route), None) => {
            if matches.get_flag("json") {
                println!("{}", jsonify_pretty(&route));
            } else {
                print_lines(render_results(&route));
                println!("  {}", state.visualization_url);
            }
            Ok(())
        }
        (None, None) => Err("No route returned".to_string()),
    }
}

async fn compare(config: ClientConfig, matches: &ArgMatches) -> Result<()> {
    let config = ClientConfig {
        default_bins: required::<u32>(matches, "BINS")?,
        default_threshold: required::<f64>(matches, "THRESHOLD")?,
        ..config
    };
    let tab = required::<String>(matches, "view")?.parse::<Tab>()?;
    let planner = Planner::new(&config);
    planner.toggle_comparison().await;
    planner.select_tab(tab).await;
    let comparison = planner.snapshot().await.comparison;
    if let Some(error) = comparison.error {
        print_lines(render_error(&error));
        return Err(error);
    }
    match (&comparison.data, matches.get_flag("json")) {
        (Some(data), true) => println!("{}", jsonify_pretty(data)),
        _ => print_lines(render_comparison(&comparison)),
    }
    Ok(())
}

async fn run(matches: ArgMatches) -> Result<()> {
    let config = ClientConfig::with_api_url(required::<String>(&matches, "api")?);
    log::debug!("Using api_url {}", config.api_url);
    match matches.subcommand() {
        Some(("optimize", sub)) => optimize(config, sub).await,
        Some(("compare", sub)) => compare(config, sub).await,
        Some(("visualize-url", sub)) => {
            let threshold = required::<f64>(sub, "THRESHOLD")?;
            println!(
                "{}",
                Planner::new(&config)
                    .api()
                    .last_route_visualization_url(threshold)
            );
            Ok(())
        }
        Some(("session", _)) => session::run(Planner::new(&config)).await,
        _ => Err("Unknown command".to_string()),
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = cli().get_matches();
    if let Err(e) = run(matches).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
