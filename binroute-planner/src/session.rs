use binroute_planner::{
    comparison::Tab,
    form::RouteForm,
    planner::{Planner, Result},
    views::render_app,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    spawn,
};

const HELP: &str = "Commands:
  bins <n>                  set Number of Bins
  threshold <t>             set Fill Threshold
  submit [<n> <t>]          optimize a route with the form values
  compare                   show or hide the algorithm comparison
  tab <metrics|routes>      switch the comparison view
  visualize                 open the route visualization
  close                     close the route visualization
  dismiss                   dismiss the current error
  show                      render the current state
  help                      print this message
  quit                      leave the session";

async fn show(planner: &Planner, form: &RouteForm) {
    for line in render_app(&planner.snapshot().await, form) {
        println!("{}", line);
    }
    println!();
}

pub async fn run(planner: Planner) -> Result<()> {
    let mut form = RouteForm::default();
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    show(&planner, &form).await;
    println!("{}", HELP);

    while let Some(line) = input
        .next_line()
        .await
        .map_err(|e| format!("Failed to read input: {}", e))?
    {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();
        match (command, args.as_slice()) {
            ("quit" | "exit", []) => break,
            ("help", []) => println!("{}", HELP),
            ("show", []) => show(&planner, &form).await,
            ("bins", [value]) => match form.set_bins(value) {
                Ok(()) => show(&planner, &form).await,
                Err(e) => println!("{}", e),
            },
            ("threshold", [value]) => match form.set_threshold(value) {
                Ok(()) => show(&planner, &form).await,
                Err(e) => println!("{}", e),
            },
            ("submit", rest) => {
                if let [bins, threshold] = rest {
                    if let Err(e) = form
                        .set_bins(bins)
                        .and_then(|_| form.set_threshold(threshold))
                    {
                        println!("{}", e);
                        continue;
                    }
                } else if !rest.is_empty() {
                    println!("Usage: submit [<bins> <threshold>]");
                    continue;
                }
                if !form.in_range() {
                    log::warn!("Submitting values outside the form bounds");
                }
                let (bins, threshold) = form.submit();
                println!("Optimizing route...");
                let planner = planner.clone();
                let form = form.clone();
                spawn(async move {
                    if planner.submit(bins, threshold).await {
                        show(&planner, &form).await;
                    }
                });
            }
            ("compare", []) => {
                let planner = planner.clone();
                let form = form.clone();
                spawn(async move {
                    planner.toggle_comparison().await;
                    show(&planner, &form).await;
                });
            }
            ("tab", [tab]) => match tab.parse::<Tab>() {
                Ok(tab) => {
                    planner.select_tab(tab).await;
                    show(&planner, &form).await;
                }
                Err(e) => println!("{}", e),
            },
            ("visualize", []) => {
                if planner.open_visualization().await {
                    show(&planner, &form).await;
                } else {
                    println!("Nothing to visualize yet, submit a route first.");
                }
            }
            ("close", []) => {
                planner.close_visualization().await;
                show(&planner, &form).await;
            }
            ("dismiss", []) => {
                planner.dismiss_error().await;
                show(&planner, &form).await;
            }
            _ => println!("Unknown command {:?}, type `help`", line.trim()),
        }
    }
    Ok(())
}
