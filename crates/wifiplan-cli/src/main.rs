// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! `wifiplan`: plans a wireless access network from CSV inputs.
//!
//! Reads candidate routers (`id,x,y,cost,coverage,capacity`) and users
//! (`id,x,y`), plans the deployment under a budget and writes
//! `selected_routers.csv`, `mst_edges.csv`, `user_assignments.csv` and
//! `summary.txt` into the output directory.
//!
//! ```bash
//! wifiplan --routers routers.csv --users users.csv --budget 30000 --out-dir out
//! RUST_LOG=debug wifiplan
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::{self, File},
    io::BufWriter,
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wifiplan_model::{export::PlanWriter, loading::NetworkLoader, model::NetworkModel};
use wifiplan_select::knapsack::SelectionStrategy;
use wifiplan_solver::{
    monitor::log::LogMonitor,
    planner::{DEFAULT_BUDGET, PlannerBuilder},
    summary::{PlanSummary, SUMMARY_FILE},
};

#[derive(Parser, Debug)]
#[command(
    name = "wifiplan",
    version,
    about = "Budgeted router selection, backbone and user assignment for wireless access networks",
    long_about = None,
)]
struct Args {
    /// Candidate router table.
    #[arg(long, default_value = "routers.csv")]
    routers: PathBuf,

    /// User table.
    #[arg(long, default_value = "users.csv")]
    users: PathBuf,

    /// Upper bound on the summed deployment cost.
    #[arg(long, default_value_t = i64::from(DEFAULT_BUDGET), allow_negative_numbers = true)]
    budget: i64,

    /// Directory receiving the result tables and the summary.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Knapsack table layout: dense, compact or auto.
    #[arg(long, default_value = "auto")]
    strategy: SelectionStrategy,

    /// Log per-router and per-edge details.
    #[arg(long, short = 'v', default_value_t = false)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<PlanSummary<i64>> {
    let model: NetworkModel<i64> = NetworkLoader::new()
        .from_paths(&args.routers, &args.users)
        .with_context(|| {
            format!(
                "failed to load network from '{}' and '{}'",
                args.routers.display(),
                args.users.display()
            )
        })?;
    info!(
        routers = model.num_routers(),
        users = model.num_users(),
        "network loaded"
    );

    let mut planner = PlannerBuilder::<i64>::new()
        .with_budget(args.budget)
        .with_strategy(args.strategy)
        .add_monitor(LogMonitor::new())
        .build();
    let outcome = planner.plan(&model).context("planning failed")?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create '{}'", args.out_dir.display()))?;
    PlanWriter::new(&model, outcome.plan())
        .write_to_dir(&args.out_dir)
        .with_context(|| format!("failed to write results to '{}'", args.out_dir.display()))?;

    let summary_path = args.out_dir.join(SUMMARY_FILE);
    let file = File::create(&summary_path)
        .with_context(|| format!("failed to create '{}'", summary_path.display()))?;
    outcome
        .summary()
        .write_to(BufWriter::new(file))
        .with_context(|| format!("failed to write '{}'", summary_path.display()))?;

    Ok(*outcome.summary())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(_) => {
            println!(
                "Planning complete. Outputs written to {}",
                args.out_dir.display()
            );
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use wifiplan_model::export::{ASSIGNMENTS_FILE, BACKBONE_EDGES_FILE, SELECTED_ROUTERS_FILE};

    const ROUTERS: &str = "id,x,y,cost,coverage,capacity\n\
                           1,0,0,10000,5,2\n\
                           2,10,0,15000,10,2\n\
                           3,20,0,20000,15,2\n";

    const USERS: &str = "id,x,y\n\
                         1,1,1\n\
                         2,2,0\n\
                         3,3,0\n\
                         4,12,0\n\
                         5,30,0\n";

    fn args_in(dir: &Path, budget: i64) -> Args {
        fs::write(dir.join("routers.csv"), ROUTERS).expect("write routers");
        fs::write(dir.join("users.csv"), USERS).expect("write users");
        Args {
            routers: dir.join("routers.csv"),
            users: dir.join("users.csv"),
            budget,
            out_dir: dir.join("out"),
            strategy: SelectionStrategy::Auto,
            verbose: false,
        }
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
    }

    #[test]
    fn test_run_writes_all_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = args_in(dir.path(), 25_000);
        let summary = run(&args).expect("run");
        assert_eq!(summary.routers_selected, 2);
        assert_eq!(summary.users_assigned, 4);

        let out = &args.out_dir;
        assert_eq!(
            read(out.join(SELECTED_ROUTERS_FILE)),
            "id,x,y,cost,coverage,capacity,load\n\
             1,0,0,10000,5,2,2\n\
             2,10,0,15000,10,2,2\n"
        );
        assert_eq!(read(out.join(BACKBONE_EDGES_FILE)), "from,to,distance\n1,2,10.0\n");
        assert_eq!(
            read(out.join(ASSIGNMENTS_FILE)),
            "user_id,router_id\n1,1\n2,2\n3,1\n4,2\n"
        );
        assert_eq!(
            read(out.join(SUMMARY_FILE)),
            "Total routers selected: 2\n\
             Total users assigned: 4\n\
             Total cable length (MST): 10.000\n\
             Total coverage value: 15\n"
        );
    }

    #[test]
    fn test_run_rejects_negative_budget() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = run(&args_in(dir.path(), -1)).expect_err("negative budget");
        assert!(format!("{:#}", err).contains("Budget must be non-negative"));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_run_reports_missing_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut args = args_in(dir.path(), 100);
        args.users = dir.path().join("missing.csv");
        let err = run(&args).expect_err("missing users");
        assert!(format!("{:#}", err).contains("failed to load network"));
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["wifiplan"]);
        assert_eq!(args.routers, PathBuf::from("routers.csv"));
        assert_eq!(args.users, PathBuf::from("users.csv"));
        assert_eq!(args.budget, 30_000);
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert_eq!(args.strategy, SelectionStrategy::Auto);
        assert!(!args.verbose);

        let args = Args::parse_from(["wifiplan", "--budget", "-5", "--strategy", "compact", "-v"]);
        assert_eq!(args.budget, -5);
        assert_eq!(args.strategy, SelectionStrategy::Compact);
        assert!(args.verbose);
    }
}
