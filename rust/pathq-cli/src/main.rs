use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pathq_core::{astar, SearchOptions, SearchResult, UpdatePolicy};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use pathq_cli::config::Config;
use pathq_cli::graph::WeightedGraph;
use pathq_cli::grid::{Grid, Movement};

#[derive(Parser, Debug)]
#[command(name = "pathq", version, about = "Run an A* search over a graph or grid file")]
struct Args {
    /// Wall-clock budget in milliseconds (env: PATHQ_TIMEOUT_MS)
    #[arg(long = "timeout-ms", value_name = "MS", global = true)]
    timeout_ms: Option<f64>,

    /// How improved frontier nodes are handled: reinsert | stale (env: PATHQ_UPDATE_POLICY)
    #[arg(long = "policy", value_name = "POLICY", global = true)]
    policy: Option<UpdatePolicy>,

    /// Emit logs as JSON lines on stderr
    #[arg(long = "json-logs", global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a weighted graph described in JSON
    Graph {
        #[arg(long = "file", value_name = "PATH")]
        file: PathBuf,
        #[arg(long = "start", value_name = "ID")]
        start: String,
        #[arg(long = "goal", value_name = "ID")]
        goal: String,
    },
    /// Search an ASCII grid (S start, G goal, # wall)
    Grid {
        #[arg(long = "file", value_name = "PATH")]
        file: PathBuf,
        /// Print the maze with the path drawn on it instead of JSON
        #[arg(long = "draw")]
        draw: bool,
        /// Allowed steps: orthogonal, octile (diagonal costs sqrt 2) or chebyshev
        #[arg(long = "movement", value_enum, default_value_t = Movement::Orthogonal)]
        movement: Movement,
    },
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<N: Serialize>(result: &SearchResult<N>) -> Result<()> {
    let out = serde_json::to_string_pretty(result).context("serialize result")?;
    println!("{}", out);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs);

    let cfg = Config::from_env().context("read environment")?;
    let options: SearchOptions = cfg.search_options(args.timeout_ms, args.policy);
    info!(core_version = %pathq_core::version(), ?options, "starting pathq");

    match args.command {
        Command::Graph { file, start, goal } => {
            let graph = WeightedGraph::load(&file, &goal)?;
            info!(edges = graph.edge_count(), %start, %goal, "graph loaded");
            let result = astar(&graph, start, &options).context("search")?;
            info!(status = ?result.status, cost = result.cost, expanded = result.expanded, "done");
            print_json(&result)?;
        }
        Command::Grid {
            file,
            draw,
            movement,
        } => {
            let grid = Grid::load(&file)?.with_movement(movement);
            info!(?movement, start = ?grid.start, goal = ?grid.goal, "grid loaded");
            let result = astar(&grid, grid.start, &options).context("search")?;
            info!(status = ?result.status, cost = result.cost, expanded = result.expanded, "done");
            if draw {
                print!("{}", grid.render(&result.path));
            } else {
                print_json(&result)?;
            }
        }
    }
    Ok(())
}
