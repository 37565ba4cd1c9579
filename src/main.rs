//! Entry point for the `rota` command line interface.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{ensure, Context};
use clap::{Parser, Subcommand};

use rota::distributed::{self, worker};
use rota::heuristic;
use rota::io::load_graph;
use rota::model::Constraints;
use rota::search::{route_cost, Evaluated};

#[derive(Debug, Parser)]
#[command(
    name = "rota",
    about = "Route search for capacitated vehicle routing with depot returns",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search every customer permutation for the cheapest feasible route.
    Solve(SolveArgs),
    /// Build one route with the cheapest-insertion heuristic.
    Insertion(InsertionArgs),
    /// Shard worker spawned by `solve`; not part of the public surface.
    #[command(hide = true)]
    Worker(WorkerArgs),
}

#[derive(Debug, Parser)]
struct SolveArgs {
    /// Path to the instance file.
    graph: PathBuf,
    /// Vehicle capacity per trip.
    #[arg(long, default_value_t = 15)]
    capacity: u64,
    /// Customer stops allowed per trip.
    #[arg(long, default_value_t = 5)]
    max_stops: usize,
    /// Cooperating processes, this one included.
    #[arg(long, default_value_t = 1)]
    processes: usize,
    /// Threads per process; 0 lets the thread pool decide.
    #[arg(long, default_value_t = 0)]
    threads: usize,
}

#[derive(Debug, Parser)]
struct InsertionArgs {
    /// Path to the instance file.
    graph: PathBuf,
    /// Vehicle capacity per trip.
    #[arg(long, default_value_t = 15)]
    capacity: u64,
    /// Customer stops allowed per trip.
    #[arg(long, default_value_t = 5)]
    max_stops: usize,
}

#[derive(Debug, Parser)]
struct WorkerArgs {
    /// Path to the instance file.
    #[arg(long)]
    graph: PathBuf,
    #[arg(long)]
    capacity: u64,
    #[arg(long)]
    max_stops: usize,
    /// Rank announced back to the coordinator.
    #[arg(long)]
    rank: usize,
    /// First candidate index of the shard.
    #[arg(long)]
    start: u64,
    /// Number of candidates in the shard.
    #[arg(long)]
    count: u64,
    #[arg(long)]
    threads: usize,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("rota: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Solve(args) => solve(args),
        Command::Insertion(args) => insertion(args),
        Command::Worker(args) => worker_mode(args),
    }
}

fn limits(capacity: u64, max_stops: usize) -> anyhow::Result<Constraints> {
    Constraints::new(capacity, max_stops).context("capacity and max-stops must both be positive")
}

fn load(path: &Path) -> anyhow::Result<rota::model::Graph> {
    load_graph(path).with_context(|| format!("cannot load instance {}", path.display()))
}

fn solve(args: SolveArgs) -> anyhow::Result<()> {
    ensure!(args.processes >= 1, "at least one process must run");
    let limits = limits(args.capacity, args.max_stops)?;
    let graph = load(&args.graph)?;

    let started = Instant::now();
    let best = distributed::search(&args.graph, &graph, &limits, args.processes, args.threads)
        .context("distributed search failed")?;
    report(best.as_ref(), started);
    Ok(())
}

fn report(best: Option<&Evaluated>, started: Instant) {
    match best {
        Some(best) => {
            println!("minimum cost: {}", best.cost);
            println!("route: {}", best.route);
        }
        None => println!("no feasible route found"),
    }
    println!("search time: {} ms", started.elapsed().as_millis());
}

fn insertion(args: InsertionArgs) -> anyhow::Result<()> {
    let limits = limits(args.capacity, args.max_stops)?;
    let graph = load(&args.graph)?;

    let started = Instant::now();
    let built = heuristic::cheapest_insertion(&graph, &limits);
    let cost = route_cost(&built.route, &graph);
    let elapsed = started.elapsed();

    println!("route: {}", built.route);
    match cost {
        Some(cost) => println!("cost: {}", cost),
        None => println!("cost: infeasible, the route crosses a missing edge"),
    }
    for node in &built.unplaced {
        println!("unplaced node: {}", node);
    }
    println!("search time: {} ms", elapsed.as_millis());
    Ok(())
}

fn worker_mode(args: WorkerArgs) -> anyhow::Result<()> {
    let limits = limits(args.capacity, args.max_stops)?;
    let graph = load(&args.graph)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    worker::run(
        &graph,
        &limits,
        args.rank,
        args.start..args.start + args.count,
        args.threads,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
    .context("worker exchange failed")?;
    Ok(())
}
