//! Coordinator of the multi-process search tier.
//!
//! Ranks are spawned copies of the current executable running the hidden
//! worker mode, each owning one contiguous shard of the candidate space for
//! the whole run. The coordinator itself participates as rank 0, searching
//! its own shard in process. Reduction happens in two steps: a min-cost
//! reduction over all shard summaries, then a max-rank election among the
//! ranks matching the minimum; only the elected rank transfers its route.

use std::io::BufReader;
use std::ops::Range;
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use log::debug;

use crate::model::{Constraints, Graph, Route};
use crate::search::{self, candidate_count, Evaluated};

use super::protocol::{self, Directive, DistributedError, RoutePayload, Summary};

/// Splits `total` candidates into contiguous equal shards, one per rank;
/// the last rank absorbs the remainder.
///
/// With more ranks than candidates the leading shards are empty; an empty
/// shard reports no best and can never win the election.
pub fn partition(total: u64, ranks: usize) -> Vec<Range<u64>> {
    let base = total / ranks as u64;
    (0..ranks)
        .map(|rank| {
            let start = base * rank as u64;
            let end = if rank + 1 == ranks { total } else { start + base };
            start..end
        })
        .collect()
}

/// Min-cost reduction and max-rank election over all ranks.
///
/// Returns the global minimum cost and the rank that must transfer its
/// route: the highest rank whose summary matches the minimum, or rank 0
/// when only the coordinator's own shard holds it.
fn election(own_cost: Option<u64>, summaries: &[Summary]) -> Option<(u64, usize)> {
    let min_cost = summaries
        .iter()
        .filter_map(|summary| summary.best.map(|best| best.cost))
        .chain(own_cost)
        .min()?;
    let winner = summaries
        .iter()
        .filter(|summary| summary.best.is_some_and(|best| best.cost == min_cost))
        .map(|summary| summary.rank)
        .max()
        .unwrap_or(0);
    Some((min_cost, winner))
}

struct WorkerHandle {
    rank: usize,
    child: Child,
    input: ChildStdin,
    output: BufReader<ChildStdout>,
}

/// Sends each worker its directive: `SendRoute` to the winner, `Shutdown`
/// to everyone else.
fn scatter(workers: &mut [WorkerHandle], winner: Option<usize>) -> Result<(), DistributedError> {
    for worker in workers {
        let directive = if Some(worker.rank) == winner {
            Directive::SendRoute
        } else {
            Directive::Shutdown
        };
        protocol::write_message(&mut worker.input, &directive)?;
    }
    Ok(())
}

/// Runs the search across `processes` ranks, each on its own thread pool.
///
/// Rank 0 is this process searching its shard inline; every further rank is
/// a spawned worker that reloads the instance from `instance`, so the path
/// must stay readable for the duration of the run. With `processes == 1`
/// nothing is spawned and the call is a plain threaded search.
///
/// # Errors
///
/// Any channel failure, protocol violation, or nonzero worker exit is
/// fatal: the run aborts with no partial result.
pub fn search(
    instance: &Path,
    graph: &Graph,
    limits: &Constraints,
    processes: usize,
    threads: usize,
) -> Result<Option<Evaluated>, DistributedError> {
    debug_assert!(processes >= 1, "at least the coordinating rank runs");
    let customers = graph.num_customers();
    let total =
        candidate_count(customers).ok_or(DistributedError::CandidateOverflow { customers })?;
    let shards = partition(total, processes);

    if processes == 1 {
        return Ok(search::search_range(graph, limits, shards[0].clone(), threads));
    }

    let exe = std::env::current_exe()?;
    let mut workers = Vec::with_capacity(processes - 1);
    for (rank, shard) in shards.iter().enumerate().skip(1) {
        let mut child = Command::new(&exe)
            .arg("worker")
            .arg("--graph")
            .arg(instance)
            .arg("--capacity")
            .arg(limits.capacity().to_string())
            .arg("--max-stops")
            .arg(limits.max_stops().to_string())
            .arg("--rank")
            .arg(rank.to_string())
            .arg("--start")
            .arg(shard.start.to_string())
            .arg("--count")
            .arg((shard.end - shard.start).to_string())
            .arg("--threads")
            .arg(threads.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let input = child.stdin.take().expect("stdin is piped");
        let output = BufReader::new(child.stdout.take().expect("stdout is piped"));
        workers.push(WorkerHandle {
            rank,
            child,
            input,
            output,
        });
    }
    debug!(
        "spawned {} worker ranks over {} candidates",
        workers.len(),
        total
    );

    let own = search::search_range(graph, limits, shards[0].clone(), threads);

    // Summaries arrive one line per rank, in spawn order.
    let mut summaries = Vec::with_capacity(workers.len());
    for worker in &mut workers {
        let summary: Summary = protocol::read_message(&mut worker.output)?;
        if summary.rank != worker.rank {
            return Err(DistributedError::RankMismatch {
                expected: worker.rank,
                announced: summary.rank,
            });
        }
        summaries.push(summary);
    }

    let own_cost = own.as_ref().map(|best| best.cost);
    let result = match election(own_cost, &summaries) {
        None => {
            scatter(&mut workers, None)?;
            None
        }
        Some((min_cost, 0)) => {
            debug!("rank 0 wins the election at cost {}", min_cost);
            scatter(&mut workers, None)?;
            own
        }
        Some((min_cost, winner)) => {
            debug!("rank {} wins the election at cost {}", winner, min_cost);
            scatter(&mut workers, Some(winner))?;

            let best = summaries
                .iter()
                .find(|summary| summary.rank == winner)
                .and_then(|summary| summary.best)
                .expect("the winner was elected among ranks holding a best");
            let worker = workers
                .iter_mut()
                .find(|worker| worker.rank == winner)
                .expect("the winner is a spawned rank");

            let payload: RoutePayload = protocol::read_message(&mut worker.output)?;
            if payload.nodes.len() != best.route_len {
                return Err(DistributedError::LengthMismatch {
                    announced: best.route_len,
                    received: payload.nodes.len(),
                });
            }
            let route = Route::new(payload.nodes).ok_or(DistributedError::MalformedRoute)?;
            Some(Evaluated {
                cost: min_cost,
                index: best.candidate_index,
                route,
            })
        }
    };

    for mut worker in workers {
        drop(worker.input);
        let status = worker.child.wait()?;
        if !status.success() {
            return Err(DistributedError::WorkerFailed {
                rank: worker.rank,
                status,
            });
        }
    }

    Ok(result)
}
