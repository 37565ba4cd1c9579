//! Worker-rank body of the distributed search.

use std::io::{BufRead, Write};
use std::ops::Range;

use log::debug;

use crate::model::{Constraints, Graph};
use crate::search;

use super::protocol::{self, BestSummary, Directive, DistributedError, RoutePayload, Summary};

/// Searches one shard and runs the two-phase exchange over the given
/// channels.
///
/// The shard result is announced as a [`Summary`]; the route itself is only
/// written if the coordinator answers with [`Directive::SendRoute`]. The
/// channels are plain reader/writer pairs, which in production are the
/// process's stdio.
pub fn run<R, W>(
    graph: &Graph,
    limits: &Constraints,
    rank: usize,
    candidates: Range<u64>,
    threads: usize,
    input: &mut R,
    output: &mut W,
) -> Result<(), DistributedError>
where
    R: BufRead,
    W: Write,
{
    debug!(
        "rank {} searching candidates {}..{}",
        rank, candidates.start, candidates.end
    );
    let found = search::search_range(graph, limits, candidates, threads);

    let summary = Summary {
        rank,
        best: found.as_ref().map(|best| BestSummary {
            cost: best.cost,
            candidate_index: best.index,
            route_len: best.route.len(),
        }),
    };
    protocol::write_message(output, &summary)?;

    match protocol::read_message::<Directive, _>(input)? {
        Directive::SendRoute => {
            let nodes = found.map(|best| best.route.into_nodes()).unwrap_or_default();
            protocol::write_message(output, &RoutePayload { nodes })?;
        }
        Directive::Shutdown => {}
    }
    Ok(())
}
